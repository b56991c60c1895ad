//! Per-panel trigger gate: a panel stays idle until its first trigger and
//! is refreshed in place afterwards.

use shared::{
    domain::PanelKind,
    protocol::{Figure, PanelControls, PanelStatus, PanelView},
};
use tracing::warn;

use crate::{render, ApiContext};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Idle,
    Rendered(Figure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelUpdate {
    /// Nothing was recomputed; the panel shows whatever it showed before.
    NoUpdate,
    Rendered(Figure),
}

#[derive(Debug, Clone)]
pub struct Panel {
    kind: PanelKind,
    clicks: u64,
    state: PanelState,
}

impl Panel {
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            clicks: 0,
            state: PanelState::Idle,
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn view(&self) -> PanelView {
        let (status, figure) = match &self.state {
            PanelState::Idle => (PanelStatus::Idle, None),
            PanelState::Rendered(figure) => (PanelStatus::Rendered, Some(figure.clone())),
        };
        PanelView {
            panel: self.kind,
            clicks: self.clicks,
            status,
            figure,
        }
    }

    /// Handles one event carrying the trigger count `n_clicks`.
    ///
    /// A zero count never recomputes. Controls that fail validation or
    /// belong to another panel leave the current chart in place.
    pub fn update(
        &mut self,
        ctx: &ApiContext,
        n_clicks: u64,
        controls: &PanelControls,
    ) -> PanelUpdate {
        self.clicks = self.clicks.max(n_clicks);
        if n_clicks == 0 {
            return PanelUpdate::NoUpdate;
        }
        if controls.kind() != self.kind {
            warn!(panel = %self.kind, submitted = %controls.kind(), "controls for another panel");
            return PanelUpdate::NoUpdate;
        }

        match render(ctx, controls) {
            Ok(figure) => {
                self.state = PanelState::Rendered(figure.clone());
                PanelUpdate::Rendered(figure)
            }
            Err(error) => {
                warn!(panel = %self.kind, %error, "skipping recomputation");
                PanelUpdate::NoUpdate
            }
        }
    }

    /// Presses the panel's update button.
    pub fn trigger(&mut self, ctx: &ApiContext, controls: &PanelControls) -> PanelUpdate {
        let n_clicks = self.clicks + 1;
        self.update(ctx, n_clicks, controls)
    }
}

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod tests;
