use crate::app_state::AppState;
use server_api::PanelUpdate;
use shared::{
    domain::PanelKind,
    error::{ApiError, ErrorCode},
    protocol::{PanelControls, PanelView},
};
use tracing::{debug, info};

pub fn panel_route() -> &'static str {
    "/api/panels/:panel"
}

pub fn panel_update_route() -> &'static str {
    "/api/panels/:panel/update"
}

pub fn resolve_panel(raw: &str) -> Result<PanelKind, ApiError> {
    raw.parse::<PanelKind>().map_err(ApiError::from)
}

pub(crate) async fn panel_view(state: &AppState, kind: PanelKind) -> PanelView {
    state.panel(kind).lock().await.view()
}

/// One "Update Graph" press: bumps the panel's trigger and recomputes it
/// from the submitted selector values.
pub(crate) async fn update_panel(
    state: &AppState,
    kind: PanelKind,
    body: serde_json::Value,
) -> Result<PanelView, ApiError> {
    let controls = PanelControls::from_json(kind, body).map_err(|e| {
        ApiError::new(
            ErrorCode::Validation,
            format!("invalid {kind} controls: {e}"),
        )
    })?;

    let mut panel = state.panel(kind).lock().await;
    match panel.trigger(&state.api, &controls) {
        PanelUpdate::Rendered(figure) => info!(
            panel = %kind,
            clicks = panel.clicks(),
            placeholder = figure.is_placeholder(),
            "panel updated"
        ),
        PanelUpdate::NoUpdate => debug!(panel = %kind, clicks = panel.clicks(), "panel unchanged"),
    }
    Ok(panel.view())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
