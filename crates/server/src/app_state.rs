use server_api::{ApiContext, Panel};
use shared::domain::PanelKind;
use tokio::sync::Mutex;

/// Shared by every request. The dataset inside `api` is read-only; each
/// panel's trigger state is serialized behind its own lock so one panel's
/// recomputation never waits on another's.
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    time_series: Mutex<Panel>,
    box_violin: Mutex<Panel>,
    scatter_matrix: Mutex<Panel>,
    heatmap: Mutex<Panel>,
}

impl AppState {
    pub(crate) fn new(api: ApiContext) -> Self {
        Self {
            api,
            time_series: Mutex::new(Panel::new(PanelKind::TimeSeries)),
            box_violin: Mutex::new(Panel::new(PanelKind::BoxViolin)),
            scatter_matrix: Mutex::new(Panel::new(PanelKind::ScatterMatrix)),
            heatmap: Mutex::new(Panel::new(PanelKind::Heatmap)),
        }
    }

    pub(crate) fn panel(&self, kind: PanelKind) -> &Mutex<Panel> {
        match kind {
            PanelKind::TimeSeries => &self.time_series,
            PanelKind::BoxViolin => &self.box_violin,
            PanelKind::ScatterMatrix => &self.scatter_matrix,
            PanelKind::Heatmap => &self.heatmap,
        }
    }
}
