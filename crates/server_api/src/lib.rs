use std::sync::Arc;

use shared::protocol::{ControlOptions, Figure, PanelControls};
use storage::Dataset;
use tracing::debug;

pub mod chart;
pub mod controls;
pub mod engine;
pub mod panel;
pub mod stats;

pub use controls::ControlError;
pub use panel::{Panel, PanelState, PanelUpdate};

#[derive(Clone)]
pub struct ApiContext {
    pub dataset: Arc<Dataset>,
    /// Offer the `_log` variants in the measure selectors.
    pub with_log_measures: bool,
}

impl ApiContext {
    pub fn new(dataset: Dataset, with_log_measures: bool) -> Self {
        Self {
            dataset: Arc::new(dataset),
            with_log_measures,
        }
    }
}

pub fn control_options(ctx: &ApiContext) -> ControlOptions {
    controls::control_options(&ctx.dataset, ctx.with_log_measures)
}

/// Runs the panel's filter-aggregate step and maps the result to a figure.
pub fn render(ctx: &ApiContext, panel_controls: &PanelControls) -> Result<Figure, ControlError> {
    let dataset = ctx.dataset.as_ref();
    let figure = match panel_controls {
        PanelControls::TimeSeries(c) => {
            chart::time_series_figure(&engine::time_series(dataset, c.measure, &c.state))
        }
        PanelControls::BoxViolin(c) => {
            let result = engine::box_violin(dataset, c.measure, &c.state, &c.range)?;
            chart::box_violin_figure(&result, c.measure, &c.state)
        }
        PanelControls::ScatterMatrix(c) => {
            chart::scatter_matrix_figure(&engine::scatter_matrix(dataset, &c.state, c.year))
        }
        PanelControls::Heatmap(c) => chart::heatmap_figure(&engine::heatmap(dataset, c.measure)),
    };
    debug!(
        panel = %panel_controls.kind(),
        traces = figure.data.len(),
        placeholder = figure.is_placeholder(),
        "panel recomputed"
    );
    Ok(figure)
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
