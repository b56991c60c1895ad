//! Selector defaults, selector options and validation of submitted values.

use shared::{
    domain::{Disease, Measure, UNITED_STATES},
    protocol::{
        BoxViolinControls, ControlOptions, HeatmapControls, PanelDefaults, RangeSliderSpec,
        ScatterMatrixControls, SliderMark, TimeSeriesControls,
    },
};
use storage::Dataset;
use thiserror::Error;

pub const DEFAULT_STATE: &str = "Alabama";
pub const DEFAULT_SCATTER_YEAR: i32 = 2020;

/// The range slider is scaled to this column regardless of the selected
/// measure.
pub const SLIDER_MEASURE: Measure = Measure::raw(Disease::Covid19);

const MIN_MARK_SPACING: i64 = 500;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("range must contain exactly two values, got {0}")]
    RangeArity(usize),
}

/// Splits a submitted slider value into `(min, max)`.
pub fn parse_range(range: &[f64]) -> Result<(f64, f64), ControlError> {
    match range {
        [low, high] => Ok((*low, *high)),
        other => Err(ControlError::RangeArity(other.len())),
    }
}

pub fn range_slider(dataset: &Dataset) -> RangeSliderSpec {
    let (min, max) = dataset.measure_bounds(SLIDER_MEASURE).unwrap_or((0.0, 0.0));
    let step = ((max - min) / 10.0).floor().max(1.0);

    let (low, high) = (min as i64, max as i64);
    let mark_step = ((high - low) / 10).max(MIN_MARK_SPACING);
    let marks = (low..high)
        .step_by(mark_step as usize)
        .map(|value| SliderMark {
            value: value as f64,
            label: value.to_string(),
        })
        .collect();

    RangeSliderSpec {
        min,
        max,
        step,
        marks,
    }
}

pub fn defaults(dataset: &Dataset) -> PanelDefaults {
    let state = preferred_state(dataset, DEFAULT_STATE);
    let slider = dataset.measure_bounds(SLIDER_MEASURE).unwrap_or((0.0, 0.0));
    let year = if dataset.years().contains(&DEFAULT_SCATTER_YEAR) {
        DEFAULT_SCATTER_YEAR
    } else {
        dataset.years().first().copied().unwrap_or(DEFAULT_SCATTER_YEAR)
    };

    PanelDefaults {
        time_series: TimeSeriesControls {
            measure: Measure::raw(Disease::Covid19),
            state: state.clone(),
        },
        box_violin: BoxViolinControls {
            measure: Measure::raw(Disease::Total),
            state,
            range: vec![slider.0, slider.1],
        },
        scatter_matrix: ScatterMatrixControls {
            state: preferred_state(dataset, UNITED_STATES),
            year,
        },
        heatmap: HeatmapControls {
            measure: Measure::raw(Disease::Covid19),
        },
    }
}

pub fn control_options(dataset: &Dataset, with_log_measures: bool) -> ControlOptions {
    ControlOptions {
        measures: Measure::options(with_log_measures),
        states: dataset.states().to_vec(),
        years: dataset.years().to_vec(),
        range_slider: range_slider(dataset),
        defaults: defaults(dataset),
    }
}

fn preferred_state(dataset: &Dataset, preferred: &str) -> String {
    if dataset.has_state(preferred) {
        preferred.to_string()
    } else {
        dataset
            .states()
            .first()
            .cloned()
            .unwrap_or_else(|| preferred.to_string())
    }
}

#[cfg(test)]
#[path = "tests/controls_tests.rs"]
mod tests;
