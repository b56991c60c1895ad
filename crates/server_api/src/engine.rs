//! Filter-and-aggregate operations, one per dashboard panel.
//!
//! Every operation is a pure function of the loaded dataset and the panel's
//! submitted controls.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use shared::{
    domain::{Disease, Measure, UNITED_STATES},
    protocol::BoxSummary,
};
use storage::Dataset;

use crate::{
    controls::{parse_range, ControlError},
    stats,
};

/// Scatter matrices need at least this many rows to be drawn.
pub const MIN_SCATTER_ROWS: usize = 6;

pub const SCATTER_DIMENSIONS: [Measure; 4] = [
    Measure::log(Disease::Covid19),
    Measure::log(Disease::Pneumonia),
    Measure::log(Disease::Influenza),
    Measure::log(Disease::Total),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub week: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub measure: Measure,
    pub state: String,
    pub points: Vec<SeriesPoint>,
    /// `None` when the state has no present values for the measure.
    pub y_range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimeSeriesResult {
    NoData,
    Series(TimeSeries),
}

pub fn time_series(dataset: &Dataset, measure: Measure, state: &str) -> TimeSeriesResult {
    if !dataset.has_state(state) {
        return TimeSeriesResult::NoData;
    }

    let mut points: Vec<SeriesPoint> = dataset
        .rows()
        .filter(|record| record.state == state)
        .map(|record| SeriesPoint {
            week: record.week,
            value: record.value(measure),
        })
        .collect();
    points.sort_by_key(|point| point.week);

    TimeSeriesResult::Series(TimeSeries {
        measure,
        state: state.to_string(),
        y_range: y_axis_range(points.iter().filter_map(|point| point.value)),
        points,
    })
}

/// Lower bound is 90% of the minimum (or 0 for non-positive minima), upper
/// bound is 110% of the maximum.
pub fn y_axis_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold(None, |bounds: Option<(f64, f64)>, value| match bounds {
        None => Some((value, value)),
        Some((low, high)) => Some((low.min(value), high.max(value))),
    })?;
    let lower = if min > 0.0 { min * 0.9 } else { 0.0 };
    Some((lower, max * 1.1))
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearDistribution {
    pub year: i32,
    pub values: Vec<f64>,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoxViolinResult {
    Empty,
    Distributions(Vec<YearDistribution>),
}

pub fn box_violin(
    dataset: &Dataset,
    measure: Measure,
    state: &str,
    range: &[f64],
) -> Result<BoxViolinResult, ControlError> {
    let (min, max) = parse_range(range)?;

    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for record in dataset.rows().filter(|record| record.state == state) {
        let Some(value) = record.value(measure) else {
            continue;
        };
        if (min..=max).contains(&value) {
            by_year.entry(record.year).or_default().push(value);
        }
    }

    let distributions: Vec<YearDistribution> = by_year
        .into_iter()
        .filter_map(|(year, values)| {
            stats::summarize(&values).map(|summary| YearDistribution {
                year,
                values,
                summary,
            })
        })
        .collect();

    if distributions.is_empty() {
        Ok(BoxViolinResult::Empty)
    } else {
        Ok(BoxViolinResult::Distributions(distributions))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterCell {
    pub x: Measure,
    pub y: Measure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterMatrix {
    pub dimensions: [Measure; 4],
    /// One row of log values per selected record, ordered like `dimensions`.
    pub samples: Vec<[f64; 4]>,
    pub cells: Vec<ScatterCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScatterMatrixResult {
    NotEnoughData { rows: usize },
    Matrix(ScatterMatrix),
}

pub fn scatter_matrix(dataset: &Dataset, state: &str, year: i32) -> ScatterMatrixResult {
    let samples: Vec<[f64; 4]> = dataset
        .rows()
        .filter(|record| record.state == state && record.year == year)
        .map(|record| SCATTER_DIMENSIONS.map(|measure| record.log_count(measure.disease)))
        .collect();

    if samples.len() < MIN_SCATTER_ROWS {
        return ScatterMatrixResult::NotEnoughData {
            rows: samples.len(),
        };
    }

    let cells = SCATTER_DIMENSIONS
        .iter()
        .flat_map(|&y| SCATTER_DIMENSIONS.iter().map(move |&x| ScatterCell { x, y }))
        .collect();

    ScatterMatrixResult::Matrix(ScatterMatrix {
        dimensions: SCATTER_DIMENSIONS,
        samples,
        cells,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub measure: Measure,
    pub years: Vec<i32>,
    pub states: Vec<String>,
    /// `cells[year_index][state_index]`; `None` where no rows exist.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.states.is_empty()
    }
}

/// Year x State sums of `measure`, leaving out the nationwide aggregate.
pub fn heatmap(dataset: &Dataset, measure: Measure) -> Heatmap {
    let mut sums: BTreeMap<(i32, &str), f64> = BTreeMap::new();
    for record in dataset.rows().filter(|record| record.state != UNITED_STATES) {
        let total = sums.entry((record.year, record.state.as_str())).or_insert(0.0);
        *total += record.value(measure).unwrap_or(0.0);
    }

    let years: Vec<i32> = sums
        .keys()
        .map(|(year, _)| *year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let states: Vec<&str> = sums
        .keys()
        .map(|(_, state)| *state)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = years
        .iter()
        .map(|year| {
            states
                .iter()
                .map(|state| sums.get(&(*year, *state)).copied())
                .collect()
        })
        .collect();

    Heatmap {
        measure,
        states: states.into_iter().map(str::to_string).collect(),
        years,
        cells,
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
