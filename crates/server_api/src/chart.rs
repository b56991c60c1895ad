//! Turns engine results into Plotly figures.

use shared::{
    domain::Measure,
    protocol::{
        Axis, ColorBar, Figure, HeatmapTrace, Layout, LineTrace, SplomDimension, SplomTrace,
        Title, Trace, ViolinTrace, Visibility,
    },
};

use crate::engine::{BoxViolinResult, Heatmap, ScatterMatrixResult, TimeSeriesResult};

pub const NO_DATA_TITLE: &str = "No Data Available";
pub const NOT_ENOUGH_DATA_TITLE: &str = "Not enough data available";
pub const HEATMAP_COLORSCALE: &str = "Reds";
pub const TALL_FIGURE_HEIGHT: u32 = 1200;
const SCATTER_OPACITY: f64 = 0.7;

fn titled_axis(title: &str) -> Axis {
    Axis {
        title: Some(Title::new(title)),
        ..Axis::default()
    }
}

pub fn time_series_figure(result: &TimeSeriesResult) -> Figure {
    let TimeSeriesResult::Series(series) = result else {
        return Figure::placeholder(NO_DATA_TITLE);
    };

    let trace = LineTrace {
        name: series.measure.to_string(),
        mode: "lines".into(),
        x: series.points.iter().map(|point| point.week).collect(),
        y: series.points.iter().map(|point| point.value).collect(),
        hovertemplate: Some("Week=%{x|%Y-%m-%d}<br>Deaths=%{y}<extra></extra>".into()),
    };
    let yaxis = Axis {
        range: series.y_range.map(|(low, high)| [low, high]),
        ..titled_axis("Deaths")
    };

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout: Layout {
            xaxis: Some(titled_axis("Week")),
            yaxis: Some(yaxis),
            ..Layout::titled(format!("{} in {} Over Time", series.measure, series.state))
        },
    }
}

/// `measure` and `state` only feed the titles.
pub fn box_violin_figure(result: &BoxViolinResult, measure: Measure, state: &str) -> Figure {
    let BoxViolinResult::Distributions(distributions) = result else {
        return Figure::placeholder(format!("{NO_DATA_TITLE} for {measure} in {state}"));
    };

    let data = distributions
        .iter()
        .map(|group| {
            let label = group.year.to_string();
            Trace::Violin(ViolinTrace {
                name: label.clone(),
                x: vec![label; group.values.len()],
                y: group.values.clone(),
                inner_box: Visibility { visible: true },
                points: "outliers".into(),
                summary: group.summary.clone(),
            })
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            xaxis: Some(Axis {
                kind: Some("category".into()),
                ..titled_axis("Year")
            }),
            yaxis: Some(titled_axis(measure.column())),
            ..Layout::titled(format!("Violin Plot of {measure} in {state}"))
        },
    }
}

pub fn scatter_matrix_figure(result: &ScatterMatrixResult) -> Figure {
    let ScatterMatrixResult::Matrix(matrix) = result else {
        return Figure::placeholder(NOT_ENOUGH_DATA_TITLE);
    };

    let dimensions = matrix
        .dimensions
        .iter()
        .enumerate()
        .map(|(column, measure)| SplomDimension {
            label: measure.to_string(),
            values: matrix.samples.iter().map(|sample| sample[column]).collect(),
        })
        .collect();

    Figure {
        data: vec![Trace::Splom(SplomTrace {
            dimensions,
            opacity: SCATTER_OPACITY,
        })],
        layout: Layout {
            height: Some(TALL_FIGURE_HEIGHT),
            ..Layout::titled("Scatterplot Matrix of Log Deaths")
        },
    }
}

pub fn heatmap_figure(heatmap: &Heatmap) -> Figure {
    if heatmap.is_empty() {
        return Figure::placeholder(NO_DATA_TITLE);
    }

    let trace = HeatmapTrace {
        x: heatmap.states.clone(),
        y: heatmap.years.iter().map(i32::to_string).collect(),
        z: heatmap.cells.clone(),
        colorscale: HEATMAP_COLORSCALE.into(),
        colorbar: ColorBar {
            title: Title::new("Deaths"),
        },
        hoverongaps: false,
    };

    Figure {
        data: vec![Trace::Heatmap(trace)],
        layout: Layout {
            xaxis: Some(titled_axis("State")),
            yaxis: Some(Axis {
                kind: Some("category".into()),
                ..titled_axis("Year")
            }),
            height: Some(TALL_FIGURE_HEIGHT),
            ..Layout::titled(format!("Heatmap of {} by Year", heatmap.measure))
        },
    }
}

#[cfg(test)]
#[path = "tests/chart_tests.rs"]
mod tests;
