use super::*;
use crate::{
    engine::{self, SeriesPoint, TimeSeries},
    test_support::{dataset, date},
};
use shared::domain::{Disease, Measure};

#[test]
fn time_series_figure_is_a_line_with_padded_axis() {
    let result = TimeSeriesResult::Series(TimeSeries {
        measure: Measure::raw(Disease::Covid19),
        state: "Alabama".into(),
        points: vec![SeriesPoint {
            week: date(2020, 3, 9),
            value: Some(10.0),
        }],
        y_range: Some((9.0, 11.0)),
    });
    let figure = time_series_figure(&result);

    assert_eq!(
        figure.layout.title.text,
        "COVID-19 Deaths in Alabama Over Time"
    );
    let yaxis = figure.layout.yaxis.expect("yaxis");
    assert_eq!(yaxis.range, Some([9.0, 11.0]));
    assert_eq!(yaxis.title, Some(Title::new("Deaths")));
    let Trace::Scatter(line) = &figure.data[0] else {
        panic!("expected a line trace");
    };
    assert_eq!(line.mode, "lines");
    assert_eq!(line.x, vec![date(2020, 3, 9)]);
    assert_eq!(line.y, vec![Some(10.0)]);
}

#[test]
fn unknown_state_renders_placeholder() {
    let figure = time_series_figure(&TimeSeriesResult::NoData);
    assert!(figure.is_placeholder());
    assert_eq!(figure.layout.title.text, NO_DATA_TITLE);
}

#[test]
fn empty_box_violin_names_measure_and_state() {
    let figure = box_violin_figure(
        &engine::BoxViolinResult::Empty,
        Measure::raw(Disease::Total),
        "Alabama",
    );
    assert!(figure.is_placeholder());
    assert_eq!(
        figure.layout.title.text,
        "No Data Available for Total Deaths in Alabama"
    );
}

#[test]
fn box_violin_has_one_violin_per_year_with_outlier_points() {
    let dataset = dataset();
    let measure = Measure::raw(Disease::Covid19);
    let result = engine::box_violin(&dataset, measure, "Alabama", &[0.0, 1000.0]).expect("range");
    let figure = box_violin_figure(&result, measure, "Alabama");

    assert_eq!(figure.data.len(), 2);
    for trace in &figure.data {
        let Trace::Violin(violin) = trace else {
            panic!("expected violin traces");
        };
        assert!(violin.inner_box.visible);
        assert_eq!(violin.points, "outliers");
        assert_eq!(violin.x.len(), violin.y.len());
        assert_eq!(violin.summary.count, violin.y.len());
    }
    assert_eq!(
        figure.layout.title.text,
        "Violin Plot of COVID-19 Deaths in Alabama"
    );
}

#[test]
fn scatter_matrix_figure_is_tall_splom() {
    let dataset = dataset();
    let figure = scatter_matrix_figure(&engine::scatter_matrix(&dataset, "Alabama", 2020));
    assert_eq!(figure.layout.height, Some(TALL_FIGURE_HEIGHT));
    let Trace::Splom(splom) = &figure.data[0] else {
        panic!("expected a splom trace");
    };
    assert_eq!(splom.opacity, 0.7);
    let labels: Vec<_> = splom.dimensions.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "COVID-19 Deaths_log",
            "Pneumonia Deaths_log",
            "Influenza Deaths_log",
            "Total Deaths_log"
        ]
    );
    assert!(splom.dimensions.iter().all(|d| d.values.len() == 8));
}

#[test]
fn sparse_scatter_matrix_renders_placeholder() {
    let figure = scatter_matrix_figure(&ScatterMatrixResult::NotEnoughData { rows: 5 });
    assert!(figure.is_placeholder());
    assert_eq!(figure.layout.title.text, NOT_ENOUGH_DATA_TITLE);
}

#[test]
fn heatmap_figure_uses_reds_and_tall_layout() {
    let dataset = dataset();
    let figure = heatmap_figure(&engine::heatmap(&dataset, Measure::raw(Disease::Covid19)));
    assert_eq!(figure.layout.height, Some(TALL_FIGURE_HEIGHT));
    assert_eq!(
        figure.layout.title.text,
        "Heatmap of COVID-19 Deaths by Year"
    );
    let Trace::Heatmap(trace) = &figure.data[0] else {
        panic!("expected a heatmap trace");
    };
    assert_eq!(trace.colorscale, HEATMAP_COLORSCALE);
    assert_eq!(trace.colorbar.title.text, "Deaths");
    assert_eq!(trace.x, vec!["Alabama", "Alaska"]);
    assert_eq!(trace.y, vec!["2020", "2021"]);
    assert_eq!(trace.z[1][1], None);
}
