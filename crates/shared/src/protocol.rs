use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Measure, PanelKind};

/// Chart description in the shape Plotly.js accepts for `Plotly.react`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Chart-shaped output that only carries a title.
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::titled(title),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(LineTrace),
    Violin(ViolinTrace),
    Splom(SplomTrace),
    Heatmap(HeatmapTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    pub name: String,
    pub mode: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolinTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(rename = "box")]
    pub inner_box: Visibility,
    pub points: String,
    /// Precomputed box statistics; Plotly ignores the key, clients may use it.
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplomTrace {
    pub dimensions: Vec<SplomDimension>,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplomDimension {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapTrace {
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<Option<f64>>>,
    pub colorscale: String,
    pub colorbar: ColorBar,
    pub hoverongaps: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Layout {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Title::new(title),
            xaxis: None,
            yaxis: None,
            height: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStatus {
    Idle,
    Rendered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub panel: PanelKind,
    pub clicks: u64,
    pub status: PanelStatus,
    pub figure: Option<Figure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesControls {
    pub measure: Measure,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxViolinControls {
    pub measure: Measure,
    pub state: String,
    /// Range-slider value; anything other than two numbers is rejected
    /// when the panel recomputes, not while decoding.
    #[serde(default, deserialize_with = "slider_values")]
    pub range: Vec<f64>,
}

/// `null`, scalars and arrays holding non-numbers decode as an empty range.
fn slider_values<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .iter()
            .map(serde_json::Value::as_f64)
            .collect::<Option<Vec<f64>>>(),
        _ => None,
    };
    Ok(values.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterMatrixControls {
    pub state: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapControls {
    pub measure: Measure,
}

/// Submitted selector values for exactly one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "panel", rename_all = "kebab-case")]
pub enum PanelControls {
    TimeSeries(TimeSeriesControls),
    BoxViolin(BoxViolinControls),
    ScatterMatrix(ScatterMatrixControls),
    Heatmap(HeatmapControls),
}

impl PanelControls {
    pub fn kind(&self) -> PanelKind {
        match self {
            PanelControls::TimeSeries(_) => PanelKind::TimeSeries,
            PanelControls::BoxViolin(_) => PanelKind::BoxViolin,
            PanelControls::ScatterMatrix(_) => PanelKind::ScatterMatrix,
            PanelControls::Heatmap(_) => PanelKind::Heatmap,
        }
    }

    /// Decodes an untagged request body for the panel named in the route.
    pub fn from_json(kind: PanelKind, body: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            PanelKind::TimeSeries => PanelControls::TimeSeries(serde_json::from_value(body)?),
            PanelKind::BoxViolin => PanelControls::BoxViolin(serde_json::from_value(body)?),
            PanelKind::ScatterMatrix => {
                PanelControls::ScatterMatrix(serde_json::from_value(body)?)
            }
            PanelKind::Heatmap => PanelControls::Heatmap(serde_json::from_value(body)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDefaults {
    pub time_series: TimeSeriesControls,
    pub box_violin: BoxViolinControls,
    pub scatter_matrix: ScatterMatrixControls,
    pub heatmap: HeatmapControls,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlOptions {
    pub measures: Vec<Measure>,
    pub states: Vec<String>,
    pub years: Vec<i32>,
    pub range_slider: RangeSliderSpec,
    pub defaults: PanelDefaults,
}
