use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Name of the synthetic nationwide aggregate row in the source data.
pub const UNITED_STATES: &str = "United States";

/// Suffix carried by the derived log-transformed columns.
pub const LOG_SUFFIX: &str = "_log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Disease {
    Covid19,
    Pneumonia,
    Influenza,
    Total,
}

impl Disease {
    pub const ALL: [Disease; 4] = [
        Disease::Covid19,
        Disease::Pneumonia,
        Disease::Influenza,
        Disease::Total,
    ];

    /// Header of the raw death-count column in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Disease::Covid19 => "COVID-19 Deaths",
            Disease::Pneumonia => "Pneumonia Deaths",
            Disease::Influenza => "Influenza Deaths",
            Disease::Total => "Total Deaths",
        }
    }

    pub fn log_column(self) -> &'static str {
        match self {
            Disease::Covid19 => "COVID-19 Deaths_log",
            Disease::Pneumonia => "Pneumonia Deaths_log",
            Disease::Influenza => "Influenza Deaths_log",
            Disease::Total => "Total Deaths_log",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Disease::Covid19 => 0,
            Disease::Pneumonia => 1,
            Disease::Influenza => 2,
            Disease::Total => 3,
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.column() == column)
    }
}

/// A selectable death-count column: raw counts or their natural log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Measure {
    pub disease: Disease,
    pub log: bool,
}

impl Measure {
    pub const fn raw(disease: Disease) -> Self {
        Self {
            disease,
            log: false,
        }
    }

    pub const fn log(disease: Disease) -> Self {
        Self { disease, log: true }
    }

    pub fn column(self) -> &'static str {
        if self.log {
            self.disease.log_column()
        } else {
            self.disease.column()
        }
    }

    /// Selector options: the four raw columns, optionally followed by
    /// their log variants.
    pub fn options(with_log: bool) -> Vec<Measure> {
        let mut options: Vec<Measure> = Disease::ALL.into_iter().map(Measure::raw).collect();
        if with_log {
            options.extend(Disease::ALL.into_iter().map(Measure::log));
        }
        options
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Measure {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (base, log) = match trimmed.strip_suffix(LOG_SUFFIX) {
            Some(base) => (base, true),
            None => (trimmed, false),
        };
        Disease::from_column(base)
            .map(|disease| Measure { disease, log })
            .ok_or_else(|| DomainError::UnknownMeasure(s.to_string()))
    }
}

impl TryFrom<String> for Measure {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Measure> for String {
    fn from(value: Measure) -> Self {
        value.column().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    TimeSeries,
    BoxViolin,
    ScatterMatrix,
    Heatmap,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::TimeSeries,
        PanelKind::BoxViolin,
        PanelKind::ScatterMatrix,
        PanelKind::Heatmap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PanelKind::TimeSeries => "time-series",
            PanelKind::BoxViolin => "box-violin",
            PanelKind::ScatterMatrix => "scatter-matrix",
            PanelKind::Heatmap => "heatmap",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            PanelKind::TimeSeries => "Time-Series Graph Controls",
            PanelKind::BoxViolin => "Box_Violin Graph Controls",
            PanelKind::ScatterMatrix => "Scatterplot matrix Controls",
            PanelKind::Heatmap => "Heatmap Controls",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownPanel(s.to_string()))
    }
}
