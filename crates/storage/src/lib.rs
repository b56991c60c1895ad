use std::{
    collections::{BTreeSet, HashSet},
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use shared::domain::{Disease, Measure};
use thiserror::Error;
use tracing::{debug, info};

pub mod derive;

use derive::{log_guard, normalize_year, parse_count, parse_date, week_start};

pub const STATE_COLUMN: &str = "State";
pub const END_DATE_COLUMN: &str = "End Date";
pub const YEAR_COLUMN: &str = "Year";

/// Columns computed at load time, in the order `columns()` reports them.
pub const DERIVED_COLUMNS: [&str; 7] = [
    "Month",
    "Year",
    "Week",
    "COVID-19 Deaths_log",
    "Pneumonia Deaths_log",
    "Influenza Deaths_log",
    "Total Deaths_log",
];

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open dataset '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("line {line}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset contains no rows")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: String,
    pub end_date: NaiveDate,
    pub month: u32,
    pub year: i32,
    pub week: NaiveDate,
    counts: [Option<i64>; 4],
    logs: [f64; 4],
}

impl Record {
    pub fn new(
        state: impl Into<String>,
        end_date: NaiveDate,
        year_label: Option<&str>,
        counts: [Option<i64>; 4],
    ) -> Self {
        let year = match year_label {
            Some(label) => normalize_year(label, end_date),
            None => end_date.year(),
        };
        Self {
            state: state.into(),
            end_date,
            month: end_date.month(),
            year,
            week: week_start(end_date),
            counts,
            logs: counts.map(log_guard),
        }
    }

    pub fn count(&self, disease: Disease) -> Option<i64> {
        self.counts[disease.index()]
    }

    pub fn log_count(&self, disease: Disease) -> f64 {
        self.logs[disease.index()]
    }

    /// Value of a raw or log column. Log columns are never missing.
    pub fn value(&self, measure: Measure) -> Option<f64> {
        if measure.log {
            Some(self.log_count(measure.disease))
        } else {
            self.count(measure.disease).map(|count| count as f64)
        }
    }
}

/// Immutable in-memory table of weekly death counts plus derived columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    source_columns: Vec<String>,
    records: Vec<Record>,
    states: Vec<String>,
    years: Vec<i32>,
}

struct ColumnIndex {
    state: usize,
    end_date: usize,
    year: Option<usize>,
    diseases: [usize; 4],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, DataLoadError> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
        };

        let mut diseases = [0; 4];
        for disease in Disease::ALL {
            diseases[disease.index()] = required(disease.column())?;
        }
        Ok(Self {
            state: required(STATE_COLUMN)?,
            end_date: required(END_DATE_COLUMN)?,
            year: position(YEAR_COLUMN),
            diseases,
        })
    }
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            states = dataset.states.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DataLoadError> {
        let mut table = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);
        let headers = table.headers()?.clone();
        let index = ColumnIndex::resolve(&headers)?;
        debug!(columns = headers.len(), "dataset header resolved");

        let mut records = Vec::new();
        for row in table.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            records.push(parse_row(&row, &index, line)?);
        }
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        Ok(Self::from_records(
            headers.iter().map(|h| h.trim().to_string()).collect(),
            records,
        ))
    }

    pub fn from_records(source_columns: Vec<String>, records: Vec<Record>) -> Self {
        let states = {
            let mut seen = HashSet::new();
            records
                .iter()
                .filter(|record| seen.insert(record.state.as_str()))
                .map(|record| record.state.clone())
                .collect()
        };
        let years = records
            .iter()
            .map(|record| record.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            source_columns,
            records,
            states,
            years,
        }
    }

    /// Restartable pass over every row in file order.
    pub fn rows(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Source columns followed by the derived ones. A source `Year` column is
    /// reported once, in its source position.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.source_columns.iter().map(String::as_str).collect();
        for derived in DERIVED_COLUMNS {
            if !columns.contains(&derived) {
                columns.push(derived);
            }
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct states in first-appearance order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|known| known == state)
    }

    /// Distinct canonical years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Minimum and maximum of the present values of `measure`.
    pub fn measure_bounds(&self, measure: Measure) -> Option<(f64, f64)> {
        self.rows()
            .filter_map(|record| record.value(measure))
            .fold(None, |bounds, value| match bounds {
                None => Some((value, value)),
                Some((low, high)) => Some((f64::min(low, value), f64::max(high, value))),
            })
    }
}

fn parse_row(row: &StringRecord, index: &ColumnIndex, line: u64) -> Result<Record, DataLoadError> {
    let cell = |position: usize| row.get(position).unwrap_or_default();
    let invalid = |column: &str, value: &str| DataLoadError::InvalidValue {
        line,
        column: column.to_string(),
        value: value.to_string(),
    };

    let raw_date = cell(index.end_date);
    let end_date = parse_date(raw_date).ok_or_else(|| invalid(END_DATE_COLUMN, raw_date))?;

    let mut counts = [None; 4];
    for disease in Disease::ALL {
        let raw = cell(index.diseases[disease.index()]);
        counts[disease.index()] = parse_count(raw).map_err(|_| invalid(disease.column(), raw))?;
    }

    Ok(Record::new(
        cell(index.state).trim(),
        end_date,
        index.year.map(cell),
        counts,
    ))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
