use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError – fatal, raised while reading the dataset at startup
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading the source table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow conversion failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("the file has no columns")]
    Empty,

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("column '{0}' must be numeric")]
    NotNumeric(String),
}

// ---------------------------------------------------------------------------
// InvalidSelector – recoverable, raised per projection request
// ---------------------------------------------------------------------------

/// The per-widget selectors of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    SchoolType,
    Gender,
    CorrelationVariable,
    CategoryVariable,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::SchoolType => write!(f, "school type"),
            Selector::Gender => write!(f, "gender"),
            Selector::CorrelationVariable => write!(f, "correlation variable"),
            Selector::CategoryVariable => write!(f, "category variable"),
        }
    }
}

/// A selector value outside its enumerated domain.
///
/// The request is rejected; whatever the widget displayed before stays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {selector}")]
pub struct InvalidSelector {
    pub selector: Selector,
    pub value: String,
}

impl InvalidSelector {
    pub fn new(selector: Selector, value: impl Into<String>) -> Self {
        Self {
            selector,
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
