use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures while reading the review table. Any of these aborts startup.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read data file '{source_label}': {message}")]
    Unreadable { source_label: String, message: String },

    #[error("Missing required column(s) in '{source_label}': {}", missing.join(", "))]
    MissingColumns {
        source_label: String,
        missing: Vec<String>,
    },

    #[error("Invalid value {value:?} for column '{column}' on line {line}")]
    InvalidRow {
        line: u64,
        column: String,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
