//! Error types for the test data layer

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    /// The workbook could not be opened or one of its sheets could not be decoded.
    #[error("Cannot read test data source {}: {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("Sheet '{sheet}' not found")]
    SheetNotFound { sheet: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DataError {
    /// True for the kinds that must abort a run at startup.
    pub fn is_fatal_load(&self) -> bool {
        matches!(
            self,
            DataError::SourceUnreadable { .. } | DataError::SheetNotFound { .. }
        )
    }
}

pub type DataResult<T> = Result<T, DataError>;
