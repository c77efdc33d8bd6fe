// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::Season;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid season: {0:?}")]
pub struct SeasonError(pub String);

/// Anything that can go wrong while writing a table to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl ExportError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io { path: path.into(), source }
    }
}

/// Failure indicator returned by the service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no salary data available for season {0}")]
    NoData(Season),

    #[error("no payroll data found for team {0}")]
    TeamNotFound(String),

    #[error("search query required")]
    EmptyQuery,

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
