// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::ExportError;

/// Tunables for the fetch side of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Fixed pause before every outbound request.
    pub delay: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    pub primary_url: String,
    pub fallback_url: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(REQUEST_PAUSE_MS),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
            primary_url: s!(HOOPSHYPE_URL),
            fallback_url: s!(BBREF_URL),
        }
    }
}

/// Tunables for the service layer (cache + exports).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceOptions {
    pub freshness: chrono::Duration,
    pub export_dir: PathBuf,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            freshness: chrono::Duration::seconds(FRESHNESS_SECS),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub service: ServiceOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json | ExportFormat::Xlsx => None,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "excel" | "spreadsheet" => Ok(ExportFormat::Xlsx),
            _ => Err(ExportError::UnsupportedFormat(s!(s))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ext())
    }
}
