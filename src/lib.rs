// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod model;
pub mod specs;
pub mod teams;

pub mod csv;
pub mod file;
pub mod progress;
pub mod scrape;
pub mod service;
pub mod stats;
pub mod table;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{ExportError, ServiceError};
pub use model::{SalaryDataset, SalaryRow, Season, SourceId, TeamSummary, TopEarner};
pub use scrape::{Scraper, SourceOutcome};
pub use service::SalaryService;
pub use store::{DatasetKind, SalaryCache};
