// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific extraction for the salary sources. Each spec knows *where the
//! ground truth lives in one page's HTML* and turns it into [`SalaryRow`]s.
//!
//! ## What lives here
//! - **Pure HTML parsing** of an already-fetched document (`scraper` DOM +
//!   CSS selectors).
//! - **Row admission**: which `<tr>`s count as player rows, which cells hold
//!   the name, team and salary years.
//! - **Normalization** of every salary cell through [`crate::core::normalize`].
//!
//! ## What does **not** live here
//! - **Networking, delays, fallback order** – that's [`crate::scrape::Scraper`].
//! - **Caching** – [`crate::store`].
//! - **Aggregation or export** – [`crate::stats`], [`crate::file`].
//!
//! ## Conventions & invariants
//! - Extraction never fails. Missing markup means an empty `Vec`, so the
//!   orchestrator can move on to the next source.
//! - Missing salary cells are `0`, not a dropped row.
//! - Team codes are uppercase; unresolvable codes become `UNK` and the team
//!   name `"Unknown"`.
//!
//! ## Current specs
//! - [`hoopshype`] – primary: one salary table, name + team logo in cell 0.
//! - [`bbref`] – fallback: `table#contracts`, name/team in cells 1 and 2.
//!
//! A new source is one more [`SalarySource`] impl; nothing upstream changes.

use scraper::{ElementRef, Selector};

use crate::core::{normalize, sanitize::clean_cell};
use crate::model::{SalaryRow, Season, SourceId};

pub mod bbref;
pub mod hoopshype;

pub use bbref::BasketballReference;
pub use hoopshype::HoopsHype;

/// One salary page: where it lives and how to read it.
pub trait SalarySource: Send + Sync {
    fn id(&self) -> SourceId;
    fn url(&self) -> &str;
    fn extract(&self, doc: &str, season: Season) -> Vec<SalaryRow>;
}

/// Primary first, then fallback.
pub fn default_sources(primary_url: &str, fallback_url: &str) -> Vec<Box<dyn SalarySource>> {
    vec![
        Box::new(HoopsHype::new(primary_url)),
        Box::new(BasketballReference::new(fallback_url)),
    ]
}

/* ---------- helpers ---------- */

pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    clean_cell(&el.text().collect::<String>())
}

/// Normalized salary in `cells[idx]`, 0 when the cell is missing.
pub(crate) fn salary_at(cells: &[ElementRef<'_>], idx: usize) -> u64 {
    cells.get(idx).map(|c| normalize(&text_of(*c))).unwrap_or(0)
}
