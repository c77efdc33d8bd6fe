// src/specs/bbref.rs
//! Scraping *spec* for the Basketball Reference contracts page.
//!
//! Layout (`table#contracts`, body rows only):
//! - Cell 0: rank (`<th>`), ignored.
//! - Cell 1: player (`<a>` when linked), cell 2: team code.
//! - Cells 3..=6: salary for season, season+1, season+2, season+3.
//! - Last cell: guaranteed total, only trusted when the row has more than
//!   7 cells. Shorter rows use the sum of the four years instead.
//! - The site repeats the header inside `<tbody>` as `tr.thead`; those rows
//!   are skipped.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{salary_at, selector, text_of, SalarySource};
use crate::config::consts::BBREF_URL;
use crate::core::normalize;
use crate::model::{contract_sum, SalaryRow, Season, SourceId, CONTRACT_YEARS};
use crate::teams;

const MIN_CELLS: usize = 4;
const PLAYER_COL: usize = 1;
const TEAM_COL: usize = 2;
const FIRST_SALARY_COL: usize = 3;
const GUARANTEED_MIN_CELLS: usize = 8;

pub struct BasketballReference {
    url: String,
}

impl BasketballReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for BasketballReference {
    fn default() -> Self {
        Self::new(BBREF_URL)
    }
}

impl SalarySource for BasketballReference {
    fn id(&self) -> SourceId {
        SourceId::BasketballReference
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn extract(&self, doc: &str, season: Season) -> Vec<SalaryRow> {
        extract(doc, season)
    }
}

struct Selectors {
    row: Selector,
    cell: Selector,
    link: Selector,
}

pub fn extract(doc: &str, season: Season) -> Vec<SalaryRow> {
    let html = Html::parse_document(doc);
    let (Some(table_sel), Some(row), Some(cell), Some(link)) = (
        selector("table#contracts"),
        selector("tbody > tr"),
        selector("td, th"),
        selector("a"),
    ) else {
        return Vec::new();
    };
    let sels = Selectors { row, cell, link };

    let Some(table) = html.select(&table_sel).next() else {
        debug!("bbref: contracts table not found");
        return Vec::new();
    };

    table
        .select(&sels.row)
        .filter(|tr| !tr.value().classes().any(|c| c == "thead"))
        .filter_map(|tr| parse_row(tr, season, &sels))
        .collect()
}

/* ---------- helpers ---------- */

fn parse_row(tr: ElementRef<'_>, season: Season, sels: &Selectors) -> Option<SalaryRow> {
    let cells: Vec<ElementRef<'_>> = tr.select(&sels.cell).collect();
    if cells.len() < MIN_CELLS {
        return None;
    }

    let player_name = link_or_cell_text(cells[PLAYER_COL], &sels.link);
    if player_name.is_empty() {
        return None;
    }

    let team_abbr = teams::team_code(&link_or_cell_text(cells[TEAM_COL], &sels.link));

    let mut salaries = [0u64; CONTRACT_YEARS];
    for (i, slot) in salaries.iter_mut().enumerate() {
        *slot = salary_at(&cells, FIRST_SALARY_COL + i);
    }

    let total_guaranteed = match cells.last() {
        Some(last) if cells.len() >= GUARANTEED_MIN_CELLS => normalize(&text_of(*last)),
        _ => contract_sum(&salaries),
    };

    Some(SalaryRow::new(
        player_name,
        team_abbr,
        season,
        salaries,
        total_guaranteed,
        SourceId::BasketballReference,
    ))
}

fn link_or_cell_text(cell: ElementRef<'_>, link: &Selector) -> String {
    match cell.select(link).next() {
        Some(a) => text_of(a),
        None => text_of(cell),
    }
}
