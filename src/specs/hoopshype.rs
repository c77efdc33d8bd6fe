// src/specs/hoopshype.rs
//! Scraping *spec* for the HoopsHype player salary page.
//!
//! Layout:
//! - One salary table (or a `div.table-responsive` wrapper on older markup).
//! - First `<tr>` is the header.
//! - Cell 0: `<a>Player Name</a>` plus a team logo `<img alt="LAL ...">`;
//!   the first three characters of `alt`, uppercased, are the team code.
//! - Cells 1..=4: salary for season, season+1, season+2, season+3.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{salary_at, selector, text_of, SalarySource};
use crate::config::consts::HOOPSHYPE_URL;
use crate::model::{contract_sum, SalaryRow, Season, SourceId, CONTRACT_YEARS};
use crate::teams::{self, UNKNOWN_CODE};

const MIN_CELLS: usize = 3;

pub struct HoopsHype {
    url: String,
}

impl HoopsHype {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for HoopsHype {
    fn default() -> Self {
        Self::new(HOOPSHYPE_URL)
    }
}

impl SalarySource for HoopsHype {
    fn id(&self) -> SourceId {
        SourceId::HoopsHype
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
    logo: Selector,
}

impl Selectors {
    fn new() -> Option<Self> {
        Some(Self {
            row: selector("tr")?,
            cell: selector("td, th")?,
            link: selector("a")?,
            logo: selector("img")?,
        })
    }
}

pub fn extract(doc: &str, season: Season) -> Vec<SalaryRow> {
    let html = Html::parse_document(doc);
    let (Some(sels), Some(table_sel), Some(wrapper_sel)) = (
        Selectors::new(),
        selector("table"),
        selector("div.table-responsive"),
    ) else {
        return Vec::new();
    };

    let Some(table) = html
        .select(&table_sel)
        .next()
        .or_else(|| html.select(&wrapper_sel).next())
    else {
        debug!("hoopshype: salary table not found");
        return Vec::new();
    };

    table
        .select(&sels.row)
        .skip(1) // header
        .filter_map(|tr| parse_row(tr, season, &sels))
        .collect()
}

/* ---------- helpers ---------- */

fn parse_row(tr: ElementRef<'_>, season: Season, sels: &Selectors) -> Option<SalaryRow> {
    let cells: Vec<ElementRef<'_>> = tr.select(&sels.cell).collect();
    if cells.len() < MIN_CELLS {
        return None;
    }

    let first = cells[0];
    let player_name = text_of(first.select(&sels.link).next()?);
    if player_name.is_empty() {
        return None;
    }

    let team_abbr = first
        .select(&sels.logo)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map(team_code_from_alt)
        .unwrap_or_else(|| s!(UNKNOWN_CODE));

    let mut salaries = [0u64; CONTRACT_YEARS];
    for (i, slot) in salaries.iter_mut().enumerate() {
        *slot = salary_at(&cells, i + 1);
    }
    let total = contract_sum(&salaries);

    Some(SalaryRow::new(player_name, team_abbr, season, salaries, total, SourceId::HoopsHype))
}

/// "lal logo" → "LAL"; anything that is not a 2-3 letter code → "UNK"
fn team_code_from_alt(alt: &str) -> String {
    teams::team_code(&alt.trim().chars().take(3).collect::<String>())
}
