// src/scrape.rs
//
// Fetch orchestration: walk the sources in priority order, keep the first
// non-empty extraction, and expose the convenience queries built on it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    config::ScrapeOptions,
    core::{Fetch, HttpFetcher, TransportError},
    error::ExportError,
    file,
    model::{SalaryRow, Season, SourceId, TeamSummary, TopEarner},
    progress::Progress,
    specs::{self, SalarySource},
    stats, teams,
};

/// What one fetch attempt produced. Callers must match on all three.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceOutcome {
    Rows(Vec<SalaryRow>),
    /// Page arrived but held no usable rows.
    Empty,
    TransportError(String),
}

impl SourceOutcome {
    pub fn into_rows(self) -> Vec<SalaryRow> {
        match self {
            SourceOutcome::Rows(rows) => rows,
            SourceOutcome::Empty | SourceOutcome::TransportError(_) => Vec::new(),
        }
    }
}

impl fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOutcome::Rows(rows) => write!(f, "{} rows", rows.len()),
            SourceOutcome::Empty => f.write_str("no rows"),
            SourceOutcome::TransportError(e) => write!(f, "transport error: {e}"),
        }
    }
}

pub struct Scraper {
    fetcher: Box<dyn Fetch>,
    sources: Vec<Box<dyn SalarySource>>,
}

impl Scraper {
    /// Live HTTP fetcher over the default source order.
    pub fn new(opts: &ScrapeOptions) -> Result<Self, TransportError> {
        let fetcher = HttpFetcher::new(opts)?;
        Ok(Self::with_parts(
            Box::new(fetcher),
            specs::default_sources(&opts.primary_url, &opts.fallback_url),
        ))
    }

    pub fn with_parts(fetcher: Box<dyn Fetch>, sources: Vec<Box<dyn SalarySource>>) -> Self {
        Self { fetcher, sources }
    }

    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    /// One source, no fallback.
    pub fn fetch_from(&self, source: &dyn SalarySource, season: Season) -> SourceOutcome {
        let doc = match self.fetcher.get(source.url()) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(source = %source.id(), error = %e, "salary page request failed");
                return SourceOutcome::TransportError(e.to_string());
            }
        };

        let rows = source.extract(&doc, season);
        if rows.is_empty() {
            warn!(source = %source.id(), "no salary rows extracted");
            SourceOutcome::Empty
        } else {
            let unmapped = rows.iter().filter(|r| !teams::is_known(&r.team_abbr)).count();
            info!(source = %source.id(), rows = rows.len(), unmapped, "salary rows extracted");
            SourceOutcome::Rows(rows)
        }
    }

    /// First source that yields rows wins. When none do, transport failures
    /// are reported (joined) ahead of a plain `Empty`.
    pub fn fetch_salaries(&self, season: Season) -> SourceOutcome {
        info!(%season, "fetching all player salaries");
        let mut failures: Vec<String> = Vec::new();

        for source in &self.sources {
            match self.fetch_from(source.as_ref(), season) {
                SourceOutcome::Rows(rows) => return SourceOutcome::Rows(rows),
                SourceOutcome::Empty => {}
                SourceOutcome::TransportError(e) => failures.push(e),
            }
        }

        warn!(%season, "no salary source produced rows");
        if failures.is_empty() {
            SourceOutcome::Empty
        } else {
            SourceOutcome::TransportError(failures.join("; "))
        }
    }

    /// Rows from the first productive source; empty when every source failed.
    pub fn get_all_player_salaries(&self, season: Season) -> Vec<SalaryRow> {
        self.fetch_salaries(season).into_rows()
    }

    /// Rows whose team code equals `team` (case-insensitive); all rows for `None`.
    pub fn get_team_payroll(&self, team: Option<&str>, season: Season) -> Vec<SalaryRow> {
        filter_team(self.get_all_player_salaries(season), team)
    }

    pub fn get_salary_by_team(&self, season: Season) -> BTreeMap<String, Vec<SalaryRow>> {
        stats::salary_by_team(&self.get_all_player_salaries(season), season)
    }

    pub fn team_salary_summary(&self, season: Season) -> Vec<TeamSummary> {
        stats::team_salary_summary(&self.get_all_player_salaries(season), season)
    }

    pub fn highest_paid_players(&self, limit: usize, season: Season) -> Vec<TopEarner> {
        stats::highest_paid_players(&self.get_all_player_salaries(season), limit, season)
    }

    /// One live fetch, then the whole CSV bundle into `dir`.
    pub fn export_all_team_salaries(
        &self,
        season: Season,
        dir: &Path,
        progress: Option<&mut dyn Progress>,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let rows = self.get_all_player_salaries(season);
        if rows.is_empty() {
            warn!(%season, "nothing to export");
        }
        file::export_season_bundle(&rows, season, dir, progress)
    }
}

pub fn filter_team(rows: Vec<SalaryRow>, team: Option<&str>) -> Vec<SalaryRow> {
    match team.map(str::trim) {
        None => rows,
        Some(code) => rows
            .into_iter()
            .filter(|r| r.team_abbr.eq_ignore_ascii_case(code))
            .collect(),
    }
}
