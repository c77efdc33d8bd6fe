// src/model.rs
//
// Typed rows for the pipeline. Salary years are indexed by season offset
// (0 = the scraped season, 1..3 = out-years), never by a per-season key.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SeasonError;
use crate::teams;

/// Years of contract data carried per row: Y, Y+1, Y+2, Y+3.
pub const CONTRACT_YEARS: usize = 4;

/// NBA season, named by the year its second half falls in ("2025" = 2024-25).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub u16);

impl Season {
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// October onwards belongs to next year's season.
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year().clamp(0, i32::from(u16::MAX) - 1) as u16;
        if date.month() >= 10 { Season(year + 1) } else { Season(year) }
    }

    pub fn plus(self, years: usize) -> Season {
        Season(self.0.saturating_add(years as u16))
    }

    /// Offset of `later` inside a contract window starting at `self`.
    pub fn years_until(self, later: Season) -> Option<usize> {
        later.0
            .checked_sub(self.0)
            .map(usize::from)
            .filter(|&d| d < CONTRACT_YEARS)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .filter(|y| (1947..=9999).contains(y))
            .map(Season)
            .ok_or_else(|| SeasonError(s!(s)))
    }
}

/// Which extractor produced a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    #[serde(rename = "HoopsHype")]
    HoopsHype,
    #[serde(rename = "Basketball Reference")]
    BasketballReference,
}

impl SourceId {
    pub fn label(self) -> &'static str {
        match self {
            SourceId::HoopsHype => "HoopsHype",
            SourceId::BasketballReference => "Basketball Reference",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One player's contract snapshot for a season.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRow {
    pub player_name: String,
    pub team_abbr: String,
    pub team_name: String,
    pub season: Season,
    pub salaries: [u64; CONTRACT_YEARS],
    pub total_guaranteed: u64,
    pub source: SourceId,
}

impl SalaryRow {
    /// Builds a row, resolving the team display name from the static table.
    pub fn new(
        player_name: impl Into<String>,
        team_abbr: impl Into<String>,
        season: Season,
        salaries: [u64; CONTRACT_YEARS],
        total_guaranteed: u64,
        source: SourceId,
    ) -> Self {
        let team_abbr = team_abbr.into();
        Self {
            player_name: player_name.into(),
            team_name: s!(teams::team_name(&team_abbr)),
            team_abbr,
            season,
            salaries,
            total_guaranteed,
            source,
        }
    }

    /// Salary for the season the row was scraped for.
    pub fn current_salary(&self) -> u64 {
        self.salaries[0]
    }

    /// Salary attributable to `season`; 0 outside the contract window.
    pub fn salary_for(&self, season: Season) -> u64 {
        self.season
            .years_until(season)
            .map(|i| self.salaries[i])
            .unwrap_or(0)
    }
}

/// Sum of the contract years, saturating.
pub fn contract_sum(salaries: &[u64; CONTRACT_YEARS]) -> u64 {
    salaries.iter().fold(0u64, |acc, &v| acc.saturating_add(v))
}

/// Per-team payroll roll-up. Derived from rows, never edited on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_abbr: String,
    pub team_name: String,
    pub total_payroll: u64,
    pub average_salary: f64,
    pub median_salary: f64,
    pub highest_paid_player: String,
    pub highest_salary: u64,
    pub lowest_paid_player: String,
    pub lowest_salary: u64,
    pub num_players: usize,
    pub players_over_10m: usize,
    pub players_over_20m: usize,
    pub players_over_30m: usize,
}

/// Projection returned by the top-N ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEarner {
    pub player_name: String,
    pub team_abbr: String,
    pub team_name: String,
    pub season: Season,
    pub salary: u64,
    pub total_guaranteed: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalaryBucket {
    pub label: String,
    pub min: u64,
    /// Exclusive; `None` for the open-ended top bucket.
    pub max: Option<u64>,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalaryDistribution {
    pub season: Season,
    pub total_players: usize,
    pub buckets: Vec<SalaryBucket>,
}

/// One team's rows plus the roll-up the API layer shows next to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPayroll {
    pub team: String,
    pub season: Season,
    pub players: Vec<SalaryRow>,
    pub total_payroll: u64,
    pub player_count: usize,
}

/// Everything the dashboard needs for one season; this is what gets cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalaryDataset {
    pub season: Season,
    pub players: Vec<SalaryRow>,
    pub team_summaries: Vec<TeamSummary>,
    pub top_players: Vec<TopEarner>,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn season_rolls_over_in_october() {
        assert_eq!(Season::for_date(date(2024, 9, 30)), Season(2024));
        assert_eq!(Season::for_date(date(2024, 10, 1)), Season(2025));
        assert_eq!(Season::for_date(date(2025, 3, 15)), Season(2025));
    }

    #[test]
    fn season_parse() {
        assert_eq!(" 2025 ".parse::<Season>().unwrap(), Season(2025));
        assert!("20x5".parse::<Season>().is_err());
        assert!("12".parse::<Season>().is_err());
    }

    #[test]
    fn salary_for_uses_offsets() {
        let row = SalaryRow::new("A", "LAL", Season(2025), [40, 41, 42, 43], 166, SourceId::HoopsHype);
        assert_eq!(row.team_name, "Los Angeles Lakers");
        assert_eq!(row.current_salary(), 40);
        assert_eq!(row.salary_for(Season(2025)), 40);
        assert_eq!(row.salary_for(Season(2027)), 42);
        assert_eq!(row.salary_for(Season(2029)), 0);
        assert_eq!(row.salary_for(Season(2024)), 0);
        assert_eq!(contract_sum(&row.salaries), 166);
        assert_eq!(contract_sum(&[u64::MAX, 1, 0, 0]), u64::MAX);
    }

    #[test]
    fn unmapped_team_is_unknown() {
        let row = SalaryRow::new("B", "UNK", Season(2025), [0; 4], 0, SourceId::BasketballReference);
        assert_eq!(row.team_name, "Unknown");
    }

    #[test]
    fn source_serializes_as_label() {
        let v = serde_json::to_value(SourceId::BasketballReference).unwrap();
        assert_eq!(v, serde_json::json!("Basketball Reference"));
    }
}
