// src/service.rs
//
// The operations a frontend calls. Everything reads through the season
// cache; only `refresh` and a stale or missing entry reach the network.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::{consts::DASHBOARD_TOP_N, AppOptions, ExportFormat},
    core::TransportError,
    error::{ExportError, ServiceError, ServiceResult},
    file,
    model::{SalaryDataset, SalaryDistribution, SalaryRow, Season, TeamPayroll},
    scrape::{Scraper, SourceOutcome},
    stats,
    store::{CacheKey, Cached, DatasetKind, SalaryCache},
    table::DataSet,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportKind {
    Players,
    Teams,
    #[default]
    All,
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "players" => Ok(ExportKind::Players),
            "teams" => Ok(ExportKind::Teams),
            "all" => Ok(ExportKind::All),
            other => Err(format!("unknown export kind: {other} (expected players, teams or all)")),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportKind::Players => "players",
            ExportKind::Teams => "teams",
            ExportKind::All => "all",
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportReport {
    pub kind: String,
    pub format: String,
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RefreshReport {
    pub season: Season,
    pub player_count: usize,
    pub team_count: usize,
    pub last_updated: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub scraper_initialized: bool,
    pub cached_seasons: Vec<String>,
}

pub struct SalaryService {
    scraper: Scraper,
    cache: SalaryCache<SalaryDataset>,
    export_dir: PathBuf,
}

impl SalaryService {
    pub fn new(opts: &AppOptions) -> Result<Self, TransportError> {
        let scraper = Scraper::new(&opts.scrape)?;
        Ok(Self::with_parts(
            scraper,
            SalaryCache::new(opts.service.freshness),
            opts.service.export_dir.clone(),
        ))
    }

    pub fn with_parts(scraper: Scraper, cache: SalaryCache<SalaryDataset>, export_dir: impl Into<PathBuf>) -> Self {
        Self { scraper, cache, export_dir: export_dir.into() }
    }

    pub fn scraper(&self) -> &Scraper {
        &self.scraper
    }

    pub fn export_dir(&self) -> &std::path::Path {
        &self.export_dir
    }

    /// Season dataset from cache when fresh, else a live fetch.
    /// A failed or empty fetch returns `NoData` and keeps whatever was cached.
    pub fn load_salary_data(&self, season: Season, force_refresh: bool) -> ServiceResult<Cached<SalaryDataset>> {
        let key = CacheKey::new(DatasetKind::SalaryData, season);
        self.cache
            .get_or_refresh(key, force_refresh, |now| self.build_dataset(season, now))
    }

    pub fn team_payroll(&self, team: &str, season: Season) -> ServiceResult<TeamPayroll> {
        let data = self.load_salary_data(season, false)?;
        let players = crate::scrape::filter_team(data.value.players.clone(), Some(team));
        if players.is_empty() {
            return Err(ServiceError::TeamNotFound(s!(team)));
        }

        Ok(TeamPayroll {
            team: team.trim().to_ascii_uppercase(),
            season,
            total_payroll: stats::payroll_total(&players, season),
            player_count: players.len(),
            players,
        })
    }

    pub fn search_players(&self, query: &str, season: Season, limit: usize) -> ServiceResult<Vec<SalaryRow>> {
        if query.trim().is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        let data = self.load_salary_data(season, false)?;
        Ok(stats::search_players(&data.value.players, query, limit, season))
    }

    pub fn salary_distribution(&self, season: Season) -> ServiceResult<SalaryDistribution> {
        let data = self.load_salary_data(season, false)?;
        Ok(stats::salary_distribution(&data.value.players, season))
    }

    /// Writes `kind` for `season` under the export directory.
    /// The format name is checked before any fetch; the `All` bundle is CSV only.
    pub fn export(&self, season: Season, kind: ExportKind, format: &str) -> ServiceResult<ExportReport> {
        let format: ExportFormat = format.parse()?;
        if kind == ExportKind::All && format != ExportFormat::Csv {
            return Err(ExportError::UnsupportedFormat(format!("{format} (bundle export is CSV only)")).into());
        }
        let data = self.load_salary_data(season, false)?;
        let now = Local::now();

        let files = match kind {
            ExportKind::Players => {
                let path = file::timestamped_path(&self.export_dir, "nba_players", season, now, format);
                vec![file::export(&DataSet::players(&data.value.players, season), &path, format)?]
            }
            ExportKind::Teams => {
                let path = file::timestamped_path(&self.export_dir, "nba_teams", season, now, format);
                vec![file::export(&DataSet::team_summaries(&data.value.team_summaries), &path, format)?]
            }
            ExportKind::All => file::export_season_bundle(&data.value.players, season, &self.export_dir, None)?,
        };

        info!(%season, %kind, files = files.len(), "export finished");
        Ok(ExportReport { kind: kind.to_string(), format: format.to_string(), files })
    }

    /// Forced live fetch for `season`.
    pub fn refresh(&self, season: Season) -> ServiceResult<RefreshReport> {
        let data = self.load_salary_data(season, true)?;
        Ok(RefreshReport {
            season,
            player_count: data.value.players.len(),
            team_count: data.value.team_summaries.len(),
            last_updated: data.fetched_at,
        })
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            timestamp: self.cache.now(),
            scraper_initialized: !self.scraper.source_ids().is_empty(),
            cached_seasons: self.cache.keys().iter().map(ToString::to_string).collect(),
        }
    }

    fn build_dataset(&self, season: Season, now: DateTime<Utc>) -> ServiceResult<SalaryDataset> {
        let players = match self.scraper.fetch_salaries(season) {
            SourceOutcome::Rows(rows) => rows,
            SourceOutcome::Empty => return Err(ServiceError::NoData(season)),
            SourceOutcome::TransportError(e) => {
                warn!(%season, error = %e, "live fetch failed");
                return Err(ServiceError::NoData(season));
            }
        };

        info!(%season, players = players.len(), "salary dataset built");
        Ok(SalaryDataset {
            season,
            team_summaries: stats::team_salary_summary(&players, season),
            top_players: stats::highest_paid_players(&players, DASHBOARD_TOP_N, season),
            players,
            last_updated: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Fetch;
    use crate::model::SourceId;
    use crate::specs::SalarySource;
    use crate::store::ManualClock;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const S: Season = Season(2025);

    /// Serves whatever body is currently loaded; counts calls.
    #[derive(Clone, Default)]
    struct Switchboard {
        body: Arc<Mutex<Option<String>>>,
        calls: Arc<AtomicUsize>,
    }

    impl Switchboard {
        fn serve(&self, body: Option<&str>) {
            *self.body.lock().unwrap() = body.map(String::from);
        }
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fetch for Switchboard {
        fn get(&self, url: &str) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| TransportError::Request { url: s!(url), detail: s!("offline") })
        }
    }

    /// `name|TEAM|salary` per line.
    struct Pipe;

    impl SalarySource for Pipe {
        fn id(&self) -> SourceId { SourceId::HoopsHype }
        fn url(&self) -> &str { "mem://salaries" }
        fn extract(&self, doc: &str, season: Season) -> Vec<SalaryRow> {
            doc.lines()
                .filter_map(|l| {
                    let mut it = l.split('|');
                    let (name, team, amt) = (it.next()?, it.next()?, it.next()?.parse().ok()?);
                    Some(SalaryRow::new(name, team, season, [amt, 0, 0, 0], amt, SourceId::HoopsHype))
                })
                .collect()
        }
    }

    const PAGE: &str = "Curry|GSW|55000000\nGreen|GSW|25000000\nJames|LAL|48000000";

    fn service() -> (SalaryService, Switchboard, Arc<ManualClock>, tempfile::TempDir) {
        let board = Switchboard::default();
        let clock = Arc::new(ManualClock::at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let cache = SalaryCache::with_clock(Duration::hours(1), clock.clone());
        let scraper = Scraper::with_parts(Box::new(board.clone()), vec![Box::new(Pipe)]);
        let dir = tempfile::tempdir().unwrap();
        let svc = SalaryService::with_parts(scraper, cache, dir.path());
        (svc, board, clock, dir)
    }

    #[test]
    fn second_load_within_window_hits_cache() {
        let (svc, board, clock, _dir) = service();
        board.serve(Some(PAGE));

        let first = svc.load_salary_data(S, false).unwrap();
        assert_eq!(first.value.players.len(), 3);
        assert_eq!(first.value.team_summaries.len(), 2);
        assert_eq!(first.value.top_players[0].player_name, "Curry");
        assert_eq!(first.value.last_updated, first.fetched_at);

        clock.advance(Duration::minutes(30));
        let second = svc.load_salary_data(S, false).unwrap();
        assert!(second.from_cache);
        assert_eq!(board.calls(), 1);
    }

    #[test]
    fn expiry_and_force_go_live() {
        let (svc, board, clock, _dir) = service();
        board.serve(Some(PAGE));
        svc.load_salary_data(S, false).unwrap();

        clock.advance(Duration::minutes(61));
        svc.load_salary_data(S, false).unwrap();
        assert_eq!(board.calls(), 2);

        svc.load_salary_data(S, true).unwrap();
        assert_eq!(board.calls(), 3);
    }

    #[test]
    fn failed_refresh_keeps_previous_dataset() {
        let (svc, board, _clock, _dir) = service();
        board.serve(Some(PAGE));
        let before = svc.load_salary_data(S, false).unwrap();

        board.serve(None);
        assert!(matches!(svc.refresh(S), Err(ServiceError::NoData(s)) if s == S));

        let after = svc.load_salary_data(S, false).unwrap();
        assert!(Arc::ptr_eq(&before.value, &after.value));
    }

    #[test]
    fn empty_page_is_no_data_and_not_cached() {
        let (svc, board, _clock, _dir) = service();
        board.serve(Some("nothing useful"));
        assert!(matches!(svc.load_salary_data(S, false), Err(ServiceError::NoData(_))));
        assert!(svc.health().cached_seasons.is_empty());
    }

    #[test]
    fn team_payroll_and_missing_team() {
        let (svc, board, _clock, _dir) = service();
        board.serve(Some(PAGE));

        let gsw = svc.team_payroll("gsw", S).unwrap();
        assert_eq!(gsw.team, "GSW");
        assert_eq!(gsw.player_count, 2);
        assert_eq!(gsw.total_payroll, 80_000_000);

        assert!(matches!(svc.team_payroll("BOS", S), Err(ServiceError::TeamNotFound(t)) if t == "BOS"));
    }

    #[test]
    fn search_requires_query() {
        let (svc, board, _clock, _dir) = service();
        board.serve(Some(PAGE));
        assert!(matches!(svc.search_players("  ", S, 10), Err(ServiceError::EmptyQuery)));
        assert_eq!(board.calls(), 0);

        let hits = svc.search_players("warriors", S, 10).unwrap();
        assert_eq!(hits.iter().map(|r| r.player_name.as_str()).collect::<Vec<_>>(), vec!["Curry", "Green"]);
    }

    #[test]
    fn distribution_counts_everyone() {
        let (svc, board, _clock, _dir) = service();
        board.serve(Some(PAGE));
        let d = svc.salary_distribution(S).unwrap();
        assert_eq!(d.total_players, 3);
        assert_eq!(d.buckets.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(d.buckets[5].count, 2);
    }

    #[test]
    fn export_players_teams_and_bundle() {
        let (svc, board, _clock, dir) = service();
        board.serve(Some(PAGE));

        let players = svc.export(S, ExportKind::Players, "json").unwrap();
        assert_eq!(players.files.len(), 1);
        let name = players.files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("nba_players_2025_") && name.ends_with(".json"), "{name}");

        let teams = svc.export(S, ExportKind::Teams, "excel").unwrap();
        assert!(teams.files[0].to_string_lossy().ends_with(".xlsx"));

        let all = svc.export(S, ExportKind::All, "csv").unwrap();
        assert_eq!(all.files.len(), 2 + 3);
        assert!(dir.path().join("all_nba_salaries_2025.csv").is_file());
        assert_eq!(board.calls(), 1);
    }

    #[test]
    fn unsupported_format_fails_before_fetching() {
        let (svc, board, _clock, _dir) = service();
        board.serve(Some(PAGE));
        let err = svc.export(S, ExportKind::Players, "pdf").unwrap_err();
        assert!(matches!(err, ServiceError::Export(crate::ExportError::UnsupportedFormat(_))));
        assert_eq!(board.calls(), 0);
    }

    #[test]
    fn bundle_rejects_non_csv_formats_before_fetching() {
        let (svc, board, _clock, dir) = service();
        board.serve(Some(PAGE));
        for name in ["json", "excel", "tsv"] {
            let err = svc.export(S, ExportKind::All, name).unwrap_err();
            assert!(matches!(err, ServiceError::Export(ExportError::UnsupportedFormat(_))), "{name}");
        }
        assert_eq!(board.calls(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let ok = svc.export(S, ExportKind::All, "CSV").unwrap();
        assert_eq!(ok.format, "csv");
    }

    #[test]
    fn health_lists_cached_keys() {
        let (svc, board, _clock, _dir) = service();
        board.serve(Some(PAGE));
        svc.refresh(S).unwrap();
        let h = svc.health();
        assert_eq!(h.status, "healthy");
        assert!(h.scraper_initialized);
        assert_eq!(h.cached_seasons, vec!["salary_data_2025"]);
    }

    #[test]
    fn export_kind_names() {
        assert_eq!("Players".parse::<ExportKind>().unwrap(), ExportKind::Players);
        assert_eq!(ExportKind::default(), ExportKind::All);
        assert!("everything".parse::<ExportKind>().is_err());
    }
}
