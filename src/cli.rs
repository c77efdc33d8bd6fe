// src/cli.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::config::consts::*;
use crate::config::{AppOptions, ExportFormat};
use crate::file;
use crate::model::Season;
use crate::progress::Progress;
use crate::service::{ExportKind, SalaryService};
use crate::table::DataSet;

/// Scrape, summarize and export NBA player salaries.
#[derive(Debug, Parser)]
#[command(name = "nba_salary_scrape", version, about)]
pub struct Cli {
    /// Season by its ending year (e.g. 2025 for 2024-25). Defaults to the current one.
    #[arg(long, global = true)]
    season: Option<Season>,

    /// Pause before each request, in milliseconds.
    #[arg(long, global = true, env = "NBA_SALARY_DELAY_MS", default_value_t = REQUEST_PAUSE_MS)]
    delay_ms: u64,

    #[arg(long, global = true, env = "NBA_SALARY_TIMEOUT_SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, global = true, env = "NBA_SALARY_EXPORT_DIR", default_value = DEFAULT_EXPORT_DIR)]
    export_dir: PathBuf,

    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Every player row for the season.
    Players {
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, default_value = "csv")]
        format: String,
    },
    /// One summary per team, biggest payroll first.
    Summary {
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, default_value = "csv")]
        format: String,
    },
    /// Highest-paid players.
    Top {
        #[arg(short = 'n', long, default_value_t = 50)]
        limit: usize,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, default_value = "csv")]
        format: String,
    },
    /// One team's payroll by code (e.g. LAL).
    Team { code: String },
    /// Rows grouped by team code.
    ByTeam,
    Search {
        query: String,
        #[arg(short = 'n', long, default_value_t = SEARCH_LIMIT)]
        limit: usize,
    },
    /// Salary histogram.
    Distribution,
    /// Timestamped export into the export directory.
    Export {
        #[arg(long, default_value = "all")]
        kind: ExportKind,
        #[arg(long, default_value = "csv")]
        format: String,
    },
    /// Full per-team CSV bundle straight from a live fetch.
    ExportAll {
        #[arg(short, long, default_value = DEFAULT_BUNDLE_DIR)]
        dir: PathBuf,
    },
    /// Force a live fetch into the cache.
    Refresh,
    Health,
}

impl Cli {
    fn options(&self) -> AppOptions {
        let mut opts = AppOptions::default();
        opts.scrape.delay = Duration::from_millis(self.delay_ms);
        opts.scrape.timeout = Duration::from_secs(self.timeout_secs);
        opts.service.export_dir = self.export_dir.clone();
        opts
    }
}

/// Prints each written file.
struct LinePrinter;

impl Progress for LinePrinter {
    fn begin(&mut self, total: usize) {
        eprintln!("Writing {total} files...");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, path: &Path) {
        println!("Wrote {}", path.display());
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose).wrap_err("could not open the debug log")?;

    let season = cli.season.unwrap_or_else(Season::current);
    let svc = SalaryService::new(&cli.options()).wrap_err("could not set up the HTTP client")?;

    match cli.command {
        Command::Players { out, format } => {
            let data = svc.load_salary_data(season, false)?;
            let table = DataSet::players(&data.value.players, season);
            emit(&table, out.as_deref(), &format, &data.value.players)?;
        }
        Command::Summary { out, format } => {
            let data = svc.load_salary_data(season, false)?;
            let table = DataSet::team_summaries(&data.value.team_summaries);
            emit(&table, out.as_deref(), &format, &data.value.team_summaries)?;
        }
        Command::Top { limit, out, format } => {
            let data = svc.load_salary_data(season, false)?;
            let top = crate::stats::highest_paid_players(&data.value.players, limit, season);
            emit(&DataSet::top_earners(&top, season), out.as_deref(), &format, &top)?;
        }
        Command::Team { code } => print_json(&svc.team_payroll(&code, season)?)?,
        Command::ByTeam => {
            let data = svc.load_salary_data(season, false)?;
            print_json(&crate::stats::salary_by_team(&data.value.players, season))?;
        }
        Command::Search { query, limit } => print_json(&svc.search_players(&query, season, limit)?)?,
        Command::Distribution => print_json(&svc.salary_distribution(season)?)?,
        Command::Export { kind, format } => {
            let report = svc.export(season, kind, &format)?;
            for f in &report.files {
                println!("Wrote {}", f.display());
            }
        }
        Command::ExportAll { dir } => {
            let written = svc
                .scraper()
                .export_all_team_salaries(season, &dir, Some(&mut LinePrinter))?;
            println!("Exported {} files to {}", written.len(), dir.display());
        }
        Command::Refresh => print_json(&svc.refresh(season)?)?,
        Command::Health => print_json(&svc.health())?,
    }

    Ok(())
}

/* ---------- helpers ---------- */

// File when `out` is given, JSON on stdout otherwise.
fn emit<T: Serialize + ?Sized>(table: &DataSet, out: Option<&Path>, format: &str, value: &T) -> Result<()> {
    match out {
        Some(path) => {
            let format: ExportFormat = format.parse()?;
            let written = file::export(table, path, format)?;
            println!("Wrote {}", written.display());
            Ok(())
        }
        None => print_json(value),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
