// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use rust_xlsxwriter::Workbook;
use tracing::{debug, info};

use crate::config::consts::BUNDLE_TOP_N;
use crate::config::options::ExportFormat;
use crate::csv::to_export_string;
use crate::error::ExportError;
use crate::model::{SalaryRow, Season};
use crate::progress::Progress;
use crate::stats;
use crate::table::{Cell, DataSet};
use crate::teams;

/// Write `table` to `path` in `format`, creating parent directories.
/// Returns the final path written to.
pub fn export(table: &DataSet, path: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    match format.delim() {
        Some(sep) => {
            fs::write(path, to_export_string(table, sep)).map_err(|e| ExportError::io(path, e))?;
        }
        None if format == ExportFormat::Json => {
            let body = serde_json::to_string_pretty(&table.to_json_records())?;
            fs::write(path, body).map_err(|e| ExportError::io(path, e))?;
        }
        None => write_xlsx(table, path)?,
    }

    debug!(path = %path.display(), rows = table.rows.len(), %format, "export written");
    Ok(path.to_path_buf())
}

/// Same as [`export`], with the format given by name. Unknown names fail
/// with [`ExportError::UnsupportedFormat`] before anything touches disk.
pub fn export_named(table: &DataSet, path: &Path, format: &str) -> Result<PathBuf, ExportError> {
    let format: ExportFormat = format.parse()?;
    export(table, path, format)
}

/// `{dir}/{stem}_{season}_{YYYYmmdd_HHMMSS}.{ext}`
pub fn timestamped_path(
    dir: &Path,
    stem: &str,
    season: Season,
    at: DateTime<Local>,
    format: ExportFormat,
) -> PathBuf {
    dir.join(format!(
        "{stem}_{season}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.ext()
    ))
}

/// Full CSV bundle for one season:
/// one file per team, the full table, team summaries and the top earners.
pub fn export_season_bundle(
    rows: &[SalaryRow],
    season: Season,
    dir: &Path,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<PathBuf>, ExportError> {
    let result = write_bundle(rows, season, dir, progress.as_deref_mut());
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    if let Ok(written) = &result {
        info!(files = written.len(), dir = %dir.display(), %season, "season bundle exported");
    }
    result
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
    }
    Ok(())
}

/// `{CODE}_{Team_Name}_salaries_{season}.csv`; only ASCII alphanumerics of
/// `code` reach the file name.
pub fn team_file_name(code: &str, season: Season) -> String {
    let safe: String = code.chars().filter(char::is_ascii_alphanumeric).collect();
    let safe = if safe.is_empty() { s!(teams::UNKNOWN_CODE) } else { safe };
    let stem = crate::core::sanitize::sanitize_team_filename(teams::team_name(code), &safe);
    format!("{safe}_{stem}_salaries_{season}.csv")
}

/* ---------- helpers ---------- */

fn write_bundle<'a>(
    rows: &[SalaryRow],
    season: Season,
    dir: &Path,
    mut progress: Option<&mut (dyn Progress + 'a)>,
) -> Result<Vec<PathBuf>, ExportError> {
    ensure_directory(dir)?;

    if rows.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No salary rows to export");
        }
        return Ok(Vec::new());
    }

    let by_team = stats::salary_by_team(rows, season);

    let mut jobs: Vec<(String, DataSet)> = by_team
        .iter()
        .map(|(code, team_rows)| (team_file_name(code, season), DataSet::players(team_rows, season)))
        .collect();
    jobs.push((
        format!("all_nba_salaries_{season}.csv"),
        DataSet::players(rows, season),
    ));
    jobs.push((
        format!("team_salary_summaries_{season}.csv"),
        DataSet::team_summaries(&stats::team_salary_summary(rows, season)),
    ));
    jobs.push((
        format!("top_{BUNDLE_TOP_N}_highest_paid_{season}.csv"),
        DataSet::top_earners(&stats::highest_paid_players(rows, BUNDLE_TOP_N, season), season),
    ));

    if let Some(p) = progress.as_deref_mut() {
        p.begin(jobs.len());
    }
    let mut written = Vec::with_capacity(jobs.len());
    for (name, table) in jobs {
        let path = export(&table, &dir.join(name), ExportFormat::Csv)?;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&path);
        }
        written.push(path);
    }

    Ok(written)
}

fn write_xlsx(table: &DataSet, path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Text(s) => sheet.write_string(r, c, s)?,
                Cell::Int(v) => sheet.write_number(r, c, *v as f64)?,
                Cell::Float(v) => sheet.write_number(r, c, *v)?,
            };
        }
    }

    workbook.save(path)?;
    Ok(())
}
