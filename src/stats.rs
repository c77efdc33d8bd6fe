// src/stats.rs
//
// Roll-ups over a flat salary table. Every function takes the season being
// asked about and reads amounts through `SalaryRow::salary_for`, so a table
// scraped for 2025 can answer questions about 2026 out-years too.

use std::collections::BTreeMap;

use crate::config::consts::{TIER_10M, TIER_20M, TIER_30M};
use crate::model::{
    SalaryBucket, SalaryDistribution, SalaryRow, Season, TeamSummary, TopEarner,
};
use crate::teams;

const M: u64 = 1_000_000;

/// Histogram ranges: `[min, max)`, last one open-ended.
const BUCKETS: [(&str, u64, Option<u64>); 6] = [
    ("Under $5M", 0, Some(5 * M)),
    ("$5M - $10M", 5 * M, Some(10 * M)),
    ("$10M - $20M", 10 * M, Some(20 * M)),
    ("$20M - $30M", 20 * M, Some(30 * M)),
    ("$30M - $40M", 30 * M, Some(40 * M)),
    ("Over $40M", 40 * M, None),
];

/// One summary per team code, biggest payroll first (ties: code ascending).
pub fn team_salary_summary(rows: &[SalaryRow], season: Season) -> Vec<TeamSummary> {
    let mut out: Vec<TeamSummary> = group_by_team(rows)
        .into_iter()
        .map(|(code, members)| summarize_team(code, &members, season))
        .collect();

    out.sort_by(|a, b| {
        b.total_payroll
            .cmp(&a.total_payroll)
            .then_with(|| a.team_abbr.cmp(&b.team_abbr))
    });
    out
}

/// Top `limit` earners; equal salaries keep input order.
pub fn highest_paid_players(rows: &[SalaryRow], limit: usize, season: Season) -> Vec<TopEarner> {
    ranked_by_salary(rows.iter(), season)
        .into_iter()
        .take(limit)
        .map(|r| TopEarner {
            player_name: r.player_name.clone(),
            team_abbr: r.team_abbr.clone(),
            team_name: r.team_name.clone(),
            season,
            salary: r.salary_for(season),
            total_guaranteed: r.total_guaranteed,
        })
        .collect()
}

pub fn salary_distribution(rows: &[SalaryRow], season: Season) -> SalaryDistribution {
    let total = rows.len();
    let buckets = BUCKETS
        .iter()
        .map(|&(label, min, max)| {
            let count = rows
                .iter()
                .map(|r| r.salary_for(season))
                .filter(|&s| s >= min && max.is_none_or(|m| s < m))
                .count();
            SalaryBucket {
                label: s!(label),
                min,
                max,
                count,
                percentage: percent_1dp(count, total),
            }
        })
        .collect();

    SalaryDistribution { season, total_players: total, buckets }
}

/// Case-insensitive substring match on player name, team name or team code,
/// highest salary first, at most `limit` rows. A blank query matches nothing.
pub fn search_players(rows: &[SalaryRow], query: &str, limit: usize, season: Season) -> Vec<SalaryRow> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let hits = rows.iter().filter(|r| {
        r.player_name.to_lowercase().contains(&q)
            || r.team_name.to_lowercase().contains(&q)
            || r.team_abbr.to_lowercase().contains(&q)
    });

    ranked_by_salary(hits, season)
        .into_iter()
        .take(limit)
        .cloned()
        .collect()
}

/// Rows grouped by team code, each group sorted by salary descending.
pub fn salary_by_team(rows: &[SalaryRow], season: Season) -> BTreeMap<String, Vec<SalaryRow>> {
    group_by_team(rows)
        .into_iter()
        .map(|(code, members)| {
            let sorted = ranked_by_salary(members.into_iter(), season)
                .into_iter()
                .cloned()
                .collect();
            (s!(code), sorted)
        })
        .collect()
}

/// Exact sum of `season` salaries, the figure `total_payroll` must match.
pub fn payroll_total<'a>(rows: impl IntoIterator<Item = &'a SalaryRow>, season: Season) -> u64 {
    rows.into_iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.salary_for(season)))
}

/* ---------- helpers ---------- */

// Input order is preserved inside each group.
fn group_by_team(rows: &[SalaryRow]) -> BTreeMap<&str, Vec<&SalaryRow>> {
    let mut by_team: BTreeMap<&str, Vec<&SalaryRow>> = BTreeMap::new();
    for r in rows {
        by_team.entry(r.team_abbr.as_str()).or_default().push(r);
    }
    by_team
}

// Stable: equal salaries stay in input order.
fn ranked_by_salary<'a>(rows: impl Iterator<Item = &'a SalaryRow>, season: Season) -> Vec<&'a SalaryRow> {
    let mut ranked: Vec<&SalaryRow> = rows.collect();
    ranked.sort_by(|a, b| b.salary_for(season).cmp(&a.salary_for(season)));
    ranked
}

fn summarize_team(code: &str, members: &[&SalaryRow], season: Season) -> TeamSummary {
    let amounts: Vec<u64> = members.iter().map(|r| r.salary_for(season)).collect();
    let total = payroll_total(members.iter().copied(), season);
    let n = members.len();

    // first occurrence wins on ties
    let mut hi = 0usize;
    let mut lo = 0usize;
    for (i, &a) in amounts.iter().enumerate() {
        if a > amounts[hi] { hi = i; }
        if a < amounts[lo] { lo = i; }
    }

    let over = |t: u64| amounts.iter().filter(|&&a| a > t).count();

    TeamSummary {
        team_abbr: s!(code),
        team_name: s!(teams::team_name(code)),
        total_payroll: total,
        average_salary: if n == 0 { 0.0 } else { total as f64 / n as f64 },
        median_salary: median(&amounts),
        highest_paid_player: members.get(hi).map(|r| r.player_name.clone()).unwrap_or_else(|| s!("N/A")),
        highest_salary: amounts.get(hi).copied().unwrap_or(0),
        lowest_paid_player: members.get(lo).map(|r| r.player_name.clone()).unwrap_or_else(|| s!("N/A")),
        lowest_salary: amounts.get(lo).copied().unwrap_or(0),
        num_players: n,
        players_over_10m: over(TIER_10M),
        players_over_20m: over(TIER_20M),
        players_over_30m: over(TIER_30M),
    }
}

fn median(amounts: &[u64]) -> f64 {
    if amounts.is_empty() {
        return 0.0;
    }
    let mut sorted = amounts.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    }
}

fn percent_1dp(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}
