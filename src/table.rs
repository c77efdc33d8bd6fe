// src/table.rs
//
// Flat, header-first view of the salary models. Every writer in `file`
// consumes a `DataSet`, so column naming lives in exactly one place.

use serde_json::{Map, Value};

use crate::model::{SalaryRow, Season, TeamSummary, TopEarner, CONTRACT_YEARS};

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Int(u64),
    Float(f64),
}

impl Cell {
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => format!("{v:.2}"),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Cell::Text(s) => Value::from(s.as_str()),
            Cell::Int(v) => Value::from(*v),
            Cell::Float(v) => Value::from(*v),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s!(s)) }
}

impl From<u64> for Cell {
    fn from(v: u64) -> Self { Cell::Int(v) }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self { Cell::Int(v as u64) }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Float(v) }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataSet {
    /// Player table; salary columns are named `{year}_salary` starting at `season`.
    pub fn players(rows: &[SalaryRow], season: Season) -> Self {
        let mut headers = vec![s!("player_name"), s!("team_abbr"), s!("team_name")];
        headers.extend((0..CONTRACT_YEARS).map(|i| format!("{}_salary", season.plus(i))));
        headers.push(s!("total_guaranteed"));
        headers.push(s!("data_source"));

        let rows = rows
            .iter()
            .map(|r| {
                let mut cells: Vec<Cell> = vec![
                    r.player_name.as_str().into(),
                    r.team_abbr.as_str().into(),
                    r.team_name.as_str().into(),
                ];
                cells.extend((0..CONTRACT_YEARS).map(|i| Cell::Int(r.salary_for(season.plus(i)))));
                cells.push(r.total_guaranteed.into());
                cells.push(r.source.label().into());
                cells
            })
            .collect();

        Self { headers, rows }
    }

    pub fn team_summaries(summaries: &[TeamSummary]) -> Self {
        let headers = [
            "team_abbr", "team_name", "total_payroll", "average_salary", "median_salary",
            "highest_paid_player", "highest_salary", "lowest_paid_player", "lowest_salary",
            "num_players", "players_over_10m", "players_over_20m", "players_over_30m",
        ]
        .map(String::from)
        .to_vec();

        let rows: Vec<Vec<Cell>> = summaries
            .iter()
            .map(|t| {
                vec![
                    t.team_abbr.as_str().into(),
                    t.team_name.as_str().into(),
                    t.total_payroll.into(),
                    t.average_salary.into(),
                    t.median_salary.into(),
                    t.highest_paid_player.as_str().into(),
                    t.highest_salary.into(),
                    t.lowest_paid_player.as_str().into(),
                    t.lowest_salary.into(),
                    t.num_players.into(),
                    t.players_over_10m.into(),
                    t.players_over_20m.into(),
                    t.players_over_30m.into(),
                ]
            })
            .collect();

        Self { headers, rows }
    }

    pub fn top_earners(top: &[TopEarner], season: Season) -> Self {
        let headers = vec![
            s!("rank"),
            s!("player_name"),
            s!("team_abbr"),
            s!("team_name"),
            format!("{season}_salary"),
            s!("total_guaranteed"),
        ];

        let rows: Vec<Vec<Cell>> = top
            .iter()
            .enumerate()
            .map(|(i, t)| {
                vec![
                    (i + 1).into(),
                    t.player_name.as_str().into(),
                    t.team_abbr.as_str().into(),
                    t.team_name.as_str().into(),
                    t.salary.into(),
                    t.total_guaranteed.into(),
                ]
            })
            .collect();

        Self { headers, rows }
    }

    /// Rows rendered as strings, header line excluded.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(Cell::to_text).collect())
            .collect()
    }

    /// One JSON object per row keyed by header.
    pub fn to_json_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|r| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(r.iter().map(Cell::to_json))
                    .collect()
            })
            .collect()
    }
}
