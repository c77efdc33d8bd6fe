// src/teams.rs

// Fixed league roster: team code → display name.
// Codes follow the HoopsHype/Basketball Reference three-letter convention.

pub const UNKNOWN_TEAM: &str = "Unknown";
pub const UNKNOWN_CODE: &str = "UNK";

pub const TEAMS: [(&str, &str); 30] = [
    ("ATL", "Atlanta Hawks"),
    ("BOS", "Boston Celtics"),
    ("BRK", "Brooklyn Nets"),
    ("CHA", "Charlotte Hornets"),
    ("CHI", "Chicago Bulls"),
    ("CLE", "Cleveland Cavaliers"),
    ("DAL", "Dallas Mavericks"),
    ("DEN", "Denver Nuggets"),
    ("DET", "Detroit Pistons"),
    ("GSW", "Golden State Warriors"),
    ("HOU", "Houston Rockets"),
    ("IND", "Indiana Pacers"),
    ("LAC", "LA Clippers"),
    ("LAL", "Los Angeles Lakers"),
    ("MEM", "Memphis Grizzlies"),
    ("MIA", "Miami Heat"),
    ("MIL", "Milwaukee Bucks"),
    ("MIN", "Minnesota Timberwolves"),
    ("NOP", "New Orleans Pelicans"),
    ("NYK", "New York Knicks"),
    ("OKC", "Oklahoma City Thunder"),
    ("ORL", "Orlando Magic"),
    ("PHI", "Philadelphia 76ers"),
    ("PHX", "Phoenix Suns"),
    ("POR", "Portland Trail Blazers"),
    ("SAC", "Sacramento Kings"),
    ("SAS", "San Antonio Spurs"),
    ("TOR", "Toronto Raptors"),
    ("UTA", "Utah Jazz"),
    ("WAS", "Washington Wizards"),
];

// Spellings other sites use for the same franchises.
const ALIASES: [(&str, &str); 8] = [
    ("BKN", "BRK"),
    ("CHO", "CHA"),
    ("PHO", "PHX"),
    ("GS", "GSW"),
    ("NY", "NYK"),
    ("NO", "NOP"),
    ("SA", "SAS"),
    ("WSH", "WAS"),
];

/// Display name for a team code (case-insensitive), `"Unknown"` if unmapped.
pub fn team_name(code: &str) -> &'static str {
    let code = code.trim().to_ascii_uppercase();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, c)| *c)
        .unwrap_or(code.as_str());

    TEAMS
        .iter()
        .find(|(c, _)| *c == canonical)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_TEAM)
}

/// Scraped code as stored on a row: 2-3 ASCII letters, uppercased, else `UNK`.
pub fn team_code(raw: &str) -> String {
    let code = raw.trim();
    if (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic()) {
        code.to_ascii_uppercase()
    } else {
        s!(UNKNOWN_CODE)
    }
}

pub fn is_known(code: &str) -> bool {
    team_name(code) != UNKNOWN_TEAM
}
