// src/config/consts.rs

// Sources
pub const HOOPSHYPE_URL: &str = "https://hoopshype.com/salaries/players/";
pub const BBREF_URL: &str = "https://www.basketball-reference.com/contracts/players.html";

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REQUEST_PAUSE_MS: u64 = 2_000; // be polite
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Cache
pub const FRESHNESS_SECS: i64 = 3_600;

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_EXPORT_DIR: &str = "exports";
pub const DEFAULT_BUNDLE_DIR: &str = "nba_salary_data";
pub const BUNDLE_TOP_N: usize = 100;
pub const DASHBOARD_TOP_N: usize = 100;
pub const SEARCH_LIMIT: usize = 20;

// Tier thresholds (strict >)
pub const TIER_10M: u64 = 10_000_000;
pub const TIER_20M: u64 = 20_000_000;
pub const TIER_30M: u64 = 30_000_000;
