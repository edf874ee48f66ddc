//! FitTrack Tools module
//!
//! Tool implementations behind the MCP server. Each function takes plain values,
//! talks to the stores and the engine, and returns a serializable response.

pub mod export;
pub mod food_log;
pub mod preferences;
pub mod profile;
pub mod progress;
pub mod recommendations;
pub mod status;
pub mod workouts;

use chrono::{Local, NaiveDate};

/// Validate an ISO date, or use today's local date when absent
pub fn resolve_date(date: Option<&str>) -> Result<String, String> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map(|parsed| parsed.format("%Y-%m-%d").to_string())
            .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", d)),
        None => Ok(today()),
    }
}

pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
pub(crate) fn test_database() -> crate::db::Database {
    let db = crate::db::Database::in_memory().unwrap();
    db.with_conn(|conn| crate::db::migrations::run_migrations(conn))
        .unwrap();
    db
}
