//! Weight log model

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// A body-weight measurement in kilograms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: i64,
    pub date: String,
    pub weight: f64,
    pub created_at: String,
}

impl WeightEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            weight: row.get("weight")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, date: &str, weight: f64) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO weight_log (date, weight) VALUES (?1, ?2)",
            params![date, weight],
        )?;

        let id = conn.last_insert_rowid();
        let mut stmt = conn.prepare("SELECT * FROM weight_log WHERE id = ?1")?;
        match stmt.query_row([id], Self::from_row) {
            Ok(entry) => Ok(entry),
            Err(e) => Err(DbError::Sqlite(e)),
        }
    }

    /// All weights, oldest first
    pub fn history(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM weight_log ORDER BY date, id")?;
        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn latest(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM weight_log ORDER BY date DESC, id DESC LIMIT 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_history_is_ordered_by_date() {
        let conn = conn();
        WeightEntry::create(&conn, "2025-02-10", 71.2).unwrap();
        WeightEntry::create(&conn, "2025-02-01", 72.0).unwrap();
        WeightEntry::create(&conn, "2025-02-05", 71.6).unwrap();

        let dates: Vec<String> = WeightEntry::history(&conn)
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec!["2025-02-01", "2025-02-05", "2025-02-10"]);
    }

    #[test]
    fn test_latest() {
        let conn = conn();
        assert!(WeightEntry::latest(&conn).unwrap().is_none());
        WeightEntry::create(&conn, "2025-02-01", 72.0).unwrap();
        WeightEntry::create(&conn, "2025-02-10", 71.2).unwrap();
        assert_eq!(WeightEntry::latest(&conn).unwrap().unwrap().weight, 71.2);
    }

    #[test]
    fn test_non_positive_weight_rejected_by_schema() {
        let conn = conn();
        assert!(WeightEntry::create(&conn, "2025-02-01", 0.0).is_err());
    }
}
