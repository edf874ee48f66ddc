//! Food log model
//!
//! One row per food eaten on a given date, with its calories and macros.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::Nutrition;
use crate::db::{DbError, DbResult};

/// A logged food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: i64,
    pub date: String, // ISO date: "2025-01-09"
    pub food: String,
    pub nutrition: Nutrition,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for logging a food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryCreate {
    pub date: String,
    pub food: String,
    pub nutrition: Nutrition,
}

/// Replacement values for an existing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryUpdate {
    pub food: String,
    pub nutrition: Nutrition,
}

impl FoodEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            food: row.get("food")?,
            nutrition: Nutrition {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fats: row.get("fats")?,
            },
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    pub fn create(conn: &Connection, data: &FoodEntryCreate) -> DbResult<Self> {
        let n = &data.nutrition;
        conn.execute(
            r#"
            INSERT INTO food_log (date, food, calories, protein, carbs, fats)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![data.date, data.food, n.calories, n.protein, n.carbs, n.fats],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_log WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Entries for one date in the order they were logged
    pub fn list_for_date(conn: &Connection, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_log WHERE date = ?1 ORDER BY id")?;
        let entries = stmt
            .query_map([date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Overwrite food name and nutrition. Returns `None` if the id is unknown.
    pub fn update(conn: &Connection, id: i64, data: &FoodEntryUpdate) -> DbResult<Option<Self>> {
        let n = &data.nutrition;
        let rows = conn.execute(
            r#"
            UPDATE food_log SET
                food = ?1,
                calories = ?2,
                protein = ?3,
                carbs = ?4,
                fats = ?5,
                updated_at = datetime('now')
            WHERE id = ?6
            "#,
            params![data.food, n.calories, n.protein, n.carbs, n.fats, id],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Self::get_by_id(conn, id)
    }

    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM food_log WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Summed nutrition for a date (zero when nothing was logged)
    pub fn daily_totals(conn: &Connection, date: &str) -> DbResult<Nutrition> {
        let totals = conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(calories), 0),
                COALESCE(SUM(protein), 0),
                COALESCE(SUM(carbs), 0),
                COALESCE(SUM(fats), 0)
            FROM food_log WHERE date = ?1
            "#,
            [date],
            |row| {
                Ok(Nutrition {
                    calories: row.get(0)?,
                    protein: row.get(1)?,
                    carbs: row.get(2)?,
                    fats: row.get(3)?,
                })
            },
        )?;

        Ok(totals)
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

    fn entry(
        date: &str,
        food: &str,
        calories: f64,
        protein: f64,
        carbs: f64,
        fats: f64,
    ) -> FoodEntryCreate {
        FoodEntryCreate {
            date: date.to_string(),
            food: food.to_string(),
            nutrition: Nutrition { calories, protein, carbs, fats },
        }
    }

    #[test]
    fn test_create_and_list_by_date() {
        let conn = conn();
        FoodEntry::create(&conn, &entry("2025-03-01", "Oatmeal", 150.0, 5.0, 27.0, 3.0)).unwrap();
        FoodEntry::create(&conn, &entry("2025-03-01", "Chicken", 280.0, 53.0, 0.0, 6.0)).unwrap();
        FoodEntry::create(&conn, &entry("2025-03-02", "Apple", 95.0, 0.5, 25.0, 0.3)).unwrap();

        let day = FoodEntry::list_for_date(&conn, "2025-03-01").unwrap();
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].food, "Oatmeal");
        assert_eq!(day[1].food, "Chicken");
    }

    #[test]
    fn test_daily_totals_scoped_to_date() {
        let conn = conn();
        FoodEntry::create(&conn, &entry("2025-03-01", "Oatmeal", 150.0, 5.0, 27.0, 3.0)).unwrap();
        FoodEntry::create(&conn, &entry("2025-03-01", "Chicken", 280.0, 53.0, 0.0, 6.0)).unwrap();
        FoodEntry::create(&conn, &entry("2025-03-02", "Apple", 95.0, 0.5, 25.0, 0.3)).unwrap();

        let totals = FoodEntry::daily_totals(&conn, "2025-03-01").unwrap();
        assert_eq!(totals, Nutrition { calories: 430.0, protein: 58.0, carbs: 27.0, fats: 9.0 });

        let empty = FoodEntry::daily_totals(&conn, "2025-03-05").unwrap();
        assert_eq!(empty, Nutrition::zero());
    }

    #[test]
    fn test_update() {
        let conn = conn();
        let rice = entry("2025-03-01", "Rice", 200.0, 4.0, 44.0, 0.4);
        let created = FoodEntry::create(&conn, &rice).unwrap();

        let updated = FoodEntry::update(
            &conn,
            created.id,
            &FoodEntryUpdate {
                food: "Brown rice".to_string(),
                nutrition: Nutrition { calories: 216.0, protein: 5.0, carbs: 45.0, fats: 1.8 },
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.food, "Brown rice");
        assert_eq!(updated.nutrition.calories, 216.0);
        assert_eq!(updated.date, "2025-03-01");

        let missing = FoodEntry::update(
            &conn,
            9999,
            &FoodEntryUpdate { food: "x".to_string(), nutrition: Nutrition::zero() },
        )
        .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_delete() {
        let conn = conn();
        let rice = entry("2025-03-01", "Rice", 200.0, 4.0, 44.0, 0.4);
        let created = FoodEntry::create(&conn, &rice).unwrap();
        assert!(FoodEntry::delete(&conn, created.id).unwrap());
        assert!(!FoodEntry::delete(&conn, created.id).unwrap());
        assert!(FoodEntry::get_by_id(&conn, created.id).unwrap().is_none());
    }
}
