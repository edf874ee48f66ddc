//! Dietary preferences model
//!
//! Single-row table; list fields and meal timing are stored as JSON text.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

pub const MAX_SNACKS_PER_DAY: u8 = 5;

/// Preferred meal times as "HH:MM" plus daily snack count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealTiming {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks_count: u8,
}

impl Default for MealTiming {
    fn default() -> Self {
        Self {
            breakfast: "08:00".to_string(),
            lunch: "13:00".to_string(),
            dinner: "19:00".to_string(),
            snacks_count: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryPreferences {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default)]
    pub preferred_cuisines: Vec<String>,
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
    #[serde(default)]
    pub meal_timing: MealTiming,
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row, idx: &str) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| {
        let col = row.as_ref().column_index(idx).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl DietaryPreferences {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            allergies: json_column(row, "allergies")?,
            restrictions: json_column(row, "restrictions")?,
            preferred_cuisines: json_column(row, "preferred_cuisines")?,
            disliked_ingredients: json_column(row, "disliked_ingredients")?,
            meal_timing: json_column(row, "meal_timing")?,
        })
    }

    /// Trim entries, drop blanks and clamp the snack count
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.allergies,
            &mut self.restrictions,
            &mut self.preferred_cuisines,
            &mut self.disliked_ingredients,
        ] {
            *list = list
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        self.meal_timing.snacks_count = self.meal_timing.snacks_count.min(MAX_SNACKS_PER_DAY);
        self
    }

    /// Saved preferences, or `None` if never saved
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM dietary_preferences WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(prefs) => Ok(Some(prefs)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or replace the saved preferences
    pub fn save(conn: &Connection, prefs: &DietaryPreferences) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO dietary_preferences (
                id, allergies, restrictions, preferred_cuisines, disliked_ingredients, meal_timing
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                allergies = excluded.allergies,
                restrictions = excluded.restrictions,
                preferred_cuisines = excluded.preferred_cuisines,
                disliked_ingredients = excluded.disliked_ingredients,
                meal_timing = excluded.meal_timing,
                updated_at = datetime('now')
            "#,
            params![
                serde_json::to_string(&prefs.allergies)?,
                serde_json::to_string(&prefs.restrictions)?,
                serde_json::to_string(&prefs.preferred_cuisines)?,
                serde_json::to_string(&prefs.disliked_ingredients)?,
                serde_json::to_string(&prefs.meal_timing)?,
            ],
        )?;

        Self::get(conn)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}
