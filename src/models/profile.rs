//! Profile store
//!
//! Persists the single user's profile. The engine never reads this table;
//! callers load the record and pass `record.profile` into engine functions.

use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::engine::Profile;

/// Saved profile including the descriptive fields the form collects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ethnicity: Option<String>,
    #[serde(flatten)]
    pub profile: Profile,
    pub medical_conditions: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for saving a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSave {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ethnicity: Option<String>,
    #[serde(flatten)]
    pub profile: Profile,
    pub medical_conditions: Option<String>,
}

fn parse_column<T>(row: &Row, idx: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| {
        let col = row.as_ref().column_index(idx).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(e))
    })
}

impl ProfileRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            ethnicity: row.get("ethnicity")?,
            profile: Profile {
                age: row.get("age")?,
                weight: row.get("weight")?,
                height: row.get("height")?,
                gender: parse_column(row, "gender")?,
                activity_level: parse_column(row, "activity_level")?,
                goal: parse_column(row, "goal")?,
                fitness_level: parse_column(row, "fitness_level")?,
            },
            medical_conditions: row.get("medical_conditions")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the saved profile, if any
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or replace the profile
    pub fn save(conn: &Connection, data: &ProfileSave) -> DbResult<Self> {
        let p = &data.profile;
        conn.execute(
            r#"
            INSERT INTO profile (
                id, first_name, last_name, ethnicity, age, weight, height,
                gender, activity_level, goal, fitness_level, medical_conditions
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                ethnicity = excluded.ethnicity,
                age = excluded.age,
                weight = excluded.weight,
                height = excluded.height,
                gender = excluded.gender,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                fitness_level = excluded.fitness_level,
                medical_conditions = excluded.medical_conditions,
                updated_at = datetime('now')
            "#,
            params![
                data.first_name,
                data.last_name,
                data.ethnicity,
                p.age,
                p.weight,
                p.height,
                p.gender.as_str(),
                p.activity_level.as_str(),
                p.goal.as_str(),
                p.fitness_level.as_str(),
                data.medical_conditions,
            ],
        )?;

        Self::get(conn)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Full name for prompts and headers, if either part is set
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::engine::{ActivityLevel, FitnessLevel, Gender, Goal};

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn save_data() -> ProfileSave {
        ProfileSave {
            first_name: Some("Ada".to_string()),
            last_name: None,
            ethnicity: None,
            profile: Profile {
                age: 25,
                weight: 60.0,
                height: 165.0,
                gender: Gender::Female,
                activity_level: ActivityLevel::ModeratelyActive,
                goal: Goal::WeightLoss,
                fitness_level: FitnessLevel::Beginner,
            },
            medical_conditions: Some("asthma".to_string()),
        }
    }

    #[test]
    fn test_get_before_save() {
        let conn = conn();
        assert!(ProfileRecord::get(&conn).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let conn = conn();
        let saved = ProfileRecord::save(&conn, &save_data()).unwrap();
        assert_eq!(saved.profile, save_data().profile);
        assert_eq!(saved.medical_conditions.as_deref(), Some("asthma"));
        assert_eq!(saved.display_name().as_deref(), Some("Ada"));
    }

    #[test]
    fn test_save_replaces_existing() {
        let conn = conn();
        ProfileRecord::save(&conn, &save_data()).unwrap();

        let mut data = save_data();
        data.profile.goal = Goal::MuscleGain;
        data.profile.fitness_level = FitnessLevel::Advanced;
        ProfileRecord::save(&conn, &data).unwrap();

        let loaded = ProfileRecord::get(&conn).unwrap().unwrap();
        assert_eq!(loaded.profile.goal, Goal::MuscleGain);
        assert_eq!(loaded.profile.fitness_level, FitnessLevel::Advanced);

        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM profile", [], |r| r.get(0)).unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_corrupt_enum_column_is_an_error() {
        let conn = conn();
        ProfileRecord::save(&conn, &save_data()).unwrap();
        conn.execute("UPDATE profile SET gender = 'Other'", []).unwrap();
        assert!(ProfileRecord::get(&conn).is_err());
    }

    #[test]
    fn test_serializes_flat() {
        let conn = conn();
        let saved = ProfileRecord::save(&conn, &save_data()).unwrap();
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["goal"], "Weight Loss");
        assert_eq!(json["activity_level"], "Moderately Active");
        assert_eq!(json["age"], 25);
    }
}
