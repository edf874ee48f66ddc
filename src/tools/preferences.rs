//! Dietary preference tools

use chrono::NaiveTime;
use tracing::info;

use crate::db::Database;
use crate::models::{DietaryPreferences, MAX_SNACKS_PER_DAY};

fn validate_time(meal: &str, value: &str) -> Result<(), String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| format!("Invalid {} time '{}': expected HH:MM", meal, value))
}

/// Clean up and store preferences, replacing any saved ones
pub fn save_dietary_preferences(
    db: &Database,
    prefs: DietaryPreferences,
) -> Result<DietaryPreferences, String> {
    if prefs.meal_timing.snacks_count > MAX_SNACKS_PER_DAY {
        return Err(format!(
            "snacks_count must be between 0 and {}, got {}",
            MAX_SNACKS_PER_DAY, prefs.meal_timing.snacks_count
        ));
    }
    let prefs = prefs.normalized();
    validate_time("breakfast", &prefs.meal_timing.breakfast)?;
    validate_time("lunch", &prefs.meal_timing.lunch)?;
    validate_time("dinner", &prefs.meal_timing.dinner)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let saved = DietaryPreferences::save(&conn, &prefs)
        .map_err(|e| format!("Failed to save dietary preferences: {}", e))?;

    info!(
        allergies = saved.allergies.len(),
        restrictions = saved.restrictions.len(),
        "Dietary preferences saved"
    );
    Ok(saved)
}

pub fn get_dietary_preferences(db: &Database) -> Result<Option<DietaryPreferences>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    DietaryPreferences::get(&conn).map_err(|e| format!("Failed to load dietary preferences: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealTiming;
    use crate::tools::test_database;

    #[test]
    fn test_save_then_replace() {
        let db = test_database();
        assert!(get_dietary_preferences(&db).unwrap().is_none());

        let first = DietaryPreferences {
            allergies: vec![" Peanuts ".to_string(), "".to_string()],
            restrictions: vec!["Vegetarian".to_string()],
            ..Default::default()
        };
        let saved = save_dietary_preferences(&db, first).unwrap();
        assert_eq!(saved.allergies, vec!["Peanuts"]);

        let second = DietaryPreferences {
            preferred_cuisines: vec!["Thai".to_string()],
            ..Default::default()
        };
        save_dietary_preferences(&db, second).unwrap();

        let loaded = get_dietary_preferences(&db).unwrap().unwrap();
        assert!(loaded.allergies.is_empty());
        assert_eq!(loaded.preferred_cuisines, vec!["Thai"]);
    }

    #[test]
    fn test_rejects_bad_timing() {
        let db = test_database();
        let prefs = DietaryPreferences {
            meal_timing: MealTiming {
                lunch: "lunchtime".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(save_dietary_preferences(&db, prefs).unwrap_err().contains("lunch"));

        let prefs = DietaryPreferences {
            meal_timing: MealTiming {
                snacks_count: 9,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(save_dietary_preferences(&db, prefs).is_err());
        assert!(get_dietary_preferences(&db).unwrap().is_none());
    }
}
