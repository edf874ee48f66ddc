//! Food Log MCP Tools
//!
//! Tools for logging foods against a date and summing a day's intake.

use serde::Serialize;
use tracing::{debug, info};

use super::profile::get_daily_targets;
use super::resolve_date;
use crate::db::Database;
use crate::engine::DisplayTargets;
use crate::models::{FoodEntry, FoodEntryCreate, FoodEntryUpdate, MacroCalories, Nutrition};

/// Response for get_food_log
#[derive(Debug, Serialize)]
pub struct FoodLogResponse {
    pub date: String,
    pub entries: Vec<FoodEntry>,
    pub total: usize,
}

/// Response for update_food_entry
#[derive(Debug, Serialize)]
pub struct UpdateFoodEntryResponse {
    pub success: bool,
    pub entry: FoodEntry,
}

/// Response for get_daily_totals
#[derive(Debug, Serialize)]
pub struct DailyTotalsResponse {
    pub date: String,
    pub totals: Nutrition,
    /// Only present once any macro grams have been logged
    pub macro_calories: Option<MacroCalories>,
    /// Targets from the saved profile, if there is one
    pub targets: Option<DisplayTargets>,
    pub remaining_calories: Option<f64>,
}

fn validate_entry(food: &str, nutrition: &Nutrition) -> Result<(), String> {
    if food.trim().is_empty() {
        return Err("Food name must not be empty".to_string());
    }
    let fields = [
        ("calories", nutrition.calories),
        ("protein", nutrition.protein),
        ("carbs", nutrition.carbs),
        ("fats", nutrition.fats),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{} must be a non-negative number, got {}", name, value));
        }
    }
    Ok(())
}

// ============================================================================
// Entry Tools
// ============================================================================

/// Log a food for a date (today when absent)
pub fn add_food_entry(
    db: &Database,
    date: Option<&str>,
    food: &str,
    nutrition: Nutrition,
) -> Result<FoodEntry, String> {
    validate_entry(food, &nutrition)?;
    let date = resolve_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entry = FoodEntry::create(
        &conn,
        &FoodEntryCreate {
            date,
            food: food.trim().to_string(),
            nutrition,
        },
    )
    .map_err(|e| format!("Failed to add food entry: {}", e))?;

    info!(id = entry.id, date = %entry.date, "Food entry added");
    Ok(entry)
}

/// Replace the food and nutrition of an entry; `None` if the id is unknown
pub fn update_food_entry(
    db: &Database,
    id: i64,
    food: &str,
    nutrition: Nutrition,
) -> Result<Option<UpdateFoodEntryResponse>, String> {
    validate_entry(food, &nutrition)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let updated = FoodEntry::update(
        &conn,
        id,
        &FoodEntryUpdate {
            food: food.trim().to_string(),
            nutrition,
        },
    )
    .map_err(|e| format!("Failed to update food entry: {}", e))?;

    Ok(updated.map(|entry| UpdateFoodEntryResponse { success: true, entry }))
}

/// Returns false when no entry had that id
pub fn delete_food_entry(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted =
        FoodEntry::delete(&conn, id).map_err(|e| format!("Failed to delete food entry: {}", e))?;
    debug!(id, deleted, "Delete food entry");
    Ok(deleted)
}

pub fn get_food_log(db: &Database, date: Option<&str>) -> Result<FoodLogResponse, String> {
    let date = resolve_date(date)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entries = FoodEntry::list_for_date(&conn, &date)
        .map_err(|e| format!("Failed to load food log: {}", e))?;

    Ok(FoodLogResponse {
        date,
        total: entries.len(),
        entries,
    })
}

// ============================================================================
// Totals
// ============================================================================

pub fn get_daily_totals(db: &Database, date: Option<&str>) -> Result<DailyTotalsResponse, String> {
    let date = resolve_date(date)?;
    let totals = {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        FoodEntry::daily_totals(&conn, &date)
            .map_err(|e| format!("Failed to sum food log: {}", e))?
    };

    let targets = get_daily_targets(db)?.map(|t| t.display);

    Ok(DailyTotalsResponse {
        macro_calories: totals.has_macros().then(|| totals.macro_calories()),
        remaining_calories: targets.map(|t| t.calories as f64 - totals.calories),
        targets,
        totals,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_database;

    fn meal(calories: f64, protein: f64, carbs: f64, fats: f64) -> Nutrition {
        Nutrition { calories, protein, carbs, fats }
    }

    #[test]
    fn test_entries_are_scoped_by_date() {
        let db = test_database();
        add_food_entry(&db, Some("2025-03-01"), "Oatmeal", meal(300.0, 10.0, 50.0, 6.0)).unwrap();
        add_food_entry(&db, Some("2025-03-01"), "Chicken salad", meal(450.0, 40.0, 12.0, 20.0))
            .unwrap();
        add_food_entry(&db, Some("2025-03-02"), "Pizza", meal(800.0, 30.0, 90.0, 35.0)).unwrap();

        let log = get_food_log(&db, Some("2025-03-01")).unwrap();
        assert_eq!(log.total, 2);
        assert_eq!(log.entries[0].food, "Oatmeal");

        let totals = get_daily_totals(&db, Some("2025-03-01")).unwrap();
        assert_eq!(totals.totals, meal(750.0, 50.0, 62.0, 26.0));
        let split = totals.macro_calories.unwrap();
        assert_eq!(split.protein, 200.0);
        assert_eq!(split.fats, 234.0);
        assert!(totals.targets.is_none());
    }

    #[test]
    fn test_totals_without_macros() {
        let db = test_database();
        add_food_entry(&db, Some("2025-03-03"), "Black coffee", meal(5.0, 0.0, 0.0, 0.0)).unwrap();
        let totals = get_daily_totals(&db, Some("2025-03-03")).unwrap();
        assert_eq!(totals.totals.calories, 5.0);
        assert!(totals.macro_calories.is_none());

        let empty = get_daily_totals(&db, Some("2025-03-04")).unwrap();
        assert_eq!(empty.totals, Nutrition::zero());
    }

    #[test]
    fn test_update_and_delete() {
        let db = test_database();
        let entry = add_food_entry(&db, None, "Apple", meal(95.0, 0.5, 25.0, 0.3)).unwrap();

        let resp = update_food_entry(&db, entry.id, "Two apples", meal(190.0, 1.0, 50.0, 0.6))
            .unwrap()
            .unwrap();
        assert_eq!(resp.entry.food, "Two apples");
        assert_eq!(resp.entry.nutrition.calories, 190.0);

        assert!(update_food_entry(&db, 9999, "x", Nutrition::zero()).unwrap().is_none());

        assert!(delete_food_entry(&db, entry.id).unwrap());
        assert!(!delete_food_entry(&db, entry.id).unwrap());
        assert_eq!(get_food_log(&db, None).unwrap().total, 0);
    }

    #[test]
    fn test_rejects_bad_entries() {
        let db = test_database();
        assert!(add_food_entry(&db, None, "  ", meal(100.0, 0.0, 0.0, 0.0)).is_err());
        let err = add_food_entry(&db, None, "Toast", meal(-1.0, 0.0, 0.0, 0.0)).unwrap_err();
        assert!(err.contains("calories"));
        assert!(add_food_entry(&db, Some("yesterday"), "Toast", Nutrition::zero()).is_err());
    }
}
