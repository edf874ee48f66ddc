//! User data export

use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::food_log::get_food_log;
use super::preferences::get_dietary_preferences;
use super::profile::get_profile;
use super::today;
use crate::db::Database;
use crate::models::{DietaryPreferences, FoodEntry, ProfileRecord, WeightEntry};

#[derive(Debug, Serialize)]
pub struct UserDataExport {
    pub exported_at: String,
    pub profile: Option<ProfileRecord>,
    pub dietary_preferences: Option<DietaryPreferences>,
    pub weight_history: Vec<WeightEntry>,
    pub food_log_date: String,
    pub food_log: Vec<FoodEntry>,
}

pub fn collect_user_data(db: &Database) -> Result<UserDataExport, String> {
    let weight_history = {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        WeightEntry::history(&conn).map_err(|e| format!("Failed to load weight history: {}", e))?
    };
    let date = today();
    let food_log = get_food_log(db, Some(date.as_str()))?;

    Ok(UserDataExport {
        exported_at: Utc::now().to_rfc3339(),
        profile: get_profile(db)?,
        dietary_preferences: get_dietary_preferences(db)?,
        weight_history,
        food_log_date: food_log.date,
        food_log: food_log.entries,
    })
}

/// Export everything as pretty JSON, also writing it to `file_path` when given
pub fn export_user_data(db: &Database, file_path: Option<&str>) -> Result<String, String> {
    let export = collect_user_data(db)?;
    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| format!("Failed to serialize export: {}", e))?;

    if let Some(path) = file_path {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
        std::fs::write(path, &json).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        info!(path, "User data exported");
    }

    Ok(json)
}
