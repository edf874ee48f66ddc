//! FitTrack Status Tool
//!
//! Runtime status of the service plus the usage guide served to assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage guide for AI assistants driving the tools
pub const TRACKING_INSTRUCTIONS: &str = r#"
# FitTrack Tracking Instructions

FitTrack keeps one user profile, a daily food log, a weight log and dietary
preferences, and derives daily energy and macro targets from the profile.

## 1. Set up the profile first

Call `save_profile` with:
- `age` (years), `weight` (kg), `height` (cm): all must be positive
- `gender`: Male | Female
- `activity_level`: Sedentary | Lightly Active | Moderately Active | Very Active | Extra Active
- `goal`: Weight Loss | Muscle Gain | Maintenance
- `fitness_level`: Beginner | Intermediate | Advanced
- optional `first_name`, `last_name`, `ethnicity`, `medical_conditions`

Any other value for an enumerated field is rejected; the profile is not stored.
The response includes the daily targets.

## 2. Daily targets

`get_daily_targets` returns:
- **BMR** (Mifflin-St Jeor): 10 x weight + 6.25 x height - 5 x age, +5 for men, -161 for women
- **TDEE**: BMR x activity multiplier (1.2 / 1.375 / 1.55 / 1.725 / 1.9)
- **Macros**: share of TDEE by goal, converted at 4 kcal/g protein and carbs, 9 kcal/g fat
  - Weight Loss: 40% protein, 30% carbs, 30% fat
  - Muscle Gain: 30% protein, 50% carbs, 20% fat
  - Maintenance: 30% protein, 40% carbs, 30% fat

`display` values are truncated toward zero, never rounded.
Use `calculate_targets` to try values without touching the saved profile.

## 3. Logging food

- `add_food_entry` with `food`, `calories`, `protein`, `carbs`, `fats` (grams)
- `date` is YYYY-MM-DD and defaults to today
- `get_food_log` lists a day's entries; `get_daily_totals` sums them and compares against targets
- `update_food_entry` / `delete_food_entry` take the entry `id` from the log

## 4. Tracking weight

- `log_weight` with `weight` in kg and an optional `date`
- `get_weight_history` returns entries oldest first with the overall change
- `export_weight_chart` writes a PNG line chart to `file_path`

## 5. Workouts

`get_workout_plan` returns three workouts for the profile's goal and fitness
level, scheduled on Monday/Wednesday/Friday for beginners, plus training tips.

## 6. AI recommendations

Requires the `OPENAI_API_KEY` environment variable on the server.
- `get_ai_diet_recommendations`
- `get_ai_workout_recommendations` (uses `medical_conditions` from the profile)
- `get_personalized_diet_plan` (needs `save_dietary_preferences` first)

When a prerequisite is missing the result is `{"error": ..., "message": ...}`;
relay the message to the user.

## 7. Export

`export_user_data` returns everything as JSON and can also write it to `file_path`.
"#;

/// Runtime status of the FitTrack service
#[derive(Debug, Clone, Serialize)]
pub struct FitTrackStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub ai_model: Option<String>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    ai_model: Option<String>,
}

impl StatusTracker {
    /// `ai_model` is `None` when AI requests are disabled
    pub fn new(database_path: PathBuf, ai_model: Option<String>) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            ai_model,
        }
    }

    pub fn get_status(&self) -> FitTrackStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitTrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            ai_model: self.ai_model.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
