//! FitTrack MCP Server Implementation
//!
//! Implements the MCP server with all FitTrack tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::ai::PlanRequester;
use crate::db::Database;
use crate::models::{DietaryPreferences, MealTiming, Nutrition};
use crate::tools::profile::ProfileInput;
use crate::tools::status::StatusTracker;
use crate::tools::{export, food_log, preferences, profile, progress, recommendations, workouts};

/// FitTrack MCP Service
#[derive(Clone)]
pub struct FitTrackService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    /// `None` when no API key is configured
    planner: Option<PlanRequester>,
    tool_router: ToolRouter<FitTrackService>,
}

impl FitTrackService {
    pub fn new(
        database_path: PathBuf,
        database: Database,
        planner: Option<PlanRequester>,
        ai_model: Option<String>,
    ) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path, ai_model))),
            database,
            planner,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, id: i64) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(format!(
        r#"{{"error": "{} not found", "id": {}}}"#,
        what, id
    ))]))
}

fn no_profile() -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        r#"{"error": "Profile not found", "message": "Please complete your profile first!"}"#,
    )]))
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveProfileParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ethnicity: Option<String>,
    /// Age in years
    pub age: u32,
    /// Weight in kg
    pub weight: f64,
    /// Height in cm
    pub height: f64,
    /// Male or Female
    pub gender: String,
    /// Sedentary, Lightly Active, Moderately Active, Very Active, Extra Active
    pub activity_level: String,
    /// Weight Loss, Muscle Gain, Maintenance
    pub goal: String,
    /// Beginner, Intermediate, Advanced
    pub fitness_level: String,
    pub medical_conditions: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateTargetsParams {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub gender: String,
    pub activity_level: String,
    pub goal: String,
}

// ============================================================================
// Food Log Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodEntryParams {
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
    pub food: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFoodEntryParams {
    pub id: i64,
    pub food: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteFoodEntryParams {
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
}

// ============================================================================
// Progress Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogWeightParams {
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
    /// Weight in kg
    pub weight: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportWeightChartParams {
    /// Where to write the PNG
    pub file_path: String,
}

// ============================================================================
// Preferences / Export Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveDietaryPreferencesParams {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default)]
    pub preferred_cuisines: Vec<String>,
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
    /// HH:MM, defaults to 08:00
    pub breakfast: Option<String>,
    /// HH:MM, defaults to 13:00
    pub lunch: Option<String>,
    /// HH:MM, defaults to 19:00
    pub dinner: Option<String>,
    /// 0-5, defaults to 2
    pub snacks_count: Option<u8>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportUserDataParams {
    /// Optional file to also write the JSON to
    pub file_path: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FitTrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitTrack service including build info, database status, AI model, and process information")]
    async fn fittrack_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        to_json(&status)
    }

    #[tool(description = "Get step-by-step instructions for using the FitTrack tools. Call this when starting a tracking session or when unsure which values the tools accept.")]
    fn tracking_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::TRACKING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(TRACKING_INSTRUCTIONS)]))
    }

    // --- Profile & Targets ---

    #[tool(description = "Save the user profile (replaces any existing one). Returns the profile with daily calorie and macro targets.")]
    fn save_profile(
        &self,
        Parameters(p): Parameters<SaveProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let input = ProfileInput {
            first_name: p.first_name,
            last_name: p.last_name,
            ethnicity: p.ethnicity,
            age: p.age,
            weight: p.weight,
            height: p.height,
            gender: p.gender,
            activity_level: p.activity_level,
            goal: p.goal,
            fitness_level: p.fitness_level,
            medical_conditions: p.medical_conditions,
        };
        let result = profile::save_profile(&self.database, input)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the saved user profile")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let record = profile::get_profile(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        match record {
            Some(record) => to_json(&record),
            None => no_profile(),
        }
    }

    #[tool(description = "Get BMR, TDEE and daily macro targets (grams) for the saved profile")]
    fn get_daily_targets(&self) -> Result<CallToolResult, McpError> {
        let targets = profile::get_daily_targets(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        match targets {
            Some(targets) => to_json(&targets),
            None => no_profile(),
        }
    }

    #[tool(description = "Calculate BMR, TDEE and macro targets for arbitrary values without saving anything")]
    fn calculate_targets(
        &self,
        Parameters(p): Parameters<CalculateTargetsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = profile::calculate_targets(
            p.age,
            p.weight,
            p.height,
            &p.gender,
            &p.activity_level,
            &p.goal,
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the basic weekly workout plan and training tips for the saved profile")]
    fn get_workout_plan(&self) -> Result<CallToolResult, McpError> {
        let plan = workouts::get_workout_plan(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        match plan {
            Some(plan) => to_json(&plan),
            None => no_profile(),
        }
    }

    // --- Food Log ---

    #[tool(description = "Log a food with its calories and macros (grams) for a date (defaults to today)")]
    fn add_food_entry(
        &self,
        Parameters(p): Parameters<AddFoodEntryParams>,
    ) -> Result<CallToolResult, McpError> {
        let nutrition = Nutrition {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fats: p.fats,
        };
        let result = food_log::add_food_entry(&self.database, p.date.as_deref(), &p.food, nutrition)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Replace the food name and nutrition of a food log entry")]
    fn update_food_entry(
        &self,
        Parameters(p): Parameters<UpdateFoodEntryParams>,
    ) -> Result<CallToolResult, McpError> {
        let nutrition = Nutrition {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fats: p.fats,
        };
        match food_log::update_food_entry(&self.database, p.id, &p.food, nutrition)
            .map_err(|e| McpError::invalid_params(e, None))?
        {
            Some(resp) => to_json(&resp),
            None => not_found("Food entry", p.id),
        }
    }

    #[tool(description = "Delete a food log entry")]
    fn delete_food_entry(
        &self,
        Parameters(p): Parameters<DeleteFoodEntryParams>,
    ) -> Result<CallToolResult, McpError> {
        let deleted = food_log::delete_food_entry(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        if deleted {
            to_json(&serde_json::json!({ "success": true, "id": p.id }))
        } else {
            not_found("Food entry", p.id)
        }
    }

    #[tool(description = "List the food log entries for a date (defaults to today)")]
    fn get_food_log(
        &self,
        Parameters(p): Parameters<DateParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = food_log::get_food_log(&self.database, p.date.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Sum calories and macros for a date, with macro calorie distribution and remaining calories against the profile targets")]
    fn get_daily_totals(
        &self,
        Parameters(p): Parameters<DateParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = food_log::get_daily_totals(&self.database, p.date.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Progress ---

    #[tool(description = "Log body weight in kg for a date (defaults to today)")]
    fn log_weight(
        &self,
        Parameters(p): Parameters<LogWeightParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = progress::log_weight(&self.database, p.date.as_deref(), p.weight)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get all weight entries ordered by date with latest value and overall change")]
    fn get_weight_history(&self) -> Result<CallToolResult, McpError> {
        let result = progress::get_weight_history(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Render the weight history as a PNG line chart at the given file path")]
    fn export_weight_chart(
        &self,
        Parameters(p): Parameters<ExportWeightChartParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = progress::export_weight_chart(&self.database, &p.file_path)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Dietary Preferences ---

    #[tool(description = "Save dietary preferences (allergies, restrictions, cuisines, disliked ingredients, meal timing). Replaces any saved preferences.")]
    fn save_dietary_preferences(
        &self,
        Parameters(p): Parameters<SaveDietaryPreferencesParams>,
    ) -> Result<CallToolResult, McpError> {
        let defaults = MealTiming::default();
        let prefs = DietaryPreferences {
            allergies: p.allergies,
            restrictions: p.restrictions,
            preferred_cuisines: p.preferred_cuisines,
            disliked_ingredients: p.disliked_ingredients,
            meal_timing: MealTiming {
                breakfast: p.breakfast.unwrap_or(defaults.breakfast),
                lunch: p.lunch.unwrap_or(defaults.lunch),
                dinner: p.dinner.unwrap_or(defaults.dinner),
                snacks_count: p.snacks_count.unwrap_or(defaults.snacks_count),
            },
        };
        let result = preferences::save_dietary_preferences(&self.database, prefs)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the saved dietary preferences")]
    fn get_dietary_preferences(&self) -> Result<CallToolResult, McpError> {
        let prefs = preferences::get_dietary_preferences(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        match prefs {
            Some(prefs) => to_json(&prefs),
            None => Ok(CallToolResult::success(vec![Content::text(
                r#"{"error": "Preferences not found", "message": "Please set your dietary preferences first!"}"#,
            )])),
        }
    }

    // --- AI Recommendations ---

    #[tool(description = "Get AI-generated diet recommendations for the saved profile. Requires OPENAI_API_KEY on the server.")]
    async fn get_ai_diet_recommendations(&self) -> Result<CallToolResult, McpError> {
        let result =
            recommendations::get_ai_diet_recommendations(&self.database, self.planner.as_ref())
                .await
                .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get AI-generated workout recommendations for the saved profile, taking medical conditions into account. Requires OPENAI_API_KEY on the server.")]
    async fn get_ai_workout_recommendations(&self) -> Result<CallToolResult, McpError> {
        let result =
            recommendations::get_ai_workout_recommendations(&self.database, self.planner.as_ref())
                .await
                .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a personalized AI diet plan from the saved profile and dietary preferences. Requires OPENAI_API_KEY on the server.")]
    async fn get_personalized_diet_plan(&self) -> Result<CallToolResult, McpError> {
        let result =
            recommendations::get_personalized_diet_plan(&self.database, self.planner.as_ref())
                .await
                .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Export ---

    #[tool(description = "Export profile, dietary preferences, weight history and today's food log as JSON, optionally writing it to a file")]
    fn export_user_data(
        &self,
        Parameters(p): Parameters<ExportUserDataParams>,
    ) -> Result<CallToolResult, McpError> {
        let json = export::export_user_data(&self.database, p.file_path.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitTrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fittrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitTrack".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitTrack - Health, nutrition and training targets. \
                 IMPORTANT: Call tracking_instructions first if unsure about accepted values. \
                 Profile: save_profile/get_profile, get_daily_targets, calculate_targets. \
                 Workouts: get_workout_plan. \
                 Food log: add/update/delete_food_entry, get_food_log, get_daily_totals. \
                 Weight: log_weight, get_weight_history, export_weight_chart. \
                 Preferences: save/get_dietary_preferences. \
                 AI: get_ai_diet_recommendations, get_ai_workout_recommendations, get_personalized_diet_plan. \
                 Export: export_user_data."
                    .into(),
            ),
        }
    }
}
