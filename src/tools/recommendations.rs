//! AI recommendation tools
//!
//! Prerequisites that are missing (no profile, no preferences, no API key)
//! come back as `{"error", "message"}` JSON rather than a failed call.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use super::preferences::get_dietary_preferences;
use super::profile::get_profile;
use crate::ai::{AiError, PlanRequester};
use crate::db::Database;

const PROFILE_REQUIRED: &str = "Please complete your profile first!";
const PREFERENCES_REQUIRED: &str = "Please set your dietary preferences first!";
const API_KEY_REQUIRED: &str = "Please set up your OpenAI API key to enable AI recommendations.";

const RECOMMENDATIONS_FAILED: &str = "Failed to get AI recommendations";
const PERSONALIZED_PLAN_FAILED: &str = "Failed to get personalized diet plan";

fn notice(error: &str, message: &str) -> Value {
    json!({ "error": error, "message": message })
}

fn ai_failure(label: &str, e: AiError) -> Value {
    match e {
        AiError::NotConfigured => notice("AI service unavailable", API_KEY_REQUIRED),
        other => {
            warn!(error = %other, "AI request failed");
            notice(label, &other.to_string())
        }
    }
}

fn to_value<T: Serialize>(plan: T) -> Result<Value, String> {
    serde_json::to_value(plan).map_err(|e| format!("Failed to serialize plan: {}", e))
}

pub async fn get_ai_diet_recommendations(
    db: &Database,
    requester: Option<&PlanRequester>,
) -> Result<Value, String> {
    let Some(record) = get_profile(db)? else {
        return Ok(notice("Profile not found", PROFILE_REQUIRED));
    };
    let Some(requester) = requester else {
        return Ok(ai_failure(RECOMMENDATIONS_FAILED, AiError::NotConfigured));
    };

    match requester.diet_recommendations(&record.profile).await {
        Ok(plan) => to_value(plan),
        Err(e) => Ok(ai_failure(RECOMMENDATIONS_FAILED, e)),
    }
}

pub async fn get_ai_workout_recommendations(
    db: &Database,
    requester: Option<&PlanRequester>,
) -> Result<Value, String> {
    let Some(record) = get_profile(db)? else {
        return Ok(notice("Profile not found", PROFILE_REQUIRED));
    };
    let Some(requester) = requester else {
        return Ok(ai_failure(RECOMMENDATIONS_FAILED, AiError::NotConfigured));
    };

    let profile = &record.profile;
    let result = requester
        .workout_recommendations(
            profile.age,
            profile.fitness_level,
            profile.goal,
            record.medical_conditions.as_deref(),
        )
        .await;

    match result {
        Ok(plan) => to_value(plan),
        Err(e) => Ok(ai_failure(RECOMMENDATIONS_FAILED, e)),
    }
}

pub async fn get_personalized_diet_plan(
    db: &Database,
    requester: Option<&PlanRequester>,
) -> Result<Value, String> {
    let Some(record) = get_profile(db)? else {
        return Ok(notice("Profile not found", PROFILE_REQUIRED));
    };
    let Some(prefs) = get_dietary_preferences(db)? else {
        return Ok(notice("Preferences not found", PREFERENCES_REQUIRED));
    };
    let Some(requester) = requester else {
        return Ok(ai_failure(PERSONALIZED_PLAN_FAILED, AiError::NotConfigured));
    };

    match requester.personalized_diet_plan(&record.profile, &prefs).await {
        Ok(plan) => to_value(plan),
        Err(e) => Ok(ai_failure(PERSONALIZED_PLAN_FAILED, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CompletionApi;
    use crate::models::DietaryPreferences;
    use crate::tools::preferences::save_dietary_preferences;
    use crate::tools::profile::{save_profile, ProfileInput};
    use crate::tools::test_database;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Canned(Result<String, AiError>);

    #[async_trait]
    impl CompletionApi for Canned {
        async fn complete_json(&self, _prompt: &str) -> Result<String, AiError> {
            self.0.clone()
        }
    }

    fn requester(answer: Result<&str, AiError>) -> PlanRequester {
        PlanRequester::new(Arc::new(Canned(answer.map(str::to_string))))
    }

    fn with_profile() -> Database {
        let db = test_database();
        save_profile(
            &db,
            ProfileInput {
                first_name: None,
                last_name: None,
                ethnicity: None,
                age: 28,
                weight: 75.0,
                height: 178.0,
                gender: "Male".to_string(),
                activity_level: "Very Active".to_string(),
                goal: "Muscle Gain".to_string(),
                fitness_level: "Intermediate".to_string(),
                medical_conditions: Some("asthma".to_string()),
            },
        )
        .unwrap();
        db
    }

    #[tokio::test]
    async fn test_profile_required() {
        let db = test_database();
        let r = requester(Ok("{}"));
        let value = get_ai_diet_recommendations(&db, Some(&r)).await.unwrap();
        assert_eq!(value["message"], PROFILE_REQUIRED);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let db = with_profile();
        let value = get_ai_workout_recommendations(&db, None).await.unwrap();
        assert_eq!(value["error"], "AI service unavailable");
        assert_eq!(value["message"], API_KEY_REQUIRED);
    }

    #[tokio::test]
    async fn test_workout_plan_passes_through() {
        let db = with_profile();
        let r = requester(Ok(
            r#"{"weekly_schedule": "PPL", "exercise_details": [], "recovery_tips": "sleep"}"#,
        ));
        let value = get_ai_workout_recommendations(&db, Some(&r)).await.unwrap();
        assert_eq!(value["weekly_schedule"], "PPL");
        assert_eq!(value["cardio_integration"], "No cardio integration plan provided");
    }

    #[tokio::test]
    async fn test_ai_failure_is_reported() {
        let db = with_profile();
        let r = requester(Err(AiError::Request("timed out".to_string())));
        let value = get_ai_diet_recommendations(&db, Some(&r)).await.unwrap();
        assert_eq!(value["error"], RECOMMENDATIONS_FAILED);
    }

    #[tokio::test]
    async fn test_personalized_plan_needs_preferences() {
        let db = with_profile();
        let r = requester(Ok("{}"));
        let value = get_personalized_diet_plan(&db, Some(&r)).await.unwrap();
        assert_eq!(value["message"], PREFERENCES_REQUIRED);

        save_dietary_preferences(&db, DietaryPreferences::default()).unwrap();
        let value = get_personalized_diet_plan(&db, Some(&r)).await.unwrap();
        // empty object is missing every required section
        assert_eq!(value["error"], PERSONALIZED_PLAN_FAILED);
    }
}
