//! AI plan requester
//!
//! Builds a prompt, sends it through a [`CompletionApi`] and parses the JSON
//! answer into a typed plan. Optional sections fall back to a fixed sentence
//! when the model leaves them out; required sections missing is a parse error.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::client::CompletionApi;
use super::prompts::{diet_prompt, personalized_diet_prompt, workout_prompt};
use super::{extract_json, AiError};
use crate::engine::{FitnessLevel, Goal, Profile};
use crate::models::DietaryPreferences;

macro_rules! fallback {
    ($name:ident, $text:literal) => {
        fn $name() -> Value {
            Value::String($text.to_string())
        }
    };
}

fallback!(no_supplements, "No specific supplements recommended");
fallback!(no_meal_prep, "No specific meal prep tips provided");
fallback!(no_dining_out, "No specific dining out tips provided");
fallback!(no_hydration, "No specific hydration recommendations provided");
fallback!(no_progression, "No progression plan provided");
fallback!(no_warmup, "No warm-up/cool-down routine provided");
fallback!(no_tracking, "No tracking metrics provided");
fallback!(no_alternatives, "No alternative exercises provided");
fallback!(no_injury_prevention, "No injury prevention tips provided");
fallback!(no_rest, "No rest guidelines provided");
fallback!(no_cardio, "No cardio integration plan provided");

/// Diet recommendations. Sections are free-form JSON as the model returns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietRecommendations {
    pub meal_plan: Value,
    pub foods_to_include: Value,
    pub foods_to_avoid: Value,
    pub timing_tips: Value,
    #[serde(default = "no_supplements")]
    pub supplements: Value,
    #[serde(default = "no_meal_prep")]
    pub meal_prep_tips: Value,
    #[serde(default = "no_dining_out")]
    pub dining_out_tips: Value,
    #[serde(default = "no_hydration")]
    pub hydration: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecommendations {
    pub weekly_schedule: Value,
    pub exercise_details: Value,
    #[serde(default = "no_progression")]
    pub progression_plan: Value,
    pub recovery_tips: Value,
    #[serde(default = "no_warmup")]
    pub warmup_cooldown: Value,
    #[serde(default = "no_tracking")]
    pub tracking_metrics: Value,
    #[serde(default = "no_alternatives")]
    pub alternative_exercises: Value,
    #[serde(default = "no_injury_prevention")]
    pub injury_prevention: Value,
    #[serde(default = "no_rest")]
    pub rest_guidelines: Value,
    #[serde(default = "no_cardio")]
    pub cardio_integration: Value,
}

/// Plan built from profile and saved dietary preferences; every section required
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizedDietPlan {
    pub weekly_meal_plan: Value,
    pub shopping_list: Value,
    pub meal_prep_guide: Value,
    pub alternatives: Value,
    pub restaurant_guide: Value,
    pub supplements: Value,
    pub hydration_schedule: Value,
    pub special_occasions: Value,
    pub tracking_metrics: Value,
    pub common_mistakes: Value,
}

#[derive(Clone)]
pub struct PlanRequester {
    backend: Arc<dyn CompletionApi>,
}

impl PlanRequester {
    pub fn new(backend: Arc<dyn CompletionApi>) -> Self {
        Self { backend }
    }

    async fn request<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, AiError> {
        let text = self.backend.complete_json(prompt).await?;
        let json = extract_json(&text)?;
        serde_json::from_str(json).map_err(|e| AiError::Parse(e.to_string()))
    }

    pub async fn diet_recommendations(
        &self,
        profile: &Profile,
    ) -> Result<DietRecommendations, AiError> {
        info!(goal = %profile.goal, "Requesting AI diet recommendations");
        self.request(&diet_prompt(profile)).await
    }

    pub async fn workout_recommendations(
        &self,
        age: u32,
        fitness_level: FitnessLevel,
        goal: Goal,
        medical_conditions: Option<&str>,
    ) -> Result<WorkoutRecommendations, AiError> {
        info!(%goal, %fitness_level, "Requesting AI workout recommendations");
        self.request(&workout_prompt(age, fitness_level, goal, medical_conditions))
            .await
    }

    pub async fn personalized_diet_plan(
        &self,
        profile: &Profile,
        prefs: &DietaryPreferences,
    ) -> Result<PersonalizedDietPlan, AiError> {
        info!(goal = %profile.goal, "Requesting personalized AI diet plan");
        self.request(&personalized_diet_prompt(profile, prefs)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ActivityLevel, Gender};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a canned answer and records the prompts it was sent
    struct FakeBackend {
        answer: Result<String, AiError>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn answering(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(answer.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionApi for FakeBackend {
        async fn complete_json(&self, prompt: &str) -> Result<String, AiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answer.clone()
        }
    }

    fn profile() -> Profile {
        Profile {
            age: 33,
            weight: 64.0,
            height: 170.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::VeryActive,
            goal: Goal::Maintenance,
            fitness_level: FitnessLevel::Beginner,
        }
    }

    #[tokio::test]
    async fn test_diet_recommendations_with_defaults() {
        let backend = FakeBackend::answering(
            r#"{"meal_plan": ["oats", "salad"], "foods_to_include": "greens",
                "foods_to_avoid": "soda", "timing_tips": "eat early"}"#,
        );
        let requester = PlanRequester::new(backend.clone());

        let recs = requester.diet_recommendations(&profile()).await.unwrap();
        assert_eq!(recs.meal_plan[0], "oats");
        assert_eq!(recs.supplements, "No specific supplements recommended");
        assert_eq!(recs.hydration, "No specific hydration recommendations provided");

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- Goal: Maintenance"));
    }

    #[tokio::test]
    async fn test_missing_required_section_is_parse_error() {
        let backend = FakeBackend::answering(r#"{"meal_plan": "x"}"#);
        let requester = PlanRequester::new(backend);
        let err = requester.diet_recommendations(&profile()).await.unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_workout_recommendations_from_fenced_json() {
        let backend = FakeBackend::answering(
            "Here you go:\n```json\n{\"weekly_schedule\": \"Mon/Wed/Fri\", \"exercise_details\": {}, \"recovery_tips\": \"sleep\"}\n```",
        );
        let requester = PlanRequester::new(backend.clone());

        let recs = requester
            .workout_recommendations(33, FitnessLevel::Beginner, Goal::Maintenance, None)
            .await
            .unwrap();
        assert_eq!(recs.weekly_schedule, "Mon/Wed/Fri");
        assert_eq!(recs.rest_guidelines, "No rest guidelines provided");
        assert!(backend.prompts.lock().unwrap()[0].contains("- Medical Conditions: None"));
    }

    #[tokio::test]
    async fn test_personalized_plan_requires_all_sections() {
        let full = r#"{"weekly_meal_plan": 1, "shopping_list": 2, "meal_prep_guide": 3,
            "alternatives": 4, "restaurant_guide": 5, "supplements": 6,
            "hydration_schedule": 7, "special_occasions": 8, "tracking_metrics": 9,
            "common_mistakes": 10}"#;
        let requester = PlanRequester::new(FakeBackend::answering(full));
        let plan = requester
            .personalized_diet_plan(&profile(), &DietaryPreferences::default())
            .await
            .unwrap();
        assert_eq!(plan.common_mistakes, 10);

        let partial = r#"{"weekly_meal_plan": 1}"#;
        let requester = PlanRequester::new(FakeBackend::answering(partial));
        assert!(requester
            .personalized_diet_plan(&profile(), &DietaryPreferences::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let backend = Arc::new(FakeBackend {
            answer: Err(AiError::Api { status: 429, message: "rate limited".to_string() }),
            prompts: Mutex::new(Vec::new()),
        });
        let requester = PlanRequester::new(backend);
        let err = requester.diet_recommendations(&profile()).await.unwrap_err();
        assert!(matches!(err, AiError::Api { status: 429, .. }));
    }
}
