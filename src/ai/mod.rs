//! AI plan requests
//!
//! Diet and workout plans from an OpenAI-compatible completion API. Failures
//! here mean the AI service is unavailable or misbehaved; they never signal
//! invalid profile input.

pub mod client;
pub mod prompts;
pub mod requester;

use thiserror::Error;

pub use client::{CompletionApi, OpenAiClient};
pub use requester::{
    DietRecommendations, PersonalizedDietPlan, PlanRequester, WorkoutRecommendations,
};

#[derive(Debug, Clone, Error)]
pub enum AiError {
    #[error("OpenAI API key not set. AI recommendations are not available.")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not parse AI response: {0}")]
    Parse(String),
}

/// Pull the JSON object out of a model answer, tolerating markdown fences and
/// surrounding prose.
pub fn extract_json(text: &str) -> Result<&str, AiError> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    if let Some(start) = text.find("```json") {
        let start = start + "```json".len();
        if let Some(end) = text[start..].find("```") {
            return Ok(text[start..start + end].trim());
        }
    }

    if let Some(start) = text.find("```") {
        let start = start + 3;
        // skip a language tag on the fence line
        let content_start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[content_start..].find("```") {
            return Ok(text[content_start..content_start + end].trim());
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return Ok(&text[start..=end]);
        }
    }

    Err(AiError::Parse("No JSON object in response".to_string()))
}
