//! Runtime configuration
//!
//! Everything comes from environment variables; nothing is required except
//! `OPENAI_API_KEY` for the AI tools.

use std::path::PathBuf;

pub const DATABASE_PATH_ENV: &str = "FITTRACK_DATABASE_PATH";
pub const AI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const AI_BASE_URL_ENV: &str = "FITTRACK_AI_BASE_URL";
pub const AI_MODEL_ENV: &str = "FITTRACK_AI_MODEL";

pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o";

/// Settings for the AI plan requester
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub ai: AiConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = AiConfig::default();
        Self {
            database_path: get(DATABASE_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            ai: AiConfig {
                api_key: get(AI_API_KEY_ENV),
                base_url: get(AI_BASE_URL_ENV)
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.base_url),
                model: get(AI_MODEL_ENV).unwrap_or(defaults.model),
            },
        }
    }
}

/// `<project>/data/fittrack.db`, resolved from the executable location
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("fittrack.db");
    path
}
