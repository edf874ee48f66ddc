//! Profile and daily-target tools

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Database;
use crate::engine::{
    energy_targets, ActivityLevel, DisplayTargets, EnergyTargets, FitnessLevel, Gender, Goal,
    InvalidInputError, Profile,
};
use crate::models::{ProfileRecord, ProfileSave};

/// Profile fields as they arrive from a form or tool call
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ethnicity: Option<String>,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub gender: String,
    pub activity_level: String,
    pub goal: String,
    pub fitness_level: String,
    pub medical_conditions: Option<String>,
}

impl ProfileInput {
    /// Parse the enumerated fields and check positivity
    pub fn to_profile(&self) -> Result<Profile, InvalidInputError> {
        let profile = Profile {
            age: self.age,
            weight: self.weight,
            height: self.height,
            gender: self.gender.parse::<Gender>()?,
            activity_level: self.activity_level.parse::<ActivityLevel>()?,
            goal: self.goal.parse::<Goal>()?,
            fitness_level: self.fitness_level.parse::<FitnessLevel>()?,
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// Targets with both precise and display values
#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub targets: EnergyTargets,
    pub display: DisplayTargets,
}

impl From<EnergyTargets> for TargetsResponse {
    fn from(targets: EnergyTargets) -> Self {
        Self {
            display: targets.display(),
            targets,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub profile: ProfileRecord,
    pub daily_targets: TargetsResponse,
}

fn invalid(e: InvalidInputError) -> String {
    format!("Invalid input: {}", e)
}

/// Load the saved profile
pub fn get_profile(db: &Database) -> Result<Option<ProfileRecord>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    ProfileRecord::get(&conn).map_err(|e| format!("Failed to load profile: {}", e))
}

/// Validate and store the profile, returning it with its daily targets
pub fn save_profile(db: &Database, input: ProfileInput) -> Result<SaveProfileResponse, String> {
    let profile = input.to_profile().map_err(invalid)?;
    let targets = energy_targets(&profile).map_err(invalid)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let record = ProfileRecord::save(
        &conn,
        &ProfileSave {
            first_name: input.first_name,
            last_name: input.last_name,
            ethnicity: input.ethnicity,
            profile,
            medical_conditions: input.medical_conditions,
        },
    )
    .map_err(|e| format!("Failed to save profile: {}", e))?;

    info!(goal = %record.profile.goal, "Profile saved");

    Ok(SaveProfileResponse {
        profile: record,
        daily_targets: targets.into(),
    })
}

/// Targets for the saved profile, `None` if no profile exists yet
pub fn get_daily_targets(db: &Database) -> Result<Option<TargetsResponse>, String> {
    match get_profile(db)? {
        Some(record) => energy_targets(&record.profile)
            .map(|t| Some(t.into()))
            .map_err(invalid),
        None => Ok(None),
    }
}

/// Targets for ad-hoc values; nothing is stored
pub fn calculate_targets(
    age: u32,
    weight: f64,
    height: f64,
    gender: &str,
    activity_level: &str,
    goal: &str,
) -> Result<TargetsResponse, String> {
    let profile = Profile {
        age,
        weight,
        height,
        gender: gender.parse().map_err(invalid)?,
        activity_level: activity_level.parse().map_err(invalid)?,
        goal: goal.parse().map_err(invalid)?,
        // not used by the calculator
        fitness_level: FitnessLevel::Beginner,
    };
    energy_targets(&profile).map(Into::into).map_err(invalid)
}
