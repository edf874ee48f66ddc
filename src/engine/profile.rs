//! Profile attributes consumed by the engine
//!
//! Closed enumerations for gender, activity level, goal and fitness level, plus
//! the `Profile` value the presentation layer threads into every engine call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{require_positive, InvalidInputError};

/// Lowercase, map `_`/`-` to spaces and collapse runs of whitespace.
fn normalize(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(InvalidInputError::unknown("gender", s)),
        }
    }
}

/// Activity level, each mapped to a fixed TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    #[serde(rename = "Lightly Active")]
    LightlyActive,
    #[serde(rename = "Moderately Active")]
    ModeratelyActive,
    #[serde(rename = "Very Active")]
    VeryActive,
    #[serde(rename = "Extra Active")]
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly active" => Ok(ActivityLevel::LightlyActive),
            "moderately active" => Ok(ActivityLevel::ModeratelyActive),
            "very active" => Ok(ActivityLevel::VeryActive),
            "extra active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(InvalidInputError::unknown("activity_level", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Weight Loss")]
    WeightLoss = 0,
    #[serde(rename = "Muscle Gain")]
    MuscleGain = 1,
    Maintenance = 2,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::WeightLoss, Goal::MuscleGain, Goal::Maintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Maintenance => "Maintenance",
        }
    }

    /// Row in the workout table
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Goal {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "weight loss" => Ok(Goal::WeightLoss),
            "muscle gain" => Ok(Goal::MuscleGain),
            "maintenance" => Ok(Goal::Maintenance),
            _ => Err(InvalidInputError::unknown("goal", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitnessLevel {
    Beginner = 0,
    Intermediate = 1,
    Advanced = 2,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }

    /// Column in the workout table
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for FitnessLevel {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            _ => Err(InvalidInputError::unknown("fitness_level", s)),
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_via_as_str!(Gender, ActivityLevel, Goal, FitnessLevel);

/// The attributes the engine computes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub weight: f64, // kg
    pub height: f64, // cm
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub fitness_level: FitnessLevel,
}

impl Profile {
    /// Check that every numeric field is positive
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        require_positive("age", f64::from(self.age))?;
        require_positive("weight", self.weight)?;
        require_positive("height", self.height)?;
        Ok(())
    }
}
