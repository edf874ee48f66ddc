//! Workout table selector
//!
//! Static goal × fitness-level table of canned workout descriptions.

use super::error::InvalidInputError;
use super::profile::{FitnessLevel, Goal};

/// Number of descriptions in every cell
pub const WORKOUTS_PER_PLAN: usize = 3;

// Rows follow `Goal::index`, columns follow `FitnessLevel::index`.
static WORKOUT_TABLE: [[[&str; WORKOUTS_PER_PLAN]; 3]; 3] = [
    // Weight Loss
    [
        [
            "30 minutes walking daily",
            "2x full body strength training",
            "1x yoga or stretching",
        ],
        [
            "30 minutes jogging/cycling",
            "3x full body HIIT",
            "2x strength training",
        ],
        [
            "45 minutes high-intensity cardio",
            "4x split strength training",
            "2x HIIT sessions",
        ],
    ],
    // Muscle Gain
    [
        [
            "3x full body strength training",
            "2x light cardio",
            "Focus on compound exercises",
        ],
        [
            "4x upper/lower split",
            "2x moderate cardio",
            "Progressive overload focus",
        ],
        [
            "5x body part split",
            "2x conditioning work",
            "Periodization training",
        ],
    ],
    // Maintenance
    [
        [
            "2x full body strength",
            "2x cardio sessions",
            "1x flexibility work",
        ],
        [
            "3x strength training",
            "2x cardio sessions",
            "1x mobility work",
        ],
        [
            "4x strength training",
            "2x cardio sessions",
            "1x active recovery",
        ],
    ],
];

/// Ordered workout descriptions for a goal and fitness level
pub fn get_workout_recommendation(
    goal: Goal,
    fitness_level: FitnessLevel,
) -> &'static [&'static str] {
    &WORKOUT_TABLE[goal.index()][fitness_level.index()]
}

/// Same lookup from free text, failing on values outside either enumeration
pub fn workout_recommendation_for(
    goal: &str,
    fitness_level: &str,
) -> Result<&'static [&'static str], InvalidInputError> {
    let goal: Goal = goal.parse()?;
    let level: FitnessLevel = fitness_level.parse()?;
    Ok(get_workout_recommendation(goal, level))
}
