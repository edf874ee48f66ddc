//! Basic workout plan tool

use serde::Serialize;

use super::profile::get_profile;
use crate::db::Database;
use crate::engine::{get_workout_recommendation, FitnessLevel, Goal};

pub const TRAINING_TIPS: [&str; 4] = [
    "Stay hydrated: Drink water before, during, and after workouts",
    "Warm-up: 5-10 minutes of light cardio before each session",
    "Form: Focus on proper form over weight/intensity",
    "Rest: Allow 24-48 hours between training the same muscle groups",
];

const BEGINNER_DAYS: [&str; 3] = ["Monday", "Wednesday", "Friday"];
const TRAINED_DAYS: [&str; 5] = ["Monday", "Tuesday", "Thursday", "Friday", "Saturday"];

/// Weekdays to train on for a fitness level
pub fn training_days(fitness_level: FitnessLevel) -> &'static [&'static str] {
    match fitness_level {
        FitnessLevel::Beginner => &BEGINNER_DAYS,
        FitnessLevel::Intermediate | FitnessLevel::Advanced => &TRAINED_DAYS,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledWorkout {
    pub day: &'static str,
    pub workout: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicWorkoutPlan {
    pub goal: Goal,
    pub fitness_level: FitnessLevel,
    pub schedule: Vec<ScheduledWorkout>,
    pub tips: &'static [&'static str],
}

impl BasicWorkoutPlan {
    /// Pair training days with workouts; stops at whichever runs out first
    pub fn build(goal: Goal, fitness_level: FitnessLevel) -> Self {
        let schedule = training_days(fitness_level)
            .iter()
            .zip(get_workout_recommendation(goal, fitness_level))
            .map(|(&day, &workout)| ScheduledWorkout { day, workout })
            .collect();

        Self {
            goal,
            fitness_level,
            schedule,
            tips: &TRAINING_TIPS,
        }
    }
}

/// Basic plan for the saved profile, `None` if no profile exists yet
pub fn get_workout_plan(db: &Database) -> Result<Option<BasicWorkoutPlan>, String> {
    Ok(get_profile(db)?
        .map(|record| BasicWorkoutPlan::build(record.profile.goal, record.profile.fitness_level)))
}
