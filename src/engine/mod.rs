//! Nutrition and training computation engine
//!
//! Pure functions turning a profile into energy/macro targets and a static
//! workout plan. No I/O and no state between calls.

pub mod error;
pub mod metabolic;
pub mod profile;
pub mod workouts;

pub use error::InvalidInputError;
pub use metabolic::{
    compute_bmr, compute_tdee, energy_targets, macro_grams, macro_split, DisplayTargets,
    EnergyTargets, MacroGrams, MacroSplit, TruncatedGrams, KCAL_PER_G_CARBS, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN,
};
pub use profile::{ActivityLevel, FitnessLevel, Gender, Goal, Profile};
pub use workouts::{get_workout_recommendation, workout_recommendation_for, WORKOUTS_PER_PLAN};
