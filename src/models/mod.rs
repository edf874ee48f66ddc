//! Data models
//!
//! Rust structs representing database entities.

mod food_entry;
mod nutrition;
mod preferences;
mod profile;
mod weight_entry;

pub use food_entry::{FoodEntry, FoodEntryCreate, FoodEntryUpdate};
pub use nutrition::{MacroCalories, Nutrition};
pub use preferences::{DietaryPreferences, MealTiming, MAX_SNACKS_PER_DAY};
pub use profile::{ProfileRecord, ProfileSave};
pub use weight_entry::WeightEntry;
