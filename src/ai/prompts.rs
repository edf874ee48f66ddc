//! Prompt templates for the plan requests
//!
//! Each prompt lists the profile values, what the plan should cover, and the
//! exact JSON keys the answer must use.

use crate::engine::{FitnessLevel, Goal, Profile};
use crate::models::DietaryPreferences;

pub const DIET_KEYS: [&str; 8] = [
    "meal_plan",
    "foods_to_include",
    "foods_to_avoid",
    "timing_tips",
    "supplements",
    "meal_prep_tips",
    "dining_out_tips",
    "hydration",
];

pub const WORKOUT_KEYS: [&str; 10] = [
    "weekly_schedule",
    "exercise_details",
    "progression_plan",
    "recovery_tips",
    "warmup_cooldown",
    "tracking_metrics",
    "alternative_exercises",
    "injury_prevention",
    "rest_guidelines",
    "cardio_integration",
];

pub const PERSONALIZED_DIET_KEYS: [&str; 10] = [
    "weekly_meal_plan",
    "shopping_list",
    "meal_prep_guide",
    "alternatives",
    "restaurant_guide",
    "supplements",
    "hydration_schedule",
    "special_occasions",
    "tracking_metrics",
    "common_mistakes",
];

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn profile_lines(profile: &Profile) -> String {
    format!(
        "- Age: {}\n- Weight: {}kg\n- Height: {}cm\n- Gender: {}\n- Activity Level: {}",
        profile.age, profile.weight, profile.height, profile.gender, profile.activity_level
    )
}

fn json_instruction(keys: &[&str]) -> String {
    format!(
        "Format the response as a JSON object with exactly these keys:\n{}",
        keys.join(", ")
    )
}

pub fn diet_prompt(profile: &Profile) -> String {
    let sections = numbered(&[
        "Daily meal plan with specific portions and timing",
        "Comprehensive list of recommended foods with nutritional benefits",
        "Foods to avoid and why",
        "Meal timing strategies for optimal results",
        "Supplement recommendations if needed",
        "Tips for meal prep and planning",
        "Strategies for dining out while staying on track",
        "Hydration recommendations",
    ]);

    format!(
        "As a nutrition expert, provide personalized diet recommendations for:\n{}\n- Goal: {}\n\n\
         Please provide a detailed response with:\n{}\n\n{}",
        profile_lines(profile),
        profile.goal,
        sections,
        json_instruction(&DIET_KEYS)
    )
}

pub fn workout_prompt(
    age: u32,
    fitness_level: FitnessLevel,
    goal: Goal,
    medical_conditions: Option<&str>,
) -> String {
    let conditions = medical_conditions
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("None");

    let sections = numbered(&[
        "Detailed weekly workout schedule",
        "Exercise details with sets, reps, intensity, and form cues",
        "Progression plan for 8 weeks",
        "Recovery and mobility work",
        "Warm-up and cool-down routines",
        "Progress tracking metrics",
        "Alternative exercises for each movement",
        "Tips for injury prevention",
        "Recommended rest periods",
        "Cardio integration strategies",
    ]);

    format!(
        "As a fitness expert, provide detailed workout recommendations for:\n\
         - Age: {}\n- Fitness Level: {}\n- Goal: {}\n- Medical Conditions: {}\n\n\
         Please provide a comprehensive plan including:\n{}\n\n{}",
        age,
        fitness_level,
        goal,
        conditions,
        sections,
        json_instruction(&WORKOUT_KEYS)
    )
}

pub fn personalized_diet_prompt(profile: &Profile, prefs: &DietaryPreferences) -> String {
    let timing = &prefs.meal_timing;
    let sections = numbered(&[
        "Detailed weekly meal plan with exact portions and macronutrient breakdowns",
        "Shopping list organized by food categories",
        "Meal prep instructions and timeline",
        "Alternative meal suggestions for variety",
        "Restaurant ordering guide based on preferred cuisines",
        "Supplement recommendations with timing",
        "Hydration schedule",
        "Tips for special occasions and social events",
        "Progress tracking metrics",
        "Common mistakes to avoid",
    ]);

    format!(
        "As a nutrition expert, create a highly personalized diet plan for someone with these characteristics:\n\
         {}\n- Fitness Goal: {}\n\n\
         Dietary Preferences and Restrictions:\n\
         - Allergies: {}\n- Dietary Restrictions: {}\n- Preferred Cuisines: {}\n\
         - Disliked Ingredients: {}\n\
         - Meal Timing Preferences: breakfast {}, lunch {}, dinner {}, {} snacks per day\n\n\
         Please provide a comprehensive nutrition plan including:\n{}\n\n{}",
        profile_lines(profile),
        profile.goal,
        format_list(&prefs.allergies),
        format_list(&prefs.restrictions),
        format_list(&prefs.preferred_cuisines),
        format_list(&prefs.disliked_ingredients),
        timing.breakfast,
        timing.lunch,
        timing.dinner,
        timing.snacks_count,
        sections,
        json_instruction(&PERSONALIZED_DIET_KEYS)
    )
}
