//! Utility to print the saved profile's daily targets and basic workout plan

use fittrack::config::Config;
use fittrack::engine::energy_targets;
use fittrack::models::ProfileRecord;
use fittrack::tools::workouts::BasicWorkoutPlan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    println!("Database path: {}", config.database_path.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = fittrack::db::Database::new(&config.database_path)?;

    database.with_conn(|conn| {
        fittrack::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    let Some(record) = database.with_conn(|conn| ProfileRecord::get(conn))? else {
        println!("No profile saved yet. Use the save_profile tool first.");
        return Ok(());
    };

    let profile = &record.profile;
    let targets = energy_targets(profile)?;
    let display = targets.display();

    if let Some(name) = record.display_name() {
        println!("Profile: {}", name);
    }
    println!(
        "  {} y, {} kg, {} cm, {}, {}",
        profile.age, profile.weight, profile.height, profile.gender, profile.activity_level
    );
    println!("  Goal: {}  Fitness level: {}", profile.goal, profile.fitness_level);
    println!();
    println!("BMR:  {:.2} kcal", targets.bmr);
    println!("TDEE: {:.2} kcal", targets.tdee);
    println!("Daily targets:");
    println!("  Calories: {} kcal", display.calories);
    println!("  Protein:  {} g", display.protein_g);
    println!("  Carbs:    {} g", display.carbs_g);
    println!("  Fats:     {} g", display.fats_g);
    println!();

    let plan = BasicWorkoutPlan::build(profile.goal, profile.fitness_level);
    println!("Workout plan:");
    for entry in &plan.schedule {
        println!("  {:<10} {}", entry.day, entry.workout);
    }
    println!();
    println!("Training tips:");
    for tip in plan.tips {
        println!("  - {}", tip);
    }

    Ok(())
}
