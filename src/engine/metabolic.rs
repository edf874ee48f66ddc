//! Metabolic calculator
//!
//! BMR (Mifflin-St Jeor), TDEE and macronutrient targets. Every function is pure
//! and keeps full precision; truncation only happens in [`MacroGrams::truncated`]
//! and [`EnergyTargets::display`].

use serde::{Deserialize, Serialize};

use super::error::{require_positive, InvalidInputError};
use super::profile::{ActivityLevel, Gender, Goal, Profile};

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

impl ActivityLevel {
    /// TDEE multiplier for this level
    pub const fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

/// Fraction of total calories allotted to each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroSplit {
    pub fn total(&self) -> f64 {
        self.protein + self.carbs + self.fats
    }
}

const WEIGHT_LOSS_SPLIT: MacroSplit = MacroSplit {
    protein: 0.4,
    carbs: 0.3,
    fats: 0.3,
};
const MUSCLE_GAIN_SPLIT: MacroSplit = MacroSplit {
    protein: 0.3,
    carbs: 0.5,
    fats: 0.2,
};
const MAINTENANCE_SPLIT: MacroSplit = MacroSplit {
    protein: 0.3,
    carbs: 0.4,
    fats: 0.3,
};

/// Grams of each macronutrient per day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

/// Integer view of [`MacroGrams`], truncated toward zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncatedGrams {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

impl MacroGrams {
    pub fn truncated(&self) -> TruncatedGrams {
        TruncatedGrams {
            protein_g: self.protein_g.trunc() as i64,
            carbs_g: self.carbs_g.trunc() as i64,
            fats_g: self.fats_g.trunc() as i64,
        }
    }

    /// Calories these grams provide
    pub fn calories(&self) -> f64 {
        self.protein_g * KCAL_PER_G_PROTEIN
            + self.carbs_g * KCAL_PER_G_CARBS
            + self.fats_g * KCAL_PER_G_FAT
    }
}

/// Daily energy targets derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub split: MacroSplit,
    pub macros: MacroGrams,
}

/// What gets shown to the user: whole calories and grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTargets {
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

impl EnergyTargets {
    pub fn display(&self) -> DisplayTargets {
        let grams = self.macros.truncated();
        DisplayTargets {
            calories: self.tdee.trunc() as i64,
            protein_g: grams.protein_g,
            carbs_g: grams.carbs_g,
            fats_g: grams.fats_g,
        }
    }
}

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
pub fn compute_bmr(
    weight: f64,
    height: f64,
    age: u32,
    gender: Gender,
) -> Result<f64, InvalidInputError> {
    let weight = require_positive("weight", weight)?;
    let height = require_positive("height", height)?;
    let age = require_positive("age", f64::from(age))?;

    let base = 10.0 * weight + 6.25 * height - 5.0 * age;
    Ok(match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    })
}

/// Total daily energy expenditure in kcal/day
pub fn compute_tdee(bmr: f64, activity_level: ActivityLevel) -> Result<f64, InvalidInputError> {
    let bmr = require_positive("bmr", bmr)?;
    Ok(bmr * activity_level.multiplier())
}

pub fn macro_split(goal: Goal) -> MacroSplit {
    match goal {
        Goal::WeightLoss => WEIGHT_LOSS_SPLIT,
        Goal::MuscleGain => MUSCLE_GAIN_SPLIT,
        Goal::Maintenance => MAINTENANCE_SPLIT,
    }
}

/// Convert a calorie budget and split into grams
pub fn macro_grams(tdee: f64, split: MacroSplit) -> MacroGrams {
    MacroGrams {
        protein_g: tdee * split.protein / KCAL_PER_G_PROTEIN,
        carbs_g: tdee * split.carbs / KCAL_PER_G_CARBS,
        fats_g: tdee * split.fats / KCAL_PER_G_FAT,
    }
}

/// BMR, TDEE and macro targets for a profile
pub fn energy_targets(profile: &Profile) -> Result<EnergyTargets, InvalidInputError> {
    profile.validate()?;

    let bmr = compute_bmr(profile.weight, profile.height, profile.age, profile.gender)?;
    let tdee = compute_tdee(bmr, profile.activity_level)?;
    let split = macro_split(profile.goal);

    Ok(EnergyTargets {
        bmr,
        tdee,
        split,
        macros: macro_grams(tdee, split),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::FitnessLevel;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bmr_male() {
        // 10*70 + 6.25*170 - 5*30 + 5
        let bmr = compute_bmr(70.0, 170.0, 30, Gender::Male).unwrap();
        assert!(close(bmr, 1617.5));
    }

    #[test]
    fn test_bmr_female() {
        // 10*60 + 6.25*165 - 5*25 - 161
        let bmr = compute_bmr(60.0, 165.0, 25, Gender::Female).unwrap();
        assert!(close(bmr, 1345.25));
    }

    #[test]
    fn test_bmr_genders_differ_by_166() {
        let male = compute_bmr(82.5, 181.0, 44, Gender::Male).unwrap();
        let female = compute_bmr(82.5, 181.0, 44, Gender::Female).unwrap();
        assert!(close(male - female, 166.0));
    }

    #[test]
    fn test_bmr_rejects_non_positive() {
        assert_eq!(compute_bmr(0.0, 170.0, 30, Gender::Male).unwrap_err().field(), "weight");
        assert_eq!(compute_bmr(70.0, -1.0, 30, Gender::Male).unwrap_err().field(), "height");
        assert_eq!(compute_bmr(70.0, 170.0, 0, Gender::Female).unwrap_err().field(), "age");
    }

    #[test]
    fn test_tdee_multipliers() {
        let tdee = compute_tdee(1568.5, ActivityLevel::Sedentary).unwrap();
        assert!((tdee - 1882.2).abs() < 1e-9);

        let expected = [1.2, 1.375, 1.55, 1.725, 1.9];
        for (level, mult) in ActivityLevel::ALL.iter().zip(expected) {
            let tdee = compute_tdee(1000.0, *level).unwrap();
            assert!(close(tdee, 1000.0 * mult), "{} -> {}", level, tdee);
        }
    }

    #[test]
    fn test_tdee_rejects_bad_bmr() {
        assert_eq!(compute_tdee(0.0, ActivityLevel::VeryActive).unwrap_err().field(), "bmr");
        assert!(compute_tdee(f64::NAN, ActivityLevel::VeryActive).is_err());
    }

    #[test]
    fn test_macro_splits_sum_to_one() {
        for goal in Goal::ALL {
            let split = macro_split(goal);
            assert!((split.total() - 1.0).abs() < 1e-9, "{} sums to {}", goal, split.total());
            for f in [split.protein, split.carbs, split.fats] {
                assert!((0.0..=1.0).contains(&f));
            }
        }
    }

    #[test]
    fn test_macro_split_values() {
        let split = |protein, carbs, fats| MacroSplit { protein, carbs, fats };
        assert_eq!(macro_split(Goal::WeightLoss), split(0.4, 0.3, 0.3));
        assert_eq!(macro_split(Goal::MuscleGain), split(0.3, 0.5, 0.2));
        assert_eq!(macro_split(Goal::Maintenance), split(0.3, 0.4, 0.3));
    }

    #[test]
    fn test_gram_conversion_is_consistent() {
        for goal in Goal::ALL {
            for tdee in [1200.0, 1882.2, 2046.39, 3150.75] {
                let grams = macro_grams(tdee, macro_split(goal));
                assert!((grams.calories() - tdee).abs() < 1e-6);

                // truncation loses at most one gram of each macro
                let t = grams.truncated();
                let truncated_kcal = (t.protein_g * 4 + t.carbs_g * 4 + t.fats_g * 9) as f64;
                assert!(tdee - truncated_kcal >= 0.0);
                assert!(tdee - truncated_kcal < 17.0);
            }
        }
    }

    #[test]
    fn test_truncated_weight_loss_grams() {
        let grams = macro_grams(2046.39, macro_split(Goal::WeightLoss));
        assert_eq!(
            grams.truncated(),
            TruncatedGrams { protein_g: 204, carbs_g: 153, fats_g: 68 }
        );
    }

    #[test]
    fn test_energy_targets_end_to_end() {
        let profile = Profile {
            age: 25,
            weight: 60.0,
            height: 165.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::WeightLoss,
            fitness_level: FitnessLevel::Beginner,
        };

        let targets = energy_targets(&profile).unwrap();
        assert!(close(targets.bmr, 1345.25));
        assert!(close(targets.tdee, 1345.25 * 1.55));
        assert_eq!(targets.split, macro_split(Goal::WeightLoss));

        let shown = targets.display();
        assert_eq!(shown.calories, 2085);
        assert_eq!(shown.protein_g, 208);
        assert_eq!(shown.carbs_g, 156);
        assert_eq!(shown.fats_g, 69);
    }

    #[test]
    fn test_energy_targets_validates_profile() {
        let profile = Profile {
            age: 40,
            weight: 0.0,
            height: 180.0,
            gender: Gender::Male,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Maintenance,
            fitness_level: FitnessLevel::Advanced,
        };
        assert_eq!(energy_targets(&profile).unwrap_err().field(), "weight");
    }
}
