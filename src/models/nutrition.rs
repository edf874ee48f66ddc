//! Shared nutrition data structure
//!
//! Used by food log entries and daily totals.

use serde::{Deserialize, Serialize};

use crate::engine::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};

/// Calories and macronutrients
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fats: f64,    // grams
}

/// Calories contributed by each macronutrient
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroCalories {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Nutrition {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fats: self.fats * multiplier,
        }
    }

    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
        }
    }

    /// Macro grams converted to calories (4/4/9 kcal per gram)
    pub fn macro_calories(&self) -> MacroCalories {
        MacroCalories {
            protein: self.protein * KCAL_PER_G_PROTEIN,
            carbs: self.carbs * KCAL_PER_G_CARBS,
            fats: self.fats * KCAL_PER_G_FAT,
        }
    }

    pub fn has_macros(&self) -> bool {
        self.protein + self.carbs + self.fats > 0.0
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_scale() {
        let a = Nutrition { calories: 100.0, protein: 10.0, carbs: 5.0, fats: 2.0 };
        let b = Nutrition { calories: 250.0, protein: 3.0, carbs: 40.0, fats: 8.0 };
        let total: Nutrition = vec![a, b].into_iter().sum();
        assert_eq!(total, Nutrition { calories: 350.0, protein: 13.0, carbs: 45.0, fats: 10.0 });
        assert_eq!((a * 2.0).calories, 200.0);
    }

    #[test]
    fn test_macro_calories() {
        let n = Nutrition { calories: 0.0, protein: 10.0, carbs: 20.0, fats: 5.0 };
        let kcal = n.macro_calories();
        assert_eq!(kcal, MacroCalories { protein: 40.0, carbs: 80.0, fats: 45.0 });
        assert!(n.has_macros());
        assert!(!Nutrition::zero().has_macros());
    }
}
