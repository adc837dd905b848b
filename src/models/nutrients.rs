use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// One of the four tracked nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Protein,
    Carbs,
    Fats,
    Calorie,
}

impl Nutrient {
    /// Canonical processing order. The legacy fine-tune strategy depends on
    /// `Calorie` being last.
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fats,
        Nutrient::Calorie,
    ];

    /// JSON key for this nutrient.
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fats => "fats",
            Nutrient::Calorie => "calorie",
        }
    }

    /// Display unit.
    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calorie => "kcal",
            _ => "g",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Protein, carbs and fats in grams, calorie in kcal.
///
/// Used both for a single item's contribution and for meal totals or targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calorie: f64,
}

impl NutrientProfile {
    pub fn new(protein: f64, carbs: f64, fats: f64, calorie: f64) -> Self {
        Self {
            protein,
            carbs,
            fats,
            calorie,
        }
    }

    #[inline]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fats => self.fats,
            Nutrient::Calorie => self.calorie,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, nutrient: Nutrient) -> &mut f64 {
        match nutrient {
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fats => &mut self.fats,
            Nutrient::Calorie => &mut self.calorie,
        }
    }

    /// Copy with every field multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fats: self.fats * factor,
            calorie: self.calorie * factor,
        }
    }

    /// Multiply every field by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        for nutrient in Nutrient::ALL {
            *self.get_mut(nutrient) *= factor;
        }
    }

    /// Compact string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "P:{:.1} C:{:.1} F:{:.1} kcal:{:.1}",
            self.protein, self.carbs, self.fats, self.calorie
        )
    }
}

impl Add for NutrientProfile {
    type Output = NutrientProfile;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for NutrientProfile {
    fn add_assign(&mut self, rhs: Self) {
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fats += rhs.fats;
        self.calorie += rhs.calorie;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_matches_fields() {
        let profile = NutrientProfile::new(1.0, 2.0, 3.0, 4.0);
        let values: Vec<f64> = Nutrient::ALL.iter().map(|n| profile.get(*n)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_get_mut_writes_field() {
        let mut profile = NutrientProfile::default();
        *profile.get_mut(Nutrient::Fats) = 7.5;
        assert_eq!(profile.fats, 7.5);
        assert_eq!(profile.protein, 0.0);
    }

    #[test]
    fn test_scale_in_place_matches_scaled() {
        let profile = NutrientProfile::new(10.0, 20.0, 5.0, 300.0);
        let mut in_place = profile;
        in_place.scale(1.5);
        assert_eq!(in_place, profile.scaled(1.5));
        assert_eq!(in_place.calorie, 450.0);
    }

    #[test]
    fn test_calorie_is_processed_last() {
        assert_eq!(Nutrient::ALL.last(), Some(&Nutrient::Calorie));
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_value(NutrientProfile::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json["protein"], 1.0);
        assert_eq!(json["carbs"], 2.0);
        assert_eq!(json["fats"], 3.0);
        assert_eq!(json["calorie"], 4.0);
        assert_eq!(
            serde_json::to_value(Nutrient::Calorie).unwrap(),
            serde_json::json!("calorie")
        );
    }
}
