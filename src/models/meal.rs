use serde::{Deserialize, Serialize};

use crate::models::nutrients::{Nutrient, NutrientProfile};

/// A food item in a meal.
///
/// `nutrients` holds the item's total contribution at its current `quantity`,
/// not a per-unit rate. Both optimizer phases rely on quantity and nutrients
/// scaling together, so mutate through [`MealItem::scale`] when possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub name: String,

    pub quantity: f64,

    #[serde(flatten)]
    pub nutrients: NutrientProfile,
}

impl MealItem {
    pub fn new(name: impl Into<String>, quantity: f64, nutrients: NutrientProfile) -> Self {
        Self {
            name: name.into(),
            quantity,
            nutrients,
        }
    }

    /// Multiply quantity and every nutrient by `factor`.
    #[inline]
    pub fn scale(&mut self, factor: f64) {
        self.quantity *= factor;
        self.nutrients.scale(factor);
    }

    /// Copy of this item scaled by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            name: self.name.clone(),
            quantity: self.quantity * factor,
            nutrients: self.nutrients.scaled(factor),
        }
    }

    /// Positive finite quantity and non-negative finite nutrients.
    pub fn is_valid(&self) -> bool {
        self.quantity.is_finite()
            && self.quantity > 0.0
            && Nutrient::ALL.iter().all(|n| {
                let v = self.nutrients.get(*n);
                v.is_finite() && v >= 0.0
            })
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} x{:.3}: {}",
            self.name,
            self.quantity,
            self.nutrients.debug_string()
        )
    }
}

/// Everything needed for one adjustment run.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentRequest {
    pub meal_name: Option<String>,
    pub target: NutrientProfile,
    pub items: Vec<MealItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> MealItem {
        MealItem::new("Rice", 100.0, NutrientProfile::new(2.7, 28.0, 0.3, 130.0))
    }

    #[test]
    fn test_scale_keeps_lockstep() {
        let mut item = sample_item();
        item.scale(2.0);
        assert_eq!(item.quantity, 200.0);
        assert_eq!(item.nutrients.carbs, 56.0);
        assert_eq!(item.nutrients.calorie, 260.0);
    }

    #[test]
    fn test_scaled_leaves_original() {
        let item = sample_item();
        let half = item.scaled(0.5);
        assert_eq!(item.quantity, 100.0);
        assert_eq!(half.quantity, 50.0);
        assert_eq!(half.name, "Rice");
    }

    #[test]
    fn test_is_valid() {
        assert!(sample_item().is_valid());

        let mut zero_qty = sample_item();
        zero_qty.quantity = 0.0;
        assert!(!zero_qty.is_valid());

        let mut negative = sample_item();
        negative.nutrients.fats = -1.0;
        assert!(!negative.is_valid());

        let mut nan = sample_item();
        nan.nutrients.protein = f64::NAN;
        assert!(!nan.is_valid());
    }

    #[test]
    fn test_serializes_flat() {
        let json = serde_json::to_value(sample_item()).unwrap();
        assert_eq!(json["name"], "Rice");
        assert_eq!(json["quantity"], 100.0);
        assert_eq!(json["calorie"], 130.0);
        assert!(json.get("nutrients").is_none());
    }
}
