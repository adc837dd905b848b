use serde::Serialize;

use crate::models::meal::MealItem;
use crate::models::nutrients::{Nutrient, NutrientProfile};

/// Output of the two-phase adjustment.
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_name: Option<String>,

    pub adjusted_meal: Vec<MealItem>,

    pub total_nutrients: NutrientProfile,

    /// Uniform factor chosen by the global search.
    pub scale_factor: f64,

    /// Deviation score of `total_nutrients` against the target, in percent.
    pub deviation_percent: f64,

    /// Fine-tune rounds actually applied.
    pub iterations: usize,

    /// Whether the final deviation is within tolerance.
    pub converged: bool,

    /// Nutrients whose target was zero and so never counted toward the score.
    pub ignored_nutrients: Vec<Nutrient>,
}

impl AdjustmentResult {
    pub fn item_count(&self) -> usize {
        self.adjusted_meal.len()
    }
}
