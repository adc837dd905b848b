use crate::models::{MealItem, Nutrient, NutrientProfile};

/// Field-wise sum of every item's nutrients. An empty meal yields zeros.
pub fn aggregate(meal: &[MealItem]) -> NutrientProfile {
    let mut totals = NutrientProfile::default();
    for item in meal {
        totals += item.nutrients;
    }
    totals
}

/// Signed relative deviation `(current - target) / target`.
///
/// A zero target yields 0: the nutrient counts as satisfied.
#[inline]
pub fn signed_deviation(current: f64, target: f64) -> f64 {
    if target != 0.0 {
        (current - target) / target
    } else {
        0.0
    }
}

/// Absolute percentage deviation of one nutrient.
#[inline]
pub fn nutrient_deviation_percent(current: f64, target: f64) -> f64 {
    100.0 * signed_deviation(current, target).abs()
}

/// Mean absolute percentage deviation across the four nutrients.
///
/// Always averages over all four, so a zero-target nutrient lowers the
/// effective dimensionality instead of being dropped from the denominator.
/// Lower is better; 0 is a perfect match.
pub fn deviation_score(current: &NutrientProfile, target: &NutrientProfile) -> f64 {
    let sum: f64 = Nutrient::ALL
        .iter()
        .map(|&n| nutrient_deviation_percent(current.get(n), target.get(n)))
        .sum();
    sum / Nutrient::ALL.len() as f64
}

/// Nutrients whose target is exactly zero.
pub fn zero_target_nutrients(target: &NutrientProfile) -> Vec<Nutrient> {
    Nutrient::ALL
        .into_iter()
        .filter(|&n| target.get(n) == 0.0)
        .collect()
}

/// Aggregate then score.
pub fn meal_deviation(meal: &[MealItem], target: &NutrientProfile) -> f64 {
    deviation_score(&aggregate(meal), target)
}
