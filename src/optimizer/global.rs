use serde::Serialize;
use tracing::{debug, info};

use crate::models::{MealItem, NutrientProfile};
use crate::optimizer::calculations::{aggregate, deviation_score};
use crate::optimizer::config::ScaleSearch;
use crate::optimizer::constants::SENTINEL_FACTOR;

/// Totals and score for one sampled scale factor.
#[derive(Debug, Clone, Serialize)]
pub struct ScaleCandidate {
    pub factor: f64,
    pub score: f64,
    pub totals: NutrientProfile,
}

/// Winner of the global search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalScaleOutcome {
    pub factor: f64,
    pub score: f64,
}

/// Evaluate one uniform scale factor without touching the meal.
pub fn evaluate_scale(meal: &[MealItem], target: &NutrientProfile, factor: f64) -> ScaleCandidate {
    let scaled: Vec<MealItem> = meal.iter().map(|item| item.scaled(factor)).collect();
    let totals = aggregate(&scaled);
    ScaleCandidate {
        factor,
        score: deviation_score(&totals, target),
        totals,
    }
}

/// Evaluate every sampled factor in scan order.
pub fn scan_scale_factors(
    meal: &[MealItem],
    target: &NutrientProfile,
    search: &ScaleSearch,
) -> Vec<ScaleCandidate> {
    search
        .factors()
        .map(|factor| evaluate_scale(meal, target, factor))
        .collect()
}

/// Pick the lowest-scoring candidate. Strict `<` keeps the first of equal
/// scores, so lower factors win ties.
pub fn best_candidate(candidates: &[ScaleCandidate]) -> GlobalScaleOutcome {
    let mut best = GlobalScaleOutcome {
        factor: SENTINEL_FACTOR,
        score: f64::INFINITY,
    };
    for candidate in candidates {
        if candidate.score < best.score {
            best = GlobalScaleOutcome {
                factor: candidate.factor,
                score: candidate.score,
            };
        }
    }
    best
}

/// Search for the single multiplier that brings the meal closest to `target`
/// and apply it to `meal` in place.
///
/// Fixes overall portion size only; a mismatch between the meal's macro
/// ratios and the target's is left for fine-tuning.
pub fn optimize_global(
    meal: &mut [MealItem],
    target: &NutrientProfile,
    search: &ScaleSearch,
) -> GlobalScaleOutcome {
    let candidates = scan_scale_factors(meal, target, search);
    for candidate in &candidates {
        debug!(
            factor = candidate.factor,
            deviation = candidate.score,
            "scale candidate"
        );
    }

    let best = best_candidate(&candidates);
    info!(
        factor = best.factor,
        deviation = best.score,
        "best global scale factor"
    );

    for item in meal.iter_mut() {
        item.scale(best.factor);
    }
    best
}
