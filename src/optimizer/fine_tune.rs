use tracing::{debug, info, warn};

use crate::models::{MealItem, Nutrient, NutrientProfile};
use crate::optimizer::calculations::{aggregate, deviation_score, signed_deviation};
use crate::optimizer::config::{FineTuneConfig, FineTuneStrategy};

/// How a fine-tune run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FineTuneOutcome {
    /// Rounds of adjustment applied.
    pub iterations: usize,
    /// Deviation score of the meal as returned.
    pub final_score: f64,
    /// Whether `final_score` is within tolerance.
    pub converged: bool,
}

/// Iteratively nudge items toward `target` until the deviation score is
/// within tolerance or the round budget runs out.
///
/// Running out of rounds is not an error; the last meal is kept and the
/// outcome reports `converged == false`.
pub fn fine_tune(
    meal: &mut [MealItem],
    target: &NutrientProfile,
    config: &FineTuneConfig,
) -> FineTuneOutcome {
    for iteration in 0..config.max_iterations {
        let totals = aggregate(meal);
        let score = deviation_score(&totals, target);
        debug!(iteration, deviation = score, "fine-tune round");

        if score <= config.tolerance_percent {
            info!(iteration, deviation = score, "target reached within tolerance");
            return FineTuneOutcome {
                iterations: iteration,
                final_score: score,
                converged: true,
            };
        }

        match config.strategy {
            FineTuneStrategy::PerItem => {
                per_item_round(meal, &totals, target, config.gain, config.fine_tune_limit)
            }
            FineTuneStrategy::Legacy => legacy_round(meal, &totals, target, config.gain),
        }
    }

    let final_score = deviation_score(&aggregate(meal), target);
    let converged = final_score <= config.tolerance_percent;
    if converged {
        info!(
            iterations = config.max_iterations,
            deviation = final_score,
            "target reached on final round"
        );
    } else {
        warn!(
            iterations = config.max_iterations,
            deviation = final_score,
            tolerance = config.tolerance_percent,
            "fine-tune budget exhausted without reaching tolerance"
        );
    }

    FineTuneOutcome {
        iterations: config.max_iterations,
        final_score,
        converged,
    }
}

/// Per-nutrient correction ratios `-deviation * gain`, skipping zero targets.
fn correction_ratios(
    totals: &NutrientProfile,
    target: &NutrientProfile,
    gain: f64,
) -> Vec<(Nutrient, f64)> {
    Nutrient::ALL
        .into_iter()
        .filter(|&n| target.get(n) != 0.0)
        .map(|n| (n, -signed_deviation(totals.get(n), target.get(n)) * gain))
        .collect()
}

/// One round of the compatibility update rule.
///
/// Each nutrient of each item moves by its own ratio, then the ratio of the
/// last nutrient processed is applied to every quantity, and once more to
/// every quantity and nutrient.
fn legacy_round(
    meal: &mut [MealItem],
    totals: &NutrientProfile,
    target: &NutrientProfile,
    gain: f64,
) {
    let ratios = correction_ratios(totals, target, gain);
    let carried = ratios.last().map(|&(_, ratio)| ratio).unwrap_or(0.0);

    for item in meal.iter_mut() {
        for &(nutrient, ratio) in &ratios {
            let field = item.nutrients.get_mut(nutrient);
            *field += *field * ratio;
        }
        item.quantity *= 1.0 + carried;
    }

    for item in meal.iter_mut() {
        item.scale(1.0 + carried);
    }
}

/// One round of the per-item update rule.
///
/// Each item gets a single ratio: the nutrient deviations weighted by the
/// item's share of each nutrient's total. Quantity and nutrients move
/// together, so the linear-scaling invariant holds.
fn per_item_round(
    meal: &mut [MealItem],
    totals: &NutrientProfile,
    target: &NutrientProfile,
    gain: f64,
    limit: f64,
) {
    let deviations: Vec<(Nutrient, f64)> = Nutrient::ALL
        .into_iter()
        .filter(|&n| target.get(n) != 0.0 && totals.get(n) > 0.0)
        .map(|n| (n, signed_deviation(totals.get(n), target.get(n))))
        .collect();

    for item in meal.iter_mut() {
        let mut weighted = 0.0;
        let mut weight = 0.0;
        for &(nutrient, deviation) in &deviations {
            let share = item.nutrients.get(nutrient) / totals.get(nutrient);
            weighted += share * deviation;
            weight += share;
        }

        if weight <= 0.0 {
            continue;
        }

        let item_ratio = (-gain * weighted / weight).clamp(-limit, limit);
        item.scale(1.0 + item_ratio);
    }
}
