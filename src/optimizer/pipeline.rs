use tracing::{debug, info, warn};

use crate::error::{MealError, Result};
use crate::models::{AdjustmentRequest, AdjustmentResult, Nutrient, NutrientProfile};
use crate::optimizer::calculations::{aggregate, zero_target_nutrients};
use crate::optimizer::config::OptimizerConfig;
use crate::optimizer::fine_tune::fine_tune;
use crate::optimizer::global::optimize_global;

/// Run the global scale search followed by fine-tuning.
///
/// Fails on an invalid configuration, a target value that is not a finite
/// non-negative number, or an item that breaks the positive quantity /
/// non-negative nutrient rule. An unreachable target still
/// produces a best-effort result with `converged == false`.
pub fn adjust_meal(request: AdjustmentRequest, config: &OptimizerConfig) -> Result<AdjustmentResult> {
    config.validate()?;

    let AdjustmentRequest {
        meal_name,
        target,
        items,
    } = request;
    validate_target(&target)?;
    for (index, item) in items.iter().enumerate() {
        if !item.is_valid() {
            return Err(MealError::invalid(
                "food_item",
                &format!("food_items[{}]", index),
                "quantity must be positive and nutrients non-negative",
            ));
        }
        debug!(item = %item.debug_string(), "input item");
    }
    let mut meal = items;

    let ignored_nutrients = zero_target_nutrients(&target);
    for nutrient in &ignored_nutrients {
        warn!(
            %nutrient,
            "target is zero; nutrient is treated as satisfied and excluded from the score"
        );
    }

    info!(
        items = meal.len(),
        target = %target.debug_string(),
        "adjusting meal"
    );

    let global = optimize_global(&mut meal, &target, &config.search);
    let tuned = fine_tune(&mut meal, &target, &config.fine_tune);

    let total_nutrients = aggregate(&meal);
    info!(
        scale_factor = global.factor,
        iterations = tuned.iterations,
        deviation = tuned.final_score,
        converged = tuned.converged,
        "adjustment finished"
    );

    Ok(AdjustmentResult {
        meal_name,
        adjusted_meal: meal,
        total_nutrients,
        scale_factor: global.factor,
        deviation_percent: tuned.final_score,
        iterations: tuned.iterations,
        converged: tuned.converged,
        ignored_nutrients,
    })
}

fn validate_target(target: &NutrientProfile) -> Result<()> {
    for nutrient in Nutrient::ALL {
        let value = target.get(nutrient);
        if !value.is_finite() || value < 0.0 {
            return Err(MealError::invalid(
                nutrient.key(),
                "target",
                format!("must be a non-negative number, got {}", value),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealItem;
    use crate::optimizer::config::ScaleSearch;

    fn request(target: NutrientProfile, items: Vec<MealItem>) -> AdjustmentRequest {
        AdjustmentRequest {
            meal_name: Some("Test bowl".to_string()),
            target,
            items,
        }
    }

    #[test]
    fn test_reports_zero_targets() {
        let target = NutrientProfile::new(0.0, 100.0, 0.0, 1000.0);
        let items = vec![MealItem::new(
            "Bread",
            1.0,
            NutrientProfile::new(8.0, 100.0, 2.0, 1000.0),
        )];
        let result = adjust_meal(request(target, items), &OptimizerConfig::default()).unwrap();
        assert_eq!(
            result.ignored_nutrients,
            vec![Nutrient::Protein, Nutrient::Fats]
        );
        assert_eq!(result.meal_name.as_deref(), Some("Test bowl"));
    }

    #[test]
    fn test_totals_match_adjusted_meal() {
        let target = NutrientProfile::new(150.0, 300.0, 60.0, 2400.0);
        let items = vec![
            MealItem::new("Chicken", 200.0, NutrientProfile::new(62.0, 0.0, 7.2, 330.0)),
            MealItem::new("Rice", 300.0, NutrientProfile::new(8.1, 84.0, 0.9, 390.0)),
        ];
        let result = adjust_meal(request(target, items), &OptimizerConfig::default()).unwrap();
        assert_eq!(result.total_nutrients, aggregate(&result.adjusted_meal));
        assert_eq!(result.item_count(), 2);
    }

    #[test]
    fn test_invalid_item_is_rejected() {
        let target = NutrientProfile::new(1.0, 1.0, 1.0, 1.0);
        let items = vec![MealItem::new("Ghost", 0.0, NutrientProfile::default())];
        assert!(matches!(
            adjust_meal(request(target, items), &OptimizerConfig::default()),
            Err(MealError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_non_finite_or_negative_target_is_rejected() {
        let item = || {
            vec![MealItem::new(
                "Oats",
                100.0,
                NutrientProfile::new(13.0, 68.0, 7.0, 389.0),
            )]
        };
        let targets = [
            (NutrientProfile::new(f64::NAN, 10.0, 10.0, 100.0), "protein"),
            (NutrientProfile::new(5.0, -1.0, 10.0, 100.0), "carbs"),
            (NutrientProfile::new(5.0, 10.0, 10.0, f64::INFINITY), "calorie"),
        ];

        for (target, bad_key) in targets {
            match adjust_meal(request(target, item()), &OptimizerConfig::default()) {
                Err(MealError::InvalidField { field, location, .. }) => {
                    assert_eq!(field, bad_key);
                    assert_eq!(location, "target");
                }
                other => panic!("expected invalid target, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = OptimizerConfig {
            search: ScaleSearch {
                steps: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let target = NutrientProfile::new(1.0, 1.0, 1.0, 1.0);
        assert!(adjust_meal(request(target, vec![]), &config).is_err());
    }
}
