use crate::models::{AdjustmentResult, MealItem, Nutrient, NutrientProfile};
use crate::optimizer::calculations::nutrient_deviation_percent;

/// Display the adjusted meal in a formatted table.
pub fn display_adjustment(result: &AdjustmentResult, target: &NutrientProfile) {
    println!();
    match &result.meal_name {
        Some(name) => println!("=== Adjusted Meal: {} ===", name),
        None => println!("=== Adjusted Meal ==="),
    }
    println!();

    display_items(&result.adjusted_meal);

    println!();
    println!("--- Summary ---");
    println!("Items: {}", result.item_count());
    println!("Global scale factor: {:.3}", result.scale_factor);
    println!("Fine-tune rounds: {}", result.iterations);
    display_totals(&result.total_nutrients, target);
    println!("Deviation: {:.2}%", result.deviation_percent);

    if result.converged {
        println!("Target reached within tolerance.");
    } else {
        println!("Tolerance not reached; showing best effort.");
    }

    if !result.ignored_nutrients.is_empty() {
        let names: Vec<String> = result
            .ignored_nutrients
            .iter()
            .map(|n| n.to_string())
            .collect();
        println!("Ignored (zero target): {}", names.join(", "));
    }
    println!();
}

/// Display items with quantity and nutrients.
pub fn display_items(items: &[MealItem]) {
    if items.is_empty() {
        println!("(no food items)");
        return;
    }

    let width = items.iter().map(|i| i.name.len()).max().unwrap_or(10).max(4);

    for (i, item) in items.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  qty {:>9.2} | P {:>7.1}g  C {:>7.1}g  F {:>7.1}g  {:>7.0} kcal",
            i + 1,
            item.name,
            item.quantity,
            item.nutrients.protein,
            item.nutrients.carbs,
            item.nutrients.fats,
            item.nutrients.calorie,
            width = width
        );
    }
}

/// Display totals next to the target with per-nutrient deviation.
pub fn display_totals(totals: &NutrientProfile, target: &NutrientProfile) {
    for nutrient in Nutrient::ALL {
        let current = totals.get(nutrient);
        let wanted = target.get(nutrient);
        println!(
            "  {:<8} {:>9.1} / {:>9.1} {:<4} ({:.2}% off)",
            nutrient.key(),
            current,
            wanted,
            nutrient.unit(),
            nutrient_deviation_percent(current, wanted)
        );
    }
}
