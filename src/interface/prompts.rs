use dialoguer::{Confirm, Input};

use crate::error::{MealError, Result};
use crate::models::{Nutrient, NutrientProfile};

/// Prompt for a single non-negative target value.
pub fn prompt_nutrient_target(nutrient: Nutrient, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!("Target {} ({})", nutrient, nutrient.unit()))
        .default(format!("{}", default))
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| MealError::InvalidInput(format!("Invalid number for {}", nutrient)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(MealError::InvalidInput(format!(
            "Target {} must be a non-negative number",
            nutrient
        )));
    }

    Ok(value)
}

/// Prompt for all four targets, pre-filled with `defaults`.
pub fn prompt_target(defaults: &NutrientProfile) -> Result<NutrientProfile> {
    let mut target = NutrientProfile::default();
    for nutrient in Nutrient::ALL {
        *target.get_mut(nutrient) = prompt_nutrient_target(nutrient, defaults.get(nutrient))?;
    }
    Ok(target)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
