mod meal;
mod nutrients;
mod result;

pub use meal::{AdjustmentRequest, MealItem};
pub use nutrients::{Nutrient, NutrientProfile};
pub use result::AdjustmentResult;
