pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod optimizer;
pub mod report;
pub mod request;

pub use error::{MealError, Result};
pub use models::{AdjustmentRequest, AdjustmentResult, MealItem, Nutrient, NutrientProfile};
pub use optimizer::{adjust_meal, OptimizerConfig};
