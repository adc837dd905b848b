pub mod calculations;
pub mod config;
pub mod constants;
pub mod fine_tune;
pub mod global;
pub mod pipeline;

pub use calculations::{
    aggregate, deviation_score, meal_deviation, nutrient_deviation_percent, signed_deviation,
    zero_target_nutrients,
};
pub use config::{FineTuneConfig, FineTuneStrategy, OptimizerConfig, ScaleSearch};
pub use constants::*;
pub use fine_tune::{fine_tune, FineTuneOutcome};
pub use global::{
    best_candidate, evaluate_scale, optimize_global, scan_scale_factors, GlobalScaleOutcome,
    ScaleCandidate,
};
pub use pipeline::adjust_meal;
