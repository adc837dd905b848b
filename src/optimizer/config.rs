use serde::{Deserialize, Serialize};

use crate::error::{MealError, Result};
use crate::optimizer::constants::{
    FINE_TUNE_GAIN, FINE_TUNE_LIMIT, ITERATION_LIMIT, MAX_DEV_PERCENT, SCALE_MAX, SCALE_MIN,
    SCALE_STEPS,
};

/// How a fine-tune round turns the aggregate error into item updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FineTuneStrategy {
    /// One ratio per item, applied once to quantity and all nutrients.
    #[default]
    PerItem,
    /// Per-nutrient nudges followed by a double application of the last
    /// nutrient's ratio to every item. Kept for output compatibility.
    Legacy,
}

/// Sampling grid for the global scale search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSearch {
    pub min_factor: f64,
    pub max_factor: f64,
    pub steps: usize,
}

impl Default for ScaleSearch {
    fn default() -> Self {
        Self {
            min_factor: SCALE_MIN,
            max_factor: SCALE_MAX,
            steps: SCALE_STEPS,
        }
    }
}

impl ScaleSearch {
    /// Distance between consecutive samples.
    pub fn step(&self) -> f64 {
        if self.steps > 1 {
            (self.max_factor - self.min_factor) / (self.steps - 1) as f64
        } else {
            0.0
        }
    }

    /// Sample at `index`. The last sample is exactly `max_factor`.
    pub fn factor_at(&self, index: usize) -> f64 {
        if self.steps > 1 && index == self.steps - 1 {
            self.max_factor
        } else {
            self.min_factor + index as f64 * self.step()
        }
    }

    /// All sampled factors in scan order.
    pub fn factors(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.steps).map(|i| self.factor_at(i))
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(MealError::InvalidConfig(
                "scale search needs at least one step".to_string(),
            ));
        }
        if !self.min_factor.is_finite() || !self.max_factor.is_finite() {
            return Err(MealError::InvalidConfig(
                "scale factor bounds must be finite".to_string(),
            ));
        }
        if self.min_factor <= 0.0 {
            return Err(MealError::InvalidConfig(format!(
                "min scale factor must be positive, got {}",
                self.min_factor
            )));
        }
        if self.min_factor > self.max_factor {
            return Err(MealError::InvalidConfig(format!(
                "min scale factor {} exceeds max {}",
                self.min_factor, self.max_factor
            )));
        }
        Ok(())
    }
}

/// Tuning parameters for the fine-tune refiner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FineTuneConfig {
    pub max_iterations: usize,
    pub tolerance_percent: f64,
    pub gain: f64,
    /// Bound on `|ratio|` per round. Only the per-item strategy honors it.
    pub fine_tune_limit: f64,
    pub strategy: FineTuneStrategy,
}

impl Default for FineTuneConfig {
    fn default() -> Self {
        Self {
            max_iterations: ITERATION_LIMIT,
            tolerance_percent: MAX_DEV_PERCENT,
            gain: FINE_TUNE_GAIN,
            fine_tune_limit: FINE_TUNE_LIMIT,
            strategy: FineTuneStrategy::default(),
        }
    }
}

impl FineTuneConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance_percent.is_finite() || self.tolerance_percent < 0.0 {
            return Err(MealError::InvalidConfig(format!(
                "tolerance must be a non-negative percentage, got {}",
                self.tolerance_percent
            )));
        }
        if !self.gain.is_finite() || self.gain <= 0.0 {
            return Err(MealError::InvalidConfig(format!(
                "gain must be positive, got {}",
                self.gain
            )));
        }
        // A limit of 1.0 or more lets a round scale an item by zero or less.
        if !self.fine_tune_limit.is_finite()
            || self.fine_tune_limit <= 0.0
            || self.fine_tune_limit >= 1.0
        {
            return Err(MealError::InvalidConfig(format!(
                "fine-tune limit must be in (0, 1), got {}",
                self.fine_tune_limit
            )));
        }
        Ok(())
    }
}

/// Full optimizer configuration, loadable from JSON with any field omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub search: ScaleSearch,
    pub fine_tune: FineTuneConfig,
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.fine_tune.validate()
    }

    /// Compact string for display.
    pub fn display(&self) -> String {
        format!(
            "scale=[{:.2}, {:.2}]x{} iters={} tol={:.2}% gain={:.3} limit={:.2} strategy={:?}",
            self.search.min_factor,
            self.search.max_factor,
            self.search.steps,
            self.fine_tune.max_iterations,
            self.fine_tune.tolerance_percent,
            self.fine_tune.gain,
            self.fine_tune.fine_tune_limit,
            self.fine_tune.strategy
        )
    }
}
