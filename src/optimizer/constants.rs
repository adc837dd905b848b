/// Deviation score (percent) at or below which fine-tuning stops.
pub const MAX_DEV_PERCENT: f64 = 1.0;

/// Largest per-round adjustment ratio the per-item strategy may apply.
pub const FINE_TUNE_LIMIT: f64 = 0.20;

/// Fine-tune round budget.
pub const ITERATION_LIMIT: usize = 100;

/// Fraction of the relative error corrected per fine-tune round.
pub const FINE_TUNE_GAIN: f64 = 0.05;

// ─────────────────────────────────────────────────────────────────────────────
// Global scale search grid
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest sampled scale factor.
pub const SCALE_MIN: f64 = 0.1;

/// Largest sampled scale factor (always sampled exactly).
pub const SCALE_MAX: f64 = 1.5;

/// Number of evenly spaced samples over `[SCALE_MIN, SCALE_MAX]`.
pub const SCALE_STEPS: usize = 101;

/// Factor reported when no candidate beats the sentinel.
pub const SENTINEL_FACTOR: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Interactive defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default daily target offered by the interactive prompt.
pub const DEFAULT_TARGET_PROTEIN: f64 = 210.0;
pub const DEFAULT_TARGET_CARBS: f64 = 469.0;
pub const DEFAULT_TARGET_FATS: f64 = 75.0;
pub const DEFAULT_TARGET_CALORIE: f64 = 2504.0;

/// Minimum Jaro-Winkler similarity for accepting a misspelled `name` key.
pub const NAME_KEY_SIMILARITY: f64 = 0.8;
