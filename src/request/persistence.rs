use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{MealError, Result};
use crate::models::{AdjustmentRequest, AdjustmentResult};
use crate::optimizer::config::OptimizerConfig;
use crate::request::parse::parse_request;

/// Fail with a readable message when the request file is absent.
pub fn require_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(());
    }
    Err(MealError::InvalidInput(format!(
        "meal request file not found: {} (pass --file <path> or create meal_request.json)",
        path.display()
    )))
}

/// Read a JSON document without validating its shape.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load and validate an adjustment request from a JSON file.
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<AdjustmentRequest> {
    parse_request(&load_document(path)?)
}

/// Load optimizer settings from a JSON file. Omitted fields keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<OptimizerConfig> {
    let content = fs::read_to_string(path)?;
    let config: OptimizerConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save an adjustment result as pretty-printed JSON.
pub fn save_result<P: AsRef<Path>>(path: P, result: &AdjustmentResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    Ok(())
}
