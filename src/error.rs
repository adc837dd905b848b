use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("Missing field `{field}` in {location}")]
    MissingField { field: String, location: String },

    #[error("Invalid field `{field}` in {location}: {reason}")]
    InvalidField {
        field: String,
        location: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl MealError {
    pub fn missing(field: &str, location: &str) -> Self {
        MealError::MissingField {
            field: field.to_string(),
            location: location.to_string(),
        }
    }

    pub fn invalid(field: &str, location: &str, reason: impl Into<String>) -> Self {
        MealError::InvalidField {
            field: field.to_string(),
            location: location.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MealError>;
