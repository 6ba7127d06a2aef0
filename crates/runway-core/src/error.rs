//! Error types for Runway core.

use thiserror::Error;

use runway_engine::GridError;

/// Errors that can occur in the Runway application
#[derive(Error, Debug)]
pub enum RunwayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid questionnaire: {0}")]
    Validation(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("No row with category `{0}`")]
    RowNotFound(String),

    #[error("Row `{category}` has no cell for period {period}")]
    CellNotFound { category: String, period: usize },

    #[error("Cell not found: {0}")]
    CellIdNotFound(String),

    #[error("Row `{0}` is not editable")]
    NotEditable(String),

    #[error("Cell `{category}` period {period} is not an input cell")]
    NotAnInput { category: String, period: usize },

    #[error("Model has {count} periods, more than the limit of {max}")]
    TooManyPeriods { count: usize, max: usize },

    #[error("Category `{0}` already exists")]
    CategoryExists(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T> = std::result::Result<T, RunwayError>;
