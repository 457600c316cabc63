//! Error types for the strip_colorscan library

use thiserror::Error;

use crate::units::Dimension;

/// Result type alias for strip_colorscan operations
pub type Result<T> = std::result::Result<T, StripError>;

/// Error kinds raised while building colors, quantities and calibration scales
#[derive(Error, Debug)]
pub enum StripError {
    /// Malformed color input: bad hex, out-of-range channel, wrong arity, unknown name
    #[error("Invalid color format: {message}")]
    Format { message: String },

    /// Operation exists in the API but has no implementation
    #[error("Not implemented: {operation}")]
    NotImplemented { operation: String },

    /// Unit string could not be parsed against the unit catalogue
    #[error("Invalid unit '{unit}': {reason}")]
    Unit { unit: String, reason: String },

    /// Dimensionless value supplied where no default unit is configured
    #[error("Dimensionless quantity {magnitude} requires a default unit")]
    MissingUnit { magnitude: f64 },

    /// Dimensionality of a quantity does not match what was required
    #[error("Dimensionality '{got}' does not match expected '{expected}'")]
    Dimensionality { got: Dimension, expected: Dimension },

    /// Registry already holds an item under this key
    #[error("An item with the name '{key}' already exists in the registry")]
    DuplicateKey { key: String },

    /// Registry has no item under this key
    #[error("No item named '{key}' in the registry")]
    UnknownKey { key: String },

    /// Calibration scale has no point with this label
    #[error("Calibration scale '{scale}' has no point labelled '{label}'")]
    UnknownLabel { scale: String, label: String },

    /// Inconsistent configuration detected at build time
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Aggregate requested over no inputs
    #[error("{operation} requires at least one input")]
    EmptyInput { operation: String },

    /// Match requested on a scale without points
    #[error("Calibration scale '{scale}' has no points to match against")]
    EmptyScale { scale: String },

    /// Configuration file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the expected schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StripError {
    /// Create a color format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a unit parsing error
    pub fn unit(unit: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unit {
            unit: unit.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by the caller's input data rather than by configuration
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            StripError::Format { .. }
                | StripError::Unit { .. }
                | StripError::MissingUnit { .. }
                | StripError::Dimensionality { .. }
                | StripError::UnknownLabel { .. }
                | StripError::EmptyInput { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            StripError::Format { message } => {
                format!("That color could not be understood ({message}).")
            }
            StripError::Unit { unit, .. } => {
                format!("'{unit}' is not a known unit of measure.")
            }
            StripError::MissingUnit { magnitude } => {
                format!("The value {magnitude} needs a unit (for example '{magnitude} ppm').")
            }
            StripError::Dimensionality { got, expected } => {
                format!("Expected a value measured as {expected}, but got {got}.")
            }
            StripError::UnknownLabel { scale, label } => {
                format!("The {scale} scale has no swatch '{label}'.")
            }
            StripError::EmptyScale { scale } => {
                format!("The {scale} scale has no swatches configured.")
            }
            StripError::Io(_) | StripError::Json(_) | StripError::Config { .. } => {
                "The calibration configuration could not be loaded.".to_string()
            }
            _ => "The strip reading failed. Please check the input and try again.".to_string(),
        }
    }
}
