//! Target value ranges

use std::fmt;

use crate::error::{Result, StripError};
use crate::units::Quantity;

/// Acceptable band for a measured attribute, with a nominal target inside it
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRange {
    min: Quantity,
    max: Quantity,
    nominal: Quantity,
}

impl ValueRange {
    /// Create a range
    ///
    /// # Errors
    ///
    /// Returns `StripError::Dimensionality` if the three bounds disagree on
    /// dimensionality, and `StripError::Config` unless
    /// `min <= nominal <= max`.
    pub fn new(min: Quantity, max: Quantity, nominal: Quantity) -> Result<Self> {
        if !min.try_le(&max)? {
            return Err(StripError::config(format!(
                "range minimum {min} exceeds maximum {max}"
            )));
        }
        if !(min.try_le(&nominal)? && nominal.try_le(&max)?) {
            return Err(StripError::config(format!(
                "nominal value {nominal} outside [{min}, {max}]"
            )));
        }
        Ok(Self { min, max, nominal })
    }

    pub fn min(&self) -> &Quantity {
        &self.min
    }

    pub fn max(&self) -> &Quantity {
        &self.max
    }

    pub fn nominal(&self) -> &Quantity {
        &self.nominal
    }

    /// Whether `value` lies within `[min, max]`
    pub fn contains(&self, value: &Quantity) -> Result<bool> {
        Ok(self.min.try_le(value)? && value.try_le(&self.max)?)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {} (nominal {})", self.min, self.max, self.nominal)
    }
}
