//! Field-level quantity rules
//!
//! A [`FieldSpec`] pairs an optional required dimensionality with an
//! optional default unit. Both are checked against each other on construction,
//! so an existing `FieldSpec` is always self-consistent.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StripError};
use crate::units::{validate_quantity, Dimension, DimensionalityRegistry, Quantity, Unit};

/// Validation rules attached to one quantity-valued field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSpec {
    dimensionality: Option<Dimension>,
    default_unit: Option<Unit>,
}

impl FieldSpec {
    /// Build field rules, checking that the default unit has the required dimensionality
    ///
    /// # Errors
    ///
    /// Returns `StripError::Config` if both are given and disagree.
    pub fn new(dimensionality: Option<Dimension>, default_unit: Option<Unit>) -> Result<Self> {
        if let (Some(expected), Some(unit)) = (dimensionality, default_unit.as_ref()) {
            if unit.dimension() != expected {
                return Err(StripError::config(format!(
                    "Default unit '{}' ({}) must have the same dimensionality as the field ({})",
                    unit,
                    unit.dimension(),
                    expected
                )));
            }
        }
        Ok(Self {
            dimensionality,
            default_unit,
        })
    }

    /// Build field rules from a registry key and a unit expression
    pub fn from_names(
        registry: &DimensionalityRegistry,
        dimensionality: Option<&str>,
        default_unit: Option<&str>,
    ) -> Result<Self> {
        let dimensionality = dimensionality.map(|key| registry.get(key)).transpose()?;
        let default_unit = default_unit.map(Unit::parse).transpose()?;
        Self::new(dimensionality, default_unit)
    }

    pub fn dimensionality(&self) -> Option<Dimension> {
        self.dimensionality
    }

    pub fn default_unit(&self) -> Option<&Unit> {
        self.default_unit.as_ref()
    }

    /// Apply the default unit and dimensionality check to a value
    pub fn validate(&self, value: Quantity) -> Result<Quantity> {
        validate_quantity(value, self.default_unit.as_ref(), self.dimensionality)
    }
}

/// Serializable form of a [`FieldSpec`], naming the dimensionality by registry key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Registry key of the required dimensionality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensionality: Option<String>,

    /// Unit applied to bare numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_unit: Option<String>,
}

impl FieldConfig {
    /// Resolve names and build the validated `FieldSpec`
    pub fn build(&self, registry: &DimensionalityRegistry) -> Result<FieldSpec> {
        FieldSpec::from_names(
            registry,
            self.dimensionality.as_deref(),
            self.default_unit.as_deref(),
        )
    }
}
