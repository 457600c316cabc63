//! Numeric values tagged with a unit
//!
//! Comparison, addition and subtraction require matching dimensionality and
//! fail with `StripError::Dimensionality` otherwise. Multiplication and
//! division combine units and dimensions and fail with `StripError::Unit`
//! when a combined exponent no longer fits.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, StripError};
use crate::units::{Dimension, Unit};

/// A magnitude paired with a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    /// Create a quantity from an already-parsed unit
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Create a quantity with no declared unit
    pub fn dimensionless(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::dimensionless())
    }

    /// Create a quantity from a unit expression
    ///
    /// # Errors
    ///
    /// Returns `StripError::Unit` if the expression names an unknown unit.
    pub fn with_unit(magnitude: f64, unit: &str) -> Result<Self> {
        Ok(Self::new(magnitude, Unit::parse(unit)?))
    }

    /// Parse text such as `5 ppm`, `242 gallon`, `7.2` or `10 mg/L`
    ///
    /// A bare number yields a dimensionless quantity.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let split = trimmed
            .find(|c: char| c.is_whitespace() || (c.is_alphabetic() && c != 'e' && c != 'E'))
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);
        let magnitude: f64 = number.trim().parse().map_err(|_| {
            StripError::unit(text, format!("'{}' is not a number", number.trim()))
        })?;
        Self::with_unit(magnitude, unit)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Dimensionality of the unit
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// True when no unit was declared
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    /// Magnitude expressed in SI base units
    pub fn base_magnitude(&self) -> f64 {
        self.magnitude * self.unit.factor()
    }

    fn check_dimension(&self, expected: Dimension) -> Result<()> {
        if self.dimension() != expected {
            return Err(StripError::Dimensionality {
                got: self.dimension(),
                expected,
            });
        }
        Ok(())
    }

    /// Convert to another unit of the same dimensionality
    pub fn to(&self, unit: &Unit) -> Result<Quantity> {
        self.check_dimension(unit.dimension())?;
        Ok(Quantity::new(self.base_magnitude() / unit.factor(), unit.clone()))
    }

    /// Convert to a unit given as an expression
    pub fn to_unit(&self, unit: &str) -> Result<Quantity> {
        self.to(&Unit::parse(unit)?)
    }

    /// Compare after normalizing both sides to base units
    ///
    /// # Errors
    ///
    /// Returns `StripError::Dimensionality` when the operands do not share
    /// a dimensionality.
    pub fn try_cmp(&self, other: &Quantity) -> Result<Ordering> {
        other.check_dimension(self.dimension())?;
        Ok(self.base_magnitude().total_cmp(&other.base_magnitude()))
    }

    pub fn try_le(&self, other: &Quantity) -> Result<bool> {
        Ok(self.try_cmp(other)? != Ordering::Greater)
    }

    pub fn try_ge(&self, other: &Quantity) -> Result<bool> {
        Ok(self.try_cmp(other)? != Ordering::Less)
    }

    pub fn try_lt(&self, other: &Quantity) -> Result<bool> {
        Ok(self.try_cmp(other)? == Ordering::Less)
    }

    pub fn try_gt(&self, other: &Quantity) -> Result<bool> {
        Ok(self.try_cmp(other)? == Ordering::Greater)
    }

    /// Sum expressed in this quantity's unit
    pub fn checked_add(&self, other: &Quantity) -> Result<Quantity> {
        let rhs = other.to(&self.unit)?;
        Ok(Quantity::new(self.magnitude + rhs.magnitude, self.unit.clone()))
    }

    /// Difference expressed in this quantity's unit
    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity> {
        let rhs = other.to(&self.unit)?;
        Ok(Quantity::new(self.magnitude - rhs.magnitude, self.unit.clone()))
    }
}

/// Apply the default-unit and dimensionality rules to a quantity
///
/// A dimensionless `value` is reinterpreted under `default_unit`; without a
/// default it is rejected. When `dimensionality` is given the (possibly
/// reinterpreted) value must carry exactly that signature.
///
/// # Errors
///
/// * `StripError::MissingUnit` - dimensionless value and no default unit
/// * `StripError::Dimensionality` - signature differs from `dimensionality`
pub fn validate_quantity(
    value: Quantity,
    default_unit: Option<&Unit>,
    dimensionality: Option<Dimension>,
) -> Result<Quantity> {
    let value = if value.is_dimensionless() {
        match default_unit {
            Some(unit) => Quantity::new(value.magnitude, unit.clone()),
            None => {
                return Err(StripError::MissingUnit {
                    magnitude: value.magnitude,
                })
            }
        }
    } else {
        value
    };

    if let Some(expected) = dimensionality {
        value.check_dimension(expected)?;
    }

    Ok(value)
}

/// Fails with `StripError::Unit` if a combined exponent leaves the `i8` range
impl Mul for Quantity {
    type Output = Result<Quantity>;

    fn mul(self, rhs: Quantity) -> Result<Quantity> {
        let unit = self.unit.multiply(&rhs.unit)?;
        Ok(Quantity::new(self.magnitude * rhs.magnitude, unit))
    }
}

/// Fails with `StripError::Unit` if a combined exponent leaves the `i8` range
impl Div for Quantity {
    type Output = Result<Quantity>;

    fn div(self, rhs: Quantity) -> Result<Quantity> {
        let unit = self.unit.divide(&rhs.unit)?;
        Ok(Quantity::new(self.magnitude / rhs.magnitude, unit))
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.magnitude * rhs, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

impl FromStr for Quantity {
    type Err = StripError;

    fn from_str(s: &str) -> Result<Self> {
        Quantity::parse(s)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts either a JSON number (dimensionless) or a string such as `"5 ppm"`
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Quantity::dimensionless(n)),
            Raw::Text(t) => Quantity::parse(&t).map_err(serde::de::Error::custom),
        }
    }
}
