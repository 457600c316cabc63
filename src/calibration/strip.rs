//! Test strips and the water they measure
//!
//! A [`TestStrip`] groups the calibration scales printed on one strip chart,
//! each keyed by the attribute it measures. Reading a pad color against its
//! scale yields a [`Reading`] with the matched value, status and, when the
//! scale carries a target range, whether that value is in range.

use serde::Serialize;
use tracing::debug;

use crate::calibration::{CalibrationScale, Status, ValueRange};
use crate::color::Color;
use crate::constants::hot_tub;
use crate::error::{Result, StripError};
use crate::units::{validate_quantity, Dimension, Quantity};

/// A body of water with a known volume
#[derive(Debug, Clone, PartialEq)]
pub struct HotTub {
    name: String,
    volume: Quantity,
}

impl HotTub {
    /// Create a tub
    ///
    /// # Errors
    ///
    /// Returns `StripError::MissingUnit` for a bare number and
    /// `StripError::Dimensionality` if `volume` is not a volume.
    pub fn new(name: impl Into<String>, volume: Quantity) -> Result<Self> {
        let volume = validate_quantity(volume, None, Some(Dimension::VOLUME))?;
        Ok(Self {
            name: name.into(),
            volume,
        })
    }

    /// SaluSpa inflatable tub, 242 US gallons
    pub fn salu_spa() -> Result<Self> {
        Self::new(
            "SaluSpa",
            Quantity::with_unit(hot_tub::SALU_SPA_GALLONS, "gallon")?,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume(&self) -> &Quantity {
        &self.volume
    }
}

/// One measured attribute on a strip
#[derive(Debug, Clone, PartialEq)]
struct StripScale {
    scale: CalibrationScale,
    target: Option<ValueRange>,
}

/// Outcome of reading one pad against its scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub attribute: String,
    pub label: String,
    pub value: Quantity,
    pub status: Status,
    pub distance: f64,
    /// `None` when the scale has no target range
    pub in_range: Option<bool>,
}

/// Named set of calibration scales, keyed by attribute
#[derive(Debug, Clone, PartialEq)]
pub struct TestStrip {
    name: String,
    scales: Vec<(String, StripScale)>,
}

impl TestStrip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scales: Vec::new(),
        }
    }

    /// Add a scale for an attribute
    ///
    /// # Errors
    ///
    /// Returns `StripError::DuplicateKey` if the attribute already has a scale.
    pub fn add_scale(
        &mut self,
        attribute: impl Into<String>,
        scale: CalibrationScale,
        target: Option<ValueRange>,
    ) -> Result<()> {
        let attribute = attribute.into();
        if self.scales.iter().any(|(existing, _)| *existing == attribute) {
            return Err(StripError::DuplicateKey { key: attribute });
        }
        debug!(strip = %self.name, attribute = %attribute, "Scale added to strip");
        self.scales.push((attribute, StripScale { scale, target }));
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in the order their scales were added
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.scales.iter().map(|(attribute, _)| attribute.as_str())
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    fn entry(&self, attribute: &str) -> Result<&StripScale> {
        self.scales
            .iter()
            .find(|(existing, _)| existing == attribute)
            .map(|(_, entry)| entry)
            .ok_or_else(|| StripError::UnknownKey {
                key: attribute.to_string(),
            })
    }

    /// Scale measuring `attribute`
    ///
    /// # Errors
    ///
    /// Returns `StripError::UnknownKey` if the strip has no such attribute.
    pub fn scale(&self, attribute: &str) -> Result<&CalibrationScale> {
        self.entry(attribute).map(|entry| &entry.scale)
    }

    /// Target range for `attribute`, if one was configured
    pub fn target(&self, attribute: &str) -> Result<Option<&ValueRange>> {
        self.entry(attribute).map(|entry| entry.target.as_ref())
    }

    /// Read an observed pad color against the attribute's scale
    ///
    /// # Errors
    ///
    /// * `StripError::UnknownKey` - no scale for `attribute`
    /// * `StripError::EmptyScale` - the scale has no points
    /// * `StripError::Dimensionality` - target range and scale values disagree
    pub fn read(&self, attribute: &str, observed: &Color) -> Result<Reading> {
        let entry = self.entry(attribute)?;
        let found = entry
            .scale
            .nearest(observed)
            .ok_or_else(|| StripError::EmptyScale {
                scale: entry.scale.name().to_string(),
            })?;

        let value = found.point.value().clone();
        let in_range = entry
            .target
            .as_ref()
            .map(|range| range.contains(&value))
            .transpose()?;

        debug!(
            strip = %self.name,
            attribute,
            label = found.label,
            value = %value,
            status = %found.point.status(),
            "Strip pad read"
        );

        Ok(Reading {
            attribute: attribute.to_string(),
            label: found.label.to_string(),
            value,
            status: found.point.status(),
            distance: found.distance,
            in_range,
        })
    }
}
