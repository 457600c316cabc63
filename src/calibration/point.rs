//! Calibration points and status classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Result, StripError};
use crate::units::Quantity;

/// Qualitative classification attached to a calibration point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "VERY LOW")]
    VeryLow,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "IDEAL")]
    Ideal,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::VeryLow,
        Status::Low,
        Status::Ok,
        Status::Ideal,
        Status::High,
        Status::VeryHigh,
    ];

    /// Display label (e.g., "VERY LOW")
    pub fn label(&self) -> &'static str {
        match self {
            Status::VeryLow => "VERY LOW",
            Status::Low => "LOW",
            Status::Ok => "OK",
            Status::Ideal => "IDEAL",
            Status::High => "HIGH",
            Status::VeryHigh => "VERY HIGH",
        }
    }

    /// True for statuses that call for no correction
    pub fn is_acceptable(&self) -> bool {
        matches!(self, Status::Ok | Status::Ideal)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = StripError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', " ");
        Status::ALL
            .into_iter()
            .find(|status| status.label() == normalized)
            .ok_or_else(|| StripError::format(format!("unknown status '{}'", s.trim())))
    }
}

/// One reference swatch of a calibration scale
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationPoint {
    value: Quantity,
    color: Color,
    status: Status,
}

impl CalibrationPoint {
    pub fn new(value: Quantity, color: impl Into<Color>, status: Status) -> Self {
        Self {
            value,
            color: color.into(),
            status,
        }
    }

    /// Measured value this swatch stands for
    pub fn value(&self) -> &Quantity {
        &self.value
    }

    /// Reference color printed on the chart
    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn status(&self) -> Status {
        self.status
    }
}
