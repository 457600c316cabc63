//! Calibration scale module
//!
//! This module maps observed test-strip pad colors to measured values by
//! nearest-color search over printed reference swatches.

pub mod point;
pub mod range;
pub mod scale;
pub mod strip;

pub use point::{CalibrationPoint, Status};
pub use range::ValueRange;
pub use scale::{CalibrationScale, Match};
pub use strip::{HotTub, Reading, TestStrip};
