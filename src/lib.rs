//! # Strip Colorscan
//!
//! A Rust crate for reading water test strips by color.
//!
//! This library turns an observed pad color into a measured value by:
//! - Modelling colors as CSS names, hex, RGB or HSL with exact conversions
//! - Tagging values with units and checking their dimensionality
//! - Matching the observed color against a printed calibration scale
//! - Reporting the matched value, its status and whether it is in range
//!
//! ## Example
//!
//! ```rust
//! use strip_colorscan::{CalibrationPoint, CalibrationScale, Quantity, Rgb, Status};
//!
//! let low = Quantity::with_unit(0.0, "ppm")?;
//! let high = Quantity::with_unit(1000.0, "ppm")?;
//! let scale = CalibrationScale::new(
//!     "total_hardness",
//!     [
//!         ("A", CalibrationPoint::new(low, Rgb::new(76, 116, 166), Status::VeryLow)),
//!         ("E", CalibrationPoint::new(high, Rgb::new(178, 98, 154), Status::VeryHigh)),
//!     ],
//! );
//!
//! let point = scale.match_rgb(80, 112, 160)?;
//! println!("{} ({})", point.value(), point.status());
//! # Ok::<(), strip_colorscan::StripError>(())
//! ```

pub mod calibration;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod units;

pub use calibration::{
    CalibrationPoint, CalibrationScale, HotTub, Match, Reading, Status, TestStrip, ValueRange,
};
pub use color::{Color, ColorConverter, ColorKind, HexColor, Hsl, Metric, NamedColor, Percent, Rgb};
pub use config::{Calibration, StripConfig};
pub use error::{Result, StripError};
pub use units::{
    validate_quantity, Dimension, DimensionalityRegistry, FieldConfig, FieldSpec, Quantity,
    Registry, Unit,
};
