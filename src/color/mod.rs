//! Color model, conversion and analysis module
//!
//! This module handles the four color representations (CSS name, hex, RGB,
//! HSL), conversions between them, and the distance/mean/random operations
//! used by calibration matching.

pub mod analysis;
pub mod conversion;
pub mod model;
pub mod named;

pub use analysis::Metric;
pub use conversion::ColorConverter;
pub use model::{Color, ColorKind, HexColor, Hsl, Percent, Rgb};
pub use named::{NamedColor, NAMED_COLORS};
