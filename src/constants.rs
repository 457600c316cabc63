//! Reference constants for color conversion and calibration lookup
//!
//! This module contains compile-time constants shared by the color model,
//! the unit system and the calibration tables.

/// Channel and axis bounds for each color representation
pub mod bounds {
    /// Maximum RGB channel value
    pub const RGB_MAX: i64 = 255;

    /// Maximum hue in degrees (inclusive; 360 and 0 are the same angle)
    pub const HUE_MAX: i64 = 360;

    /// Maximum saturation and lightness in percent
    pub const PERCENT_MAX: f64 = 100.0;

    /// Number of hex digits following `#`
    pub const HEX_DIGITS: usize = 6;
}

/// HSL fixed-point precision
pub mod precision {
    /// Decimal places kept on the unit fraction during RGB → HSL
    pub const UNIT_FRACTION_PLACES: i32 = 2;

    /// Fixed-point scale for saturation and lightness (hundredths of a percent)
    pub const PERCENT_SCALE: f64 = 100.0;

    /// Circular-mean hue is snapped to 1/HUE_SNAP_STEPS of a degree before truncation
    pub const HUE_SNAP_STEPS: f64 = 1e6;
}

/// Distance metric names accepted by `Metric::from_str`
pub mod metric {
    pub const HSL: &str = "hsl";
    pub const RGB: &str = "rgb";
}

/// Seed keys of the dimensionality registry
///
/// Fields name their required dimensionality with these exact strings.
pub mod registry_keys {
    pub const LENGTH: &str = "length";
    pub const TIME: &str = "time";
    pub const MASS: &str = "mass";
    pub const TEMPERATURE: &str = "temperature";
    pub const ANGLE: &str = "angle";
    pub const ELECTRIC_CURRENT: &str = "electric_current";
    pub const LUMINOUS_INTENSITY: &str = "luminous_intensity";
    pub const AMOUNT_OF_SUBSTANCE: &str = "amount_of_substance";
    pub const VOLUME: &str = "volume";
    pub const AREA: &str = "area";
    pub const SPEED: &str = "speed";
    pub const CONCENTRATION: &str = "concentration";
}

/// Hot tub reference values
pub mod hot_tub {
    /// Volume of a SaluSpa inflatable tub in US gallons
    pub const SALU_SPA_GALLONS: f64 = 242.0;
}
