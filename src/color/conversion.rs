//! Color representation conversion utilities
//!
//! Provides the conversions behind the color model:
//! - RGB to HSL (hue truncated to a degree, saturation/lightness rounded to
//!   two decimals of the unit fraction, then scaled to percent)
//! - HSL to RGB (channels truncated to bytes)
//! - RGB to and from `#rrggbb` hex text
//!
//! The HSL transform is the classic hue/lightness/saturation model with
//! hue as a fraction of a turn.

use std::cmp::Ordering;

use crate::color::{Hsl, Percent, Rgb};
use crate::constants::{bounds, precision};
use crate::error::{Result, StripError};

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Converter between the RGB, HSL and hex representations
pub struct ColorConverter;

impl ColorConverter {
    /// Convert an RGB byte triple to HSL
    ///
    /// # Arguments
    ///
    /// * `rgb` - RGB channels in [0, 255]
    ///
    /// # Returns
    ///
    /// HSL with integer hue degrees and whole-percent saturation/lightness
    pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
        let (h, l, s) = rgb_to_hls(
            f64::from(rgb.red) / 255.0,
            f64::from(rgb.green) / 255.0,
            f64::from(rgb.blue) / 255.0,
        );

        // h lies in [0, 1]; truncation keeps 360 reachable only for h == 1.0
        let hue = (h * bounds::HUE_MAX as f64) as u16;
        Hsl::from_parts(hue, round_unit_fraction(s), round_unit_fraction(l))
    }

    /// Convert HSL to an RGB byte triple
    ///
    /// Channels are truncated, not rounded, so a round trip through HSL can
    /// land a few steps below the original RGB value.
    pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
        let (r, g, b) = hls_to_rgb(
            f64::from(hsl.hue()) / bounds::HUE_MAX as f64,
            hsl.lightness().value() / bounds::PERCENT_MAX,
            hsl.saturation().value() / bounds::PERCENT_MAX,
        );
        Rgb::new(to_byte(r), to_byte(g), to_byte(b))
    }

    /// Convert RGB to lowercase hexadecimal text
    ///
    /// # Returns
    ///
    /// Hex color string (e.g., "#4c74a6")
    pub fn rgb_to_hex(rgb: Rgb) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }

    /// Parse `#rrggbb` text (case-insensitive) to RGB
    ///
    /// # Errors
    ///
    /// Returns `StripError::Format` if the `#` prefix is missing, the length
    /// is not exactly six digits, or a character is not hexadecimal.
    pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
        let digits = hex.strip_prefix('#').ok_or_else(|| {
            StripError::format(format!("hex color '{hex}' must start with '#'"))
        })?;

        if digits.len() != bounds::HEX_DIGITS {
            return Err(StripError::format(format!(
                "hex color '{hex}': expected {} digits, got {}",
                bounds::HEX_DIGITS,
                digits.len()
            )));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StripError::format(format!(
                "hex color '{hex}' contains non-hexadecimal characters"
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| StripError::format(format!("hex color '{hex}': {e}")))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// RGB fractions to (hue, lightness, saturation) fractions
fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let sumc = maxc + minc;
    let rangec = maxc - minc;
    let l = sumc / 2.0;

    if minc == maxc {
        return (0.0, l, 0.0);
    }

    let s = if l <= 0.5 {
        rangec / sumc
    } else {
        rangec / (2.0 - maxc - minc)
    };

    let rc = (maxc - r) / rangec;
    let gc = (maxc - g) / rangec;
    let bc = (maxc - b) / rangec;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), l, s)
}

/// (hue, lightness, saturation) fractions to RGB fractions
fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    (
        hue_component(m1, m2, h + ONE_THIRD),
        hue_component(m1, m2, h),
        hue_component(m1, m2, h - ONE_THIRD),
    )
}

fn hue_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

fn to_byte(fraction: f64) -> u8 {
    (fraction * 255.0).clamp(0.0, 255.0) as u8
}

/// Round a [0, 1] fraction to two decimals and express it in percent
///
/// Rounding follows the exact binary value of `fraction`: 0.025 is stored
/// slightly above 0.025 and rounds up even though `0.025 * 100.0 == 2.5`.
/// Only exact ties go to even.
fn round_unit_fraction(fraction: f64) -> Percent {
    let scale = 10f64.powi(precision::UNIT_FRACTION_PLACES);
    let scaled = fraction * scale;
    // Exact error of the product above
    let residual = fraction.mul_add(scale, -scaled);

    let floor = scaled.floor();
    let rounded = match (scaled - floor).partial_cmp(&0.5) {
        Some(Ordering::Greater) => floor + 1.0,
        Some(Ordering::Less) => floor,
        _ if residual > 0.0 => floor + 1.0,
        _ if residual < 0.0 => floor,
        _ => scaled.round_ties_even(),
    };

    let steps = rounded.clamp(0.0, scale);
    let hundredths = steps * (bounds::PERCENT_MAX / scale) * precision::PERCENT_SCALE;
    Percent::from_hundredths(hundredths as u16)
}
