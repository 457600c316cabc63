//! Color value types
//!
//! [`Color`] is a closed sum over four representations: a CSS name, `#rrggbb`
//! hex text, an RGB byte triple and an HSL triple. Every variant can be
//! converted to every other, and conversions to the same kind return the
//! value unchanged.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use palette::{FromColor, Srgb};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::named::{lookup_name, lookup_rgb, NamedColor};
use crate::color::ColorConverter;
use crate::constants::{bounds, precision};
use crate::error::{Result, StripError};

static RGB_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("RGB pattern is a valid regex")
});

static HSL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\(?\s*(\d{1,3})\s*,\s*(\d{1,3}(?:\.\d+)?)\s*%\s*,\s*(\d{1,3}(?:\.\d+)?)\s*%\s*\)?$",
    )
    .expect("HSL pattern is a valid regex")
});

/// RGB byte triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels as an array, in R, G, B order
    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Percentage in [0, 100] stored in hundredths of a percent
///
/// Fixed point keeps HSL values hashable and exactly comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Percent(u16);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(10_000);

    /// Create a percentage, rounding to hundredths (ties to even)
    ///
    /// # Errors
    ///
    /// Returns `StripError::Format` if the value is not finite or lies
    /// outside [0, 100].
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(0.0..=bounds::PERCENT_MAX).contains(&value) {
            return Err(StripError::format(format!(
                "percentage {value} outside [0, {}]",
                bounds::PERCENT_MAX
            )));
        }
        let hundredths = (value * precision::PERCENT_SCALE).round_ties_even();
        Ok(Self(hundredths as u16))
    }

    /// Create from hundredths of a percent, saturating at 100%
    pub fn from_hundredths(hundredths: u16) -> Self {
        Self(hundredths.min(Self::FULL.0))
    }

    pub fn hundredths(self) -> u16 {
        self.0
    }

    /// Value in percent
    pub fn value(self) -> f64 {
        f64::from(self.0) / precision::PERCENT_SCALE
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// HSL triple: integer hue degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    hue: u16,
    saturation: Percent,
    lightness: Percent,
}

impl Hsl {
    /// Create an HSL triple
    ///
    /// # Errors
    ///
    /// Returns `StripError::Format` if hue is outside [0, 360] or either
    /// percentage is outside [0, 100].
    pub fn new(hue: i64, saturation: f64, lightness: f64) -> Result<Self> {
        if !(0..=bounds::HUE_MAX).contains(&hue) {
            return Err(StripError::format(format!(
                "hue {hue} outside [0, {}]",
                bounds::HUE_MAX
            )));
        }
        Ok(Self {
            hue: hue as u16,
            saturation: Percent::new(saturation)?,
            lightness: Percent::new(lightness)?,
        })
    }

    pub(crate) fn from_parts(hue: u16, saturation: Percent, lightness: Percent) -> Self {
        Self {
            hue: hue.min(bounds::HUE_MAX as u16),
            saturation,
            lightness,
        }
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn saturation(&self) -> Percent {
        self.saturation
    }

    pub fn lightness(&self) -> Percent {
        self.lightness
    }

    /// (hue, saturation, lightness) as floats, for distance computations
    pub fn components(&self) -> [f64; 3] {
        [
            f64::from(self.hue),
            self.saturation.value(),
            self.lightness.value(),
        ]
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}%, {}%", self.hue, self.saturation, self.lightness)
    }
}

/// Hex color, rendered as lowercase `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(Rgb);

impl HexColor {
    pub const fn new(rgb: Rgb) -> Self {
        Self(rgb)
    }

    pub fn rgb(&self) -> Rgb {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ColorConverter::rgb_to_hex(self.0))
    }
}

/// Representation selector for [`Color::create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKind {
    Name,
    Hex,
    Rgb,
    Hsl,
}

impl FromStr for ColorKind {
    type Err = StripError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "named" | "css" => Ok(ColorKind::Name),
            "hex" => Ok(ColorKind::Hex),
            "rgb" => Ok(ColorKind::Rgb),
            "hsl" => Ok(ColorKind::Hsl),
            other => Err(StripError::format(format!("unknown color kind '{other}'"))),
        }
    }
}

/// A color in one of four representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Named(NamedColor),
    Hex(HexColor),
    Rgb(Rgb),
    Hsl(Hsl),
}

impl Color {
    /// Construct from a CSS color keyword (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self> {
        lookup_name(name)
            .map(Color::Named)
            .ok_or_else(|| StripError::format(format!("unknown color name '{}'", name.trim())))
    }

    /// Construct from `#rrggbb` text
    pub fn from_hex(hex: &str) -> Result<Self> {
        ColorConverter::hex_to_rgb(hex.trim()).map(|rgb| Color::Hex(HexColor(rgb)))
    }

    /// Construct from RGB channels, each checked against [0, 255]
    pub fn from_rgb(red: i64, green: i64, blue: i64) -> Result<Self> {
        Ok(Color::Rgb(Rgb::new(
            channel("red", red)?,
            channel("green", green)?,
            channel("blue", blue)?,
        )))
    }

    /// Construct from a slice that must hold exactly three channels
    pub fn from_rgb_slice(channels: &[i64]) -> Result<Self> {
        match channels {
            [red, green, blue] => Self::from_rgb(*red, *green, *blue),
            _ => Err(StripError::format(format!(
                "RGB needs 3 channels, got {}",
                channels.len()
            ))),
        }
    }

    /// Infallible RGB constructor
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color::Rgb(Rgb::new(red, green, blue))
    }

    /// Construct from HSL components
    pub fn from_hsl(hue: i64, saturation: f64, lightness: f64) -> Result<Self> {
        Hsl::new(hue, saturation, lightness).map(Color::Hsl)
    }

    /// Construct from a slice of exactly three HSL components; hue must be integral
    pub fn from_hsl_parts(parts: &[f64]) -> Result<Self> {
        match parts {
            [hue, saturation, lightness] => {
                if hue.fract() != 0.0 || !hue.is_finite() {
                    return Err(StripError::format(format!(
                        "hue must be a whole number of degrees, got {hue}"
                    )));
                }
                Self::from_hsl(*hue as i64, *saturation, *lightness)
            }
            _ => Err(StripError::format(format!(
                "HSL needs 3 components, got {}",
                parts.len()
            ))),
        }
    }

    /// Construct a color of the given kind from its textual form
    pub fn create(kind: ColorKind, text: &str) -> Result<Self> {
        let text = text.trim();
        match kind {
            ColorKind::Name => Self::from_name(text),
            ColorKind::Hex => Self::from_hex(text),
            ColorKind::Rgb => parse_rgb(text)?.ok_or_else(|| {
                StripError::format(format!("'{text}' is not an RGB triple like (76, 116, 166)"))
            }),
            ColorKind::Hsl => parse_hsl(text)?.ok_or_else(|| {
                StripError::format(format!("'{text}' is not an HSL triple like 213, 37%, 47%"))
            }),
        }
    }

    /// Parse any supported textual form, detecting the kind
    ///
    /// `#` prefix selects hex, `h, s%, l%` selects HSL, `(r, g, b)` selects
    /// RGB and anything else is looked up as a CSS name.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with('#') {
            return Self::from_hex(text);
        }
        if let Some(color) = parse_hsl(text)? {
            return Ok(color);
        }
        if let Some(color) = parse_rgb(text)? {
            return Ok(color);
        }
        Self::from_name(text)
    }

    pub fn kind(&self) -> ColorKind {
        match self {
            Color::Named(_) => ColorKind::Name,
            Color::Hex(_) => ColorKind::Hex,
            Color::Rgb(_) => ColorKind::Rgb,
            Color::Hsl(_) => ColorKind::Hsl,
        }
    }

    /// RGB value of this color, whatever its representation
    pub fn rgb_value(&self) -> Rgb {
        match self {
            Color::Named(named) => named.rgb(),
            Color::Hex(hex) => hex.rgb(),
            Color::Rgb(rgb) => *rgb,
            Color::Hsl(hsl) => ColorConverter::hsl_to_rgb(*hsl),
        }
    }

    /// HSL value of this color, whatever its representation
    pub fn hsl_value(&self) -> Hsl {
        match self {
            Color::Hsl(hsl) => *hsl,
            other => ColorConverter::rgb_to_hsl(other.rgb_value()),
        }
    }

    pub fn as_hex(&self) -> Color {
        match self {
            Color::Hex(_) => *self,
            other => Color::Hex(HexColor(other.rgb_value())),
        }
    }

    pub fn as_rgb(&self) -> Color {
        Color::Rgb(self.rgb_value())
    }

    pub fn as_hsl(&self) -> Color {
        Color::Hsl(self.hsl_value())
    }

    /// CSS name with exactly this RGB value, if any
    pub fn as_named(&self) -> Option<Color> {
        match self {
            Color::Named(_) => Some(*self),
            other => lookup_rgb(other.rgb_value()).map(Color::Named),
        }
    }

    /// Convert to a palette sRGB value
    pub fn to_srgb(&self) -> Srgb<u8> {
        let rgb = self.rgb_value();
        Srgb::new(rgb.red, rgb.green, rgb.blue)
    }

    /// Convert to a palette HSL value (hue in degrees, saturation/lightness in [0, 1])
    pub fn to_palette_hsl(&self) -> palette::Hsl {
        let hsl = self.hsl_value();
        palette::Hsl::new(
            f32::from(hsl.hue()),
            (hsl.saturation().value() / bounds::PERCENT_MAX) as f32,
            (hsl.lightness().value() / bounds::PERCENT_MAX) as f32,
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Color::Hsl(hsl)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Color::rgb(srgb.red, srgb.green, srgb.blue)
    }
}

impl From<palette::Hsl> for Color {
    /// Palette HSL goes through float sRGB, then through the byte triple
    fn from(hsl: palette::Hsl) -> Self {
        Srgb::from_color(hsl).into_format::<u8>().into()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(named) => f.write_str(named.name()),
            Color::Hex(hex) => fmt::Display::fmt(hex, f),
            Color::Rgb(rgb) => fmt::Display::fmt(rgb, f),
            Color::Hsl(hsl) => fmt::Display::fmt(hsl, f),
        }
    }
}

impl FromStr for Color {
    type Err = StripError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse(&text).map_err(serde::de::Error::custom)
    }
}

fn channel(name: &str, value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        StripError::format(format!(
            "{name} channel {value} outside [0, {}]",
            bounds::RGB_MAX
        ))
    })
}

fn capture<T: FromStr>(text: &str, group: &str) -> Result<T> {
    group
        .parse()
        .map_err(|_| StripError::format(format!("invalid component '{group}' in '{text}'")))
}

/// `Ok(None)` when the text is not RGB-shaped; `Err` when it is but out of range
fn parse_rgb(text: &str) -> Result<Option<Color>> {
    let Some(caps) = RGB_PATTERN.captures(text) else {
        return Ok(None);
    };
    Color::from_rgb(
        capture(text, &caps[1])?,
        capture(text, &caps[2])?,
        capture(text, &caps[3])?,
    )
    .map(Some)
}

fn parse_hsl(text: &str) -> Result<Option<Color>> {
    let Some(caps) = HSL_PATTERN.captures(text) else {
        return Ok(None);
    };
    Color::from_hsl(
        capture(text, &caps[1])?,
        capture(text, &caps[2])?,
        capture(text, &caps[3])?,
    )
    .map(Some)
}
