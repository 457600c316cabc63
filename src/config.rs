//! Configuration structures for strip calibration.
//!
//! This module defines the serializable description of a hot tub and the
//! test strips used on it: one scale per measured attribute, each with its
//! reference swatches, field rules and optional target range.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use strip_colorscan::{DimensionalityRegistry, StripConfig};
//! use std::path::Path;
//!
//! // Load from file
//! let config = StripConfig::from_json_file(Path::new("strips.json"))?;
//!
//! // Or use defaults
//! let config = StripConfig::default_hot_tub();
//! let calibration = config.build(DimensionalityRegistry::shared())?;
//! # Ok::<(), strip_colorscan::StripError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`TubConfig`]: tub name and volume (bare numbers are gallons)
//! - [`StripDefinition`]: one strip chart and its scales
//! - [`ScaleConfig`]: field rules, target range and reference points

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calibration::{
    CalibrationPoint, CalibrationScale, HotTub, Status, TestStrip, ValueRange,
};
use crate::color::{Color, HexColor, Rgb};
use crate::constants::{hot_tub, registry_keys};
use crate::error::{Result, StripError};
use crate::units::{DimensionalityRegistry, FieldConfig, FieldSpec, Quantity};

/// Complete calibration configuration.
///
/// Can be serialized to/from JSON for reproducible readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripConfig {
    /// Tub the strips are used on
    pub tub: TubConfig,

    /// Strip charts
    pub strips: Vec<StripDefinition>,
}

/// Tub parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubConfig {
    pub name: String,

    /// Water volume; bare numbers are read as US gallons
    pub volume: Quantity,
}

/// One strip chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripDefinition {
    pub name: String,

    /// Scales in chart order
    pub scales: Vec<ScaleConfig>,
}

/// One measured attribute on a strip chart.
///
/// Point values and range bounds pass through `field` before use, so bare
/// numbers pick up the field's default unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Attribute name, also used as the scale name
    pub attribute: String,

    /// Dimensionality and default unit for values on this scale
    #[serde(default)]
    pub field: FieldConfig,

    /// Acceptable range for readings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<RangeConfig>,

    /// Reference swatches in chart order
    pub points: Vec<PointConfig>,
}

/// Reference swatch on a scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointConfig {
    pub label: String,
    pub value: Quantity,

    /// Any textual color form: `#rrggbb`, `(r, g, b)`, `h, s%, l%` or a CSS name
    pub color: Color,
    pub status: Status,
}

/// Target range bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConfig {
    pub minimum: Quantity,
    pub maximum: Quantity,
    pub nominal: Quantity,
}

/// Runtime objects built from a [`StripConfig`]
#[derive(Debug, Clone)]
pub struct Calibration {
    pub tub: HotTub,
    pub strips: Vec<TestStrip>,
}

impl Calibration {
    /// Strip with the given name
    pub fn strip(&self, name: &str) -> Result<&TestStrip> {
        self.strips
            .iter()
            .find(|strip| strip.name() == name)
            .ok_or_else(|| StripError::UnknownKey {
                key: name.to_string(),
            })
    }
}

impl RangeConfig {
    /// Validate bounds through the field and build the range
    pub fn build(&self, field: &FieldSpec) -> Result<ValueRange> {
        ValueRange::new(
            field.validate(self.minimum.clone())?,
            field.validate(self.maximum.clone())?,
            field.validate(self.nominal.clone())?,
        )
    }
}

impl ScaleConfig {
    /// Build the scale and its optional target range
    pub fn build(
        &self,
        registry: &DimensionalityRegistry,
    ) -> Result<(CalibrationScale, Option<ValueRange>)> {
        let field = self.field.build(registry)?;
        let points = self.points.iter().map(|point| {
            (
                point.label.clone(),
                CalibrationPoint::new(point.value.clone(), point.color, point.status),
            )
        });
        let scale = CalibrationScale::with_field(self.attribute.clone(), &field, points)?;
        let target = self.target.as_ref().map(|range| range.build(&field)).transpose()?;
        Ok((scale, target))
    }
}

impl StripDefinition {
    pub fn build(&self, registry: &DimensionalityRegistry) -> Result<TestStrip> {
        let mut strip = TestStrip::new(self.name.clone());
        for scale_config in &self.scales {
            let (scale, target) = scale_config.build(registry)?;
            strip.add_scale(scale_config.attribute.clone(), scale, target)?;
        }
        Ok(strip)
    }
}

impl TubConfig {
    pub fn build(&self, registry: &DimensionalityRegistry) -> Result<HotTub> {
        let field = FieldSpec::from_names(registry, Some(registry_keys::VOLUME), Some("gallon"))?;
        HotTub::new(self.name.clone(), field.validate(self.volume.clone())?)
    }
}

impl StripConfig {
    /// Create default configuration (SaluSpa with a four-pad spa strip)
    pub fn default_hot_tub() -> Self {
        Self {
            tub: TubConfig {
                name: "SaluSpa".to_string(),
                volume: Quantity::dimensionless(hot_tub::SALU_SPA_GALLONS),
            },
            strips: vec![StripDefinition {
                name: "spa 4-way".to_string(),
                scales: vec![
                    ScaleConfig {
                        attribute: "total_hardness".to_string(),
                        field: ppm_field(),
                        target: Some(range(150.0, 250.0, 200.0)),
                        points: vec![
                            point("A", 0.0, (0x4c, 0x74, 0xa6), Status::VeryLow),
                            point("B", 100.0, (0x6a, 0x6c, 0xa3), Status::Low),
                            point("C", 250.0, (0x83, 0x67, 0x9f), Status::Ok),
                            point("D", 500.0, (0x9a, 0x64, 0x9c), Status::High),
                            point("E", 1000.0, (0xb2, 0x62, 0x9a), Status::VeryHigh),
                        ],
                    },
                    ScaleConfig {
                        attribute: "free_chlorine".to_string(),
                        field: ppm_field(),
                        target: Some(range(3.0, 5.0, 3.0)),
                        points: vec![
                            point("0", 0.0, (0xfd, 0xf6, 0xd8), Status::VeryLow),
                            point("0.5", 0.5, (0xf1, 0xe3, 0xe5), Status::Low),
                            point("1", 1.0, (0xe3, 0xc6, 0xe0), Status::Ok),
                            point("3", 3.0, (0xc9, 0x8f, 0xc7), Status::Ideal),
                            point("5", 5.0, (0xb0, 0x6b, 0xb4), Status::High),
                            point("10", 10.0, (0x8d, 0x3f, 0x97), Status::VeryHigh),
                        ],
                    },
                    ScaleConfig {
                        attribute: "ph".to_string(),
                        field: FieldConfig {
                            dimensionality: None,
                            default_unit: Some("pH".to_string()),
                        },
                        target: Some(range(7.2, 7.8, 7.5)),
                        points: vec![
                            point("6.2", 6.2, (0xe6, 0xa0, 0x32), Status::VeryLow),
                            point("6.8", 6.8, (0xe8, 0x8b, 0x3c), Status::Low),
                            point("7.2", 7.2, (0xe4, 0x74, 0x3f), Status::Ok),
                            point("7.5", 7.5, (0xdc, 0x5a, 0x46), Status::Ideal),
                            point("7.8", 7.8, (0xd0, 0x45, 0x55), Status::Ok),
                            point("8.4", 8.4, (0xbe, 0x28, 0x5a), Status::VeryHigh),
                        ],
                    },
                    ScaleConfig {
                        attribute: "total_alkalinity".to_string(),
                        field: ppm_field(),
                        target: Some(range(80.0, 120.0, 100.0)),
                        points: vec![
                            point("0", 0.0, (0xd9, 0xc4, 0x6a), Status::VeryLow),
                            point("40", 40.0, (0xb5, 0xb8, 0x65), Status::Low),
                            point("80", 80.0, (0x8e, 0xa8, 0x6a), Status::Ok),
                            point("120", 120.0, (0x6d, 0x99, 0x72), Status::Ideal),
                            point("180", 180.0, (0x4f, 0x8a, 0x7a), Status::High),
                            point("240", 240.0, (0x38, 0x7a, 0x82), Status::VeryHigh),
                        ],
                    },
                ],
            }],
        }
    }

    /// Build the tub and every strip
    ///
    /// # Errors
    ///
    /// Propagates the first field, unit, range or duplicate-attribute error.
    pub fn build(&self, registry: &DimensionalityRegistry) -> Result<Calibration> {
        let tub = self.tub.build(registry)?;
        let strips = self
            .strips
            .iter()
            .map(|definition| {
                let strip = definition.build(registry)?;
                debug!(strip = %strip.name(), scales = strip.len(), "Strip built");
                Ok(strip)
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            tub = %tub.name(),
            volume = %tub.volume(),
            strips = strips.len(),
            "Calibration configuration built"
        );
        Ok(Calibration { tub, strips })
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        info!(path = %path.display(), strips = config.strips.len(), "Configuration loaded");
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn ppm_field() -> FieldConfig {
    FieldConfig {
        dimensionality: Some(registry_keys::CONCENTRATION.to_string()),
        default_unit: Some("ppm".to_string()),
    }
}

fn range(minimum: f64, maximum: f64, nominal: f64) -> RangeConfig {
    RangeConfig {
        minimum: Quantity::dimensionless(minimum),
        maximum: Quantity::dimensionless(maximum),
        nominal: Quantity::dimensionless(nominal),
    }
}

fn point(label: &str, value: f64, (red, green, blue): (u8, u8, u8), status: Status) -> PointConfig {
    PointConfig {
        label: label.to_string(),
        value: Quantity::dimensionless(value),
        color: Color::Hex(HexColor::new(Rgb::new(red, green, blue))),
        status,
    }
}
