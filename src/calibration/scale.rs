//! Calibration scale matching
//!
//! A [`CalibrationScale`] is an ordered list of labelled reference swatches.
//! Matching returns the point whose color is nearest to an observed color
//! under HSL distance. Ties go to the point inserted first.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::calibration::CalibrationPoint;
use crate::color::Color;
use crate::error::{Result, StripError};
use crate::units::FieldSpec;

/// Result of a nearest-point search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    pub label: &'a str,
    pub point: &'a CalibrationPoint,
    pub distance: f64,
}

/// Ordered label → point mapping for one measured attribute
///
/// Labels are expected to be unique; with duplicates, lookups and ties
/// resolve to the first occurrence. Values are expected to share one
/// dimensionality, which [`CalibrationScale::with_field`] enforces.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationScale {
    name: String,
    points: Vec<(String, CalibrationPoint)>,
}

impl CalibrationScale {
    /// Build a scale from labelled points, keeping insertion order
    pub fn new<L: Into<String>>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (L, CalibrationPoint)>,
    ) -> Self {
        let name = name.into();
        let points: Vec<(String, CalibrationPoint)> = entries
            .into_iter()
            .map(|(label, point)| (label.into(), point))
            .collect();

        let mut seen = HashSet::new();
        for (label, _) in &points {
            if !seen.insert(label.as_str()) {
                warn!(scale = %name, label = %label, "Duplicate calibration label");
            }
        }

        debug!(scale = %name, points = points.len(), "Calibration scale built");
        Self { name, points }
    }

    /// Build a scale, passing every value through the field's rules first
    ///
    /// # Errors
    ///
    /// Propagates `MissingUnit` or `Dimensionality` from the first value the
    /// field rejects.
    pub fn with_field<L: Into<String>>(
        name: impl Into<String>,
        field: &FieldSpec,
        entries: impl IntoIterator<Item = (L, CalibrationPoint)>,
    ) -> Result<Self> {
        let validated = entries
            .into_iter()
            .map(|(label, point)| {
                let value = field.validate(point.value().clone())?;
                Ok((label, CalibrationPoint::new(value, *point.color(), point.status())))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, validated))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|(label, _)| label.as_str())
    }

    /// (label, point) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CalibrationPoint)> {
        self.points.iter().map(|(label, point)| (label.as_str(), point))
    }

    /// Point stored under a label
    ///
    /// # Errors
    ///
    /// Returns `StripError::UnknownLabel` if the label is absent.
    pub fn get(&self, label: &str) -> Result<&CalibrationPoint> {
        self.points
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, point)| point)
            .ok_or_else(|| StripError::UnknownLabel {
                scale: self.name.clone(),
                label: label.to_string(),
            })
    }

    /// Nearest point to an observed color, or `None` for an empty scale
    pub fn nearest(&self, observed: &Color) -> Option<Match<'_>> {
        let mut best: Option<Match<'_>> = None;
        for (label, point) in &self.points {
            let distance = observed.hsl_distance(point.color());
            // Strict comparison keeps the earliest point on ties
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Match {
                    label,
                    point,
                    distance,
                });
            }
        }

        if let Some(found) = &best {
            trace!(
                scale = %self.name,
                observed = %observed,
                label = found.label,
                distance = found.distance,
                "Matched calibration point"
            );
        }
        best
    }

    /// Point whose color is nearest to `observed`
    ///
    /// # Errors
    ///
    /// Returns `StripError::EmptyScale` if the scale has no points.
    pub fn match_color(&self, observed: &Color) -> Result<&CalibrationPoint> {
        self.nearest(observed)
            .map(|found| found.point)
            .ok_or_else(|| StripError::EmptyScale {
                scale: self.name.clone(),
            })
    }

    /// [`CalibrationScale::match_color`] for an RGB byte triple
    pub fn match_rgb(&self, red: u8, green: u8, blue: u8) -> Result<&CalibrationPoint> {
        self.match_color(&Color::rgb(red, green, blue))
    }
}

impl<'a> IntoIterator for &'a CalibrationScale {
    type Item = (&'a str, &'a CalibrationPoint);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Status;
    use crate::color::Rgb;
    use crate::units::{Dimension, Quantity, Unit};

    fn ppm(value: f64) -> Quantity {
        Quantity::with_unit(value, "ppm").unwrap()
    }

    fn hsl(h: i64, s: f64, l: f64) -> Color {
        Color::from_hsl(h, s, l).unwrap()
    }

    fn hardness() -> CalibrationScale {
        CalibrationScale::new(
            "total_hardness",
            [
                ("A", CalibrationPoint::new(ppm(0.0), Rgb::new(76, 116, 166), Status::VeryLow)),
                ("B", CalibrationPoint::new(ppm(250.0), Rgb::new(104, 106, 162), Status::Ok)),
                ("C", CalibrationPoint::new(ppm(1000.0), Rgb::new(178, 98, 154), Status::VeryHigh)),
            ],
        )
    }

    #[test]
    fn test_exact_match() {
        let scale = hardness();
        let point = scale.match_rgb(76, 116, 166).unwrap();
        assert_eq!(point.status(), Status::VeryLow);

        let found = scale.nearest(&Color::from_hex("#4C74A6").unwrap()).unwrap();
        assert_eq!(found.label, "A");
        assert_eq!(found.distance, 0.0);
    }

    #[test]
    fn test_nearest_without_hue_wrap() {
        let scale = CalibrationScale::new(
            "hue",
            [
                ("red", CalibrationPoint::new(ppm(1.0), hsl(0, 50.0, 50.0), Status::Low)),
                ("blue", CalibrationPoint::new(ppm(2.0), hsl(240, 50.0, 50.0), Status::High)),
            ],
        );
        let observed = hsl(10, 50.0, 50.0);
        assert_eq!(scale.nearest(&observed).unwrap().label, "red");
    }

    #[test]
    fn test_tie_goes_to_first_inserted() {
        let scale = CalibrationScale::new(
            "tie",
            [
                ("X", CalibrationPoint::new(ppm(1.0), hsl(100, 50.0, 50.0), Status::Low)),
                ("Y", CalibrationPoint::new(ppm(2.0), hsl(120, 50.0, 50.0), Status::High)),
            ],
        );
        let observed = hsl(110, 50.0, 50.0);
        assert_eq!(scale.nearest(&observed).unwrap().label, "X");
    }

    #[test]
    fn test_identical_colors_resolve_to_first_inserted() {
        let shared = hsl(120, 50.0, 50.0);
        let scale = CalibrationScale::new(
            "same",
            [
                ("X", CalibrationPoint::new(ppm(1.0), shared, Status::Low)),
                ("Y", CalibrationPoint::new(ppm(2.0), shared, Status::High)),
            ],
        );

        let found = scale.nearest(&shared).unwrap();
        assert_eq!(found.label, "X");
        assert_eq!(found.distance, 0.0);
        assert_eq!(scale.match_color(&shared).unwrap().status(), Status::Low);
        assert_eq!(scale.match_color(&shared).unwrap().value(), &ppm(1.0));
    }

    #[test]
    fn test_empty_scale() {
        let scale = CalibrationScale::new("empty", Vec::<(String, CalibrationPoint)>::new());
        assert!(scale.is_empty());
        assert!(scale.nearest(&Color::rgb(0, 0, 0)).is_none());
        assert!(matches!(
            scale.match_rgb(0, 0, 0),
            Err(StripError::EmptyScale { scale }) if scale == "empty"
        ));
    }

    #[test]
    fn test_lookup_and_iteration_order() {
        let scale = hardness();
        assert_eq!(scale.name(), "total_hardness");
        assert_eq!(scale.len(), 3);
        assert_eq!(scale.labels().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(scale.get("B").unwrap().status(), Status::Ok);
        assert!(matches!(
            scale.get("Z"),
            Err(StripError::UnknownLabel { label, .. }) if label == "Z"
        ));
        assert_eq!((&scale).into_iter().count(), 3);
    }

    #[test]
    fn test_duplicate_labels_resolve_to_first() {
        let scale = CalibrationScale::new(
            "dup",
            [
                ("A", CalibrationPoint::new(ppm(1.0), Rgb::new(0, 0, 0), Status::Low)),
                ("A", CalibrationPoint::new(ppm(2.0), Rgb::new(255, 255, 255), Status::High)),
            ],
        );
        assert_eq!(scale.get("A").unwrap().status(), Status::Low);
    }

    #[test]
    fn test_with_field_applies_default_unit() {
        let ppm_unit = Unit::parse("ppm").unwrap();
        let field = FieldSpec::new(Some(Dimension::CONCENTRATION), Some(ppm_unit)).unwrap();
        let scale = CalibrationScale::with_field(
            "hardness",
            &field,
            [(
                "A",
                CalibrationPoint::new(Quantity::dimensionless(0.0), Rgb::new(1, 2, 3), Status::Low),
            )],
        )
        .unwrap();
        assert_eq!(scale.get("A").unwrap().value(), &ppm(0.0));

        let err = CalibrationScale::with_field(
            "hardness",
            &field,
            [(
                "A",
                CalibrationPoint::new(
                    Quantity::with_unit(1.0, "gallon").unwrap(),
                    Rgb::new(1, 2, 3),
                    Status::Low,
                ),
            )],
        )
        .unwrap_err();
        assert!(matches!(err, StripError::Dimensionality { .. }));
    }
}
