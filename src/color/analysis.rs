//! Color comparison and aggregation
//!
//! Provides the operations calibration matching is built on:
//! - Distance between two colors (HSL Euclidean)
//! - Mean of a set of colors (circular hue mean)
//! - Random color between two endpoints
//!
//! HSL distance treats hue as a linear axis, so hues 359 and 1 are 358
//! apart. Matching inherits that behavior.

use std::f64::consts::TAU;
use std::str::FromStr;

use rand::Rng;

use crate::color::{Color, Hsl, Percent};
use crate::constants::{bounds, metric, precision};
use crate::error::{Result, StripError};

/// Color distance metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Euclidean distance over (hue degrees, saturation %, lightness %)
    #[default]
    Hsl,
    /// Reserved; not implemented
    Rgb,
}

impl FromStr for Metric {
    type Err = StripError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            metric::HSL => Ok(Metric::Hsl),
            metric::RGB => Ok(Metric::Rgb),
            other => Err(StripError::format(format!("unknown distance metric '{other}'"))),
        }
    }
}

impl Color {
    /// Distance between two colors under the given metric
    ///
    /// # Errors
    ///
    /// Returns `StripError::NotImplemented` for `Metric::Rgb`.
    pub fn distance(&self, other: &Color, metric: Metric) -> Result<f64> {
        match metric {
            Metric::Hsl => Ok(self.hsl_distance(other)),
            Metric::Rgb => Err(StripError::NotImplemented {
                operation: "RGB color distance".to_string(),
            }),
        }
    }

    /// Euclidean HSL distance without hue wraparound
    pub fn hsl_distance(&self, other: &Color) -> f64 {
        let a = self.hsl_value().components();
        let b = other.hsl_value().components();
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Mean color of a non-empty set
    ///
    /// Hue is averaged on the circle and truncated to a degree in [0, 360).
    /// Saturation and lightness are arithmetic means.
    ///
    /// # Errors
    ///
    /// Returns `StripError::EmptyInput` if `colors` is empty.
    pub fn mean(colors: &[Color]) -> Result<Color> {
        if colors.is_empty() {
            return Err(StripError::EmptyInput {
                operation: "color mean".to_string(),
            });
        }

        let hsls: Vec<Hsl> = colors.iter().map(Color::hsl_value).collect();
        let count = hsls.len() as f64;

        let (sin_sum, cos_sum) = hsls.iter().fold((0.0, 0.0), |(s, c), hsl| {
            let radians = f64::from(hsl.hue()).to_radians();
            (s + radians.sin(), c + radians.cos())
        });
        let mut angle = sin_sum.atan2(cos_sum);
        if angle < 0.0 {
            angle += TAU;
        }
        let degrees =
            (angle.to_degrees() * precision::HUE_SNAP_STEPS).round() / precision::HUE_SNAP_STEPS;
        let hue = (degrees as i64).rem_euclid(bounds::HUE_MAX) as u16;

        let mean_percent = |pick: fn(&Hsl) -> Percent| {
            let total: f64 = hsls.iter().map(|hsl| f64::from(pick(hsl).hundredths())).sum();
            Percent::from_hundredths((total / count).round_ties_even() as u16)
        };

        Ok(Color::Hsl(Hsl::from_parts(
            hue,
            mean_percent(Hsl::saturation),
            mean_percent(Hsl::lightness),
        )))
    }

    /// Random color between two endpoints
    ///
    /// Each HSL axis is drawn uniformly from the whole-number range spanned
    /// by the endpoints. `t` must lie in [0, 1] when given but does not
    /// weight the draw.
    ///
    /// # Errors
    ///
    /// Returns `StripError::Format` if `t` is outside [0, 1].
    pub fn random_between<R: Rng + ?Sized>(
        a: &Color,
        b: &Color,
        t: Option<f64>,
        rng: &mut R,
    ) -> Result<Color> {
        if let Some(t) = t {
            if !(0.0..=1.0).contains(&t) {
                return Err(StripError::format(format!(
                    "interpolation parameter {t} outside [0, 1]"
                )));
            }
        }

        let a = a.hsl_value();
        let b = b.hsl_value();

        let hue = draw(rng, i64::from(a.hue()), i64::from(b.hue()));
        let saturation = draw(
            rng,
            a.saturation().value() as i64,
            b.saturation().value() as i64,
        );
        let lightness = draw(
            rng,
            a.lightness().value() as i64,
            b.lightness().value() as i64,
        );

        Color::from_hsl(hue, saturation as f64, lightness as f64)
    }

    /// [`Color::random_between`] using the thread-local generator
    pub fn random_between_thread(a: &Color, b: &Color, t: Option<f64>) -> Result<Color> {
        Self::random_between(a, b, t, &mut rand::thread_rng())
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, x: i64, y: i64) -> i64 {
    rng.gen_range(x.min(y)..=x.max(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hsl(h: i64, s: f64, l: f64) -> Color {
        Color::from_hsl(h, s, l).unwrap()
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("hsl".parse::<Metric>().unwrap(), Metric::Hsl);
        assert_eq!("RGB".parse::<Metric>().unwrap(), Metric::Rgb);
        assert!("lab".parse::<Metric>().is_err());
    }

    #[test]
    fn test_distance_identity_and_symmetry() {
        let a = Color::from_hex("#4c74a6").unwrap();
        let b = Color::from_hex("#b2629a").unwrap();
        assert_eq!(a.distance(&a, Metric::Hsl).unwrap(), 0.0);
        assert_eq!(
            a.distance(&b, Metric::Hsl).unwrap(),
            b.distance(&a, Metric::Hsl).unwrap()
        );
    }

    #[test]
    fn test_distance_values() {
        let d = hsl(0, 0.0, 0.0).hsl_distance(&hsl(0, 30.0, 40.0));
        assert!((d - 50.0).abs() < 1e-9);

        // No wraparound: 359 and 1 are far apart
        let d = hsl(359, 50.0, 50.0).hsl_distance(&hsl(1, 50.0, 50.0));
        assert!((d - 358.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_metric_not_implemented() {
        let c = Color::rgb(1, 2, 3);
        assert!(matches!(
            c.distance(&c, Metric::Rgb),
            Err(StripError::NotImplemented { .. })
        ));
    }

    #[test]
    fn test_mean_single_color_is_identity() {
        for color in [hsl(213, 37.0, 47.0), hsl(0, 100.0, 50.0), hsl(359, 12.5, 3.0)] {
            assert_eq!(Color::mean(&[color]).unwrap(), color);
        }
    }

    #[test]
    fn test_mean_wraps_hue() {
        let mean = Color::mean(&[hsl(350, 40.0, 20.0), hsl(10, 60.0, 40.0)]).unwrap();
        let mean = mean.hsl_value();
        assert_eq!(mean.hue(), 0);
        assert_eq!(mean.saturation().value(), 50.0);
        assert_eq!(mean.lightness().value(), 30.0);
    }

    #[test]
    fn test_mean_empty_input() {
        assert!(matches!(
            Color::mean(&[]),
            Err(StripError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_random_between_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = hsl(200, 10.0, 80.0);
        let b = hsl(100, 30.0, 60.0);
        for _ in 0..200 {
            let c = Color::random_between(&a, &b, None, &mut rng).unwrap().hsl_value();
            assert!((100..=200).contains(&c.hue()));
            assert!((10.0..=30.0).contains(&c.saturation().value()));
            assert!((60.0..=80.0).contains(&c.lightness().value()));
        }
    }

    #[test]
    fn test_random_between_same_endpoints() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = hsl(120, 50.0, 50.0);
        assert_eq!(Color::random_between(&a, &a, Some(0.5), &mut rng).unwrap(), a);
    }

    #[test]
    fn test_random_between_rejects_bad_t() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Color::rgb(0, 0, 0);
        assert!(Color::random_between(&a, &a, Some(1.5), &mut rng).is_err());
        assert!(Color::random_between(&a, &a, Some(-0.1), &mut rng).is_err());
        assert!(Color::random_between_thread(&a, &a, Some(1.0)).is_ok());
    }
}
