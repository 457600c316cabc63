//! Integration tests for strip reading
//!
//! These tests validate the end-to-end workflow including:
//! - Color construction, conversion and display
//! - Unit validation through field rules
//! - Calibration scale matching and tie-breaking
//! - Configuration loading and strip reads
//! - Error handling for edge cases

use rand::rngs::StdRng;
use rand::SeedableRng;
use strip_colorscan::{
    validate_quantity, CalibrationPoint, CalibrationScale, Color, Dimension,
    DimensionalityRegistry, FieldSpec, Metric, Quantity, Rgb, Status, StripConfig, StripError,
    Unit,
};

fn ppm(value: f64) -> Quantity {
    Quantity::with_unit(value, "ppm").unwrap()
}

fn hex(text: &str) -> Color {
    Color::from_hex(text).unwrap()
}

fn hsl(h: i64, s: f64, l: f64) -> Color {
    Color::from_hsl(h, s, l).unwrap()
}

fn hardness_scale() -> CalibrationScale {
    CalibrationScale::new(
        "total_hardness",
        [
            ("A", CalibrationPoint::new(ppm(0.0), hex("#4C74A6"), Status::VeryLow)),
            ("E", CalibrationPoint::new(ppm(1000.0), hex("#B2629A"), Status::VeryHigh)),
        ],
    )
}

// ============================================================================
// Color Conversion Tests
// ============================================================================

#[test]
fn test_hex_round_trip_is_exact() {
    for red in (0..=255u8).step_by(3) {
        for green in (0..=255u8).step_by(5) {
            for blue in (0..=255u8).step_by(7) {
                let rgb = Color::rgb(red, green, blue);
                let text = rgb.as_hex().to_string();
                assert_eq!(Color::from_hex(&text).unwrap().as_rgb(), rgb);
            }
        }
    }
}

#[test]
fn test_hsl_round_trip_is_bounded() {
    // Truncation on both legs bounds the error per channel
    let mut worst = 0i16;
    for red in (0..=255u8).step_by(5) {
        for green in (0..=255u8).step_by(5) {
            for blue in (0..=255u8).step_by(5) {
                let original = Rgb::new(red, green, blue);
                let back = Color::from(original).as_hsl().rgb_value();
                for (a, b) in original.channels().into_iter().zip(back.channels()) {
                    worst = worst.max((i16::from(a) - i16::from(b)).abs());
                }
            }
        }
    }
    assert!(worst <= 8, "worst channel error {worst}");
}

#[test]
fn test_display_forms() {
    let color = Color::from_hex("#B2629A").unwrap();
    assert_eq!(color.as_hex().to_string(), "#b2629a");
    assert_eq!(color.as_rgb().to_string(), "(178, 98, 154)");
    assert_eq!(color.as_hsl().to_string(), "318, 34%, 54%");
    assert_eq!(Color::from_name("thistle").unwrap().to_string(), "thistle");
}

#[test]
fn test_constructor_ranges() {
    assert!(matches!(Color::from_rgb(0, 0, 256), Err(StripError::Format { .. })));
    assert!(matches!(Color::from_hsl(-1, 0.0, 0.0), Err(StripError::Format { .. })));
    assert!(matches!(Color::from_hsl(0, 0.0, 100.5), Err(StripError::Format { .. })));
    assert!(matches!(Color::from_hex("#12345"), Err(StripError::Format { .. })));
}

#[test]
fn test_distance_and_mean() {
    let a = Color::from_hsl(213, 37.0, 47.0).unwrap();
    let b = Color::from_hsl(318, 34.0, 54.0).unwrap();
    assert_eq!(a.distance(&a, Metric::Hsl).unwrap(), 0.0);
    assert_eq!(
        a.distance(&b, Metric::Hsl).unwrap(),
        b.distance(&a, Metric::Hsl).unwrap()
    );
    assert!(a.distance(&b, Metric::Rgb).is_err());

    assert_eq!(Color::mean(&[a]).unwrap(), a);
    assert!(matches!(Color::mean(&[]), Err(StripError::EmptyInput { .. })));
}

#[test]
fn test_random_between_is_reproducible() {
    let a = Color::from_name("navy").unwrap();
    let b = Color::from_name("teal").unwrap();
    let first = Color::random_between(&a, &b, None, &mut StdRng::seed_from_u64(42)).unwrap();
    let second = Color::random_between(&a, &b, None, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Unit Validation Tests
// ============================================================================

#[test]
fn test_default_unit_reinterprets_bare_number() {
    let ppm_unit = Unit::parse("ppm").unwrap();
    let value = validate_quantity(Quantity::dimensionless(5.0), Some(&ppm_unit), None).unwrap();
    assert_eq!(value, ppm(5.0));
}

#[test]
fn test_concentration_field_rejects_volume() {
    let registry = DimensionalityRegistry::standard();
    let field = FieldSpec::from_names(&registry, Some("concentration"), None).unwrap();
    let err = field
        .validate(Quantity::with_unit(5.0, "gallon").unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        StripError::Dimensionality { got, expected }
            if got == Dimension::VOLUME && expected == Dimension::CONCENTRATION
    ));
}

#[test]
fn test_unit_conversions() {
    let gallon = Quantity::with_unit(1.0, "gallon").unwrap();
    let liters = gallon.to_unit("liter").unwrap();
    assert!((liters.magnitude() - 3.785_411_784).abs() < 1e-9);

    let mg_per_l = Quantity::with_unit(250.0, "mg/L").unwrap();
    let as_ppm = mg_per_l.to_unit("ppm").unwrap();
    assert!((as_ppm.magnitude() - 250.0).abs() < 1e-9);
}

#[test]
fn test_derived_quantity_round_trips_through_json() {
    let kg = Quantity::with_unit(1.0, "kg").unwrap();
    let per = Quantity::with_unit(1.0, "m*s").unwrap();
    let flux = (kg / per).unwrap();
    let back: Quantity = serde_json::from_str(&serde_json::to_string(&flux).unwrap()).unwrap();
    assert_eq!(back.dimension(), flux.dimension());
    assert_eq!(back, flux);

    let product = (Quantity::dimensionless(2.0) * Quantity::dimensionless(3.0)).unwrap();
    let back: Quantity = serde_json::from_str(&serde_json::to_string(&product).unwrap()).unwrap();
    assert!(back.is_dimensionless());
    assert_eq!(back.magnitude(), 6.0);
}

#[test]
fn test_exponent_overflow_is_an_error() {
    assert!(matches!(Unit::parse("gallon^50"), Err(StripError::Unit { .. })));
    assert!(matches!(Unit::parse("m/m^-128"), Err(StripError::Unit { .. })));
}

// ============================================================================
// Calibration Matching Scenarios
// ============================================================================

#[test]
fn test_exact_match_returns_point() {
    let scale = hardness_scale();
    let point = scale.match_rgb(76, 116, 166).unwrap();
    assert_eq!(point, scale.get("A").unwrap());
    assert_eq!(
        scale.nearest(&Color::rgb(76, 116, 166)).unwrap().distance,
        0.0
    );
}

#[test]
fn test_nearest_match_without_hue_wrap() {
    let scale = CalibrationScale::new(
        "hue",
        [
            ("zero", CalibrationPoint::new(ppm(1.0), hsl(0, 60.0, 50.0), Status::Low)),
            ("blue", CalibrationPoint::new(ppm(2.0), hsl(240, 60.0, 50.0), Status::High)),
        ],
    );
    let point = scale.match_color(&hsl(10, 60.0, 50.0)).unwrap();
    assert_eq!(point.status(), Status::Low);
}

#[test]
fn test_tie_break_prefers_first() {
    let scale = CalibrationScale::new(
        "tie",
        [
            ("X", CalibrationPoint::new(ppm(1.0), hsl(50, 20.0, 20.0), Status::Low)),
            ("Y", CalibrationPoint::new(ppm(2.0), hsl(50, 40.0, 20.0), Status::High)),
        ],
    );
    let found = scale.nearest(&hsl(50, 30.0, 20.0)).unwrap();
    assert_eq!(found.label, "X");
}

#[test]
fn test_identical_points_match_first_inserted() {
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
    assert_eq!(found.point.value(), &ppm(1.0));
}

#[test]
fn test_empty_scale_errors() {
    let scale = CalibrationScale::new("empty", Vec::<(&str, CalibrationPoint)>::new());
    assert!(matches!(scale.match_rgb(1, 2, 3), Err(StripError::EmptyScale { .. })));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_default_strip_reading() {
    let calibration = StripConfig::default_hot_tub()
        .build(DimensionalityRegistry::shared())
        .unwrap();
    let strip = calibration.strip("spa 4-way").unwrap();

    let reading = strip.read("ph", &Color::from_hex("#dc5a46").unwrap()).unwrap();
    assert_eq!(reading.label, "7.5");
    assert_eq!(reading.status, Status::Ideal);
    assert_eq!(reading.in_range, Some(true));

    let reading = strip
        .read("total_hardness", &Color::from_hex("#b2629a").unwrap())
        .unwrap();
    assert_eq!(reading.value, ppm(1000.0));
    assert_eq!(reading.in_range, Some(false));
}

#[test]
fn test_config_rejects_unknown_dimensionality() {
    let json = r#"{
        "tub": {"name": "Tub", "volume": 300},
        "strips": [{
            "name": "bad",
            "scales": [{
                "attribute": "hardness",
                "field": {"dimensionality": "hardness"},
                "points": []
            }]
        }]
    }"#;
    let config: StripConfig = serde_json::from_str(json).unwrap();
    assert!(matches!(
        config.build(&DimensionalityRegistry::standard()),
        Err(StripError::UnknownKey { key }) if key == "hardness"
    ));
}

#[test]
fn test_user_message_is_readable() {
    let err = Quantity::with_unit(1.0, "furlong").unwrap_err();
    assert!(err.user_message().contains("furlong"));
}
