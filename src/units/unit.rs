//! Named units and unit expressions
//!
//! Units come from a fixed catalogue. Each entry carries a conversion factor
//! to SI base units and a [`Dimension`]. Expressions such as `mg/L`,
//! `m^3` or `meter / second` combine catalogue entries.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, StripError};
use crate::units::Dimension;

/// Catalogue entry: aliases (first is canonical), factor to SI base, dimension
#[derive(Debug)]
struct UnitDef {
    names: &'static [&'static str],
    factor: f64,
    dimension: Dimension,
}

impl UnitDef {
    fn canonical(&self) -> &'static str {
        self.names[0]
    }
}

const fn def(names: &'static [&'static str], factor: f64, dimension: Dimension) -> UnitDef {
    UnitDef {
        names,
        factor,
        dimension,
    }
}

const UNIT_TABLE: &[UnitDef] = &[
    // length
    def(&["meter", "m", "metre", "meters", "metres"], 1.0, Dimension::LENGTH),
    def(&["centimeter", "cm", "centimeters"], 1e-2, Dimension::LENGTH),
    def(&["millimeter", "mm", "millimeters"], 1e-3, Dimension::LENGTH),
    def(&["kilometer", "km", "kilometers"], 1e3, Dimension::LENGTH),
    def(&["inch", "in", "inches"], 0.0254, Dimension::LENGTH),
    def(&["foot", "ft", "feet"], 0.3048, Dimension::LENGTH),
    def(&["yard", "yd", "yards"], 0.9144, Dimension::LENGTH),
    def(&["mile", "mi", "miles"], 1609.344, Dimension::LENGTH),
    // mass
    def(&["kilogram", "kg", "kilograms"], 1.0, Dimension::MASS),
    def(&["gram", "g", "grams"], 1e-3, Dimension::MASS),
    def(&["milligram", "mg", "milligrams"], 1e-6, Dimension::MASS),
    def(&["microgram", "ug", "µg", "micrograms"], 1e-9, Dimension::MASS),
    def(&["pound", "lb", "lbs", "pounds"], 0.453_592_37, Dimension::MASS),
    def(&["ounce", "oz", "ounces"], 0.028_349_523_125, Dimension::MASS),
    // time
    def(&["second", "s", "sec", "seconds"], 1.0, Dimension::TIME),
    def(&["minute", "min", "minutes"], 60.0, Dimension::TIME),
    def(&["hour", "h", "hr", "hours"], 3600.0, Dimension::TIME),
    def(&["day", "d", "days"], 86_400.0, Dimension::TIME),
    // remaining SI base units
    def(&["ampere", "A", "amp", "amperes"], 1.0, Dimension::CURRENT),
    def(&["kelvin", "K"], 1.0, Dimension::TEMPERATURE),
    def(&["mole", "mol", "moles"], 1.0, Dimension::SUBSTANCE),
    def(&["candela", "cd"], 1.0, Dimension::LUMINOSITY),
    def(&["radian", "rad", "radians"], 1.0, Dimension::ANGLE),
    def(&["degree", "deg", "degrees"], PI / 180.0, Dimension::ANGLE),
    // volume
    def(&["liter", "L", "l", "litre", "liters", "litres"], 1e-3, Dimension::VOLUME),
    def(&["milliliter", "mL", "ml", "milliliters"], 1e-6, Dimension::VOLUME),
    def(&["gallon", "gal", "gallons"], 3.785_411_784e-3, Dimension::VOLUME),
    def(&["quart", "qt", "quarts"], 9.463_529_46e-4, Dimension::VOLUME),
    def(&["pint", "pt", "pints"], 4.731_764_73e-4, Dimension::VOLUME),
    def(&["fluid_ounce", "floz", "fl_oz"], 2.957_352_956_25e-5, Dimension::VOLUME),
    // area
    def(&["acre", "acres"], 4046.856_422_4, Dimension::AREA),
    def(&["hectare", "ha", "hectares"], 1e4, Dimension::AREA),
    // speed
    def(&["mph", "mile_per_hour"], 0.447_04, Dimension::SPEED),
    def(&["kph", "kilometer_per_hour"], 1.0 / 3.6, Dimension::SPEED),
    def(&["knot", "kn", "knots"], 1852.0 / 3600.0, Dimension::SPEED),
    // concentration in water: 1 ppm = 1 mg/L
    def(&["ppm", "parts_per_million"], 1e-3, Dimension::CONCENTRATION),
    def(&["ppb", "parts_per_billion"], 1e-6, Dimension::CONCENTRATION),
    // declared dimensionless units
    def(&["pH", "ph"], 1.0, Dimension::NONE),
    def(&["percent", "%", "pct"], 1e-2, Dimension::NONE),
];

const DIMENSIONLESS_NAME: &str = "dimensionless";

/// Stands for "no unit" in a numerator, as in `1 / second`
const UNITY: &str = "1";

fn lookup(name: &str) -> Option<&'static UnitDef> {
    UNIT_TABLE
        .iter()
        .find(|d| d.names.contains(&name))
        .or_else(|| {
            // Long aliases also match regardless of case ("Gallon", "PPM")
            UNIT_TABLE.iter().find(|d| {
                d.names
                    .iter()
                    .any(|n| n.len() > 2 && n.eq_ignore_ascii_case(name))
            })
        })
}

/// A catalogue unit raised to a non-zero exponent
#[derive(Debug, Clone, Copy)]
struct Term {
    def: &'static UnitDef,
    exponent: i8,
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.def.canonical() == other.def.canonical() && self.exponent == other.exponent
    }
}

/// Fold `exponent` of `def` into `terms`, merging repeats of the same unit
fn push_term(terms: &mut Vec<Term>, def: &'static UnitDef, exponent: i8) -> Option<()> {
    match terms.iter().position(|t| t.def.canonical() == def.canonical()) {
        Some(i) => {
            let merged = terms[i].exponent.checked_add(exponent)?;
            if merged == 0 {
                terms.remove(i);
            } else {
                terms[i].exponent = merged;
            }
        }
        None if exponent != 0 => terms.push(Term { def, exponent }),
        None => {}
    }
    Some(())
}

/// Name in the grammar accepted by [`Unit::parse`]
///
/// Positive exponents form the numerator and each negative one follows a
/// `/`, so parsing the name yields the same terms.
fn render(terms: &[Term]) -> String {
    if terms.is_empty() {
        return DIMENSIONLESS_NAME.to_string();
    }

    let power = |t: &Term| {
        let magnitude = t.exponent.unsigned_abs();
        if magnitude == 1 {
            t.def.canonical().to_string()
        } else {
            format!("{} ** {magnitude}", t.def.canonical())
        }
    };

    let numerator: Vec<String> = terms.iter().filter(|t| t.exponent > 0).map(power).collect();
    let mut name = if numerator.is_empty() {
        UNITY.to_string()
    } else {
        numerator.join(" * ")
    };
    for t in terms.iter().filter(|t| t.exponent < 0) {
        name.push_str(" / ");
        name.push_str(&power(t));
    }
    name
}

/// A unit of measure: display name, factor to SI base units and dimensionality
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    factor: f64,
    dimension: Dimension,
    terms: Vec<Term>,
}

impl Unit {
    /// The implicit unit of a bare number (no unit declared)
    pub fn dimensionless() -> Self {
        Self {
            name: DIMENSIONLESS_NAME.to_string(),
            factor: 1.0,
            dimension: Dimension::NONE,
            terms: Vec::new(),
        }
    }

    fn from_terms(terms: Vec<Term>) -> Option<Self> {
        let mut factor = 1.0;
        let mut dimension = Dimension::NONE;
        for t in &terms {
            factor *= t.def.factor.powi(i32::from(t.exponent));
            dimension = dimension.checked_mul(t.def.dimension.checked_powi(t.exponent)?)?;
        }
        Some(Self {
            name: render(&terms),
            factor,
            dimension,
            terms,
        })
    }

    /// Parse a unit expression such as `ppm`, `mg/L` or `m ** 3`
    ///
    /// An empty expression or `dimensionless` yields the implicit unit, as
    /// does an expression whose terms cancel (`m / m`). Repeats of a unit
    /// are merged, so `m * m` is named `meter ** 2`.
    ///
    /// # Errors
    ///
    /// Returns `StripError::Unit` for unknown names, dangling operators,
    /// malformed exponents or exponents outside the `i8` range.
    pub fn parse(expression: &str) -> Result<Self> {
        let trimmed = expression.trim();
        if trimmed.is_empty() || trimmed == DIMENSIONLESS_NAME {
            return Ok(Self::dimensionless());
        }

        let normalized = trimmed.replace("**", "^");
        let mut dividing = false;
        let mut term = String::new();
        let mut raw_terms: Vec<(String, bool)> = Vec::new();
        for ch in normalized.chars() {
            match ch {
                '*' | '/' => {
                    raw_terms.push((std::mem::take(&mut term), dividing));
                    dividing = ch == '/';
                }
                _ => term.push(ch),
            }
        }
        raw_terms.push((term, dividing));

        let out_of_range = || StripError::unit(expression, "exponent out of range");
        let mut terms = Vec::new();
        for (raw, divide) in raw_terms {
            if raw.trim() == UNITY && !divide {
                continue;
            }
            let (def, exponent) = parse_term(&raw, expression)?;
            let signed = if divide { exponent.checked_neg() } else { Some(exponent) }
                .and_then(|e| i8::try_from(e).ok())
                .ok_or_else(out_of_range)?;
            push_term(&mut terms, def, signed).ok_or_else(out_of_range)?;
        }

        Self::from_terms(terms).ok_or_else(out_of_range)
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Multiplier converting a magnitude in this unit to SI base units
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Dimensionality signature
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// True only for the implicit unit of a bare number
    ///
    /// Declared dimensionless units such as `pH` or `percent` are not
    /// considered dimensionless here.
    pub fn is_dimensionless(&self) -> bool {
        self.terms.is_empty()
    }

    /// Product of two units
    ///
    /// # Errors
    ///
    /// Returns `StripError::Unit` if a merged exponent leaves the `i8` range.
    pub fn multiply(&self, other: &Unit) -> Result<Unit> {
        self.combine(other, false)
    }

    /// Quotient of two units
    ///
    /// # Errors
    ///
    /// Returns `StripError::Unit` if a merged exponent leaves the `i8` range.
    pub fn divide(&self, other: &Unit) -> Result<Unit> {
        self.combine(other, true)
    }

    fn combine(&self, other: &Unit, invert: bool) -> Result<Unit> {
        let op = if invert { "/" } else { "*" };
        let out_of_range = || {
            StripError::unit(
                format!("({}) {op} ({})", self.name, other.name),
                "exponent out of range",
            )
        };

        let mut terms = self.terms.clone();
        for t in &other.terms {
            let exponent = if invert {
                t.exponent.checked_neg().ok_or_else(out_of_range)?
            } else {
                t.exponent
            };
            push_term(&mut terms, t.def, exponent).ok_or_else(out_of_range)?;
        }
        Self::from_terms(terms).ok_or_else(out_of_range)
    }
}

fn parse_term(raw: &str, expression: &str) -> Result<(&'static UnitDef, i16)> {
    let (name, exponent) = match raw.split_once('^') {
        Some((name, exp)) => {
            let exponent: i16 = exp.trim().parse().map_err(|_| {
                StripError::unit(expression, format!("invalid exponent '{}'", exp.trim()))
            })?;
            (name.trim(), exponent)
        }
        None => (raw.trim(), 1),
    };

    if name.is_empty() {
        return Err(StripError::unit(expression, "missing unit name around operator"));
    }

    let def = lookup(name)
        .ok_or_else(|| StripError::unit(expression, format!("unknown unit '{name}'")))?;
    Ok((def, exponent))
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Unit {
    type Err = StripError;

    fn from_str(s: &str) -> Result<Self> {
        Unit::parse(s)
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Unit::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_units() {
        let gallon = Unit::parse("gallon").unwrap();
        assert_eq!(gallon.dimension(), Dimension::VOLUME);
        assert_eq!(gallon.name(), "gallon");

        let liter = Unit::parse("L").unwrap();
        assert_eq!(liter.name(), "liter");
        assert!((liter.factor() - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_parse_aliases_ignore_case_for_long_names() {
        assert_eq!(Unit::parse("Gallons").unwrap().name(), "gallon");
        assert_eq!(Unit::parse("PPM").unwrap().name(), "ppm");
        assert!(Unit::parse("MG").is_err());
    }

    #[test]
    fn test_parse_compound_units() {
        let mg_per_l = Unit::parse("mg/L").unwrap();
        assert_eq!(mg_per_l.dimension(), Dimension::CONCENTRATION);
        assert_eq!(mg_per_l.name(), "milligram / liter");
        assert!((mg_per_l.factor() - 1e-3).abs() < 1e-15);

        let cubic = Unit::parse("m ** 3").unwrap();
        assert_eq!(cubic.dimension(), Dimension::VOLUME);
        assert_eq!(cubic.name(), "meter ** 3");

        let speed = Unit::parse("meter / second").unwrap();
        assert_eq!(speed.dimension(), Dimension::SPEED);

        let area = Unit::parse("ft^2").unwrap();
        assert_eq!(area.dimension(), Dimension::AREA);
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed() {
        assert!(matches!(Unit::parse("furlong"), Err(StripError::Unit { .. })));
        assert!(matches!(Unit::parse("mg/"), Err(StripError::Unit { .. })));
        assert!(matches!(Unit::parse("m^x"), Err(StripError::Unit { .. })));
    }

    #[test]
    fn test_parse_rejects_out_of_range_exponents() {
        // gallon is [length] ** 3, so ^50 needs an exponent of 150
        assert!(matches!(Unit::parse("gallon^50"), Err(StripError::Unit { .. })));
        assert!(matches!(Unit::parse("m/m^-128"), Err(StripError::Unit { .. })));
        assert!(matches!(Unit::parse("m^-32768 / m^-32768"), Err(StripError::Unit { .. })));
        assert!(matches!(Unit::parse("m^127 * m"), Err(StripError::Unit { .. })));
        assert_eq!(Unit::parse("m^127").unwrap().name(), "meter ** 127");
    }

    #[test]
    fn test_repeated_units_merge() {
        assert_eq!(Unit::parse("m*m").unwrap().name(), "meter ** 2");
        assert_eq!(Unit::parse("m^-1").unwrap().name(), "1 / meter");
        assert!(Unit::parse("gallon / gal").unwrap().is_dimensionless());
        assert_eq!(Unit::parse("1 / s").unwrap().dimension(), Dimension::TIME.recip());
    }

    #[test]
    fn test_products_and_quotients_reparse() {
        let kg = Unit::parse("kg").unwrap();
        let m = Unit::parse("m").unwrap();
        let s = Unit::parse("s").unwrap();

        let per_length_time = kg.divide(&m.multiply(&s).unwrap()).unwrap();
        assert_eq!(per_length_time.name(), "kilogram / meter / second");
        assert_eq!(Unit::parse(per_length_time.name()).unwrap(), per_length_time);

        let both = Unit::dimensionless().multiply(&Unit::dimensionless()).unwrap();
        assert!(both.is_dimensionless());
        assert_eq!(both.name(), "dimensionless");

        let rate = Unit::dimensionless().divide(&s).unwrap();
        assert_eq!(rate.name(), "1 / second");
        assert_eq!(Unit::parse(rate.name()).unwrap(), rate);

        let cancelled = m.divide(&m).unwrap();
        assert!(cancelled.is_dimensionless());
        assert_eq!(cancelled.factor(), 1.0);
    }

    #[test]
    fn test_combining_units_checks_exponent_range() {
        let deep = Unit::parse("m^100").unwrap();
        assert!(matches!(deep.multiply(&deep), Err(StripError::Unit { .. })));
        let shallow = Unit::parse("m^-100").unwrap();
        assert!(matches!(shallow.divide(&deep), Err(StripError::Unit { .. })));
    }

    #[test]
    fn test_dimensionless_units() {
        assert!(Unit::parse("").unwrap().is_dimensionless());
        assert!(Unit::parse("dimensionless").unwrap().is_dimensionless());
        let ph = Unit::parse("pH").unwrap();
        assert!(ph.dimension().is_none());
        assert!(!ph.is_dimensionless());
    }

    #[test]
    fn test_unit_serde_as_string() {
        let unit = Unit::parse("ppm").unwrap();
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, "\"ppm\"");
        let back: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unit);
    }
}
