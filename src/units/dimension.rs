//! Dimensionality signatures as exponent vectors over physical base dimensions
//!
//! A [`Dimension`] records how many times each base dimension appears in a
//! unit: `[mass] / [length] ** 3` is mass^1 · length^-3. Multiplying units
//! adds exponents, dividing subtracts them.

use std::fmt;
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Physical base dimensions, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Substance,
    Luminosity,
    Angle,
}

impl BaseDimension {
    /// Every base dimension, indexed like the exponent vector
    pub const ALL: [BaseDimension; 8] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Substance,
        BaseDimension::Luminosity,
        BaseDimension::Angle,
    ];

    /// Bracketed symbol used when displaying a signature
    pub fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "[length]",
            BaseDimension::Mass => "[mass]",
            BaseDimension::Time => "[time]",
            BaseDimension::Current => "[current]",
            BaseDimension::Temperature => "[temperature]",
            BaseDimension::Substance => "[substance]",
            BaseDimension::Luminosity => "[luminosity]",
            BaseDimension::Angle => "[angle]",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Dimensionality signature of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    exponents: [i8; 8],
}

impl Dimension {
    /// Signature of a pure number
    pub const NONE: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 0, 0]);

    pub const LENGTH: Dimension = Dimension::new([1, 0, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Dimension = Dimension::new([0, 1, 0, 0, 0, 0, 0, 0]);
    pub const TIME: Dimension = Dimension::new([0, 0, 1, 0, 0, 0, 0, 0]);
    pub const CURRENT: Dimension = Dimension::new([0, 0, 0, 1, 0, 0, 0, 0]);
    pub const TEMPERATURE: Dimension = Dimension::new([0, 0, 0, 0, 1, 0, 0, 0]);
    pub const SUBSTANCE: Dimension = Dimension::new([0, 0, 0, 0, 0, 1, 0, 0]);
    pub const LUMINOSITY: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 1, 0]);
    pub const ANGLE: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 0, 1]);

    pub const AREA: Dimension = Dimension::new([2, 0, 0, 0, 0, 0, 0, 0]);
    pub const VOLUME: Dimension = Dimension::new([3, 0, 0, 0, 0, 0, 0, 0]);
    pub const SPEED: Dimension = Dimension::new([1, 0, -1, 0, 0, 0, 0, 0]);
    /// Mass per volume; ppm in water is treated as mg/L
    pub const CONCENTRATION: Dimension = Dimension::new([-3, 1, 0, 0, 0, 0, 0, 0]);

    /// Build a signature from raw exponents in [`BaseDimension::ALL`] order
    pub const fn new(exponents: [i8; 8]) -> Self {
        Self { exponents }
    }

    /// Exponent of one base dimension
    pub fn exponent(&self, base: BaseDimension) -> i8 {
        self.exponents[base.index()]
    }

    /// True for the signature of a pure number
    pub fn is_none(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Raise every exponent to an integer power
    ///
    /// # Panics
    ///
    /// Panics if an exponent leaves the `i8` range. Use
    /// [`Dimension::checked_powi`] for signatures built from user input.
    pub fn powi(self, power: i8) -> Self {
        self.checked_powi(power).expect("dimension exponent overflow")
    }

    /// Raise every exponent to an integer power, `None` on overflow
    pub fn checked_powi(self, power: i8) -> Option<Self> {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = e.checked_mul(power)?;
        }
        Some(Self { exponents })
    }

    /// Product of two signatures, `None` on overflow
    pub fn checked_mul(self, rhs: Dimension) -> Option<Self> {
        let mut exponents = self.exponents;
        for (e, r) in exponents.iter_mut().zip(rhs.exponents) {
            *e = e.checked_add(r)?;
        }
        Some(Self { exponents })
    }

    /// Quotient of two signatures, `None` on overflow
    pub fn checked_div(self, rhs: Dimension) -> Option<Self> {
        let mut exponents = self.exponents;
        for (e, r) in exponents.iter_mut().zip(rhs.exponents) {
            *e = e.checked_sub(r)?;
        }
        Some(Self { exponents })
    }

    /// Multiplicative inverse (negated exponents)
    pub fn recip(self) -> Self {
        self.powi(-1)
    }

    /// Base dimensions whose exponent satisfies `keep`, with its magnitude
    fn powers_where(&self, keep: impl Fn(i8) -> bool) -> Vec<(BaseDimension, u8)> {
        BaseDimension::ALL
            .iter()
            .map(|&b| (b, self.exponent(b)))
            .filter(|&(_, e)| keep(e))
            .map(|(b, e)| (b, e.unsigned_abs()))
            .collect()
    }
}

/// # Panics
///
/// Panics if an exponent leaves the `i8` range.
impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        self.checked_mul(rhs).expect("dimension exponent overflow")
    }
}

/// # Panics
///
/// Panics if an exponent leaves the `i8` range.
impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        self.checked_div(rhs).expect("dimension exponent overflow")
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, base: BaseDimension, exponent: u8) -> fmt::Result {
    if exponent == 1 {
        write!(f, "{}", base.symbol())
    } else {
        write!(f, "{} ** {}", base.symbol(), exponent)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "dimensionless");
        }

        let numerator = self.powers_where(|e| e > 0);
        let denominator = self.powers_where(|e| e < 0);

        if numerator.is_empty() {
            write!(f, "1")?;
        }
        for (i, &(base, exponent)) in numerator.iter().enumerate() {
            if i > 0 {
                write!(f, " * ")?;
            }
            write_term(f, base, exponent)?;
        }
        for &(base, exponent) in &denominator {
            write!(f, " / ")?;
            write_term(f, base, exponent)?;
        }
        Ok(())
    }
}
