//! Physical quantities with dimensionality checking
//!
//! This module provides a minimal unit system: dimension exponent vectors,
//! a catalogue of named units, quantities, a named registry of
//! dimensionality signatures and field-level validation rules.

pub mod dimension;
pub mod field;
pub mod quantity;
pub mod registry;
pub mod unit;

pub use dimension::{BaseDimension, Dimension};
pub use field::{FieldConfig, FieldSpec};
pub use quantity::{validate_quantity, Quantity};
pub use registry::{DimensionalityRegistry, Registry};
pub use unit::Unit;
