//! Named registries
//!
//! [`Registry`] is a generic name → item store that refuses duplicate
//! names. [`DimensionalityRegistry`] specializes it for the dimensionality
//! signatures that calibration fields refer to by name.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::constants::registry_keys;
use crate::error::{Result, StripError};
use crate::units::Dimension;

/// Generic registry storing items by unique name
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: HashMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Register an item under a unique name
    ///
    /// # Errors
    ///
    /// Returns `StripError::DuplicateKey` if the name is already taken.
    pub fn register(&mut self, name: impl Into<String>, item: T) -> Result<()> {
        let name = name.into();
        if self.items.contains_key(&name) {
            return Err(StripError::DuplicateKey { key: name });
        }
        self.items.insert(name, item);
        Ok(())
    }

    /// Retrieve an item by name
    ///
    /// # Errors
    ///
    /// Returns `StripError::UnknownKey` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&T> {
        self.items.get(name).ok_or_else(|| StripError::UnknownKey {
            key: name.to_string(),
        })
    }

    /// Remove and return an item
    pub fn unregister(&mut self, name: &str) -> Result<T> {
        self.items.remove(name).ok_or_else(|| StripError::UnknownKey {
            key: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.items.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Catalogue of dimensionality signatures keyed by name ("volume", "concentration", ...)
#[derive(Debug, Clone, Default)]
pub struct DimensionalityRegistry {
    inner: Registry<Dimension>,
}

static SHARED: Lazy<DimensionalityRegistry> = Lazy::new(DimensionalityRegistry::standard);

impl DimensionalityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the standard seed set
    pub fn standard() -> Self {
        let seeds = [
            (registry_keys::LENGTH, Dimension::LENGTH),
            (registry_keys::TIME, Dimension::TIME),
            (registry_keys::MASS, Dimension::MASS),
            (registry_keys::TEMPERATURE, Dimension::TEMPERATURE),
            (registry_keys::ANGLE, Dimension::ANGLE),
            (registry_keys::ELECTRIC_CURRENT, Dimension::CURRENT),
            (registry_keys::LUMINOUS_INTENSITY, Dimension::LUMINOSITY),
            (registry_keys::AMOUNT_OF_SUBSTANCE, Dimension::SUBSTANCE),
            (registry_keys::VOLUME, Dimension::VOLUME),
            (registry_keys::AREA, Dimension::AREA),
            (registry_keys::SPEED, Dimension::SPEED),
            (registry_keys::CONCENTRATION, Dimension::CONCENTRATION),
        ];

        debug!("Registering dimensionality units");
        let mut inner = Registry::new();
        for (key, dimension) in seeds {
            inner.items.insert(key.to_string(), dimension);
        }
        debug!(count = inner.len(), "Dimensionality units registered");

        Self { inner }
    }

    /// Read-only registry with the standard seed set, built on first use
    pub fn shared() -> &'static DimensionalityRegistry {
        &SHARED
    }

    /// Add a signature under a new key
    pub fn register(&mut self, key: impl Into<String>, signature: Dimension) -> Result<()> {
        self.inner.register(key, signature)
    }

    /// Look up a signature by key
    pub fn get(&self, key: &str) -> Result<Dimension> {
        self.inner.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.inner.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_registry() {
        let mut registry = Registry::<i32>::new();
        registry.register("answer", 42).unwrap();
        assert_eq!(*registry.get("answer").unwrap(), 42);
        assert!(registry.contains("answer"));
        assert_eq!(registry.len(), 1);

        assert!(matches!(
            registry.register("answer", 7),
            Err(StripError::DuplicateKey { key }) if key == "answer"
        ));
        assert!(matches!(
            registry.get("question"),
            Err(StripError::UnknownKey { key }) if key == "question"
        ));

        assert_eq!(registry.unregister("answer").unwrap(), 42);
        assert!(registry.is_empty());
        assert!(registry.unregister("answer").is_err());
    }

    #[test]
    fn test_standard_seed_set() {
        let registry = DimensionalityRegistry::standard();
        assert_eq!(registry.len(), 12);
        assert_eq!(
            registry.keys(),
            vec![
                "amount_of_substance",
                "angle",
                "area",
                "concentration",
                "electric_current",
                "length",
                "luminous_intensity",
                "mass",
                "speed",
                "temperature",
                "time",
                "volume",
            ]
        );
        assert_eq!(registry.get("volume").unwrap(), Dimension::VOLUME);
        assert_eq!(registry.get("concentration").unwrap(), Dimension::CONCENTRATION);
    }

    #[test]
    fn test_duplicate_and_unknown_keys() {
        let mut registry = DimensionalityRegistry::standard();
        assert!(matches!(
            registry.register("mass", Dimension::MASS),
            Err(StripError::DuplicateKey { .. })
        ));
        assert!(matches!(registry.get("flux"), Err(StripError::UnknownKey { .. })));

        registry
            .register("flow_rate", Dimension::VOLUME / Dimension::TIME)
            .unwrap();
        assert!(registry.contains("flow_rate"));
    }

    #[test]
    fn test_shared_registry_is_seeded() {
        let shared = DimensionalityRegistry::shared();
        assert!(shared.contains("concentration"));
        assert_eq!(shared.len(), DimensionalityRegistry::standard().len());
    }
}
