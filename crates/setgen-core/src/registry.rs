//! # Emission Registries
//!
//! A [`Registry`] counts how many times a base name has been emitted.
//! The struct compiler keys it by field Name to decide whether a nested
//! type was already defined; the metadata compiler keys it by StructName
//! to derive a disambiguating suffix for each table occurrence.
//!
//! The two are never shared. [`Registries`] bundles one of each and is
//! allocated fresh per compile unit, so repeated compiles and multi-root
//! runs cannot leak numbering into one another.

use std::collections::BTreeMap;

/// Base name → number of emissions so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    counts: BTreeMap<String, usize>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has been emitted at least once.
    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Record one emission under `key`, returning the number of earlier
    /// emissions (0 for the first).
    pub fn bump(&mut self, key: &str) -> usize {
        let count = self.counts.entry(key.to_string()).or_insert(0);
        let previous = *count;
        *count += 1;
        previous
    }

    /// Number of emissions recorded under `key`.
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

/// The registry pair owned by one compile unit.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    /// Struct compiler registry, keyed by field Name.
    pub structs: Registry,
    /// Metadata compiler registry, keyed by StructName.
    pub tables: Registry,
}

impl Registries {
    /// A fresh, empty pair.
    pub fn new() -> Self {
        Self::default()
    }
}
