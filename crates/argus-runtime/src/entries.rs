//! Static registration of built-in unit entrypoints.
//!
//! Unit directories name their entrypoint; the actual implementations are
//! Rust types registered here at process start. A manifest whose `entry`
//! does not resolve in the table fails to load — the same failure class as
//! a unit with a missing external dependency.

use argus_unit_core::{Unit, UnitResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Constructor for a built-in unit implementation.
///
/// Factories are closures, so registration can capture shared handles — the
/// operator input source, a client, a data directory — and thread them into
/// the units it constructs. Construction may fail, e.g. when the unit
/// requires credentials or local state that is absent. Such a failure
/// excludes the unit from the registry without affecting the rest of the
/// scan.
pub type UnitFactory = Box<dyn Fn() -> UnitResult<Arc<dyn Unit>> + Send + Sync>;

/// Table of built-in entrypoints, keyed by the name manifests refer to.
#[derive(Default)]
pub struct EntryTable {
    entries: HashMap<String, UnitFactory>,
}

impl EntryTable {
    /// Create an empty entry table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a factory under an entry name.
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> UnitResult<Arc<dyn Unit>> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Box::new(factory));
    }

    /// Look up a factory by entry name.
    pub fn resolve(&self, name: &str) -> Option<&UnitFactory> {
        self.entries.get(name)
    }

    /// Check whether an entry name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
