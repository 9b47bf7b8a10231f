//! # Unit Registry
//!
//! The ordered collection of unit descriptors accepted by one discovery
//! scan.
//!
//! Iteration order is discovery order — the order in which the scanner
//! enumerated and accepted the units — never an order derived from ids or
//! descriptions. The registry is built atomically from the scan's accepted
//! descriptors and exposes no mutation afterwards; a new scan produces a
//! whole new registry.

use crate::error::{RuntimeError, RuntimeResult};
use argus_unit_core::Unit;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable record identifying one loadable unit.
///
/// The descriptor shares the unit behind an `Arc`; it does not own or copy
/// unit state.
#[derive(Clone)]
pub struct UnitDescriptor {
    /// Unique id, derived from the unit's directory name.
    pub id: String,

    /// Menu description from the unit's manifest.
    pub description: String,

    /// The unit's entrypoint.
    pub unit: Arc<dyn Unit>,
}

impl std::fmt::Debug for UnitDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitDescriptor")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered, read-only collection of accepted unit descriptors.
pub struct UnitRegistry {
    descriptors: Vec<UnitDescriptor>,
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    /// Build a registry from descriptors in discovery order.
    ///
    /// Fails if two descriptors share an id; the scan derives ids from
    /// directory names, so a duplicate means the descriptor list was not
    /// produced by a single scan.
    pub fn from_descriptors(descriptors: Vec<UnitDescriptor>) -> RuntimeResult<Self> {
        let mut index = HashMap::with_capacity(descriptors.len());
        for (pos, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.id.clone(), pos).is_some() {
                return Err(RuntimeError::DuplicateId(descriptor.id.clone()));
            }
        }
        Ok(Self { descriptors, index })
    }

    /// Build an empty registry.
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get a descriptor by unit id.
    pub fn get(&self, id: &str) -> Option<&UnitDescriptor> {
        self.index.get(id).map(|&pos| &self.descriptors[pos])
    }

    /// All descriptors, in discovery order.
    pub fn list(&self) -> &[UnitDescriptor] {
        &self.descriptors
    }

    /// Number of registered units.
    pub fn count(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry holds no units.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Check if a unit with the given id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}
