//! # argus-runtime
//!
//! Unit discovery, registry, and load-time contract enforcement for Argus.
//!
//! This crate provides:
//! - Unit manifest parsing (`manifest.toml` per unit directory)
//! - The discovery scanner with per-candidate failure isolation
//! - The ordered, immutable-per-scan unit registry
//! - The entry table of built-in unit constructors
//!
//! ## Unit structure
//!
//! Units are directories inside one units directory:
//!
//! ```text
//! units/
//! ├── domain-recon/
//! │   └── manifest.toml
//! └── report/
//!     └── manifest.toml
//! ```
//!
//! A manifest names a built-in entrypoint (`entry`) and describes the unit
//! for the menu (`description`). Both are required; a unit missing either is
//! excluded from the scan with a warning. The implementations behind entry
//! names are registered in an [`EntryTable`] at process start.

pub mod discovery;
pub mod entries;
pub mod error;
pub mod manifest;
pub mod registry;

pub use discovery::{scan, ScanOutcome, ScanReport};
pub use entries::{EntryTable, UnitFactory};
pub use error::{RuntimeError, RuntimeResult};
pub use manifest::{ContractViolation, UnitManifest, UnitMetadata};
pub use registry::{UnitDescriptor, UnitRegistry};
