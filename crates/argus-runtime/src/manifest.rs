//! Unit manifest parsing.
//!
//! Each unit directory carries a `manifest.toml` describing the unit to the
//! discovery scanner:
//!
//! ```toml
//! [unit]
//! name = "Domain Recon"
//! description = "DNS and host reconnaissance"
//! entry = "domain"
//! version = "0.1.0"
//! ```
//!
//! `description` and `entry` are required by the capability contract, but
//! their absence is not a parse error — the scanner records it as a contract
//! violation so one malformed unit cannot abort discovery.

use crate::error::RuntimeResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unit manifest structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitManifest {
    /// Unit metadata.
    pub unit: UnitMetadata,
}

/// Unit metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitMetadata {
    /// Human-readable display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Menu description, supplied by the unit author.
    ///
    /// Required by the contract. An empty string is tolerated (it renders
    /// poorly but does not exclude the unit).
    #[serde(default)]
    pub description: Option<String>,

    /// Name of the built-in entrypoint this unit runs.
    ///
    /// Required by the contract; must resolve in the process entry table.
    #[serde(default)]
    pub entry: Option<String>,

    /// Version string (semver).
    #[serde(default)]
    pub version: Option<String>,
}

/// A capability-contract violation found in an otherwise loadable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// The manifest declares no `entry` to run.
    MissingEntrypoint,
    /// The manifest declares no `description`.
    MissingDescription,
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractViolation::MissingEntrypoint => write!(f, "missing 'entry'"),
            ContractViolation::MissingDescription => write!(f, "missing 'description'"),
        }
    }
}

impl UnitManifest {
    /// Load a manifest from a TOML file.
    pub fn from_file(path: &Path) -> RuntimeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_str(content: &str) -> RuntimeResult<Self> {
        let manifest: UnitManifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Check the capability contract.
    ///
    /// Returns the first violation found, entrypoint before description.
    pub fn check_contract(&self) -> Option<ContractViolation> {
        if self.unit.entry.is_none() {
            return Some(ContractViolation::MissingEntrypoint);
        }
        if self.unit.description.is_none() {
            return Some(ContractViolation::MissingDescription);
        }
        None
    }
}
