//! Error types for the Argus unit runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the unit runtime.
///
/// Note the split between scan-level and candidate-level failures: a
/// candidate that fails to load is recorded in its scan outcome and never
/// surfaces as a `RuntimeError`. These variants cover the systemic cases —
/// an unreadable source location, a duplicate id slipping into a registry
/// build, or an explicit single-unit load requested by a caller.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The unit source location itself could not be enumerated.
    #[error("cannot read units directory {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A registry build saw the same unit id twice.
    #[error("duplicate unit id: {0}")]
    DuplicateId(String),

    /// A unit manifest could not be read or parsed.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// No built-in entry is registered under the requested name.
    #[error("unknown entry: {0}")]
    UnknownEntry(String),

    /// The unit's constructor failed.
    #[error("unit initialization failed: {0}")]
    InitFailed(#[from] argus_unit_core::UnitError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
