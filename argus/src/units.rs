//! Built-in unit registration and first-run seeding.
//!
//! The entry table maps the names unit manifests refer to onto the unit
//! implementations compiled into this binary. Adding a unit crate means
//! adding one factory and one line in [`builtin_entries`]; whether it shows
//! up in the menu is then the units directory's decision.

use anyhow::{Context, Result};
use argus_runtime::EntryTable;
use argus_unit_core::{InputSource, Unit};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The entry table of all built-in units.
///
/// Units that prompt the operator are built over `input`, the same line
/// source the dispatch loop reads from.
pub fn builtin_entries(input: &InputSource) -> EntryTable {
    let mut table = EntryTable::new();
    table.register("dummy", || {
        Ok(Arc::new(unit_dummy::DummyUnit::new()) as Arc<dyn Unit>)
    });
    let input = input.clone();
    table.register("domain", move || {
        Ok(Arc::new(unit_domain::DomainReconUnit::new(input.clone())) as Arc<dyn Unit>)
    });
    table.register("report", || {
        Ok(Arc::new(unit_report::ReportUnit::new()?) as Arc<dyn Unit>)
    });
    table
}

/// Default unit directories written on first run.
///
/// Each entry is `(directory name, manifest contents)`. The directory name
/// becomes the unit id.
const DEFAULT_UNITS: [(&str, &str); 3] = [
    (
        "dummy",
        r#"[unit]
name = "Dummy"
description = "Dummy unit for verifying the toolkit wiring"
entry = "dummy"
version = "0.1.0"
"#,
    ),
    (
        "domain-recon",
        r#"[unit]
name = "Domain Recon"
description = "DNS and host reconnaissance for a domain"
entry = "domain"
version = "0.1.0"
"#,
    ),
    (
        "report",
        r#"[unit]
name = "Session Report"
description = "Start a fresh session report file"
entry = "report"
version = "0.1.0"
"#,
    ),
];

/// Seed the units directory with the default unit manifests.
///
/// Runs only when the directory does not exist yet; an existing directory
/// is the operator's to manage and is left untouched, even if empty.
pub fn seed_default_units(units_dir: &Path) -> Result<()> {
    if units_dir.exists() {
        return Ok(());
    }

    for (id, manifest) in DEFAULT_UNITS {
        let unit_dir = units_dir.join(id);
        std::fs::create_dir_all(&unit_dir)
            .with_context(|| format!("Failed to create unit directory: {}", unit_dir.display()))?;
        std::fs::write(unit_dir.join("manifest.toml"), manifest)
            .with_context(|| format!("Failed to write manifest for unit '{id}'"))?;
    }

    info!(
        "Seeded {} default units in {}",
        DEFAULT_UNITS.len(),
        units_dir.display()
    );
    Ok(())
}
