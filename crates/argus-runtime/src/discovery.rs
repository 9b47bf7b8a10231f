//! Unit discovery scanning.
//!
//! A scan enumerates the subdirectories of one units directory, loads each
//! candidate's `manifest.toml`, enforces the capability contract, constructs
//! the unit through the entry table, and collects the accepted units into a
//! [`UnitRegistry`].
//!
//! Failure isolation is the defining property here: one candidate failing to
//! load never stops the scan. Each candidate produces exactly one
//! [`ScanOutcome`], logged as one status line, and the scan moves on.
//!
//! Candidates are visited in whatever order `read_dir` yields them. That
//! order is filesystem- and platform-dependent, and it is carried verbatim
//! into registry order and menu numbering; nothing sorts it.

use crate::entries::EntryTable;
use crate::error::{RuntimeError, RuntimeResult};
use crate::manifest::{ContractViolation, UnitManifest};
use crate::registry::{UnitDescriptor, UnitRegistry};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Per-candidate result of a discovery scan.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// The unit loaded and joined the registry.
    Loaded { id: String, description: String },

    /// The unit loaded but violates the capability contract; excluded.
    Skipped {
        id: String,
        violation: ContractViolation,
    },

    /// The unit failed to load; excluded.
    Failed { id: String, detail: String },
}

impl ScanOutcome {
    /// The candidate id this outcome refers to.
    pub fn id(&self) -> &str {
        match self {
            ScanOutcome::Loaded { id, .. }
            | ScanOutcome::Skipped { id, .. }
            | ScanOutcome::Failed { id, .. } => id,
        }
    }

    /// Whether the candidate was accepted into the registry.
    pub fn is_loaded(&self) -> bool {
        matches!(self, ScanOutcome::Loaded { .. })
    }
}

/// Everything one scan produced: the registry plus the status stream.
pub struct ScanReport {
    /// Accepted units, in discovery order.
    pub registry: UnitRegistry,

    /// One outcome per candidate, in discovery order.
    pub outcomes: Vec<ScanOutcome>,
}

/// Scan a units directory and build a registry from it.
///
/// Candidates are the subdirectories of `units_dir`. Plain files are
/// ignored, as are directories whose name starts with `_` — those hold
/// shared scaffolding, not units. An unreadable `units_dir` is the one
/// systemic failure: it returns `Err` and no registry at all.
pub fn scan(units_dir: &Path, entries: &EntryTable) -> RuntimeResult<ScanReport> {
    info!("Scanning for units in {}", units_dir.display());

    let dir_entries =
        std::fs::read_dir(units_dir).map_err(|source| RuntimeError::SourceUnreadable {
            path: units_dir.to_path_buf(),
            source,
        })?;

    let mut descriptors = Vec::new();
    let mut outcomes = Vec::new();

    for dir_entry in dir_entries {
        let dir_entry = match dir_entry {
            Ok(entry) => entry,
            Err(e) => {
                // The entry itself is unreadable; there is no name to report.
                error!("Failed to read an entry in {}: {}", units_dir.display(), e);
                outcomes.push(ScanOutcome::Failed {
                    id: "<unreadable entry>".to_string(),
                    detail: e.to_string(),
                });
                continue;
            }
        };

        let path = dir_entry.path();
        if !path.is_dir() {
            continue;
        }

        let file_name = dir_entry.file_name();
        let id = match file_name.to_str() {
            Some(name) => name.to_owned(),
            None => {
                // Lossy conversion could collapse two distinct names onto
                // one id; exclude the candidate instead.
                let shown = file_name.to_string_lossy().into_owned();
                error!("Failed to load unit {}: directory name is not valid UTF-8", shown);
                outcomes.push(ScanOutcome::Failed {
                    id: shown,
                    detail: "directory name is not valid UTF-8".to_string(),
                });
                continue;
            }
        };
        if id.starts_with('_') {
            debug!("Skipping non-unit entry: {}", id);
            continue;
        }

        let outcome = match load_candidate(&id, &path, entries) {
            Ok(Ok(descriptor)) => {
                info!("Loaded unit: {} - {}", id, descriptor.description);
                let loaded = ScanOutcome::Loaded {
                    id: id.clone(),
                    description: descriptor.description.clone(),
                };
                descriptors.push(descriptor);
                loaded
            }
            Ok(Err(violation)) => {
                warn!("Skipping unit {} ({})", id, violation);
                ScanOutcome::Skipped { id, violation }
            }
            Err(e) => {
                error!("Failed to load unit {}: {}", id, e);
                ScanOutcome::Failed {
                    id,
                    detail: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    let loaded = descriptors.len();
    let registry = UnitRegistry::from_descriptors(descriptors)?;
    info!("Scan complete: {} of {} candidates loaded", loaded, outcomes.len());

    Ok(ScanReport { registry, outcomes })
}

/// Load one candidate.
///
/// The outer `Err` is a load failure; the inner `Err` is a contract
/// violation in an otherwise loadable unit. Both exclude the candidate, and
/// neither stops the scan.
fn load_candidate(
    id: &str,
    path: &Path,
    entries: &EntryTable,
) -> RuntimeResult<Result<UnitDescriptor, ContractViolation>> {
    let manifest_path = path.join("manifest.toml");
    if !manifest_path.exists() {
        return Err(RuntimeError::InvalidManifest(format!(
            "{} has no manifest.toml",
            path.display()
        )));
    }

    let manifest = UnitManifest::from_file(&manifest_path)?;

    if let Some(violation) = manifest.check_contract() {
        return Ok(Err(violation));
    }

    // check_contract guarantees both fields are present.
    let entry = manifest.unit.entry.as_deref().unwrap_or_default();
    let description = manifest.unit.description.clone().unwrap_or_default();

    let factory = entries
        .resolve(entry)
        .ok_or_else(|| RuntimeError::UnknownEntry(entry.to_string()))?;
    let unit = factory()?;

    Ok(Ok(UnitDescriptor {
        id: id.to_string(),
        description,
        unit,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_unit_core::{Unit, UnitError, UnitResult};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct StubUnit;

    #[async_trait]
    impl Unit for StubUnit {
        fn name(&self) -> &str {
            "stub"
        }

        async fn run(&self) -> UnitResult<()> {
            Ok(())
        }
    }

    fn stub_factory() -> UnitResult<Arc<dyn Unit>> {
        Ok(Arc::new(StubUnit))
    }

    fn failing_factory() -> UnitResult<Arc<dyn Unit>> {
        Err(UnitError::Init("constructor exploded".to_string()))
    }

    fn test_entries() -> EntryTable {
        let mut table = EntryTable::new();
        table.register("stub", stub_factory);
        table.register("broken", failing_factory);
        table
    }

    fn write_unit(dir: &Path, id: &str, manifest: &str) {
        let unit_dir = dir.join(id);
        std::fs::create_dir_all(&unit_dir).unwrap();
        let mut file = std::fs::File::create(unit_dir.join("manifest.toml")).unwrap();
        file.write_all(manifest.as_bytes()).unwrap();
    }

    fn outcome_for<'a>(report: &'a ScanReport, id: &str) -> &'a ScanOutcome {
        report
            .outcomes
            .iter()
            .find(|o| o.id() == id)
            .unwrap_or_else(|| panic!("no outcome for {id}"))
    }

    #[test]
    fn test_scan_accepts_conforming_unit() {
        let temp = TempDir::new().unwrap();
        write_unit(
            temp.path(),
            "good",
            r#"
[unit]
description = "A good unit"
entry = "stub"
"#,
        );

        let report = scan(temp.path(), &test_entries()).unwrap();
        assert_eq!(report.registry.count(), 1);
        assert_eq!(report.registry.get("good").unwrap().description, "A good unit");
        assert!(outcome_for(&report, "good").is_loaded());
    }

    #[test]
    fn test_scan_isolates_load_failures() {
        let temp = TempDir::new().unwrap();
        write_unit(temp.path(), "valid", "[unit]\ndescription = \"ok\"\nentry = \"stub\"\n");
        write_unit(temp.path(), "garbled", "this is not toml [");
        write_unit(temp.path(), "explodes", "[unit]\ndescription = \"boom\"\nentry = \"broken\"\n");
        write_unit(temp.path(), "phantom", "[unit]\ndescription = \"x\"\nentry = \"no-such\"\n");
        // A directory with no manifest at all is still a candidate.
        std::fs::create_dir_all(temp.path().join("bare")).unwrap();

        let report = scan(temp.path(), &test_entries()).unwrap();

        assert_eq!(report.registry.count(), 1);
        assert!(report.registry.contains("valid"));
        assert_eq!(report.outcomes.len(), 5);
        for id in ["garbled", "explodes", "phantom", "bare"] {
            assert!(
                matches!(outcome_for(&report, id), ScanOutcome::Failed { .. }),
                "{id} should have failed"
            );
        }
    }

    #[test]
    fn test_scan_skips_contract_violations() {
        let temp = TempDir::new().unwrap();
        write_unit(temp.path(), "no-entry", "[unit]\ndescription = \"d\"\n");
        write_unit(temp.path(), "no-desc", "[unit]\nentry = \"stub\"\n");

        let report = scan(temp.path(), &test_entries()).unwrap();

        assert!(report.registry.is_empty());
        assert!(matches!(
            outcome_for(&report, "no-entry"),
            ScanOutcome::Skipped {
                violation: ContractViolation::MissingEntrypoint,
                ..
            }
        ));
        assert!(matches!(
            outcome_for(&report, "no-desc"),
            ScanOutcome::Skipped {
                violation: ContractViolation::MissingDescription,
                ..
            }
        ));
    }

    #[test]
    fn test_scan_ignores_files_and_underscore_entries() {
        let temp = TempDir::new().unwrap();
        write_unit(temp.path(), "real", "[unit]\ndescription = \"d\"\nentry = \"stub\"\n");
        write_unit(temp.path(), "_shared", "[unit]\ndescription = \"d\"\nentry = \"stub\"\n");
        std::fs::write(temp.path().join("README.txt"), "not a unit").unwrap();

        let report = scan(temp.path(), &test_entries()).unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.registry.count(), 1);
        assert!(report.registry.contains("real"));
    }

    #[test]
    #[cfg(unix)]
    fn test_non_utf8_directory_names_are_excluded_per_candidate() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        write_unit(temp.path(), "valid", "[unit]\ndescription = \"ok\"\nentry = \"stub\"\n");
        // Both names render lossily as "unit-\u{fffd}"; accepting them by
        // that rendering would hand the registry a duplicate id.
        std::fs::create_dir(temp.path().join(OsStr::from_bytes(b"unit-\xff"))).unwrap();
        std::fs::create_dir(temp.path().join(OsStr::from_bytes(b"unit-\xfe"))).unwrap();

        let report = scan(temp.path(), &test_entries()).unwrap();

        assert_eq!(report.registry.count(), 1);
        assert!(report.registry.contains("valid"));
        assert_eq!(report.outcomes.len(), 3);
        let excluded: Vec<_> = report
            .outcomes
            .iter()
            .filter(|o| !o.is_loaded())
            .collect();
        assert_eq!(excluded.len(), 2);
        for outcome in excluded {
            assert!(matches!(
                outcome,
                ScanOutcome::Failed { detail, .. } if detail.contains("not valid UTF-8")
            ));
        }
    }

    #[test]
    fn test_registry_order_matches_outcome_order() {
        let temp = TempDir::new().unwrap();
        for id in ["one", "two", "three", "four"] {
            write_unit(
                temp.path(),
                id,
                "[unit]\ndescription = \"d\"\nentry = \"stub\"\n",
            );
        }

        let report = scan(temp.path(), &test_entries()).unwrap();

        // Enumeration order is platform-dependent, but whatever it was, the
        // registry must preserve it.
        let loaded_ids: Vec<&str> = report
            .outcomes
            .iter()
            .filter(|o| o.is_loaded())
            .map(ScanOutcome::id)
            .collect();
        let registry_ids: Vec<&str> =
            report.registry.list().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(loaded_ids, registry_ids);
    }

    #[test]
    fn test_missing_source_location_is_systemic() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nowhere");

        let result = scan(&missing, &test_entries());
        assert!(matches!(result, Err(RuntimeError::SourceUnreadable { .. })));
    }
}
