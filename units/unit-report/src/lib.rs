//! # unit-report
//!
//! Session report scaffolding.
//!
//! On each run this unit starts a fresh JSON report file in the toolkit's
//! data directory and prints its path. Other units append findings to the
//! active report out of band; this unit only owns the scaffold. It is the
//! default essential unit, so a report exists before the operator dispatches
//! anything.

use argus_unit_core::{Unit, UnitError, UnitResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level structure of a session report file.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report format version.
    pub version: u32,

    /// When the session started.
    pub started_at: DateTime<Utc>,

    /// Toolkit version that produced the report.
    pub toolkit_version: String,

    /// Findings appended during the session.
    pub findings: Vec<Finding>,
}

/// One recorded finding.
#[derive(Debug, Serialize, Deserialize)]
pub struct Finding {
    pub unit: String,
    pub recorded_at: DateTime<Utc>,
    pub summary: String,
}

impl SessionReport {
    /// Create an empty report for a session starting now.
    pub fn new() -> Self {
        Self {
            version: 1,
            started_at: Utc::now(),
            toolkit_version: env!("CARGO_PKG_VERSION").to_string(),
            findings: Vec::new(),
        }
    }
}

impl Default for SessionReport {
    fn default() -> Self {
        Self::new()
    }
}

/// The report scaffolding unit.
pub struct ReportUnit {
    output_dir: PathBuf,
}

impl ReportUnit {
    /// Create a report unit writing to the default data directory.
    pub fn new() -> UnitResult<Self> {
        let dirs = directories::ProjectDirs::from("", "raibid-labs", "argus")
            .ok_or_else(|| UnitError::Init("cannot determine data directory".to_string()))?;
        Ok(Self {
            output_dir: dirs.data_dir().join("reports"),
        })
    }

    /// Create a report unit writing to a specific directory.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
        }
    }

    /// The directory reports are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn report_path(&self, started_at: &DateTime<Utc>) -> PathBuf {
        self.output_dir
            .join(format!("report-{}.json", started_at.format("%Y%m%d-%H%M%S")))
    }

    /// Write a fresh report scaffold and return its path.
    pub fn start_session(&self) -> UnitResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let report = SessionReport::new();
        let path = self.report_path(&report.started_at);
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| UnitError::Failed(format!("cannot serialize report: {e}")))?;
        std::fs::write(&path, json)?;

        info!("Session report started at {}", path.display());
        Ok(path)
    }
}

#[async_trait]
impl Unit for ReportUnit {
    fn name(&self) -> &str {
        "report"
    }

    async fn run(&self) -> UnitResult<()> {
        let path = self.start_session()?;
        println!("Session report: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_writes_report_scaffold() {
        let temp = TempDir::new().unwrap();
        let unit = ReportUnit::with_output_dir(temp.path());

        unit.run().await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);

        let content = std::fs::read_to_string(entries[0].path()).unwrap();
        let report: SessionReport = serde_json::from_str(&content).unwrap();
        assert_eq!(report.version, 1);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_start_session_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("deep").join("reports");
        let unit = ReportUnit::with_output_dir(&nested);

        let path = unit.start_session().unwrap();
        assert!(path.exists());
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_report_roundtrip() {
        let report = SessionReport::new();
        let json = serde_json::to_string(&report).unwrap();
        let back: SessionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, report.version);
        assert_eq!(back.toolkit_version, report.toolkit_version);
    }
}
