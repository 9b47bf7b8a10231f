//! # argus
//!
//! The Argus interactive intelligence-gathering toolkit.
//!
//! This binary is responsible for:
//! - Discovering units from the configured units directory
//! - Enforcing the unit capability contract at load time
//! - Running the essential units once at startup
//! - Driving the interactive unit menu
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                          argus                             │
//! │                                                            │
//! │  ┌──────────────┐   ┌──────────────┐   ┌───────────────┐   │
//! │  │  Discovery   │──▶│    Unit      │──▶│   Startup     │   │
//! │  │   Scanner    │   │   Registry   │   │   Sequencer   │   │
//! │  └──────────────┘   └──────┬───────┘   └───────────────┘   │
//! │                            │                               │
//! │                            ▼                               │
//! │                   ┌─────────────────┐                      │
//! │                   │  Interactive    │                      │
//! │                   │  Dispatcher     │                      │
//! │                   └─────────────────┘                      │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                   units/<id>/manifest.toml
//! ```
//!
//! ## Configuration
//!
//! The toolkit reads configuration from `$XDG_CONFIG_HOME/argus/config.toml`
//! and scans `$XDG_DATA_HOME/argus/units` unless `units_dir` overrides it.
//!
//! ## Running
//!
//! ```bash
//! # Start the toolkit
//! cargo run --bin argus
//!
//! # With debug logging
//! RUST_LOG=debug cargo run --bin argus
//! ```

use anyhow::{Context, Result};
use argus::config::Config;
use argus::{menu, startup, units};
use argus_unit_core::InputSource;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BANNER: &str = r#"
    ___    ____  ______ __  __ _____
   /   |  / __ \/ ____// / / // ___/
  / /| | / /_/ / / __ / / / / \__ \
 / ___ |/ _, _/ /_/ // /_/ / ___/ /
/_/  |_/_/ |_|\____/ \____/ /____/

 intelligence-gathering toolkit
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from config.toml
    let config = match Config::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.toolkit.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting argus v{}", env!("CARGO_PKG_VERSION"));
    println!("{BANNER}");

    // One handle over stdin for the whole session; the menu and any
    // prompting unit pull lines from the same buffer.
    let input = InputSource::stdin();

    // Static registration of built-in entrypoints
    let entries = units::builtin_entries(&input);

    // Resolve and, on first run, seed the units directory
    let units_dir = config.units_dir()?;
    units::seed_default_units(&units_dir)?;

    // One scan builds the whole registry; per-unit failures are already
    // logged by the scanner and do not stop us here.
    let report = argus_runtime::scan(&units_dir, &entries)
        .with_context(|| format!("unit discovery failed in {}", units_dir.display()))?;

    if report.registry.is_empty() {
        warn!("No units loaded; the menu will only offer quit");
    }

    // Run essential units before any interactive dispatch
    startup::run_essential(&report.registry, &config.toolkit.essential_units).await;

    // Hand the registry to the menu until the operator quits
    menu::run_menu(&report.registry, &input).await?;

    info!("Goodbye");
    Ok(())
}
