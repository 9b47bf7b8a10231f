//! Startup sequencing.
//!
//! Before the interactive menu appears, a configured list of essential
//! units runs once, synchronously, in the configured order. The registry
//! order plays no part here; the essential list is its own sequence.
//!
//! Failure policy: a failing essential unit is reported and the sequence
//! continues with the next id, the same isolation the discovery scan
//! applies to load failures. The menu is reached even when every essential
//! unit fails; only the operator can end the session.

use argus_runtime::UnitRegistry;
use tracing::{error, info, warn};

/// Run the essential units, in the order given.
///
/// Ids absent from the registry are skipped with a warning. Returns the
/// number of units that ran successfully.
pub async fn run_essential(registry: &UnitRegistry, essential_ids: &[String]) -> usize {
    let mut succeeded = 0;

    for id in essential_ids {
        let Some(descriptor) = registry.get(id) else {
            warn!("Skipping startup unit '{}': not in registry", id);
            continue;
        };

        info!("Running startup unit: {}", id);
        match descriptor.unit.run().await {
            Ok(()) => succeeded += 1,
            Err(e) => error!("Startup unit '{}' failed: {}", id, e),
        }
    }

    info!(
        "Startup sequence complete: {} of {} essential units ran",
        succeeded,
        essential_ids.len()
    );
    succeeded
}
