//! # unit-dummy
//!
//! A dummy unit implementation for testing and development.
//!
//! This unit performs no real intelligence gathering. It prints a couple of
//! fixture lines and records every invocation, which makes it useful for
//! verifying the discovery/dispatch wiring end to end: the menu can show it,
//! the dispatcher can run it, and tests can count exactly how often it ran.

use argus_unit_core::{Unit, UnitResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A unit that does nothing but prove it was invoked.
pub struct DummyUnit {
    invocations: Arc<AtomicUsize>,
}

impl DummyUnit {
    /// Create a new dummy unit instance.
    pub fn new() -> Self {
        Self {
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times this instance has been run.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Handle to the invocation counter, for instrumented tests that hand
    /// the unit itself off to a registry.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.invocations)
    }
}

impl Default for DummyUnit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Unit for DummyUnit {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn run(&self) -> UnitResult<()> {
        let n = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        println!("Dummy unit: the toolkit wiring works. (invocation #{n})");
        Ok(())
    }
}
