//! # argus-unit-core
//!
//! The capability contract between the Argus core and its units.
//!
//! A unit is an independently authored piece of functionality — a network
//! lookup, a scoring pass, a report generator — exposed through the toolkit
//! menu. The core depends on exactly two things from every unit:
//!
//! - a zero-argument entrypoint ([`Unit::run`])
//! - a human-readable description (declared in the unit's manifest)
//!
//! The core never inspects what the entrypoint does. A unit may use network
//! access, spawn its own tasks, or prompt the operator for further input;
//! the core simply awaits the call until it returns or fails.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

/// Errors a unit may surface from its entrypoint.
#[derive(Error, Debug)]
pub enum UnitError {
    /// IO error while the unit was running.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A network request made by the unit failed.
    #[error("network error: {0}")]
    Network(String),

    /// The unit could not be constructed or is missing required setup.
    #[error("initialization failed: {0}")]
    Init(String),

    /// Operator input could not be used by the unit.
    #[error("invalid input: {0}")]
    Input(String),

    /// Any other unit failure.
    #[error("{0}")]
    Failed(String),
}

/// Result type for unit operations.
pub type UnitResult<T> = std::result::Result<T, UnitError>;

/// Shared handle on the operator's line-oriented input.
///
/// Buffered readers read ahead, so two readers over the same underlying
/// stream steal lines from each other's buffers. The toolkit therefore opens
/// its input exactly once and hands clones of this handle to the dispatch
/// loop and to any unit that prompts the operator; every line comes out of
/// the one buffer, in order. Tests script whole sessions by wrapping an
/// in-memory cursor.
#[derive(Clone)]
pub struct InputSource {
    inner: Arc<Mutex<Box<dyn AsyncBufRead + Send + Unpin>>>,
}

impl InputSource {
    /// Wrap a buffered reader.
    pub fn new(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(reader))),
        }
    }

    /// The process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }

    /// Read the next line, without its trailing newline.
    ///
    /// Returns `None` once the input is exhausted.
    pub async fn next_line(&self) -> std::io::Result<Option<String>> {
        let mut reader = self.inner.lock().await;
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// The entrypoint contract every Argus unit implements.
///
/// Implementations are constructed once, when the discovery scan accepts the
/// unit, and shared behind an `Arc` for the lifetime of the registry. The
/// entrypoint takes no arguments and reports success or a [`UnitError`];
/// the toolkit decides what to do with a failure, not the unit.
#[async_trait]
pub trait Unit: Send + Sync {
    /// Short internal name, used in log lines.
    fn name(&self) -> &str;

    /// Run the unit to completion.
    ///
    /// Runs on the caller's task; nothing else in the toolkit executes until
    /// this returns.
    async fn run(&self) -> UnitResult<()>;
}
