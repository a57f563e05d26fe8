//! Fault reporting.
//!
//! Handler faults and persistence failures are recovered where they happen but
//! still end up in a durable log through a [`FaultReporter`].

use std::error::Error;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Sink for faults the engine recovers from (or cannot recover from).
pub trait FaultReporter: Send + Sync {
    /// Record a fault together with where it happened.
    fn report(&self, fault: &dyn Error, origin: &str);

    /// Record a fatal fault and end the process with a non-zero status.
    fn terminate(&self, reason: &str) -> !;
}

/// A single reported fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    /// When the fault was reported.
    pub at: DateTime<Utc>,
    /// Where the fault was raised.
    pub origin: String,
    /// The error message including its source chain.
    pub message: String,
}

impl FaultRecord {
    /// Build a record stamped with the current time.
    pub fn new(fault: &dyn Error, origin: &str) -> Self {
        Self {
            at: Utc::now(),
            origin: origin.to_string(),
            message: error_chain(fault),
        }
    }
}

impl fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.origin,
            self.message
        )
    }
}

/// Render an error and all of its sources as one line.
pub fn error_chain(fault: &dyn Error) -> String {
    let mut message = fault.to_string();
    let mut source = fault.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Reports faults as structured `tracing` events.
///
/// The binary routes `error` events into the durable log file.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FaultReporter for TracingReporter {
    fn report(&self, fault: &dyn Error, origin: &str) {
        let record = FaultRecord::new(fault, origin);
        tracing::error!(
            at = %record.at.to_rfc3339(),
            origin = %record.origin,
            error = %record.message,
            "fault reported"
        );
    }

    fn terminate(&self, reason: &str) -> ! {
        tracing::error!(at = %Utc::now().to_rfc3339(), reason, "fatal fault, terminating");
        std::process::exit(1)
    }
}

/// Keeps reported faults in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<FaultRecord>>,
}

impl MemoryReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn records(&self) -> Vec<FaultRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FaultReporter for MemoryReporter {
    fn report(&self, fault: &dyn Error, origin: &str) {
        let record = FaultRecord::new(fault, origin);
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }

    fn terminate(&self, reason: &str) -> ! {
        panic!("fatal fault: {reason}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn chain_includes_sources() {
        let err = Outer(std::io::Error::other("disk on fire"));
        assert_eq!(error_chain(&err), "outer: disk on fire");
    }

    #[test]
    fn memory_reporter_records_origin() {
        let reporter = MemoryReporter::new();
        reporter.report(&HandlerError::Failed("boom".into()), "command \"push\"");

        let records = reporter.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin, "command \"push\"");
        assert_eq!(records[0].message, "boom");
        assert!(records[0].to_string().contains("command \"push\": boom"));
    }

    #[test]
    #[should_panic(expected = "fatal fault: config unreadable")]
    fn memory_reporter_terminate_panics() {
        MemoryReporter::new().terminate("config unreadable");
    }
}
