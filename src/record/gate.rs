// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Emission gate: hands sealed records to a sink

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::builder::LogRecord;
use super::sink::{LogSink, Severity};

lazy_static! {
    static ref PROCESS_WIDE_LOCK: Arc<Mutex<()>> = Arc::new(Mutex::new(()));
}

/// How records reach the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionMode {
    /// One sink call per record, under a lock
    #[default]
    Serialized,
    /// One sink call per line, no lock; concurrent records may interleave
    Unsynchronized,
}

/// Delivers a [`LogRecord`] to a [`LogSink`]
///
/// A serialized gate writes the whole record in a single call while holding
/// its lock. Clones share the lock, so every interceptor built with clones
/// of one gate is mutually exclusive.
#[derive(Clone)]
pub struct EmissionGate {
    lock: Option<Arc<Mutex<()>>>,
}

impl EmissionGate {
    /// Serialized gate with a fresh lock of its own
    pub fn serialized() -> Self {
        Self {
            lock: Some(Arc::new(Mutex::new(()))),
        }
    }

    /// Serialized gate sharing one lock with every other process-wide gate
    pub fn process_wide() -> Self {
        Self {
            lock: Some(Arc::clone(&PROCESS_WIDE_LOCK)),
        }
    }

    /// Line-by-line gate without locking
    pub fn unsynchronized() -> Self {
        Self { lock: None }
    }

    /// Default gate for `mode`
    pub fn for_mode(mode: EmissionMode) -> Self {
        match mode {
            EmissionMode::Serialized => Self::process_wide(),
            EmissionMode::Unsynchronized => Self::unsynchronized(),
        }
    }

    pub fn mode(&self) -> EmissionMode {
        match self.lock {
            Some(_) => EmissionMode::Serialized,
            None => EmissionMode::Unsynchronized,
        }
    }

    /// Whether both gates serialize on the same lock
    pub fn shares_lock_with(&self, other: &EmissionGate) -> bool {
        match (&self.lock, &other.lock) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn emit(&self, record: &LogRecord, severity: Severity, tag: &str, sink: &dyn LogSink) {
        match &self.lock {
            Some(lock) => {
                let message = record.to_message();
                let _guard = lock.lock();
                sink.log(severity, tag, &message);
            }
            None => {
                for line in record.lines() {
                    sink.log(severity, tag, line);
                }
            }
        }
    }
}

impl Default for EmissionGate {
    fn default() -> Self {
        Self::process_wide()
    }
}

impl fmt::Debug for EmissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissionGate")
            .field("mode", &self.mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::builder::failure_record;
    use crate::record::sink::MemorySink;
    use std::thread;

    #[test]
    fn test_serialized_single_write() {
        let sink = MemorySink::new();
        let record = failure_record("connection refused");

        EmissionGate::serialized().emit(&record, Severity::Warn, "Gate", &sink);

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, Severity::Warn);
        assert_eq!(entries[0].message.lines().count(), 3);
        assert!(!entries[0].message.ends_with('\n'));
    }

    #[test]
    fn test_unsynchronized_writes_lines() {
        let sink = MemorySink::new();
        let record = failure_record("connection refused");

        EmissionGate::unsynchronized().emit(&record, Severity::Debug, "Gate", &sink);

        let messages = sink.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], "║ HTTP FAILED: connection refused");
    }

    #[test]
    fn test_lock_sharing() {
        let a = EmissionGate::serialized();
        let b = a.clone();
        assert!(a.shares_lock_with(&b));
        assert!(!a.shares_lock_with(&EmissionGate::serialized()));
        assert!(EmissionGate::process_wide().shares_lock_with(&EmissionGate::default()));
        assert!(!EmissionGate::unsynchronized().shares_lock_with(&EmissionGate::unsynchronized()));
        assert_eq!(EmissionGate::for_mode(EmissionMode::Unsynchronized).mode(), EmissionMode::Unsynchronized);
    }

    /// A sink that writes line by line, like a naive logger would
    struct LineSink {
        lines: Mutex<Vec<String>>,
    }

    impl LogSink for LineSink {
        fn log(&self, _severity: Severity, _tag: &str, message: &str) {
            for line in message.split('\n') {
                self.lines.lock().push(line.to_string());
                thread::yield_now();
            }
        }
    }

    #[test]
    fn test_serialized_gate_keeps_records_contiguous() {
        let sink = Arc::new(LineSink {
            lines: Mutex::new(Vec::new()),
        });
        let gate = EmissionGate::serialized();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                let gate = gate.clone();
                thread::spawn(move || {
                    for j in 0..20 {
                        let record = failure_record(&format!("worker {} call {}", i, j));
                        gate.emit(&record, Severity::Debug, "Gate", sink.as_ref());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = sink.lines.lock();
        assert_eq!(lines.len(), 8 * 20 * 3);
        for chunk in lines.chunks(3) {
            assert!(chunk[0].starts_with('╔'));
            assert!(chunk[1].starts_with("║ HTTP FAILED: worker"));
            assert!(chunk[2].starts_with('╚'));
        }
    }
}
