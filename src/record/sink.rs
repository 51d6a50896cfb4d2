// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Log sinks and severities

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Severity attached to every emitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Verbose,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Verbose => "VERBOSE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VERBOSE" | "TRACE" => Ok(Severity::Verbose),
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            other => Err(Error::config(format!("unknown severity '{}'", other))),
        }
    }
}

/// Line-oriented destination for log records
///
/// `message` may span several lines; each call is one unit of output.
pub trait LogSink: Send + Sync {
    fn log(&self, severity: Severity, tag: &str, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        (**self).log(severity, tag, message)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        (**self).log(severity, tag, message)
    }
}

/// Sink forwarding records to `tracing`, the tag as a field
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        match severity {
            Severity::Verbose => tracing::trace!(tag = %tag, "\n{}", message),
            Severity::Debug => tracing::debug!(tag = %tag, "\n{}", message),
            Severity::Info => tracing::info!(tag = %tag, "\n{}", message),
            Severity::Warn => tracing::warn!(tag = %tag, "\n{}", message),
            Severity::Error => tracing::error!(tag = %tag, "\n{}", message),
        }
    }
}

/// One captured sink call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkEntry {
    pub severity: Severity,
    pub tag: String,
    pub message: String,
}

/// In-memory sink, mostly for tests and embedding
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<SinkEntry>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured call, in arrival order
    pub fn entries(&self) -> Vec<SinkEntry> {
        self.entries.lock().clone()
    }

    /// Captured messages, in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.message.clone()).collect()
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        self.entries.lock().push(SinkEntry {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parsing() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("verbose".parse::<Severity>().unwrap(), Severity::Verbose);
        assert!("loud".parse::<Severity>().is_err());
        assert_eq!(Severity::default(), Severity::Debug);
    }

    #[test]
    fn test_severity_serde() {
        let json = serde_json::to_string(&Severity::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");
        let parsed: Severity = serde_json::from_str("\"VERBOSE\"").unwrap();
        assert_eq!(parsed, Severity::Verbose);
    }

    #[test]
    fn test_memory_sink_shared_between_clones() {
        let sink = MemorySink::new();
        let shared: Arc<dyn LogSink> = Arc::new(sink.clone());
        shared.log(Severity::Info, "Tag", "line one\nline two");

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, Severity::Info);
        assert_eq!(entries[0].tag, "Tag");
        assert_eq!(entries[0].message, "line one\nline two");

        sink.clear();
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_tracing_sink_handles_every_severity() {
        for severity in [
            Severity::Verbose,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
        ] {
            TracingSink.log(severity, "LogMorph", "╔═\n║ REQUEST\n╚═");
        }
    }
}
