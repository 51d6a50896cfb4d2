// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Log records and their delivery
//!
//! Records are laid out by the builder, sealed, and then written by an
//! [`EmissionGate`] to a [`LogSink`] as one unit.

mod builder;
mod gate;
mod sink;

pub use builder::{
    failure_record, BodyView, LogContent, LogRecord, RecordBuilder, RequestView, ResponseView,
};
pub use gate::{EmissionGate, EmissionMode};
pub use sink::{LogSink, MemorySink, Severity, SinkEntry, TracingSink};
