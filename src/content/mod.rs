// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Body inspection and text rendering
//!
//! Everything that turns raw exchange content into display text: sampling
//! bodies without consuming them, deciding whether bytes are printable,
//! pretty-printing JSON and applying replacement rules.

mod classifier;
mod pretty;
mod redact;
mod sampler;

pub use classifier::is_plaintext;
pub use pretty::format_json;
pub use redact::{RedactionMode, Redactor, ReplacementRules};
pub use sampler::{sample_request, sample_response, BodySample, Charset};
