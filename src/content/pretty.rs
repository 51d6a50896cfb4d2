// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON pretty-printing

use std::borrow::Cow;

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

const INDENT: &[u8] = b"    ";

/// Re-indent JSON-looking text with four spaces.
///
/// Text whose trimmed form starts with `{` is parsed as an object, `[` as an
/// array. Anything else, and anything that fails to parse, comes back
/// exactly as given.
pub fn format_json(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim();

    let parsed = if trimmed.starts_with('{') {
        serde_json::from_str::<Map<String, Value>>(trimmed).map(Value::Object)
    } else if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<Value>>(trimmed).map(Value::Array)
    } else {
        return Cow::Borrowed(text);
    };

    match parsed.and_then(|value| to_indented_string(&value)) {
        Ok(pretty) => Cow::Owned(pretty),
        Err(e) => {
            tracing::trace!(error = %e, "body looks like JSON but did not parse");
            Cow::Borrowed(text)
        }
    }
}

fn to_indented_string(value: &Value) -> serde_json::Result<String> {
    let mut out = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    String::from_utf8(out).map_err(serde_json::Error::custom)
}
