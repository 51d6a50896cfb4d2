// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Bordered log record layout
//!
//! Layout only: every string handed in here has already been redacted and
//! pretty-printed by the interceptor.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const TOP_LEFT_CORNER: char = '╔';
const BOTTOM_LEFT_CORNER: char = '╚';
const MIDDLE_CORNER: char = '╟';
const DOUBLE_DIVIDER: &str = "════════════════════════════════════════════════════════════════";
const SINGLE_DIVIDER: &str = "────────────────────────────────────────────────────────────────";
const SIDE_DIVIDER: &str = "║ ";

/// Which record sections are printed
///
/// Method, URL, status and duration are always printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogContent {
    /// Headers and bodies
    #[default]
    All,
    /// Headers, no bodies
    HeadersOnly,
    /// Bodies, no headers
    BodyOnly,
    /// Neither headers nor bodies
    Basic,
}

impl LogContent {
    pub fn includes_headers(self) -> bool {
        matches!(self, LogContent::All | LogContent::HeadersOnly)
    }

    pub fn includes_body(self) -> bool {
        matches!(self, LogContent::All | LogContent::BodyOnly)
    }
}

/// Sealed, ordered lines for one exchange phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    lines: Vec<String>,
}

impl LogRecord {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines joined by `\n`, without a trailing newline
    pub fn to_message(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message())
    }
}

/// Accumulates lines until sealed into a [`LogRecord`]
#[derive(Debug, Default)]
pub struct RecordBuilder {
    lines: Vec<String>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top_border(&mut self) -> &mut Self {
        self.lines
            .push(format!("{}{}{}", TOP_LEFT_CORNER, DOUBLE_DIVIDER, DOUBLE_DIVIDER));
        self
    }

    pub fn divider(&mut self) -> &mut Self {
        self.lines
            .push(format!("{}{}{}", MIDDLE_CORNER, SINGLE_DIVIDER, SINGLE_DIVIDER));
        self
    }

    pub fn bottom_border(&mut self) -> &mut Self {
        self.lines
            .push(format!("{}{}{}", BOTTOM_LEFT_CORNER, DOUBLE_DIVIDER, DOUBLE_DIVIDER));
        self
    }

    /// Add `text`, one prefixed line per `\n`-separated line
    pub fn line(&mut self, text: &str) -> &mut Self {
        for line in text.split('\n') {
            self.lines.push(format!("{}{}", SIDE_DIVIDER, line));
        }
        self
    }

    pub fn seal(self) -> LogRecord {
        LogRecord { lines: self.lines }
    }
}

/// Rendered body section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// Not printable, only the size is shown
    Binary { len: usize },
    /// Printable but zero length
    Empty,
    /// Redacted, pretty-printed text
    Text(String),
}

/// Rendered request phase
#[derive(Debug, Clone)]
pub struct RequestView {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<BodyView>,
}

/// Rendered response phase
#[derive(Debug, Clone)]
pub struct ResponseView {
    pub url: String,
    pub status: u16,
    pub reason: String,
    pub duration: Duration,
    pub headers: Vec<(String, String)>,
    pub body: Option<BodyView>,
}

impl RequestView {
    pub fn to_record(&self, content: LogContent) -> LogRecord {
        let mut record = RecordBuilder::new();
        record.top_border().line("REQUEST").divider();
        record
            .line(&format!("Method: {}", self.method))
            .line(&format!("URL: {}", self.url));

        if content.includes_headers() {
            headers_section(&mut record, &self.headers);
        }
        if content.includes_body() {
            if let Some(body) = &self.body {
                body_section(&mut record, "Request Body", body);
            }
        }

        record.bottom_border();
        record.seal()
    }
}

impl ResponseView {
    pub fn to_record(&self, content: LogContent) -> LogRecord {
        let mut record = RecordBuilder::new();
        record.top_border().line("RESPONSE").divider();
        record
            .line(&format!("URL: {}", self.url))
            .line(&format!("Status Code: {} {}", self.status, self.reason))
            .line(&format!("Duration: {}ms", format_millis(self.duration)));

        if content.includes_headers() {
            headers_section(&mut record, &self.headers);
        }
        if content.includes_body() {
            if let Some(body) = &self.body {
                body_section(&mut record, "Response Body", body);
            }
        }

        record.bottom_border();
        record.seal()
    }
}

/// Minimal block for a failed exchange
pub fn failure_record(description: &str) -> LogRecord {
    let mut record = RecordBuilder::new();
    record
        .top_border()
        .line(&format!("HTTP FAILED: {}", description))
        .bottom_border();
    record.seal()
}

fn headers_section(record: &mut RecordBuilder, headers: &[(String, String)]) {
    if headers.is_empty() {
        return;
    }
    record.divider().line("Headers:");
    for (name, value) in headers {
        record.line(&format!("  {}: {}", name, value));
    }
}

fn body_section(record: &mut RecordBuilder, title: &str, body: &BodyView) {
    record.divider();
    match body {
        BodyView::Binary { len } => {
            record.line(&format!("{}: (binary {}-byte body omitted)", title, len));
        }
        BodyView::Empty => {
            record.line(&format!("{}: (empty)", title));
        }
        BodyView::Text(text) => {
            record.line(&format!("{}:", title)).line(text);
        }
    }
}

fn format_millis(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64() * 1000.0)
}
