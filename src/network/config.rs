// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor configuration and builder

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::interceptor::LogMorphInterceptor;
use crate::content::{RedactionMode, ReplacementRules};
use crate::error::Result;
use crate::record::{EmissionGate, EmissionMode, LogContent, LogSink, Severity};

/// Default tag for emitted records
pub const DEFAULT_TAG: &str = "LogMorph";

/// Interceptor configuration
///
/// Plain data, loadable from JSON. Sink and emission gate are runtime
/// objects and are chosen on [`LogMorphBuilder`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Literal replacements applied to rendered text, in order
    pub replacements: ReplacementRules,
    /// Severity of every record
    pub severity: Severity,
    /// Tag of every record
    pub tag: String,
    /// Sections included in records
    pub content: LogContent,
    /// Apply replacements to URLs only
    pub redact_url_only: bool,
    /// How matched secrets are rendered
    pub redaction_mode: RedactionMode,
    /// How records reach the sink
    pub emission: EmissionMode,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            replacements: ReplacementRules::new(),
            severity: Severity::Debug,
            tag: DEFAULT_TAG.to_string(),
            content: LogContent::All,
            redact_url_only: false,
            redaction_mode: RedactionMode::Annotate,
            emission: EmissionMode::Serialized,
        }
    }
}

impl InterceptorConfig {
    /// Create a new interceptor config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Add a replacement rule
    pub fn replacement(mut self, secret: impl Into<String>, token: impl Into<String>) -> Self {
        self.replacements.insert(secret, token);
        self
    }

    /// Set severity
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Set tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set content visibility
    pub fn content(mut self, content: LogContent) -> Self {
        self.content = content;
        self
    }

    /// Restrict replacements to URLs
    pub fn redact_url_only(mut self, url_only: bool) -> Self {
        self.redact_url_only = url_only;
        self
    }

    /// Set redaction rendering
    pub fn redaction_mode(mut self, mode: RedactionMode) -> Self {
        self.redaction_mode = mode;
        self
    }

    /// Set emission mode
    pub fn emission(mut self, emission: EmissionMode) -> Self {
        self.emission = emission;
        self
    }

    /// Config for quick request tracing: method, URL, status and timing only
    pub fn for_basic_tracing() -> Self {
        Self {
            content: LogContent::Basic,
            severity: Severity::Info,
            ..Default::default()
        }
    }

    /// Config matching the first releases: secrets replaced outright and
    /// records written line by line
    pub fn legacy() -> Self {
        Self {
            redaction_mode: RedactionMode::Replace,
            emission: EmissionMode::Unsynchronized,
            ..Default::default()
        }
    }
}

/// Collects settings, then freezes them into a [`LogMorphInterceptor`]
#[derive(Default)]
pub struct LogMorphBuilder {
    config: InterceptorConfig,
    sink: Option<Arc<dyn LogSink>>,
    gate: Option<EmissionGate>,
}

impl LogMorphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config
    pub fn from_config(config: InterceptorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn add_replacement(mut self, secret: impl Into<String>, token: impl Into<String>) -> Self {
        self.config.replacements.insert(secret, token);
        self
    }

    pub fn replacements(mut self, replacements: ReplacementRules) -> Self {
        self.config.replacements = replacements;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.config.tag = tag.into();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.config.severity = severity;
        self
    }

    pub fn content(mut self, content: LogContent) -> Self {
        self.config.content = content;
        self
    }

    pub fn redact_url_only(mut self, url_only: bool) -> Self {
        self.config.redact_url_only = url_only;
        self
    }

    pub fn redaction_mode(mut self, mode: RedactionMode) -> Self {
        self.config.redaction_mode = mode;
        self
    }

    /// Destination of records; defaults to [`TracingSink`](crate::record::TracingSink)
    pub fn sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Gate used to emit records; overrides the configured [`EmissionMode`]
    pub fn emission_gate(mut self, gate: EmissionGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Config accumulated so far
    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    pub fn build(self) -> LogMorphInterceptor {
        let gate = self
            .gate
            .unwrap_or_else(|| EmissionGate::for_mode(self.config.emission));
        LogMorphInterceptor::from_parts(self.config, self.sink, gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = InterceptorConfig::default();
        assert!(config.replacements.is_empty());
        assert_eq!(config.severity, Severity::Debug);
        assert_eq!(config.tag, "LogMorph");
        assert_eq!(config.content, LogContent::All);
        assert!(!config.redact_url_only);
        assert_eq!(config.redaction_mode, RedactionMode::Annotate);
        assert_eq!(config.emission, EmissionMode::Serialized);
    }

    #[test]
    fn test_chainable_setters() {
        let config = InterceptorConfig::new()
            .replacement("origin", "***")
            .tag("HttpBin")
            .content(LogContent::HeadersOnly)
            .redact_url_only(true);

        assert_eq!(config.replacements.get("origin"), Some("***"));
        assert_eq!(config.tag, "HttpBin");
        assert_eq!(config.content, LogContent::HeadersOnly);
        assert!(config.redact_url_only);
    }

    #[test]
    fn test_presets() {
        assert_eq!(InterceptorConfig::for_basic_tracing().content, LogContent::Basic);
        let legacy = InterceptorConfig::legacy();
        assert_eq!(legacy.redaction_mode, RedactionMode::Replace);
        assert_eq!(legacy.emission, EmissionMode::Unsynchronized);
    }

    #[test]
    fn test_partial_json() {
        let config = InterceptorConfig::from_json_str(
            r#"{
                "replacements": {"origin": "***", "token": "<redacted>"},
                "severity": "INFO",
                "content": "BODY_ONLY",
                "redaction_mode": "replace"
            }"#,
        )
        .unwrap();

        let secrets: Vec<_> = config.replacements.iter().map(|(s, _)| s).collect();
        assert_eq!(secrets, vec!["origin", "token"]);
        assert_eq!(config.severity, Severity::Info);
        assert_eq!(config.content, LogContent::BodyOnly);
        assert_eq!(config.redaction_mode, RedactionMode::Replace);
        assert_eq!(config.tag, DEFAULT_TAG);
    }

    #[test]
    fn test_malformed_json() {
        assert!(InterceptorConfig::from_json_str("{\"severity\": \"LOUD\"}").is_err());
        assert!(InterceptorConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tag": "FromFile", "redact_url_only": true}}"#).unwrap();

        let config = InterceptorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tag, "FromFile");
        assert!(config.redact_url_only);
    }

    #[test]
    fn test_config_round_trip() {
        let config = InterceptorConfig::legacy().replacement("b", "1").replacement("a", "2");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(InterceptorConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_builder_accumulates() {
        let builder = LogMorphBuilder::new()
            .add_replacement("origin", "***")
            .add_replacement("origin", "###")
            .tag("Builder")
            .severity(Severity::Warn)
            .content(LogContent::BodyOnly);

        let config = builder.config();
        assert_eq!(config.replacements.len(), 1);
        assert_eq!(config.replacements.get("origin"), Some("###"));
        assert_eq!(config.severity, Severity::Warn);

        let interceptor = builder.build();
        assert_eq!(interceptor.tag(), "Builder");
        assert_eq!(interceptor.content(), LogContent::BodyOnly);
    }
}
