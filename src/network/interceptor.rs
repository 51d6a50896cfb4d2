// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Logging interceptor
//!
//! Each call walks through `REQUEST_LOGGED -> DOWNSTREAM_CALLED` and ends in
//! either `RESPONSE_LOGGED` or `FAILURE_LOGGED`. The request that reaches the
//! chain and the outcome returned to the caller are exactly what they would
//! be without the interceptor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use tracing::Instrument;

use super::chain::Chain;
use super::config::{InterceptorConfig, LogMorphBuilder};
use crate::content::{
    format_json, sample_request, sample_response, BodySample, Redactor, ReplacementRules,
};
use crate::http::{Request, Response};
use crate::record::{
    failure_record, BodyView, EmissionGate, LogContent, LogRecord, LogSink, RequestView,
    ResponseView, Severity, TracingSink,
};

/// Settings shared read-only by every exchange
struct Settings {
    redactor: Redactor,
    content: LogContent,
    severity: Severity,
    tag: String,
    sink: Arc<dyn LogSink>,
    gate: EmissionGate,
    exchanges: AtomicU64,
}

/// Observes HTTP exchanges and writes a bordered record for each phase
///
/// Cheap to clone; clones share configuration.
///
/// # Example
///
/// ```rust,no_run
/// use logmorph::{HttpClient, LogContent, LogMorphInterceptor};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let interceptor = LogMorphInterceptor::builder()
///         .add_replacement("origin", "***")
///         .tag("HttpBin")
///         .content(LogContent::All)
///         .build();
///
///     let client = HttpClient::new()?.with_interceptor(interceptor);
///     let response = client.get("https://httpbin.org/get").await?;
///     println!("{}", response.status);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LogMorphInterceptor {
    settings: Arc<Settings>,
}

impl LogMorphInterceptor {
    /// Interceptor with the given rules, severity and tag; everything else
    /// takes its default
    pub fn new(replacements: ReplacementRules, severity: Severity, tag: impl Into<String>) -> Self {
        Self::builder()
            .replacements(replacements)
            .severity(severity)
            .tag(tag)
            .build()
    }

    pub fn builder() -> LogMorphBuilder {
        LogMorphBuilder::new()
    }

    /// Interceptor writing to the default sink
    pub fn from_config(config: InterceptorConfig) -> Self {
        LogMorphBuilder::from_config(config).build()
    }

    pub(crate) fn from_parts(
        config: InterceptorConfig,
        sink: Option<Arc<dyn LogSink>>,
        gate: EmissionGate,
    ) -> Self {
        let redactor = Redactor::new(
            config.replacements,
            config.redact_url_only,
            config.redaction_mode,
        );
        Self {
            settings: Arc::new(Settings {
                redactor,
                content: config.content,
                severity: config.severity,
                tag: config.tag,
                sink: sink.unwrap_or_else(|| Arc::new(TracingSink)),
                gate,
                exchanges: AtomicU64::new(0),
            }),
        }
    }

    pub fn tag(&self) -> &str {
        &self.settings.tag
    }

    pub fn severity(&self) -> Severity {
        self.settings.severity
    }

    pub fn content(&self) -> LogContent {
        self.settings.content
    }

    pub fn redactor(&self) -> &Redactor {
        &self.settings.redactor
    }

    pub fn emission_gate(&self) -> &EmissionGate {
        &self.settings.gate
    }

    /// Number of exchanges seen so far
    pub fn exchange_count(&self) -> u64 {
        self.settings.exchanges.load(Ordering::Relaxed)
    }

    /// Run `request` through `chain`, logging both sides of the exchange.
    ///
    /// The chain's error is returned as is, after a failure record has been
    /// written.
    pub async fn intercept<C>(&self, chain: &C, request: Request) -> Result<Response, C::Error>
    where
        C: Chain + ?Sized,
    {
        let id = self.settings.exchanges.fetch_add(1, Ordering::Relaxed) + 1;
        let span = tracing::debug_span!("exchange", id, method = %request.method);
        self.run_exchange(chain, request).instrument(span).await
    }

    async fn run_exchange<C>(&self, chain: &C, request: Request) -> Result<Response, C::Error>
    where
        C: Chain + ?Sized,
    {
        self.emit(&self.request_record(&request));

        let started = Instant::now();
        let mut response = match chain.proceed(request).await {
            Ok(response) => response,
            Err(error) => {
                self.emit(&failure_record(&error.to_string()));
                return Err(error);
            }
        };
        let took = started.elapsed();

        let record = self.response_record(&mut response, took).await;
        self.emit(&record);
        Ok(response)
    }

    fn request_record(&self, request: &Request) -> LogRecord {
        let content = self.settings.content;
        let view = RequestView {
            method: request.method.to_string(),
            url: self.redact_url(request.url.as_str()),
            headers: self.render_headers(content, &request.headers),
            body: if content.includes_body() {
                sample_request(request).map(|sample| self.render_body(&sample))
            } else {
                None
            },
        };
        view.to_record(content)
    }

    async fn response_record(&self, response: &mut Response, took: Duration) -> LogRecord {
        let content = self.settings.content;
        let body = if content.includes_body() {
            let sample = sample_response(response).await;
            Some(self.render_body(&sample))
        } else {
            None
        };
        let view = ResponseView {
            url: self.redact_url(response.url.as_str()),
            status: response.status.as_u16(),
            reason: response.reason().to_string(),
            duration: took,
            headers: self.render_headers(content, &response.headers),
            body,
        };
        view.to_record(content)
    }

    fn redact_url(&self, url: &str) -> String {
        self.settings.redactor.apply(url, true).into_owned()
    }

    fn render_headers(&self, content: LogContent, headers: &HeaderMap) -> Vec<(String, String)> {
        if !content.includes_headers() {
            return Vec::new();
        }
        headers
            .iter()
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes());
                let value = self.settings.redactor.apply(&value, false).into_owned();
                (name.to_string(), value)
            })
            .collect()
    }

    fn render_body(&self, sample: &BodySample) -> BodyView {
        if !sample.is_plaintext() {
            return BodyView::Binary { len: sample.len() };
        }
        if sample.is_empty() {
            return BodyView::Empty;
        }
        let text = sample.text();
        let redacted = self.settings.redactor.apply(&text, false);
        BodyView::Text(format_json(&redacted).into_owned())
    }

    fn emit(&self, record: &LogRecord) {
        let settings = &self.settings;
        settings
            .gate
            .emit(record, settings.severity, &settings.tag, settings.sink.as_ref());
    }
}

impl std::fmt::Debug for LogMorphInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogMorphInterceptor")
            .field("tag", &self.settings.tag)
            .field("severity", &self.settings.severity)
            .field("content", &self.settings.content)
            .field("redactor", &self.settings.redactor)
            .field("gate", &self.settings.gate)
            .finish()
    }
}
