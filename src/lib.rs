// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # LogMorph - HTTP traffic logging for clients
//!
//! An interceptor that sits between your code and the HTTP transport and
//! prints a bordered record for every request, response and failure,
//! without changing what is sent or what comes back.
//!
//! ## Features
//!
//! - Request and response records with method, URL, status and timing
//! - Headers and bodies on demand (`ALL`, `HEADERS_ONLY`, `BODY_ONLY`, `BASIC`)
//! - JSON bodies pretty-printed with four-space indentation
//! - Binary bodies detected and summarised by size
//! - Ordered literal replacements, annotated (`secret [token]`) or replaced
//! - Optional URL-only replacement scope
//! - Records from concurrent calls never interleave
//!
//! ## Example
//!
//! ```rust,no_run
//! use logmorph::{HttpClient, LogContent, LogMorphInterceptor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let interceptor = LogMorphInterceptor::builder()
//!         .add_replacement("origin", "***")
//!         .tag("HttpBin_ALL")
//!         .content(LogContent::All)
//!         .build();
//!
//!     let client = HttpClient::new()?.with_interceptor(interceptor);
//!     let response = client.get("https://httpbin.org/get").await?;
//!     println!("{}", response.text().await?);
//!
//!     Ok(())
//! }
//! ```

pub mod content;
pub mod error;
pub mod http;
pub mod network;
pub mod record;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{Body, HttpClient, HttpClientConfig, Request, RequestBuilder, Response};

// Content rendering
pub use content::{format_json, is_plaintext, RedactionMode, Redactor, ReplacementRules};

// Records
pub use record::{
    EmissionGate, EmissionMode, LogContent, LogRecord, LogSink, MemorySink, Severity,
    TracingSink,
};

// Interception
pub use network::{Chain, FnChain, InterceptorConfig, LogMorphBuilder, LogMorphInterceptor};

/// LogMorph version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
