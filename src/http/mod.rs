// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for LogMorph
//!
//! Request/response model shared by the interceptor and its downstream
//! transport, plus a reqwest-backed client that can route every call
//! through a [`LogMorphInterceptor`](crate::network::LogMorphInterceptor).

mod body;
mod client;
mod request;
mod response;

pub use body::{Body, BodyStream};
pub use client::{HttpClient, HttpClientConfig};
pub use request::{Request, RequestBuilder};
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("logmorph/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
}
