// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Non-destructive body sampling

use std::borrow::Cow;

use bytes::Bytes;
use reqwest::header::HeaderMap;

use super::classifier::is_plaintext;
use crate::http::headers::CONTENT_TYPE;
use crate::http::{Request, Response};

/// Character set declared by a `content-type` header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Charset {
    /// UTF-8, also used for US-ASCII and when nothing is declared
    #[default]
    Utf8,
    /// ISO-8859-1
    Latin1,
    /// Anything else, decoded as lossy UTF-8
    Other(String),
}

impl Charset {
    /// Charset from the `content-type` header, UTF-8 if absent
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_param)
            .map(|name| Self::from_name(&name))
            .unwrap_or_default()
    }

    /// Charset for a label such as `utf-8` or `ISO-8859-1`
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "us-ascii" | "ascii" => Charset::Utf8,
            "iso-8859-1" | "iso8859-1" | "latin1" | "l1" => Charset::Latin1,
            other => Charset::Other(other.to_string()),
        }
    }

    /// Decode `bytes` into text
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes),
            Charset::Latin1 => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            Charset::Other(name) => {
                tracing::trace!(charset = %name, "unsupported charset, decoding as UTF-8");
                String::from_utf8_lossy(bytes)
            }
        }
    }
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

/// Copy of a body taken for logging
#[derive(Debug, Clone)]
pub struct BodySample {
    bytes: Bytes,
    charset: Charset,
    complete: bool,
}

impl BodySample {
    /// Sample holding the whole body
    pub fn new(bytes: Bytes, charset: Charset) -> Self {
        Self {
            bytes,
            charset,
            complete: true,
        }
    }

    /// Sample of a body that could not be read to the end
    pub fn incomplete(bytes: Bytes) -> Self {
        Self {
            bytes,
            charset: Charset::default(),
            complete: false,
        }
    }

    /// Sampled bytes
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Number of sampled bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing was sampled
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the sample covers the entire body
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Printable as text; incomplete samples never are
    pub fn is_plaintext(&self) -> bool {
        self.complete && is_plaintext(&self.bytes)
    }

    /// Sample decoded with its charset
    pub fn text(&self) -> Cow<'_, str> {
        self.charset.decode(&self.bytes)
    }
}

/// Sample the request body, if there is one.
///
/// The body is an immutable [`Bytes`] buffer: the sample is an independent
/// handle on the same content and the request can still be sent in full.
pub fn sample_request(request: &Request) -> Option<BodySample> {
    request
        .body
        .as_ref()
        .map(|body| BodySample::new(body.clone(), Charset::from_headers(&request.headers)))
}

/// Buffer the response body and sample it.
///
/// The body stays in the response for the real consumer. A read failure is
/// remembered by the body itself and yields an incomplete sample here.
pub async fn sample_response(response: &mut Response) -> BodySample {
    let charset = Charset::from_headers(&response.headers);
    match response.body_mut().buffer().await {
        Ok(bytes) => BodySample::new(bytes.clone(), charset),
        Err(e) => {
            tracing::debug!(error = %e, url = %response.url, "response body could not be buffered");
            BodySample::incomplete(response.body().received().unwrap_or_default())
        }
    }
}
