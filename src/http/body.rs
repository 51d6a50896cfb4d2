// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response body that can be buffered in place

use std::fmt;
use std::io;

use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, Stream, StreamExt};

/// Chunked body source handed over by a transport
pub type BodyStream = BoxStream<'static, io::Result<Bytes>>;

/// HTTP response body
///
/// Starts out either fully buffered or as a stream of chunks. Calling
/// [`Body::buffer`] drains the stream into memory once; afterwards every
/// reader sees the same bytes. A stream that fails midway keeps the bytes
/// received so far together with the failure, so the final consumer still
/// observes the error.
pub struct Body {
    inner: Inner,
}

enum Inner {
    Buffered(Bytes),
    Streaming(BodyStream),
    Failed {
        received: Bytes,
        kind: io::ErrorKind,
        message: String,
    },
}

impl Body {
    /// Empty body
    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    /// Body backed by an in-memory buffer
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            inner: Inner::Buffered(bytes.into()),
        }
    }

    /// Body backed by a chunk stream
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            inner: Inner::Streaming(stream.boxed()),
        }
    }

    /// Whether the whole body is already in memory
    pub fn is_buffered(&self) -> bool {
        matches!(self.inner, Inner::Buffered(_))
    }

    /// Buffered bytes, if the body has been buffered successfully
    pub fn buffered(&self) -> Option<Bytes> {
        match &self.inner {
            Inner::Buffered(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// Bytes received before the stream failed
    pub fn received(&self) -> Option<Bytes> {
        match &self.inner {
            Inner::Failed { received, .. } => Some(received.clone()),
            _ => None,
        }
    }

    /// Drain the underlying stream into memory
    ///
    /// Idempotent: a buffered body returns its bytes immediately and a
    /// failed body reports the same failure again.
    pub async fn buffer(&mut self) -> io::Result<&Bytes> {
        let inner = std::mem::replace(&mut self.inner, Inner::Buffered(Bytes::new()));
        self.inner = match inner {
            Inner::Streaming(mut stream) => {
                let mut buf = BytesMut::new();
                let mut failure = None;
                while let Some(chunk) = stream.next().await {
                    match chunk {
                        Ok(chunk) => buf.extend_from_slice(&chunk),
                        Err(e) => {
                            failure = Some(e);
                            break;
                        }
                    }
                }
                match failure {
                    None => Inner::Buffered(buf.freeze()),
                    Some(e) => Inner::Failed {
                        received: buf.freeze(),
                        kind: e.kind(),
                        message: e.to_string(),
                    },
                }
            }
            done => done,
        };

        match &self.inner {
            Inner::Buffered(bytes) => Ok(bytes),
            Inner::Failed { kind, message, .. } => Err(io::Error::new(*kind, message.clone())),
            Inner::Streaming(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                "body stream was not drained",
            )),
        }
    }

    /// Consume the body, buffering it first if needed
    pub async fn into_bytes(mut self) -> io::Result<Bytes> {
        self.buffer().await.map(Bytes::clone)
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Buffered(bytes) => f.debug_tuple("Body::Buffered").field(&bytes.len()).finish(),
            Inner::Streaming(_) => f.write_str("Body::Streaming"),
            Inner::Failed {
                received, message, ..
            } => f
                .debug_struct("Body::Failed")
                .field("received", &received.len())
                .field("message", message)
                .finish(),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from_bytes(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_buffer_stream() {
        let chunks = vec![Ok(Bytes::from("hello ")), Ok(Bytes::from("world"))];
        let mut body = Body::from_stream(stream::iter(chunks));
        assert!(!body.is_buffered());

        assert_eq!(body.buffer().await.unwrap().as_ref(), b"hello world");
        assert!(body.is_buffered());
        assert_eq!(body.buffered().unwrap(), Bytes::from("hello world"));

        // Buffering twice is harmless and the consumer still gets everything
        body.buffer().await.unwrap();
        assert_eq!(body.into_bytes().await.unwrap(), Bytes::from("hello world"));
    }

    #[tokio::test]
    async fn test_failed_stream_keeps_error() {
        let chunks = vec![
            Ok(Bytes::from("partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")),
            Ok(Bytes::from("never read")),
        ];
        let mut body = Body::from_stream(stream::iter(chunks));

        let err = body.buffer().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(body.received().unwrap(), Bytes::from("partial"));
        assert!(body.buffered().is_none());

        let err = body.into_bytes().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(err.to_string().contains("reset by peer"));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Body::from("abc").buffered().unwrap().len(), 3);
        assert_eq!(Body::from(vec![1u8, 2]).buffered().unwrap().len(), 2);
        assert!(Body::default().buffered().unwrap().is_empty());
    }

    #[test]
    fn test_buffered_body_needs_no_runtime_io() {
        let mut body = Body::from("ready");
        let bytes = tokio_test::block_on(body.buffer()).unwrap().clone();
        assert_eq!(bytes, Bytes::from("ready"));
        assert_eq!(tokio_test::block_on(body.into_bytes()).unwrap(), bytes);
    }
}
