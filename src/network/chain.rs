// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Downstream call contract
//!
//! The interceptor sits in front of a [`Chain`]: it hands the request over,
//! waits for the outcome, and returns that outcome untouched.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{Request, Response};

/// Whatever actually performs the HTTP call
///
/// # Example
///
/// ```rust,no_run
/// use logmorph::network::Chain;
/// use logmorph::http::{Request, Response};
/// use async_trait::async_trait;
///
/// struct Offline;
///
/// #[async_trait]
/// impl Chain for Offline {
///     type Error = std::io::Error;
///
///     async fn proceed(&self, _request: Request) -> Result<Response, Self::Error> {
///         Err(std::io::Error::new(std::io::ErrorKind::NotConnected, "offline"))
///     }
/// }
/// ```
#[async_trait]
pub trait Chain: Send + Sync {
    /// Failure raised by the downstream call, printed in failure records
    type Error: fmt::Display + Send;

    /// Perform the call
    async fn proceed(&self, request: Request) -> Result<Response, Self::Error>;
}

#[async_trait]
impl<C: Chain + ?Sized> Chain for Arc<C> {
    type Error = C::Error;

    async fn proceed(&self, request: Request) -> Result<Response, Self::Error> {
        (**self).proceed(request).await
    }
}

/// [`Chain`] backed by an async closure
pub struct FnChain<F> {
    f: F,
}

impl<F> FnChain<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut, E> Chain for FnChain<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    type Error = E;

    async fn proceed(&self, request: Request) -> Result<Response, E> {
        (self.f)(request).await
    }
}

impl<F> fmt::Debug for FnChain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnChain")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_fn_chain_passes_request_through() {
        let chain = FnChain::new(|request: Request| async move {
            Ok::<_, std::io::Error>(Response::new(
                StatusCode::OK,
                HeaderMap::new(),
                request.body.unwrap_or_default(),
                request.url,
            ))
        });

        let request = Request::post("https://example.com/echo").unwrap().body("ping");
        let response = chain.proceed(request).await.unwrap();
        assert_eq!(response.url_str(), "https://example.com/echo");
        assert_eq!(response.text().await.unwrap(), "ping");
    }

    #[tokio::test]
    async fn test_arc_chain() {
        let chain = Arc::new(FnChain::new(|_request: Request| async move {
            Err::<Response, _>("offline".to_string())
        }));
        let err = chain
            .proceed(Request::get("https://example.com").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err, "offline");
    }
}
