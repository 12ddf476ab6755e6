//! Transport port.
//!
//! The pipeline never talks to the network itself. It hands a fully encoded
//! [`Request`] to a [`Transport`] and gets back a buffered [`Response`].
//! `rested` ships a hyper-based implementation; implement the trait yourself
//! for custom stacks or for tests.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Performs the network exchange for one request.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use http::HeaderMap;
/// use rested_core::{Request, Response, Result, Transport};
///
/// /// Answers every request with `204 No Content`.
/// struct NoContent;
///
/// impl Transport for NoContent {
///     async fn execute(&self, _request: Request<Bytes>) -> Result<Response<Bytes>> {
///         Ok(Response::new(204, HeaderMap::new(), Bytes::new()))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and return the buffered response.
    ///
    /// Any HTTP status is a successful exchange; status classification is
    /// the caller's business.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange itself fails:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
