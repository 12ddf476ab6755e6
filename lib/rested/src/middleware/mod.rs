//! Tower middleware for the default transport.
//!
//! [`HyperClient`](crate::HyperClient) is a tower [`Service`]. Wrap it in any
//! layer whose service speaks [`Request`]/[`Response`] and hand the result to
//! [`Layered`] to get a [`Transport`] back.
//!
//! # Example
//!
//! ```
//! use rested::HyperClient;
//! use rested::middleware::{Layered, LoggingLayer, ServiceBuilder};
//!
//! let service = ServiceBuilder::new()
//!     .layer(LoggingLayer::debug())
//!     .service(HyperClient::new());
//! let transport = Layered::new(service);
//! # let _ = transport;
//! ```

mod logging;

use bytes::Bytes;
use tower::ServiceExt;
use tower_service::Service;

use crate::{Error, Request, Response, Result, Transport};

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};

/// A tower service used as a [`Transport`].
///
/// Each exchange runs on a clone of the service, so a shared `Layered` never
/// needs a lock.
#[derive(Debug, Clone)]
pub struct Layered<S> {
    service: S,
}

impl<S> Layered<S> {
    /// Use `service` as a transport.
    pub const fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S> Transport for Layered<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
        + Clone
        + Send
        + Sync,
    S::Future: Send,
{
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.service.clone().oneshot(request).await
    }
}
