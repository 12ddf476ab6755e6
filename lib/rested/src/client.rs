//! Default HTTP transport built on hyper-util.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower_service::Service;

use crate::connector::https_connector;
use crate::middleware::{Layered, Logging, LoggingLayer};
use crate::{Error, Request, Response, Result, Transport};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Pooled HTTP/1 and HTTP/2 transport with rustls.
///
/// Cloning is cheap and clones share the connection pool. The client-level
/// timeout covers a whole exchange, from sending the request to the last byte
/// of the response body.
///
/// # Example
///
/// ```
/// use rested::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(client.timeout(), Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct HyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    timeout: Duration,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HyperClient {
    /// Client with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Bound on a whole exchange.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wrap this client in a tower layer.
    ///
    /// The result is still a [`Transport`], so it plugs into a
    /// [`RestClient`](crate::RestClient) like the bare client does.
    ///
    /// ```
    /// use rested::HyperClient;
    /// use rested::middleware::LoggingLayer;
    ///
    /// let transport = HyperClient::new().layer(LoggingLayer::debug());
    /// # let _ = transport;
    /// ```
    #[must_use]
    pub fn layer<L>(self, layer: L) -> Layered<L::Service>
    where
        L: Layer<Self>,
    {
        Layered::new(layer.layer(self))
    }

    /// Log every exchange at info level.
    #[must_use]
    pub fn with_logging(self) -> Layered<Logging<Self>> {
        self.layer(LoggingLayer::new())
    }

    /// Log every exchange at debug level, headers and body sizes included.
    #[must_use]
    pub fn with_debug_logging(self) -> Layered<Logging<Self>> {
        self.layer(LoggingLayer::debug())
    }

    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = into_hyper_request(request)?;
        tokio::time::timeout(self.timeout, self.round_trip(request))
            .await
            .map_err(|_| Error::Timeout)?
    }

    async fn round_trip(&self, request: http::Request<Full<Bytes>>) -> Result<Response<Bytes>> {
        let response = self.inner.request(request).await.map_err(classify)?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|err| Error::connection(err.to_string()))?
            .to_bytes();

        Ok(Response::new(parts.status.as_u16(), parts.headers, body))
    }
}

impl Transport for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.send(request).await
    }
}

impl Service<Request<Bytes>> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { client.send(request).await })
    }
}

fn into_hyper_request(request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body) = request.into_parts();

    let mut hyper_request = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str())
        .body(body.map_or_else(Full::default, Full::new))
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    *hyper_request.headers_mut() = headers;

    Ok(hyper_request)
}

/// Report a failed exchange as [`Error::Tls`] when a rustls error sits in the
/// source chain, [`Error::Connection`] otherwise.
#[allow(clippy::needless_pass_by_value)]
fn classify(err: hyper_util::client::legacy::Error) -> Error {
    let message = err.to_string();
    let mut source: Option<&(dyn StdError + 'static)> = Some(&err);
    while let Some(current) = source {
        if is_tls(current) {
            return Error::tls(message);
        }
        source = current.source();
    }
    Error::connection(message)
}

fn is_tls(err: &(dyn StdError + 'static)) -> bool {
    if err.is::<rustls::Error>() {
        return true;
    }
    err.downcast_ref::<std::io::Error>()
        .and_then(std::io::Error::get_ref)
        .is_some_and(|inner| inner.is::<rustls::Error>())
}

/// Builder for [`HyperClient`].
#[derive(Debug, Clone)]
pub struct HyperClientBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    pool_idle_per_host: usize,
    pool_idle_timeout: Duration,
}

impl Default for HyperClientBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }
}

impl HyperClientBuilder {
    /// Bound on a whole exchange. Defaults to 30 seconds.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bound on opening the TCP connection. Defaults to 10 seconds.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Idle connections kept per host. Defaults to 32.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = count;
        self
    }

    /// How long an idle connection stays pooled. Defaults to 90 seconds.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.pool_idle_per_host)
            .build(https_connector(self.connect_timeout));

        HyperClient {
            inner,
            timeout: self.timeout,
        }
    }
}
