//! Resource-oriented client combining a transport with codec façades.
//!
//! [`RestClient`] owns the three collaborators a call needs: the
//! [`Transport`], the [`Encoder`] and the [`Decoder`]. It is cheap to clone
//! when the transport is, and every call is independent of the others.

use std::sync::Arc;

use rested_core::{
    ContentType, DecodeRegistry, Decoder, EncodeRegistry, Encoder, Method, RequestOptions, Result,
    Transport, exchange, execute,
};
use serde::de::DeserializeOwned;

use crate::HyperClient;

/// Typed REST client.
///
/// # Example
///
/// ```no_run
/// use rested::{RequestOptions, RestClient};
///
/// #[derive(Debug, Default, serde::Deserialize)]
/// struct Article {
///     title: String,
///     body: String,
/// }
///
/// # async fn run() -> rested::Result<()> {
/// let client: RestClient = RestClient::default();
/// let article: Article = client
///     .get("https://blog.example.com/articles/1", RequestOptions::new())
///     .await?;
/// println!("{}", article.title);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient<C = HyperClient> {
    transport: C,
    encoder: Encoder,
    decoder: Decoder,
}

impl Default for RestClient<HyperClient> {
    fn default() -> Self {
        Self::new(HyperClient::new())
    }
}

impl RestClient<HyperClient> {
    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> RestClientBuilder<HyperClient> {
        RestClientBuilder::new(HyperClient::new())
    }
}

impl<C> RestClient<C> {
    /// Client over `transport` with the built-in codecs.
    #[must_use]
    pub fn new(transport: C) -> Self {
        Self::from_parts(transport, Encoder::default(), Decoder::default())
    }

    /// Client over `transport` with the given façades.
    #[must_use]
    pub fn from_parts(transport: C, encoder: Encoder, decoder: Decoder) -> Self {
        Self {
            transport,
            encoder,
            decoder,
        }
    }

    /// The transport requests go through.
    #[must_use]
    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// Request body encoder.
    #[must_use]
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Response body decoder.
    #[must_use]
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }
}

impl<C: Transport> RestClient<C> {
    /// Fetch a resource.
    pub async fn get<T>(&self, url: &str, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned + Default + 'static,
    {
        self.execute(Method::Get, url, options).await
    }

    /// Create or update a resource with POST, PUT or PATCH.
    ///
    /// `method` is matched case-insensitively. Any other method fails with
    /// [`Error::MethodNotAllowed`](crate::Error::MethodNotAllowed) before
    /// anything is encoded or sent.
    pub async fn modify<T>(&self, method: &str, url: &str, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned + Default + 'static,
    {
        let method = Method::modify(method)?;
        self.execute(method, url, options).await
    }

    /// Delete a resource.
    ///
    /// The response body is never decoded, so a successful answer of any
    /// content type is accepted.
    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<()> {
        exchange(&self.transport, &self.encoder, Method::Delete, url, options)
            .await
            .map(drop)
    }

    /// Run any method through the request pipeline.
    pub async fn execute<T>(&self, method: Method, url: &str, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned + Default + 'static,
    {
        execute(&self.transport, &self.encoder, &self.decoder, method, url, options).await
    }
}

/// Builder for [`RestClient`].
///
/// # Example
///
/// ```
/// use rested::{ContentType, HyperClient, RestClient};
///
/// let client = RestClient::builder()
///     .transport(HyperClient::new().with_logging())
///     .default_content_type(ContentType::XML)
///     .build();
/// assert_eq!(client.encoder().default_content_type(), &ContentType::XML);
/// ```
#[derive(Debug)]
pub struct RestClientBuilder<C> {
    transport: C,
    encoders: Option<Arc<EncodeRegistry>>,
    decoders: Option<Arc<DecodeRegistry>>,
    default_content_type: ContentType,
}

impl<C> RestClientBuilder<C> {
    fn new(transport: C) -> Self {
        Self {
            transport,
            encoders: None,
            decoders: None,
            default_content_type: ContentType::JSON,
        }
    }

    /// Send requests through `transport`.
    #[must_use]
    pub fn transport<T>(self, transport: T) -> RestClientBuilder<T> {
        RestClientBuilder {
            transport,
            encoders: self.encoders,
            decoders: self.decoders,
            default_content_type: self.default_content_type,
        }
    }

    /// Use `registry` instead of the built-in encoders.
    #[must_use]
    pub fn encoders(mut self, registry: impl Into<Arc<EncodeRegistry>>) -> Self {
        self.encoders = Some(registry.into());
        self
    }

    /// Use `registry` instead of the built-in decoders.
    #[must_use]
    pub fn decoders(mut self, registry: impl Into<Arc<DecodeRegistry>>) -> Self {
        self.decoders = Some(registry.into());
        self
    }

    /// Content type assumed when a request or response does not carry one.
    #[must_use]
    pub fn default_content_type(mut self, content_type: impl Into<ContentType>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> RestClient<C> {
        let encoder = Encoder::new(self.encoders.unwrap_or_default())
            .with_default_content_type(self.default_content_type.clone());
        let decoder = Decoder::new(self.decoders.unwrap_or_default())
            .with_default_content_type(self.default_content_type);
        RestClient::from_parts(self.transport, encoder, decoder)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert2::let_assert;
    use bytes::Bytes;
    use http::HeaderMap;
    use http::header::{CONTENT_TYPE, HeaderValue};

    use super::*;
    use crate::{Error, Request, Response};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl Transport for Counting {
        async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut headers = HeaderMap::new();
            let body = if request.method() == Method::Delete {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
                Bytes::from_static(b"<p>deleted</p>")
            } else {
                Bytes::new()
            };
            Ok(Response::new(200, headers, body))
        }
    }

    #[tokio::test]
    async fn modify_rejects_other_methods_before_sending() {
        let client = RestClient::new(Counting::default());

        let result = client
            .modify::<()>("trace", "http://localhost/articles", RequestOptions::new())
            .await;

        let_assert!(Err(Error::MethodNotAllowed { method, allowed }) = result);
        assert_eq!(method, "TRACE");
        assert_eq!(allowed, [Method::Post, Method::Put, Method::Patch]);
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn modify_accepts_any_case() {
        let client = RestClient::new(Counting::default());

        for method in ["post", "Put", "PATCH"] {
            client
                .modify::<()>(method, "http://localhost/articles", RequestOptions::new())
                .await
                .expect("allowed method");
        }
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn delete_discards_body() {
        let client = RestClient::new(Counting::default());

        client
            .delete("http://localhost/articles/1", RequestOptions::new())
            .await
            .expect("deleted");
    }

    #[test]
    fn builder_injects_registries() {
        let client = RestClient::builder()
            .transport(Counting::default())
            .decoders(DecodeRegistry::new())
            .build();

        assert!(client.decoder().registry().is_empty());
        assert_eq!(client.encoder().registry().len(), 4);
        assert_eq!(client.decoder().default_content_type(), &ContentType::JSON);
    }
}
