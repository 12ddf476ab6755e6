//! Process-wide default client.
//!
//! The free functions [`get`], [`modify`] and [`delete`] share one lazily built
//! [`HyperClient`] and the default codec registries. Registering a codec swaps
//! in an updated copy of the registry: calls already running keep the
//! snapshot they started with.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use rested_core::{
    ContentType, DecodeFn, DecodeRegistry, Decoder, EncodeFn, EncodeRegistry, Encoder,
    RequestOptions, Result,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{HyperClient, RestClient};

static TRANSPORT: LazyLock<HyperClient> = LazyLock::new(HyperClient::new);

static ENCODERS: LazyLock<RwLock<Arc<EncodeRegistry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(EncodeRegistry::default())));

static DECODERS: LazyLock<RwLock<Arc<DecodeRegistry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(DecodeRegistry::default())));

/// Register `func` as the default encoder for `content_type`.
///
/// Replaces any previous registration, built-in ones included.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use rested::{encode_fn, register_encoder};
///
/// register_encoder("text/csv", encode_fn(|_| Ok(Bytes::from_static(b"title,body"))));
/// ```
pub fn register_encoder(content_type: impl Into<ContentType>, func: EncodeFn) {
    let content_type = content_type.into();
    debug!(%content_type, "registering default encoder");
    let mut guard = ENCODERS.write().unwrap_or_else(PoisonError::into_inner);
    let mut registry = EncodeRegistry::clone(&guard);
    registry.set(content_type, func);
    *guard = Arc::new(registry);
}

/// Register `func` as the default decoder for `content_type`.
///
/// Replaces any previous registration, built-in ones included.
pub fn register_decoder(content_type: impl Into<ContentType>, func: DecodeFn) {
    let content_type = content_type.into();
    debug!(%content_type, "registering default decoder");
    let mut guard = DECODERS.write().unwrap_or_else(PoisonError::into_inner);
    let mut registry = DecodeRegistry::clone(&guard);
    registry.set(content_type, func);
    *guard = Arc::new(registry);
}

/// Snapshot of the default encode registry.
#[must_use]
pub fn default_encoders() -> Arc<EncodeRegistry> {
    Arc::clone(&ENCODERS.read().unwrap_or_else(PoisonError::into_inner))
}

/// Snapshot of the default decode registry.
#[must_use]
pub fn default_decoders() -> Arc<DecodeRegistry> {
    Arc::clone(&DECODERS.read().unwrap_or_else(PoisonError::into_inner))
}

/// Client over the shared transport and the current default registries.
#[must_use]
pub fn default_client() -> RestClient<&'static HyperClient> {
    RestClient::from_parts(
        &*TRANSPORT,
        Encoder::new(default_encoders()),
        Decoder::new(default_decoders()),
    )
}

/// Fetch a resource with the default client.
///
/// # Example
///
/// ```no_run
/// use rested::RequestOptions;
///
/// #[derive(Debug, Default, serde::Deserialize)]
/// struct Article {
///     title: String,
///     body: String,
/// }
///
/// # async fn run() -> rested::Result<()> {
/// let article: Article =
///     rested::get("https://blog.example.com/articles/1", RequestOptions::new()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn get<T>(url: &str, options: RequestOptions) -> Result<T>
where
    T: DeserializeOwned + Default + 'static,
{
    default_client().get(url, options).await
}

/// Create or update a resource with the default client.
///
/// See [`RestClient::modify`].
pub async fn modify<T>(method: &str, url: &str, options: RequestOptions) -> Result<T>
where
    T: DeserializeOwned + Default + 'static,
{
    default_client().modify(method, url, options).await
}

/// Delete a resource with the default client.
///
/// See [`RestClient::delete`].
pub async fn delete(url: &str, options: RequestOptions) -> Result<()> {
    default_client().delete(url, options).await
}
