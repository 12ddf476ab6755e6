//! The request pipeline shared by every verb.
//!
//! One call runs encode, send, status check and decode in that order, and
//! stops at the first stage that fails.

use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{Instrument, Level, debug, span, warn};

use crate::options::Parts;
use crate::{
    DecodeFn, Decoder, Encoder, Error, Method, Request, RequestOptions, Response, Result, Transport,
};

/// Run one request through `transport` and decode the answer into a `T`.
///
/// 1. The body is encoded as the request `Content-Type` (the encoder default
///    when the header is absent), with the call's marshal override if any.
/// 2. The request is sent. A per-call timeout bounds this step only.
/// 3. A status of 400 or above becomes [`Error::Http`] carrying the body text.
/// 4. A non-empty body is decoded as the response `Content-Type` with the
///    call's unmarshal override if any. An empty body yields `T::default()`.
///
/// # Errors
///
/// Returns the error of the first stage that fails. See [`Error`] for how
/// variants map to stages.
pub async fn execute<T, C>(
    transport: &C,
    encoder: &Encoder,
    decoder: &Decoder,
    method: Method,
    url: &str,
    options: RequestOptions,
) -> Result<T>
where
    T: DeserializeOwned + Default + 'static,
    C: Transport + ?Sized,
{
    let span = span!(Level::DEBUG, "rest_request", %method, %url);
    async move {
        let mut parts = options.into_parts()?;
        let unmarshal = parts.unmarshal.take();
        let response = send_parts(transport, encoder, method, url, parts).await?;
        decode_response(decoder, &response, unmarshal.as_ref())
    }
    .instrument(span)
    .await
}

/// Run the first three steps of [`execute`] and hand back the raw response.
///
/// The response body is left untouched, so no decoder is involved. An
/// unmarshal override in `options` is ignored.
///
/// # Errors
///
/// Fails like [`execute`] up to and including the status check.
pub async fn exchange<C>(
    transport: &C,
    encoder: &Encoder,
    method: Method,
    url: &str,
    options: RequestOptions,
) -> Result<Response<Bytes>>
where
    C: Transport + ?Sized,
{
    let span = span!(Level::DEBUG, "rest_request", %method, %url);
    async move {
        let parts = options.into_parts()?;
        send_parts(transport, encoder, method, url, parts).await
    }
    .instrument(span)
    .await
}

async fn send_parts<C>(
    transport: &C,
    encoder: &Encoder,
    method: Method,
    url: &str,
    parts: Parts,
) -> Result<Response<Bytes>>
where
    C: Transport + ?Sized,
{
    let body = match parts.body.as_deref() {
        Some(value) => {
            let content_type = match parts.headers.get(CONTENT_TYPE) {
                Some(header) => header.to_str()?,
                None => "",
            };
            let value: &dyn erased_serde::Serialize = value;
            let encoded = encoder.encode(Some(value), content_type, parts.marshal.as_ref())?;
            debug!(size = encoded.len(), "request body encoded");
            Some(encoded)
        }
        None => None,
    };

    let url = url::Url::parse(url)?;
    let request = Request::new(method, url, parts.headers, body);
    let response = send(transport, request, parts.timeout).await?;

    if response.is_error() {
        let status = response.status();
        warn!(status, "server answered with an error status");
        return Err(Error::http(status, response.text_lossy()));
    }

    Ok(response)
}

async fn send<C>(
    transport: &C,
    request: Request<Bytes>,
    timeout: Option<Duration>,
) -> Result<Response<Bytes>>
where
    C: Transport + ?Sized,
{
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, transport.execute(request))
            .await
            .map_err(|_| Error::Timeout)?,
        None => transport.execute(request).await,
    }
}

fn decode_response<T>(
    decoder: &Decoder,
    response: &Response<Bytes>,
    unmarshal: Option<&DecodeFn>,
) -> Result<T>
where
    T: DeserializeOwned + Default + 'static,
{
    if response.body().is_empty() {
        debug!(status = response.status(), "empty response body");
        return Ok(T::default());
    }

    let content_type = response.content_type()?;
    debug!(
        content_type,
        size = response.body().len(),
        "decoding response body"
    );
    decoder.decode(response.body(), content_type, unmarshal)
}
