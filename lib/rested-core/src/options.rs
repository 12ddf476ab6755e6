//! Per-call request options.
//!
//! A [`RequestOptions`] value carries everything a single call may customise:
//! the body, the headers, one-shot codec overrides and a deadline. Setters are
//! applied in the order they are called, and a later setter replaces what an
//! earlier one set for the same field.
//!
//! # Example
//!
//! ```
//! use rested_core::{ContentType, Headers, RequestOptions};
//!
//! #[derive(serde::Serialize)]
//! struct NewArticle { title: String }
//!
//! let options = RequestOptions::new()
//!     .body(NewArticle { title: "golang generics".to_string() })
//!     .headers(Headers::new().content_type(ContentType::JSON).build().unwrap());
//! assert!(options.has_body());
//! ```

use std::fmt;
use std::time::Duration;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};

use crate::{DecodeFn, EncodeFn, Error, Result};

type Body = Box<dyn erased_serde::Serialize + Send + Sync>;

/// Options applied to a single request.
#[derive(Default)]
pub struct RequestOptions {
    body: Option<Body>,
    headers: HeaderMap,
    marshal: Option<EncodeFn>,
    unmarshal: Option<DecodeFn>,
    timeout: Option<Duration>,
    error: Option<Error>,
}

impl RequestOptions {
    /// Creates empty options: no body, no headers, no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request body, encoded according to the `Content-Type` header.
    #[must_use]
    pub fn body<B>(mut self, body: B) -> Self
    where
        B: serde::Serialize + Send + Sync + 'static,
    {
        self.body = Some(Box::new(body));
        self
    }

    /// Replaces the whole header set.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a single header, replacing previous values for that name.
    ///
    /// An invalid name or value makes the call fail before anything is sent.
    #[must_use]
    pub fn header<N, V>(mut self, name: N, value: V) -> Self
    where
        HeaderName: TryFrom<N>,
        <HeaderName as TryFrom<N>>::Error: Into<Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<Error>,
    {
        let entry = HeaderName::try_from(name)
            .map_err(Into::into)
            .and_then(|name| {
                HeaderValue::try_from(value)
                    .map(|value| (name, value))
                    .map_err(Into::into)
            });
        match entry {
            Ok((name, value)) => {
                self.headers.insert(name, value);
            }
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Encodes the body with `marshal` for this call only.
    ///
    /// The function is installed under the request content type on a private
    /// copy of the encode registry; the shared registry is left untouched.
    #[must_use]
    pub fn marshal_with(mut self, marshal: EncodeFn) -> Self {
        self.marshal = Some(marshal);
        self
    }

    /// Decodes the response with `unmarshal` for this call only.
    #[must_use]
    pub fn unmarshal_with(mut self, unmarshal: DecodeFn) -> Self {
        self.unmarshal = Some(unmarshal);
        self
    }

    /// Bounds the network exchange of this call.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns `true` if a body was set.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Request headers.
    #[must_use]
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Deadline for this call, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.timeout
    }

    /// Split into the parts the pipeline consumes, reporting a deferred header
    /// error first.
    pub(crate) fn into_parts(self) -> Result<Parts> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(Parts {
            body: self.body,
            headers: self.headers,
            marshal: self.marshal,
            unmarshal: self.unmarshal,
            timeout: self.timeout,
        })
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("has_body", &self.body.is_some())
            .field("headers", &self.headers)
            .field("marshal_override", &self.marshal.is_some())
            .field("unmarshal_override", &self.unmarshal.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

pub(crate) struct Parts {
    pub(crate) body: Option<Body>,
    pub(crate) headers: HeaderMap,
    pub(crate) marshal: Option<EncodeFn>,
    pub(crate) unmarshal: Option<DecodeFn>,
    pub(crate) timeout: Option<Duration>,
}
