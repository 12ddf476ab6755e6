//! Header set builder.
//!
//! [`Headers`] assembles an [`http::HeaderMap`] for
//! [`RequestOptions::headers`](crate::RequestOptions::headers). Names are
//! case-insensitive and a name may carry several values.
//!
//! # Example
//!
//! ```
//! use rested_core::{ContentType, Headers};
//!
//! let headers = Headers::new()
//!     .content_type(ContentType::XML)
//!     .bearer_auth("my-token")
//!     .header("X-Request-Id", "42")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(headers["content-type"], "application/xml");
//! assert_eq!(headers["authorization"], "Bearer my-token");
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_more::Display;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::{ContentType, Error, Result};

/// Authorization scheme placed before the credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AuthScheme {
    /// `Bearer <token>`.
    #[display("Bearer")]
    Bearer,
    /// `Basic <base64 credentials>`.
    #[display("Basic")]
    Basic,
}

/// Builder for a request header set.
///
/// Invalid names or values do not fail immediately; the first one is reported
/// by [`Headers::build`].
#[derive(Debug, Clone, Default)]
pub struct Headers {
    map: HeaderMap,
    error: Option<String>,
}

impl Headers {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any previous values for the name.
    #[must_use]
    pub fn header(self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.header_values(name, [value])
    }

    /// Sets every value for a header, replacing any previous values.
    #[must_use]
    pub fn header_values<V: AsRef<str>>(
        mut self,
        name: impl AsRef<str>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let name = match HeaderName::try_from(name.as_ref()) {
            Ok(name) => name,
            Err(err) => return self.fail(&err),
        };
        self.map.remove(&name);
        for value in values {
            match HeaderValue::try_from(value.as_ref()) {
                Ok(value) => {
                    self.map.append(name.clone(), value);
                }
                Err(err) => return self.fail(&err),
            }
        }
        self
    }

    /// Copies every entry of `headers`, replacing existing values for the
    /// names it contains.
    #[must_use]
    pub fn extend(mut self, headers: HeaderMap) -> Self {
        let mut last = None;
        for (name, value) in headers {
            // Continuation values of a multi-valued header come with `None`.
            let name = match name {
                Some(name) => {
                    self.map.remove(&name);
                    last = Some(name.clone());
                    name
                }
                None => match &last {
                    Some(name) => name.clone(),
                    None => continue,
                },
            };
            self.map.append(name, value);
        }
        self
    }

    /// Sets `Content-Type`.
    #[must_use]
    pub fn content_type(self, content_type: impl Into<ContentType>) -> Self {
        self.header(CONTENT_TYPE, content_type.into())
    }

    /// Sets `Authorization: <scheme> <credentials>`.
    #[must_use]
    pub fn auth(self, scheme: AuthScheme, credentials: impl AsRef<str>) -> Self {
        self.header(AUTHORIZATION, format!("{scheme} {}", credentials.as_ref()))
    }

    /// Sets `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.auth(AuthScheme::Bearer, token)
    }

    /// Sets `Authorization: Basic <base64(username:password)>`.
    #[must_use]
    pub fn basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        self.auth(AuthScheme::Basic, STANDARD.encode(credentials))
    }

    /// Builds the header set.
    pub fn build(self) -> Result<HeaderMap> {
        match self.error {
            Some(message) => Err(Error::InvalidHeader(message)),
            None => Ok(self.map),
        }
    }

    fn fail(mut self, err: &dyn std::error::Error) -> Self {
        self.error.get_or_insert_with(|| err.to_string());
        self
    }
}
