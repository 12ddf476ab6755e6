//! HTTP request handed to a [`Transport`](crate::Transport).
//!
//! The pipeline builds one [`Request`] per call from the parsed URL, the
//! caller's headers and the encoded body. Transports and middleware read it
//! through the accessors, or take it apart with [`Request::into_parts`].
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use http::HeaderMap;
//! use http::header::{ACCEPT, HeaderValue};
//! use rested_core::{Method, Request};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
//! let url = "https://api.example.com/articles".parse().unwrap();
//!
//! let request = Request::<Bytes>::new(Method::Get, url, headers, None);
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use bytes::Bytes;
use http::HeaderMap;

use crate::Method;

/// A request ready to go on the wire. The body, when present, is already
/// encoded.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HeaderMap,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Assemble a request.
    #[must_use]
    pub fn new(method: Method, url: url::Url, headers: HeaderMap, body: Option<B>) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// The method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// The target URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// All headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of `name`, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The encoded body; `None` when the call had nothing to send.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Split into method, URL, headers and body.
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HeaderMap, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}
