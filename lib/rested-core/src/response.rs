//! HTTP response returned by a [`Transport`](crate::Transport).
//!
//! A [`Response`] is produced once per call and consumed by the pipeline,
//! which checks the status and decodes the body according to the response's
//! own `Content-Type`.

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_TYPE;

use crate::Result;

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HeaderMap,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Raw `Content-Type` header, empty when the server sent none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`](crate::Error::InvalidHeader) when the
    /// value is not visible ASCII.
    pub fn content_type(&self) -> Result<&str> {
        match self.headers.get(CONTENT_TYPE) {
            Some(value) => Ok(value.to_str()?),
            None => Ok(""),
        }
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Status is 4xx or 5xx; such responses are reported as
    /// [`Error::Http`](crate::Error::Http) and never decoded.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }
}

impl Response<Bytes> {
    /// Body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
