//! Error types for rested.
//!
//! Variants are grouped by the stage that failed:
//!
//! | Stage | Variants |
//! |-------|----------|
//! | configuration | [`Error::MethodNotAllowed`], [`Error::InvalidHeader`] |
//! | codec lookup | [`Error::EncoderNotFound`], [`Error::DecoderNotFound`] |
//! | codec conversion | [`Error::Encode`], [`Error::Decode`] |
//! | transport | [`Error::Connection`], [`Error::Tls`], [`Error::Timeout`], [`Error::InvalidRequest`], [`Error::InvalidUrl`] |
//! | HTTP status | [`Error::Http`] |

use derive_more::{Display, Error, From};

use crate::{CodecError, ContentType, Method};

/// Main error type for rested operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The server answered with a status code of 400 or above.
    ///
    /// The body is kept as raw text; it is never decoded into the result type.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        #[error(not(source))]
        message: String,
    },

    /// A mutating call was given a method other than POST, PUT or PATCH.
    #[display("method not allowed: {method}, you can use one of {}", method_list(allowed))]
    #[from(skip)]
    MethodNotAllowed {
        /// The rejected method, upper-cased.
        #[error(not(source))]
        method: String,
        /// Methods accepted by the call.
        allowed: &'static [Method],
    },

    /// A header name or value could not be represented.
    #[display("invalid header: {_0}")]
    #[from(skip)]
    InvalidHeader(#[error(not(source))] String),

    /// No encode function is registered for the content type.
    #[display("marshaller function not found for content type '{_0}'")]
    #[from(skip)]
    EncoderNotFound(#[error(not(source))] ContentType),

    /// No decode function is registered for the content type.
    #[display("unmarshaler function not found for content type '{_0}'")]
    #[from(skip)]
    DecoderNotFound(#[error(not(source))] ContentType),

    /// The encode function failed.
    #[display("cannot encode request body as '{content_type}': {source}")]
    #[from(skip)]
    Encode {
        /// Content type the body was encoded as.
        content_type: ContentType,
        /// Error reported by the encode function.
        source: CodecError,
    },

    /// The decode function failed, or the payload was not what the target
    /// type expects.
    #[display("cannot decode response body as '{content_type}': {source}")]
    #[from(skip)]
    Decode {
        /// Content type the body was decoded as.
        content_type: ContentType,
        /// Error reported by the decode function.
        source: CodecError,
    },

    /// The connection could not be opened or broke mid-exchange.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// The TLS handshake failed.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The exchange did not complete in time.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The transport could not build the request.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// The URL given to the call does not parse.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

fn method_list(methods: &[Method]) -> String {
    let names: Vec<_> = methods.iter().map(Method::as_str).collect();
    format!("[{}]", names.join(", "))
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl Error {
    /// [`Error::Http`] for a status and the body text that came with it.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// [`Error::Connection`] with `message`.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// [`Error::Tls`] with `message`.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// [`Error::InvalidRequest`] with `message`.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// The exchange ran out of time.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// The connection failed.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the failure happened while talking to the server.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_)
                | Self::Tls(_)
                | Self::Timeout
                | Self::InvalidRequest(_)
                | Self::InvalidUrl(_)
        )
    }

    /// Returns `true` if no codec is registered for the content type involved.
    #[must_use]
    pub const fn is_codec_not_found(&self) -> bool {
        matches!(self, Self::EncoderNotFound(_) | Self::DecoderNotFound(_))
    }

    /// Status of an [`Error::Http`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Status is 4xx.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Status is 5xx.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Raw text the server sent along with an error status.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => Some(message),
            _ => None,
        }
    }
}
