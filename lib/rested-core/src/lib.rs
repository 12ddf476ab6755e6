//! Core types for the rested typed REST client.
//!
//! This crate holds everything that does not touch the network:
//! - [`ContentType`] - normalized media type used as registry key
//! - [`EncodeRegistry`] and [`DecodeRegistry`] - content type to codec function maps
//! - [`Encoder`] and [`Decoder`] - façades applying one-shot overrides on a private copy
//! - [`RequestOptions`] and [`Headers`] - per-call configuration
//! - [`Request`] and [`Response`] - buffered HTTP exchange types
//! - [`Transport`] - port the pipeline sends requests through
//! - [`execute`] - encode, send, status check and decode in one call
//! - [`exchange`] - the same without the decode step
//! - [`Error`] and [`Result`] - error handling
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod codec;
mod content_type;
mod error;
mod formats;
mod headers;
mod method;
mod options;
mod pipeline;
pub mod prelude;
mod registry;
mod request;
mod response;
mod transport;

pub use codec::{Decoder, Encoder};
pub use content_type::ContentType;
pub use error::{Error, Result};
pub use headers::{AuthScheme, Headers};
pub use method::Method;
pub use options::RequestOptions;
pub use pipeline::{exchange, execute};
pub use registry::{
    CodecError, DecodeFn, DecodeRegistry, DecodeSink, EncodeFn, EncodeRegistry, decode_fn,
    encode_fn,
};
pub use request::Request;
pub use response::Response;
pub use transport::Transport;

pub use http::{HeaderMap, StatusCode, header};
