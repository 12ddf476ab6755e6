//! Typed REST client for Rust.
//!
//! Three verbs cover the resource lifecycle: [`get`], [`modify`] (POST, PUT or
//! PATCH) and [`delete`]. Request and response bodies go through codecs picked
//! by `Content-Type`; JSON, XML, plain text and URL-encoded forms work out of
//! the box, and any other format can be registered.
//!
//! # Example
//!
//! ```no_run
//! use rested::prelude::*;
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Article {
//!     title: String,
//!     body: String,
//! }
//!
//! # async fn run() -> rested::Result<()> {
//! let created: Article = rested::modify(
//!     "post",
//!     "https://blog.example.com/articles",
//!     RequestOptions::new()
//!         .headers(
//!             Headers::new()
//!                 .content_type(ContentType::JSON)
//!                 .bearer_auth("token")
//!                 .build()?,
//!         )
//!         .body(Article {
//!             title: "golang generics".into(),
//!             body: String::new(),
//!         }),
//! )
//! .await?;
//!
//! let article: Article =
//!     rested::get("https://blog.example.com/articles/1", RequestOptions::new()).await?;
//! rested::delete("https://blog.example.com/articles/1", RequestOptions::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Use a [`RestClient`] instead of the free functions to inject your own
//! transport or registries.

mod client;
mod connector;
mod defaults;
pub mod middleware;
pub mod prelude;
mod rest_client;

pub use client::{HyperClient, HyperClientBuilder};
pub use defaults::{
    default_client, default_decoders, default_encoders, delete, get, modify, register_decoder,
    register_encoder,
};
pub use rest_client::{RestClient, RestClientBuilder};

// Re-export tower for middleware composition
pub use tower;

pub use rested_core::{
    AuthScheme, CodecError, ContentType, DecodeFn, DecodeRegistry, DecodeSink, Decoder, EncodeFn,
    EncodeRegistry, Encoder, Error, HeaderMap, Headers, Method, Request, RequestOptions, Response,
    Result, StatusCode, Transport, decode_fn, encode_fn, exchange, execute, header,
};
