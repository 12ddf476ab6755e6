//! Prelude module for convenient imports.
//!
//! ```
//! use rested_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Decoder, Encoder, Error, Headers, Method, RequestOptions, Response, Result,
    Transport, decode_fn, encode_fn,
};
