//! Prelude module for convenient imports.
//!
//! ```
//! use rested::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, Headers, HyperClient, Method, RequestOptions, RestClient, Result,
    StatusCode, Transport, decode_fn, encode_fn,
};
pub use serde::{Deserialize, Serialize};
