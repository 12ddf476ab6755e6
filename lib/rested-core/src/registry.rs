//! Content type to codec function registries.
//!
//! - [`EncodeRegistry`] - maps a [`ContentType`] to an [`EncodeFn`]
//! - [`DecodeRegistry`] - maps a [`ContentType`] to a [`DecodeFn`]
//!
//! Registries are plain maps without interior locking. They are shared behind
//! an `Arc` by the [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder)
//! façades, which clone them whenever a call installs a one-shot override.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::ContentType;
use crate::formats;

/// Error reported by a codec function.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

/// Receives the type-erased deserializer a [`DecodeFn`] builds over a payload.
///
/// The decoder façade supplies the sink; it deserializes the caller's target
/// type out of whatever deserializer the codec hands it.
pub type DecodeSink<'a> = dyn for<'de> FnMut(
        &mut dyn erased_serde::Deserializer<'de>,
    ) -> Result<(), erased_serde::Error>
    + 'a;

/// Converts a serializable value into a payload.
pub type EncodeFn =
    Arc<dyn Fn(&dyn erased_serde::Serialize) -> Result<Bytes, CodecError> + Send + Sync>;

/// Feeds a payload to a [`DecodeSink`] through a format-specific deserializer.
pub type DecodeFn =
    Arc<dyn Fn(&[u8], &mut DecodeSink<'_>) -> Result<(), CodecError> + Send + Sync>;

/// Wrap a function or closure as an [`EncodeFn`].
///
/// # Example
///
/// ```
/// use rested_core::{encode_fn, CodecError};
///
/// let upper = encode_fn(|value| {
///     let json = serde_json::to_string(&value)?;
///     Ok::<_, CodecError>(json.to_uppercase().into())
/// });
/// # let _ = upper;
/// ```
pub fn encode_fn<F>(f: F) -> EncodeFn
where
    F: Fn(&dyn erased_serde::Serialize) -> Result<Bytes, CodecError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a function or closure as a [`DecodeFn`].
pub fn decode_fn<F>(f: F) -> DecodeFn
where
    F: Fn(&[u8], &mut DecodeSink<'_>) -> Result<(), CodecError> + Send + Sync + 'static,
{
    Arc::new(f)
}

macro_rules! registry {
    ($(#[$meta:meta])* $name:ident, $func:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            entries: HashMap<ContentType, $func>,
        }

        impl $name {
            /// Create an empty registry.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    entries: HashMap::new(),
                }
            }

            /// Insert or replace the function registered for `content_type`.
            ///
            /// Parameters such as `charset` are stripped from the key.
            pub fn set(&mut self, content_type: impl Into<ContentType>, func: $func) {
                self.entries.insert(content_type.into(), func);
            }

            /// Builder-style [`set`](Self::set).
            #[must_use]
            pub fn with(mut self, content_type: impl Into<ContentType>, func: $func) -> Self {
                self.set(content_type, func);
                self
            }

            /// Look up the function registered for `content_type`.
            ///
            /// A [`ContentType`] never carries parameters, so
            /// `application/json; charset=utf-8` finds the `application/json` entry.
            #[must_use]
            pub fn lookup(&self, content_type: &ContentType) -> Option<&$func> {
                self.entries.get(content_type)
            }

            /// Returns `true` if a function is registered for `content_type`.
            #[must_use]
            pub fn contains(&self, content_type: &ContentType) -> bool {
                self.lookup(content_type).is_some()
            }

            /// Registered content types, in no particular order.
            pub fn content_types(&self) -> impl Iterator<Item = &ContentType> {
                self.entries.keys()
            }

            /// Number of registered content types.
            #[must_use]
            pub fn len(&self) -> usize {
                self.entries.len()
            }

            /// Returns `true` if nothing is registered.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }

            /// Borrow `self`, or a copy with `func` registered for `content_type`.
            ///
            /// `self` is never modified.
            #[must_use]
            pub fn overriding(
                &self,
                content_type: &ContentType,
                func: Option<&$func>,
            ) -> Cow<'_, Self> {
                match func {
                    Some(func) => {
                        Cow::Owned(self.clone().with(content_type.clone(), Arc::clone(func)))
                    }
                    None => Cow::Borrowed(self),
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut content_types: Vec<_> =
                    self.entries.keys().map(ContentType::as_str).collect();
                content_types.sort_unstable();
                f.debug_struct(stringify!($name))
                    .field("content_types", &content_types)
                    .finish()
            }
        }
    };
}

registry!(
    /// Registry of encode functions keyed by content type.
    ///
    /// [`EncodeRegistry::default`] comes with JSON, XML, plain text and
    /// URL-encoded form support.
    EncodeRegistry,
    EncodeFn
);

registry!(
    /// Registry of decode functions keyed by content type.
    ///
    /// [`DecodeRegistry::default`] comes with JSON, XML and plain text support.
    DecodeRegistry,
    DecodeFn
);

impl Default for EncodeRegistry {
    fn default() -> Self {
        Self::new()
            .with(ContentType::JSON, encode_fn(formats::json_encode))
            .with(ContentType::XML, encode_fn(formats::xml_encode))
            .with(ContentType::PLAIN_TEXT, encode_fn(formats::text_encode))
            .with(ContentType::FORM_URL_ENCODED, encode_fn(formats::form_encode))
    }
}

impl Default for DecodeRegistry {
    fn default() -> Self {
        Self::new()
            .with(ContentType::JSON, decode_fn(formats::json_decode))
            .with(ContentType::XML, decode_fn(formats::xml_decode))
            .with(ContentType::PLAIN_TEXT, decode_fn(formats::text_decode))
    }
}
