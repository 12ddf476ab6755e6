//! Encoder and decoder façades over the shared registries.
//!
//! Both façades resolve a content type (parameters stripped, empty falls back
//! to the façade default) and look the conversion function up in their
//! registry. A call may pass a one-shot override: the façade then works on a
//! private copy of the registry with the override installed under the resolved
//! content type, so the shared registry is never written to.

use std::any::{Any, TypeId};
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{
    ContentType, DecodeFn, DecodeRegistry, DecodeSink, EncodeFn, EncodeRegistry, Error, Result,
};

/// Encodes request bodies through an [`EncodeRegistry`].
#[derive(Debug, Clone)]
pub struct Encoder {
    registry: Arc<EncodeRegistry>,
    default_content_type: ContentType,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Arc::new(EncodeRegistry::default()))
    }
}

impl Encoder {
    /// Wrap a shared registry, defaulting to `application/json`.
    #[must_use]
    pub fn new(registry: Arc<EncodeRegistry>) -> Self {
        Self {
            registry,
            default_content_type: ContentType::JSON,
        }
    }

    /// Use `content_type` when a call does not specify one.
    #[must_use]
    pub fn with_default_content_type(mut self, content_type: impl Into<ContentType>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// The shared registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<EncodeRegistry> {
        &self.registry
    }

    /// Content type used when a call does not specify one.
    #[must_use]
    pub fn default_content_type(&self) -> &ContentType {
        &self.default_content_type
    }

    /// Encode `value` as `content_type`.
    ///
    /// No value encodes to an empty payload. With `override_fn`, the lookup
    /// runs against a copy of the registry in which `override_fn` is
    /// registered for the resolved content type.
    ///
    /// # Example
    ///
    /// ```
    /// use rested_core::Encoder;
    ///
    /// let encoder = Encoder::default();
    /// let bytes = encoder.encode(Some(&vec!["rust", "http"]), "", None).unwrap();
    /// assert_eq!(bytes.as_ref(), br#"["rust","http"]"#);
    /// ```
    pub fn encode(
        &self,
        value: Option<&dyn erased_serde::Serialize>,
        content_type: &str,
        override_fn: Option<&EncodeFn>,
    ) -> Result<Bytes> {
        let Some(value) = value else {
            return Ok(Bytes::new());
        };

        let content_type = ContentType::resolve(content_type, &self.default_content_type);
        let registry = self.registry.overriding(&content_type, override_fn);
        let encode = registry
            .lookup(&content_type)
            .ok_or_else(|| Error::EncoderNotFound(content_type.clone()))?;

        encode(value).map_err(|source| Error::Encode {
            content_type,
            source,
        })
    }
}

/// Decodes response bodies through a [`DecodeRegistry`].
#[derive(Debug, Clone)]
pub struct Decoder {
    registry: Arc<DecodeRegistry>,
    default_content_type: ContentType,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Arc::new(DecodeRegistry::default()))
    }
}

impl Decoder {
    /// Wrap a shared registry, defaulting to `application/json`.
    #[must_use]
    pub fn new(registry: Arc<DecodeRegistry>) -> Self {
        Self {
            registry,
            default_content_type: ContentType::JSON,
        }
    }

    /// Use `content_type` when a response does not specify one.
    #[must_use]
    pub fn with_default_content_type(mut self, content_type: impl Into<ContentType>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// The shared registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<DecodeRegistry> {
        &self.registry
    }

    /// Content type used when a response does not specify one.
    #[must_use]
    pub fn default_content_type(&self) -> &ContentType {
        &self.default_content_type
    }

    /// Decode `data` as `content_type` into a `T`.
    ///
    /// A `String` target receives the payload text as-is: the registry and
    /// any override are bypassed whatever the content type says.
    ///
    /// # Example
    ///
    /// ```
    /// use rested_core::Decoder;
    ///
    /// let decoder = Decoder::default();
    /// let tags: Vec<String> = decoder.decode(br#"["a","b"]"#, "application/json", None).unwrap();
    /// assert_eq!(tags, ["a", "b"]);
    ///
    /// let raw: String = decoder.decode(b"{not json", "application/json", None).unwrap();
    /// assert_eq!(raw, "{not json");
    /// ```
    pub fn decode<T>(
        &self,
        data: &[u8],
        content_type: &str,
        override_fn: Option<&DecodeFn>,
    ) -> Result<T>
    where
        T: DeserializeOwned + 'static,
    {
        if TypeId::of::<T>() == TypeId::of::<String>() {
            return self.decode_text(data, content_type);
        }

        let content_type = ContentType::resolve(content_type, &self.default_content_type);
        let registry = self.registry.overriding(&content_type, override_fn);
        let decode = registry
            .lookup(&content_type)
            .ok_or_else(|| Error::DecoderNotFound(content_type.clone()))?;

        let mut slot: Option<T> = None;
        let sink: &mut DecodeSink<'_> = &mut |de| {
            slot = Some(erased_serde::deserialize::<T>(de)?);
            Ok(())
        };
        let result = decode(data, sink);

        match (result, slot) {
            (Ok(()), Some(value)) => Ok(value),
            (Ok(()), None) => Err(Error::Decode {
                content_type,
                source: "decode function produced no value".into(),
            }),
            (Err(source), _) => Err(Error::Decode {
                content_type,
                source,
            }),
        }
    }

    fn decode_text<T: 'static>(&self, data: &[u8], content_type: &str) -> Result<T> {
        let text = String::from_utf8(data.to_vec()).map_err(|err| Error::Decode {
            content_type: ContentType::resolve(content_type, &ContentType::PLAIN_TEXT),
            source: err.into(),
        })?;
        let boxed: Box<dyn Any> = Box::new(text);
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::invalid_request("text target is not a String"))
    }
}
