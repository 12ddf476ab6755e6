//! Media type identifiers used to select codecs.

use std::borrow::Cow;
use std::fmt;

/// A media type identifier such as `application/json`.
///
/// A `ContentType` is always stored in its bare form: any parameter segment
/// (everything after the first `;`) is stripped and the remainder trimmed, so
/// `application/json; charset=utf-8` and `application/json` compare equal.
/// Comparison is otherwise exact.
///
/// # Example
///
/// ```
/// use rested_core::ContentType;
///
/// let ct = ContentType::new("application/json; charset=utf-8");
/// assert_eq!(ct, ContentType::JSON);
/// assert_eq!(ct.as_str(), "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentType(Cow<'static, str>);

impl ContentType {
    /// `application/json`, the default when nothing else is specified.
    pub const JSON: Self = Self(Cow::Borrowed("application/json"));
    /// `application/xml`.
    pub const XML: Self = Self(Cow::Borrowed("application/xml"));
    /// `text/plain`.
    pub const PLAIN_TEXT: Self = Self(Cow::Borrowed("text/plain"));
    /// `application/x-www-form-urlencoded`.
    pub const FORM_URL_ENCODED: Self = Self(Cow::Borrowed("application/x-www-form-urlencoded"));

    /// Parse a content type, dropping any parameters.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        let essence = essence(value.as_ref());
        Self(Cow::Owned(essence.to_string()))
    }

    /// Parse a content type, falling back to `default` when `value` is empty
    /// once parameters are stripped.
    #[must_use]
    pub fn resolve(value: &str, default: &Self) -> Self {
        let essence = essence(value);
        if essence.is_empty() {
            default.clone()
        } else {
            Self(Cow::Owned(essence.to_string()))
        }
    }

    /// The bare media type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for an empty identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn essence(value: &str) -> &str {
    value.split(';').next().unwrap_or_default().trim()
}

impl Default for ContentType {
    fn default() -> Self {
        Self::JSON
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
