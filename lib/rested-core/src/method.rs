//! HTTP methods a call can use.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Fetch a resource.
    Get,
    /// Create a resource.
    Post,
    /// Replace a resource.
    Put,
    /// Remove a resource.
    Delete,
    /// Update part of a resource.
    Patch,
    /// Fetch headers only.
    Head,
    /// Ask which methods a resource supports.
    Options,
}

impl Method {
    /// Methods accepted by a mutating call.
    pub const MODIFY: &'static [Self] = &[Self::Post, Self::Put, Self::Patch];

    const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Options,
    ];

    /// The method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Parse a method name for a mutating call.
    ///
    /// The name is upper-cased first; anything outside [`Method::MODIFY`]
    /// yields [`Error::MethodNotAllowed`].
    ///
    /// ```
    /// use rested_core::Method;
    ///
    /// assert_eq!(Method::modify("patch").unwrap(), Method::Patch);
    /// assert!(Method::modify("TRACE").is_err());
    /// ```
    pub fn modify(method: &str) -> Result<Self> {
        let upper = method.trim().to_ascii_uppercase();
        upper
            .parse()
            .ok()
            .filter(|method| Self::MODIFY.contains(method))
            .ok_or(Error::MethodNotAllowed {
                method: upper,
                allowed: Self::MODIFY,
            })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parse an exact (upper-case) method name.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| Error::invalid_request(format!("unsupported HTTP method: {s}")))
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}
