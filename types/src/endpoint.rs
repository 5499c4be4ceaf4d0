//! Hub endpoint descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A network address used to reach the hub.
///
/// Endpoints are ordered by the caller: primary first, then fallbacks.
/// Order is a priority list, not a pool — the first endpoint is always
/// preferred and later entries exist purely as fallbacks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Label used in logs ("primary", "secondary", ...).
    label: String,
    /// Base URL of the hub endpoint.
    url: String,
}

impl Endpoint {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// The preferred endpoint at the head of the list.
    pub fn primary(url: impl Into<String>) -> Self {
        Self::new("primary", url)
    }

    /// The fallback endpoint.
    pub fn secondary(url: impl Into<String>) -> Self {
        Self::new("secondary", url)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Base URL without a trailing slash.
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.url)
    }
}
