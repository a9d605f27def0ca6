//! Cache key construction
//!
//! Keys take the form `<kind>_<subject>` with the subject lower-cased and its
//! whitespace normalized, so "  New   York " and "new york" share a slot.

use std::fmt;

/// The kind of request a cached value answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Current conditions
    Current,
    /// Multi-day forecast
    Forecast,
}

impl RequestKind {
    /// Returns the key prefix for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Current => "current",
            RequestKind::Forecast => "forecast",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a request subject (usually a city name)
///
/// Trims, collapses runs of whitespace to a single space, and lower-cases.
pub fn normalize_subject(subject: &str) -> String {
    subject
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Builds the cache key for a request
///
/// # Examples
/// ```
/// use weatherdash::cache::{cache_key, RequestKind};
///
/// assert_eq!(cache_key(RequestKind::Current, "Paris"), "current_paris");
/// ```
pub fn cache_key(kind: RequestKind, subject: &str) -> String {
    format!("{}_{}", kind.as_str(), normalize_subject(subject))
}
