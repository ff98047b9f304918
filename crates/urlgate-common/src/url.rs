//! URL parsing and validation helpers
//!
//! Parsing here never fails: a malformed URL degrades to empty components
//! so feature extraction stays total. Validity is a separate, explicit
//! check (`is_valid_url`) applied as a precondition by the pipeline.

use ::url::Url;

/// Decomposed URL components, empty strings on parse failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// Lowercase scheme (`https`, `http`, ...), empty if unparseable
    pub scheme: String,
    /// Lowercase host, empty if absent or unparseable
    pub host: String,
    /// Path component, empty if unparseable
    pub path: String,
    /// Query string without the leading `?`, empty if absent
    pub query: String,
}

impl UrlParts {
    /// Decompose a URL string. Never fails; unparseable input yields
    /// empty components.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Self {
                scheme: url.scheme().to_string(),
                host: url.host_str().unwrap_or("").to_ascii_lowercase(),
                path: url.path().to_string(),
                query: url.query().unwrap_or("").to_string(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Whether a non-empty query string is present
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Extract the host component of a URL, lowercased.
/// Returns an empty string for unparseable input.
pub fn extract_domain(raw: &str) -> String {
    UrlParts::parse(raw).host
}

/// A URL is valid when both a scheme and a host are present
pub fn is_valid_url(raw: &str) -> bool {
    let parts = UrlParts::parse(raw);
    !parts.scheme.is_empty() && !parts.host.is_empty()
}
