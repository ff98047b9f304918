//! Lexical URL feature extraction
//!
//! Maps a URL string to a fixed-length numeric vector. Extraction is total:
//! malformed URLs degrade to empty components and still produce a
//! well-defined vector. All keyword sets and thresholds below are fixed
//! configuration, not learned parameters.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use urlgate_common::UrlParts;

/// Number of features per URL
pub const FEATURE_COUNT: usize = 14;

/// Version tag of the feature set, persisted with every trained model.
/// A model trained against a different version is rejected at load time.
pub const FEATURE_SET_VERSION: u32 = 2;

/// Feature names, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "url_length",
    "is_https",
    "domain_length",
    "domain_dots",
    "domain_has_digit",
    "domain_has_separator",
    "path_length",
    "has_query",
    "suspicious_keyword",
    "known_domain",
    "long_digit_run",
    "overlong_domain",
    "excess_hyphens",
    "scam_keyword",
];

/// Credential/phishing bait keywords scanned case-insensitively over the
/// whole URL
pub const SUSPICIOUS_KEYWORDS: [&str; 8] = [
    "login", "account", "verify", "password", "bank", "secure", "update", "alert",
];

/// Too-good-to-be-true keywords scanned case-insensitively over the whole URL
pub const SCAM_KEYWORDS: [&str; 5] = ["free", "win", "prize", "lucky", "gift"];

/// Well-known domains: an exact or subdomain match is a benign signal
pub const KNOWN_DOMAINS: [&str; 10] = [
    "google.com",
    "youtube.com",
    "facebook.com",
    "amazon.com",
    "wikipedia.org",
    "twitter.com",
    "github.com",
    "microsoft.com",
    "apple.com",
    "netflix.com",
];

/// A digit run of at least this length in the domain flags as suspicious
pub const DIGIT_RUN_THRESHOLD: usize = 4;

/// Domains longer than this flag as suspicious
pub const DOMAIN_LENGTH_THRESHOLD: usize = 50;

/// More hyphens than this in the domain flags as suspicious
pub const HYPHEN_THRESHOLD: usize = 2;

/// Fixed-length numeric encoding of a URL's lexical properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Wrap raw feature values
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Feature value at index, 0.0 out of range
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Get as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get the fixed-size array
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }
}

/// Pure URL-to-vector extractor with pre-compiled keyword automata
pub struct FeatureExtractor {
    suspicious: AhoCorasick,
    scam: AhoCorasick,
}

impl FeatureExtractor {
    /// Create extractor (compiles the fixed keyword sets)
    pub fn new() -> Self {
        let suspicious = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(SUSPICIOUS_KEYWORDS)
            .expect("suspicious keyword patterns compile");
        let scam = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(SCAM_KEYWORDS)
            .expect("scam keyword patterns compile");

        Self { suspicious, scam }
    }

    /// Extract the feature vector for a URL. Never fails: unparseable
    /// input degrades to empty components.
    pub fn extract(&self, url: &str) -> FeatureVector {
        let parts = UrlParts::parse(url);
        let domain = &parts.host;

        FeatureVector::from_values([
            url.chars().count() as f64,
            bit(parts.scheme == "https"),
            domain.chars().count() as f64,
            domain.matches('.').count() as f64,
            bit(domain.chars().any(|c| c.is_ascii_digit())),
            bit(domain.chars().any(|c| c == '-' || c == '_')),
            parts.path.chars().count() as f64,
            bit(parts.has_query()),
            bit(self.suspicious.is_match(url)),
            bit(is_known_domain(domain)),
            bit(longest_digit_run(domain) >= DIGIT_RUN_THRESHOLD),
            bit(domain.chars().count() > DOMAIN_LENGTH_THRESHOLD),
            bit(domain.matches('-').count() > HYPHEN_THRESHOLD),
            bit(self.scam.is_match(url)),
        ])
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn bit(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Exact or subdomain match against the well-known domain list
fn is_known_domain(domain: &str) -> bool {
    KNOWN_DOMAINS
        .iter()
        .any(|known| domain == *known || domain.ends_with(&format!(".{known}")))
}

/// Length of the longest consecutive digit run
fn longest_digit_run(domain: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in domain.chars() {
        if c.is_ascii_digit() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_basic_features() {
        let extractor = FeatureExtractor::new();
        let url = "https://example.com/login?user=admin";
        let features = extractor.extract(url);

        assert_eq!(features.get(0), url.len() as f64);
        assert_eq!(features.get(1), 1.0); // https
        assert_eq!(features.get(2), "example.com".len() as f64);
        assert_eq!(features.get(3), 1.0); // one dot
        assert_eq!(features.get(7), 1.0); // query present
        assert_eq!(features.get(8), 1.0); // "login"
    }

    #[test]
    fn test_extract_malformed_url_is_degenerate() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("not-a-url");

        assert_eq!(features.get(1), 0.0); // no scheme
        assert_eq!(features.get(2), 0.0); // no domain
        assert_eq!(features.get(7), 0.0); // no query
        // URL length is still measured on the raw input
        assert_eq!(features.get(0), "not-a-url".len() as f64);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("http://shady.example/SECURE-UPDATE");
        assert_eq!(features.get(8), 1.0);
    }

    #[test]
    fn test_scam_keywords() {
        let extractor = FeatureExtractor::new();
        assert_eq!(extractor.extract("http://a.example/free-prize").get(13), 1.0);
        assert_eq!(extractor.extract("http://a.example/docs").get(13), 0.0);
    }

    #[test]
    fn test_known_domain_suffix_match() {
        let extractor = FeatureExtractor::new();
        assert_eq!(extractor.extract("https://github.com/octocat").get(9), 1.0);
        assert_eq!(extractor.extract("https://gist.github.com/x").get(9), 1.0);
        // Lookalike must not match
        assert_eq!(extractor.extract("https://github.com.evil.tld/x").get(9), 0.0);
        assert_eq!(extractor.extract("https://notgithub.com/x").get(9), 0.0);
    }

    #[test]
    fn test_domain_shape_flags() {
        let extractor = FeatureExtractor::new();

        let f = extractor.extract("http://paypal-secure-login-verify.example");
        assert_eq!(f.get(5), 1.0); // separator present
        assert_eq!(f.get(12), 1.0); // 3 hyphens > threshold

        let f = extractor.extract("http://account1234.example");
        assert_eq!(f.get(4), 1.0); // digit present
        assert_eq!(f.get(10), 1.0); // 4-digit run

        let f = extractor.extract("http://a12b34.example");
        assert_eq!(f.get(10), 0.0); // runs of 2 only
    }

    #[test]
    fn test_overlong_domain_flag() {
        let extractor = FeatureExtractor::new();
        let domain = format!("{}.example", "a".repeat(60));
        let f = extractor.extract(&format!("http://{domain}/"));
        assert_eq!(f.get(11), 1.0);
    }

    #[test]
    fn test_digit_run_helper() {
        assert_eq!(longest_digit_run("abc123def45"), 3);
        assert_eq!(longest_digit_run("no-digits.example"), 0);
        assert_eq!(longest_digit_run("9999"), 4);
    }

    proptest! {
        // Extraction must be total: any input yields a full-length vector
        #[test]
        fn extract_never_fails(url in ".*") {
            let extractor = FeatureExtractor::new();
            let features = extractor.extract(&url);
            prop_assert_eq!(features.as_slice().len(), FEATURE_COUNT);
            prop_assert!(features.as_slice().iter().all(|v| v.is_finite()));
        }
    }
}
