//! Classification verdict shared by the rule and model paths

use serde::{Deserialize, Serialize};

/// Three-way outcome of classifying a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Domain is whitelisted or the model considers the URL benign
    Safe,
    /// Domain is blacklisted or the model considers the URL malicious
    Malicious,
    /// Neither list matched and no trained model was available
    Unknown,
}

impl Verdict {
    /// Whether this verdict is conclusive (not `Unknown`)
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, Verdict::Unknown)
    }

    /// Stable lowercase name, as used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Malicious => "malicious",
            Verdict::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_names() {
        assert_eq!(Verdict::Safe.to_string(), "safe");
        assert_eq!(Verdict::Malicious.to_string(), "malicious");
        assert_eq!(Verdict::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_verdict_serde() {
        let json = serde_json::to_string(&Verdict::Malicious).unwrap();
        assert_eq!(json, "\"malicious\"");
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Verdict::Malicious);
    }

    #[test]
    fn test_conclusive() {
        assert!(Verdict::Safe.is_conclusive());
        assert!(!Verdict::Unknown.is_conclusive());
    }
}
