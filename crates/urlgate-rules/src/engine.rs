//! Rule verifier: blacklist-before-whitelist host lookup

use crate::store::DomainSet;
use urlgate_common::{extract_domain, AtomicCounter, Verdict};

/// Deterministic rule-based URL verifier.
///
/// Extracts the host of a URL and checks the blacklist first, then the
/// whitelist. A host on neither list yields `Verdict::Unknown`, which is
/// the signal for callers to fall back to the statistical model.
///
/// List mutations are idempotent and only affect subsequent `verify`
/// calls; prior verdicts are never re-evaluated.
pub struct RuleVerifier {
    blacklist: DomainSet,
    whitelist: DomainSet,

    // Metrics
    lookups: AtomicCounter,
    blacklist_hits: AtomicCounter,
    whitelist_hits: AtomicCounter,
}

impl RuleVerifier {
    /// Create verifier with empty lists
    pub fn new() -> Self {
        Self {
            blacklist: DomainSet::new(),
            whitelist: DomainSet::new(),
            lookups: AtomicCounter::new(0),
            blacklist_hits: AtomicCounter::new(0),
            whitelist_hits: AtomicCounter::new(0),
        }
    }

    /// Create verifier seeded with the built-in starter lists
    pub fn with_seed_lists() -> Self {
        Self {
            blacklist: DomainSet::with_domains(["example-malicious-site.com", "phishing.com"]),
            whitelist: DomainSet::with_domains(["trusted-news-site.com", "official-government.com"]),
            lookups: AtomicCounter::new(0),
            blacklist_hits: AtomicCounter::new(0),
            whitelist_hits: AtomicCounter::new(0),
        }
    }

    /// Verify a URL against the current lists.
    ///
    /// Blacklist membership wins over whitelist membership, so a domain
    /// present on both is reported malicious.
    pub fn verify(&self, url: &str) -> Verdict {
        self.lookups.inc();
        let domain = extract_domain(url);

        if self.blacklist.contains(&domain) {
            self.blacklist_hits.inc();
            return Verdict::Malicious;
        }
        if self.whitelist.contains(&domain) {
            self.whitelist_hits.inc();
            return Verdict::Safe;
        }
        Verdict::Unknown
    }

    /// Add a domain to the blacklist. Returns true if newly added.
    pub fn add_to_blacklist(&self, domain: &str) -> bool {
        let added = self.blacklist.insert(domain);
        if added {
            tracing::info!(domain, "domain blacklisted");
        }
        added
    }

    /// Add a domain to the whitelist. Returns true if newly added.
    pub fn add_to_whitelist(&self, domain: &str) -> bool {
        let added = self.whitelist.insert(domain);
        if added {
            tracing::info!(domain, "domain whitelisted");
        }
        added
    }

    /// Get verifier statistics
    pub fn stats(&self) -> RuleStats {
        RuleStats {
            lookups: self.lookups.get(),
            blacklist_hits: self.blacklist_hits.get(),
            whitelist_hits: self.whitelist_hits.get(),
            blacklist_size: self.blacklist.len(),
            whitelist_size: self.whitelist.len(),
            list_version: self.blacklist.version() + self.whitelist.version(),
        }
    }
}

impl Default for RuleVerifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Rule verifier statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuleStats {
    /// Total verify calls
    pub lookups: u64,
    /// Verdicts decided by the blacklist
    pub blacklist_hits: u64,
    /// Verdicts decided by the whitelist
    pub whitelist_hits: u64,
    /// Current blacklist size
    pub blacklist_size: usize,
    /// Current whitelist size
    pub whitelist_size: usize,
    /// Combined list version, bumped per mutation
    pub list_version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_lists() {
        let verifier = RuleVerifier::with_seed_lists();

        assert_eq!(
            verifier.verify("https://example-malicious-site.com/path"),
            Verdict::Malicious
        );
        assert_eq!(
            verifier.verify("https://trusted-news-site.com/article"),
            Verdict::Safe
        );
        assert_eq!(verifier.verify("https://unknown-site.com"), Verdict::Unknown);
    }

    #[test]
    fn test_runtime_additions_take_effect() {
        let verifier = RuleVerifier::new();
        assert_eq!(verifier.verify("https://new-malicious.com"), Verdict::Unknown);

        verifier.add_to_blacklist("new-malicious.com");
        assert_eq!(verifier.verify("https://new-malicious.com"), Verdict::Malicious);

        verifier.add_to_whitelist("new-trusted.com");
        assert_eq!(verifier.verify("https://new-trusted.com"), Verdict::Safe);
    }

    #[test]
    fn test_blacklist_wins_over_whitelist() {
        let verifier = RuleVerifier::new();
        verifier.add_to_whitelist("both.com");
        verifier.add_to_blacklist("both.com");
        assert_eq!(verifier.verify("https://both.com"), Verdict::Malicious);
    }

    #[test]
    fn test_add_is_idempotent() {
        let verifier = RuleVerifier::new();
        assert!(verifier.add_to_blacklist("dup.com"));
        assert!(!verifier.add_to_blacklist("dup.com"));
        assert_eq!(verifier.stats().blacklist_size, 1);
    }

    #[test]
    fn test_host_matching_ignores_case() {
        let verifier = RuleVerifier::new();
        verifier.add_to_blacklist("Mixed-Case.COM");
        assert_eq!(verifier.verify("https://mixed-case.com/x"), Verdict::Malicious);
    }

    #[test]
    fn test_unparseable_url_is_unknown() {
        let verifier = RuleVerifier::with_seed_lists();
        assert_eq!(verifier.verify("not-a-url"), Verdict::Unknown);
    }

    #[test]
    fn test_stats_counters() {
        let verifier = RuleVerifier::with_seed_lists();
        let _ = verifier.verify("https://example-malicious-site.com/a");
        let _ = verifier.verify("https://trusted-news-site.com/b");
        let _ = verifier.verify("https://nobody.example");

        let stats = verifier.stats();
        assert_eq!(stats.lookups, 3);
        assert_eq!(stats.blacklist_hits, 1);
        assert_eq!(stats.whitelist_hits, 1);
        assert_eq!(stats.blacklist_size, 2);
        assert_eq!(stats.whitelist_size, 2);
    }
}
