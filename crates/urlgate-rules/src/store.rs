//! Versioned domain set with reader/writer locking

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// A mutable set of normalized (lowercase) domains.
///
/// Membership checks take a read lock; insertions take a write lock, so
/// concurrent lookups stay safe against operator mutations. The version
/// counter bumps once per effective insertion.
pub struct DomainSet {
    domains: RwLock<HashSet<String>>,
    version: AtomicU64,
}

impl DomainSet {
    /// Create empty set
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(HashSet::new()),
            version: AtomicU64::new(0),
        }
    }

    /// Create with initial domains (normalized to lowercase)
    pub fn with_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = domains
            .into_iter()
            .map(|d| d.as_ref().to_ascii_lowercase())
            .collect();
        Self {
            domains: RwLock::new(set),
            version: AtomicU64::new(1),
        }
    }

    /// Insert a domain. Idempotent: returns true only if the domain was
    /// not already present.
    pub fn insert(&self, domain: &str) -> bool {
        let normalized = domain.to_ascii_lowercase();
        let added = self.domains.write().insert(normalized);
        if added {
            self.version.fetch_add(1, Ordering::Release);
        }
        added
    }

    /// Exact membership check against the lowercased domain
    #[inline]
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.read().contains(&domain.to_ascii_lowercase())
    }

    /// Number of domains in the set
    pub fn len(&self) -> usize {
        self.domains.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.domains.read().is_empty()
    }

    /// Current version (bumped per effective mutation)
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl Default for DomainSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let set = DomainSet::new();
        assert!(set.insert("evil.com"));
        assert!(!set.insert("evil.com"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.version(), 1);
    }

    #[test]
    fn test_case_normalization() {
        let set = DomainSet::new();
        set.insert("Evil.COM");
        assert!(set.contains("evil.com"));
        assert!(set.contains("EVIL.com"));
        assert!(!set.insert("evil.com"));
    }

    #[test]
    fn test_with_domains() {
        let set = DomainSet::with_domains(["a.com", "b.com", "a.com"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a.com"));
        assert!(!set.contains("c.com"));
    }
}
