//! urlgate Rules - curated domain list verification
//!
//! The deterministic half of the verification pipeline: exact-match host
//! lookups against operator-curated blacklist and whitelist sets. Rule
//! verdicts take precedence over the statistical model, so these lists are
//! the place to pin known-bad and known-good domains.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod store;

pub use engine::{RuleStats, RuleVerifier};
pub use store::DomainSet;
