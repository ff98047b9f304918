//! urlgate Common - Shared types for the URL safety gateway
//!
//! This crate provides the primitives every other urlgate crate builds on:
//! - The three-way classification verdict
//! - The error taxonomy
//! - URL parsing and validation helpers
//! - Timing and counter primitives for statistics

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod url;
pub mod verdict;

pub use error::*;
pub use self::url::*;
pub use verdict::*;

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic nanosecond timestamp for request timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Get current timestamp (nanoseconds since epoch)
    #[inline(always)]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self(nanos)
    }

    /// Get nanoseconds value
    #[inline(always)]
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Duration since this timestamp in microseconds
    #[inline(always)]
    pub fn elapsed_micros(&self) -> u64 {
        Self::now().0.saturating_sub(self.0) / 1000
    }
}

/// Lock-free counter for lookup statistics
#[derive(Debug, Default)]
pub struct AtomicCounter(AtomicU64);

impl AtomicCounter {
    /// Create new counter
    pub const fn new(value: u64) -> Self {
        Self(AtomicU64::new(value))
    }

    /// Increment and return previous value
    #[inline(always)]
    pub fn inc(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Get current value
    #[inline(always)]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
