//! urlgate Verify - the URL verification pipeline
//!
//! Composes the curated-list verifier with the statistical classifier into
//! the three-way decision every caller consumes:
//!
//! 1. Reject URLs without a scheme or host (`InvalidUrl`)
//! 2. Blacklist/whitelist lookup; a list hit is final
//! 3. Otherwise fall back to the trained model, if there is one
//! 4. Otherwise report `Unknown`
//!
//! A classification request never hard-fails on a classifier hiccup: the
//! fallback step degrades to `Unknown` instead.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pipeline;

pub use pipeline::{PipelineStats, VerdictPipeline};
