//! urlgate ML - statistical fallback classifier
//!
//! The learned half of the verification pipeline:
//! - Lexical feature extraction from URL strings (fixed 14-feature set)
//! - Logistic-regression training with a seeded holdout split
//! - Thresholded prediction with a JSON-persisted model artifact
//!
//! The rule verifier always wins over this model; it only decides URLs
//! whose domains sit on neither curated list.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod dataset;
pub mod features;
pub mod model;

pub use classifier::{Label, TrainOptions, TrainReport, UrlClassifier};
pub use dataset::LabeledDataset;
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT, FEATURE_SET_VERSION};
pub use model::LinearModel;
