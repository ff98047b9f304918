//! Serializable linear model
//!
//! The trained artifact is a logistic decision rule over standardized
//! features: `p = sigmoid(w · (x - mean) / scale + b)`. Standardization
//! parameters are computed during training and stored inside the model so
//! training and prediction can never apply different scalings.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_SET_VERSION};
use urlgate_common::{GateError, GateResult};

/// Logistic-regression parameters, persisted as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// Feature-set version this model was trained against
    pub feature_version: u32,
    /// Weight vector (length = FEATURE_COUNT)
    pub weights: Vec<f64>,
    /// Bias (intercept) term
    pub bias: f64,
    /// Per-feature means from the training partition
    pub means: Vec<f64>,
    /// Per-feature scales from the training partition (always > 0)
    pub scales: Vec<f64>,
}

impl LinearModel {
    /// Predicted probability that the URL behind `features` is malicious
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let mut z = self.bias;
        for (i, (w, x)) in self.weights.iter().zip(features.as_slice()).enumerate() {
            z += w * (x - self.means[i]) / self.scales[i];
        }
        sigmoid(z)
    }

    /// Validate that the model is structurally sound and matches the
    /// running feature set
    pub fn validate(&self) -> GateResult<()> {
        if self.feature_version != FEATURE_SET_VERSION {
            return Err(GateError::CorruptModel(format!(
                "feature version mismatch: model has {}, extractor has {}",
                self.feature_version, FEATURE_SET_VERSION
            )));
        }
        if self.weights.len() != FEATURE_COUNT {
            return Err(GateError::CorruptModel(format!(
                "weight dimension mismatch: expected {}, got {}",
                FEATURE_COUNT,
                self.weights.len()
            )));
        }
        if self.means.len() != FEATURE_COUNT || self.scales.len() != FEATURE_COUNT {
            return Err(GateError::CorruptModel(
                "standardization dimension mismatch".to_string(),
            ));
        }
        for (i, &w) in self.weights.iter().enumerate() {
            if !w.is_finite() {
                return Err(GateError::CorruptModel(format!(
                    "non-finite weight at index {i}: {w}"
                )));
            }
        }
        if !self.bias.is_finite() {
            return Err(GateError::CorruptModel(format!(
                "non-finite bias: {}",
                self.bias
            )));
        }
        for (i, &s) in self.scales.iter().enumerate() {
            if !s.is_finite() || s <= 0.0 {
                return Err(GateError::CorruptModel(format!(
                    "invalid scale at index {i}: {s}"
                )));
            }
        }
        if self.means.iter().any(|m| !m.is_finite()) {
            return Err(GateError::CorruptModel("non-finite mean".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a model from JSON
    pub fn from_json(json: &str) -> GateResult<Self> {
        let model: Self =
            serde_json::from_str(json).map_err(|e| GateError::CorruptModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> GateResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GateError::CorruptModel(e.to_string()))
    }

    /// Write the model artifact to a file
    pub fn save(&self, path: &Path) -> GateResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load and validate a model artifact from a file
    pub fn load(path: &Path) -> GateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Numerically stable logistic sigmoid
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}
