//! Logistic-regression URL classifier
//!
//! Training fits a binary linear classifier by batch gradient descent on
//! log-loss, over features standardized with statistics from the training
//! partition. A seeded shuffle carves out a holdout partition whose
//! accuracy is reported after every fit; accuracy never gates training
//! success.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;

use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_SET_VERSION};
use crate::model::{sigmoid, LinearModel};
use urlgate_common::{GateError, GateResult};

/// Binary class of a labeled URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Legitimate URL (stored as 0)
    Benign,
    /// Malicious URL (stored as 1)
    Malicious,
}

impl Label {
    /// Parse from the 0/1 encoding used in labeled datasets
    pub fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(Label::Benign),
            1 => Some(Label::Malicious),
            _ => None,
        }
    }

    /// The 0/1 encoding used in labeled datasets
    pub fn as_bit(&self) -> u8 {
        match self {
            Label::Benign => 0,
            Label::Malicious => 1,
        }
    }

    /// Whether this is the malicious class
    pub fn is_malicious(&self) -> bool {
        matches!(self, Label::Malicious)
    }
}

/// Training hyperparameters
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Gradient-descent epochs
    pub epochs: usize,
    /// Gradient-descent step size (features are standardized first)
    pub learning_rate: f64,
    /// L2 regularization strength
    pub l2: f64,
    /// Fraction of samples held out for accuracy reporting
    pub holdout_ratio: f64,
    /// Shuffle seed, fixed for reproducible splits
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.5,
            l2: 1e-4,
            holdout_ratio: 0.2,
            seed: 42,
        }
    }
}

/// Outcome of a training run
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Total labeled samples supplied
    pub samples: usize,
    /// Samples used for fitting
    pub train_samples: usize,
    /// Samples held out for evaluation (0 for tiny inputs)
    pub holdout_samples: usize,
    /// Accuracy over the holdout partition (over the training partition
    /// when no holdout was possible)
    pub holdout_accuracy: f64,
    /// Final mean log-loss over the training partition
    pub final_loss: f64,
}

/// Trainable logistic-regression classifier over URL feature vectors.
///
/// Untrained until a successful `train` or `load`; `predict` fails with
/// `NotTrained` before that point rather than returning garbage.
pub struct UrlClassifier {
    model: Option<LinearModel>,
    options: TrainOptions,
}

impl UrlClassifier {
    /// Create an untrained classifier with default hyperparameters
    pub fn new() -> Self {
        Self {
            model: None,
            options: TrainOptions::default(),
        }
    }

    /// Create an untrained classifier with custom hyperparameters
    pub fn with_options(options: TrainOptions) -> Self {
        Self {
            model: None,
            options,
        }
    }

    /// Whether a model is available for prediction
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Current model parameters, if trained
    pub fn model(&self) -> Option<&LinearModel> {
        self.model.as_ref()
    }

    /// Fit the classifier on labeled feature vectors.
    ///
    /// Fails with `InvalidInput` when `features` and `labels` differ in
    /// length or are empty. On success the classifier becomes trained and
    /// the holdout accuracy is logged and returned.
    pub fn train(
        &mut self,
        features: &[FeatureVector],
        labels: &[Label],
    ) -> GateResult<TrainReport> {
        if features.len() != labels.len() {
            return Err(GateError::InvalidInput(format!(
                "feature/label length mismatch: {} vs {}",
                features.len(),
                labels.len()
            )));
        }
        if features.is_empty() {
            return Err(GateError::InvalidInput("empty training set".to_string()));
        }

        let n = features.len();
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.options.seed);
        indices.shuffle(&mut rng);

        // Holdout partition shrinks for tiny inputs so at least one
        // sample always trains
        let mut holdout_len = (n as f64 * self.options.holdout_ratio).round() as usize;
        if holdout_len >= n {
            holdout_len = n - 1;
        }
        let (holdout_idx, train_idx) = indices.split_at(holdout_len);

        let (means, scales) = standardization_stats(features, train_idx);
        let train_x: Vec<[f64; FEATURE_COUNT]> = train_idx
            .iter()
            .map(|&i| standardize(&features[i], &means, &scales))
            .collect();
        let train_y: Vec<f64> = train_idx
            .iter()
            .map(|&i| labels[i].as_bit() as f64)
            .collect();

        let (weights, bias) = fit_logistic(&train_x, &train_y, &self.options);

        // Mean log-loss over the training partition
        let final_loss = train_x
            .iter()
            .zip(&train_y)
            .map(|(x, y)| {
                let p = sigmoid(dot(&weights, x) + bias).clamp(1e-12, 1.0 - 1e-12);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum::<f64>()
            / train_x.len() as f64;

        let model = LinearModel {
            feature_version: FEATURE_SET_VERSION,
            weights,
            bias,
            means,
            scales,
        };

        // Evaluate on the holdout, or on the training partition when the
        // input was too small to hold anything out
        let eval_idx = if holdout_idx.is_empty() {
            train_idx
        } else {
            holdout_idx
        };
        let correct = eval_idx
            .iter()
            .filter(|&&i| {
                let predicted = model.probability(&features[i]) >= 0.5;
                predicted == labels[i].is_malicious()
            })
            .count();
        let holdout_accuracy = correct as f64 / eval_idx.len() as f64;

        tracing::info!(
            samples = n,
            train_samples = train_idx.len(),
            holdout_samples = holdout_idx.len(),
            accuracy = holdout_accuracy,
            "model trained"
        );

        self.model = Some(model);

        Ok(TrainReport {
            samples: n,
            train_samples: train_idx.len(),
            holdout_samples: holdout_idx.len(),
            holdout_accuracy,
            final_loss,
        })
    }

    /// Predict the class of a feature vector (probability thresholded
    /// at 0.5)
    pub fn predict(&self, features: &FeatureVector) -> GateResult<Label> {
        let p = self.predict_proba(features)?;
        Ok(if p >= 0.5 {
            Label::Malicious
        } else {
            Label::Benign
        })
    }

    /// Predicted probability that the URL is malicious
    pub fn predict_proba(&self, features: &FeatureVector) -> GateResult<f64> {
        let model = self.model.as_ref().ok_or(GateError::NotTrained)?;
        Ok(model.probability(features))
    }

    /// Persist the trained model to a file
    pub fn save(&self, path: &Path) -> GateResult<()> {
        let model = self.model.as_ref().ok_or(GateError::NotTrained)?;
        model.save(path)
    }

    /// Load a persisted model, replacing any current one. The classifier
    /// is trained afterwards.
    pub fn load(&mut self, path: &Path) -> GateResult<()> {
        self.model = Some(LinearModel::load(path)?);
        Ok(())
    }
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-feature mean and scale over the training partition. Constant
/// features get scale 1.0 so standardization stays well-defined.
fn standardization_stats(
    features: &[FeatureVector],
    train_idx: &[usize],
) -> (Vec<f64>, Vec<f64>) {
    let n = train_idx.len() as f64;
    let mut means = vec![0.0; FEATURE_COUNT];
    for &i in train_idx {
        for (m, x) in means.iter_mut().zip(features[i].as_slice()) {
            *m += x;
        }
    }
    for m in &mut means {
        *m /= n;
    }

    let mut scales = vec![0.0; FEATURE_COUNT];
    for &i in train_idx {
        for (s, (x, m)) in scales
            .iter_mut()
            .zip(features[i].as_slice().iter().zip(&means))
        {
            *s += (x - m) * (x - m);
        }
    }
    for s in &mut scales {
        let std = (*s / n).sqrt();
        *s = if std > 1e-9 { std } else { 1.0 };
    }

    (means, scales)
}

fn standardize(
    features: &FeatureVector,
    means: &[f64],
    scales: &[f64],
) -> [f64; FEATURE_COUNT] {
    let mut out = [0.0; FEATURE_COUNT];
    for (i, x) in features.as_slice().iter().enumerate() {
        out[i] = (x - means[i]) / scales[i];
    }
    out
}

/// Batch gradient descent on log-loss with L2 regularization
fn fit_logistic(
    train_x: &[[f64; FEATURE_COUNT]],
    train_y: &[f64],
    options: &TrainOptions,
) -> (Vec<f64>, f64) {
    let n = train_x.len() as f64;
    let mut weights = vec![0.0; FEATURE_COUNT];
    let mut bias = 0.0;

    for _ in 0..options.epochs {
        let mut grad_w = vec![0.0; FEATURE_COUNT];
        let mut grad_b = 0.0;

        for (x, y) in train_x.iter().zip(train_y) {
            let err = sigmoid(dot(&weights, x) + bias) - y;
            for (g, xi) in grad_w.iter_mut().zip(x) {
                *g += err * xi;
            }
            grad_b += err;
        }

        for (w, g) in weights.iter_mut().zip(&grad_w) {
            *w -= options.learning_rate * (g / n + options.l2 * *w);
        }
        bias -= options.learning_rate * grad_b / n;
    }

    (weights, bias)
}

#[inline]
fn dot(a: &[f64], b: &[f64; FEATURE_COUNT]) -> f64 {
    a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum()
}
