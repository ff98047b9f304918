//! Verification pipeline: rules first, model fallback

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use urlgate_common::{is_valid_url, AtomicCounter, GateError, GateResult, Verdict};
use urlgate_ml::{
    FeatureExtractor, FeatureVector, Label, LabeledDataset, TrainReport, UrlClassifier,
};
use urlgate_rules::RuleVerifier;

/// The verification pipeline.
///
/// Owns one rule verifier, one classifier slot, and one feature extractor,
/// constructed once at process start and shared across request handlers.
/// `classify` takes a read lock on the classifier; `train` and
/// `load_model` take the write lock, so model swaps serialize against
/// in-flight classifications.
pub struct VerdictPipeline {
    rules: Arc<RuleVerifier>,
    classifier: RwLock<UrlClassifier>,
    extractor: FeatureExtractor,

    // Metrics
    classified: AtomicCounter,
    rule_verdicts: AtomicCounter,
    model_verdicts: AtomicCounter,
    degraded: AtomicCounter,
}

impl VerdictPipeline {
    /// Create a pipeline with empty lists and an untrained classifier
    pub fn new() -> Self {
        Self::with_components(Arc::new(RuleVerifier::new()), UrlClassifier::new())
    }

    /// Create a pipeline with the built-in seed lists
    pub fn with_seed_lists() -> Self {
        Self::with_components(Arc::new(RuleVerifier::with_seed_lists()), UrlClassifier::new())
    }

    /// Create a pipeline from pre-built components
    pub fn with_components(rules: Arc<RuleVerifier>, classifier: UrlClassifier) -> Self {
        Self {
            rules,
            classifier: RwLock::new(classifier),
            extractor: FeatureExtractor::new(),
            classified: AtomicCounter::new(0),
            rule_verdicts: AtomicCounter::new(0),
            model_verdicts: AtomicCounter::new(0),
            degraded: AtomicCounter::new(0),
        }
    }

    /// Classify a URL.
    ///
    /// Fails only for invalid input (missing scheme or host). Rule
    /// verdicts take precedence over the model; a prediction failure in
    /// the fallback step degrades to `Unknown` rather than propagating.
    pub fn classify(&self, url: &str) -> GateResult<Verdict> {
        if !is_valid_url(url) {
            return Err(GateError::InvalidUrl(url.to_string()));
        }
        self.classified.inc();

        // Fast path: curated lists are trusted more than the model
        let verdict = self.rules.verify(url);
        if verdict.is_conclusive() {
            self.rule_verdicts.inc();
            return Ok(verdict);
        }

        let classifier = self.classifier.read();
        if !classifier.is_trained() {
            return Ok(Verdict::Unknown);
        }

        // Narrow degrade path: only the extract+predict step is caught
        let features = self.extractor.extract(url);
        match classifier.predict(&features) {
            Ok(Label::Malicious) => {
                self.model_verdicts.inc();
                Ok(Verdict::Malicious)
            }
            Ok(Label::Benign) => {
                self.model_verdicts.inc();
                Ok(Verdict::Safe)
            }
            Err(e) => {
                self.degraded.inc();
                tracing::warn!(url, error = %e, "prediction failed, degrading to unknown");
                Ok(Verdict::Unknown)
            }
        }
    }

    /// Whether the fallback classifier is trained
    pub fn is_trained(&self) -> bool {
        self.classifier.read().is_trained()
    }

    /// Train the fallback classifier on labeled feature vectors
    pub fn train(
        &self,
        features: &[FeatureVector],
        labels: &[Label],
    ) -> GateResult<TrainReport> {
        self.classifier.write().train(features, labels)
    }

    /// Extract features for a labeled dataset and train on them
    pub fn train_from_dataset(&self, dataset: &LabeledDataset) -> GateResult<TrainReport> {
        let features = dataset.feature_matrix(&self.extractor);
        self.train(&features, &dataset.labels)
    }

    /// Persist the current model artifact
    pub fn save_model(&self, path: &Path) -> GateResult<()> {
        self.classifier.read().save(path)
    }

    /// Load a persisted model artifact, replacing the current model
    pub fn load_model(&self, path: &Path) -> GateResult<()> {
        self.classifier.write().load(path)
    }

    /// The shared rule verifier
    pub fn rules(&self) -> &Arc<RuleVerifier> {
        &self.rules
    }

    /// Add a domain to the blacklist. Returns true if newly added.
    pub fn add_to_blacklist(&self, domain: &str) -> bool {
        self.rules.add_to_blacklist(domain)
    }

    /// Add a domain to the whitelist. Returns true if newly added.
    pub fn add_to_whitelist(&self, domain: &str) -> bool {
        self.rules.add_to_whitelist(domain)
    }

    /// Get pipeline statistics
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            classified: self.classified.get(),
            rule_verdicts: self.rule_verdicts.get(),
            model_verdicts: self.model_verdicts.get(),
            degraded: self.degraded.get(),
            model_trained: self.is_trained(),
        }
    }
}

impl Default for VerdictPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineStats {
    /// Valid URLs classified
    pub classified: u64,
    /// Verdicts decided by the curated lists
    pub rule_verdicts: u64,
    /// Verdicts decided by the model fallback
    pub model_verdicts: u64,
    /// Fallback failures degraded to unknown
    pub degraded: u64,
    /// Whether a trained model is currently loaded
    pub model_trained: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Labeled URLs with cleanly separated lexical shapes
    fn training_dataset() -> LabeledDataset {
        let mut urls = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            urls.push(format!(
                "http://secure-login-verify{i}234.example/free-prize?win={i}"
            ));
            labels.push(Label::Malicious);

            urls.push(format!("https://github.com/rust-lang/repo{i}"));
            labels.push(Label::Benign);
        }
        LabeledDataset { urls, labels }
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let pipeline = VerdictPipeline::with_seed_lists();
        assert!(matches!(
            pipeline.classify("not-a-url"),
            Err(GateError::InvalidUrl(_))
        ));
        assert!(matches!(
            pipeline.classify(""),
            Err(GateError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_seeded_lists_decide() {
        let pipeline = VerdictPipeline::with_seed_lists();
        assert_eq!(
            pipeline.classify("https://example-malicious-site.com/x").unwrap(),
            Verdict::Malicious
        );
        assert_eq!(
            pipeline.classify("https://trusted-news-site.com/y").unwrap(),
            Verdict::Safe
        );
    }

    #[test]
    fn test_untrained_model_yields_unknown() {
        let pipeline = VerdictPipeline::with_seed_lists();
        assert_eq!(
            pipeline.classify("https://totally-unseen-domain.xyz").unwrap(),
            Verdict::Unknown
        );
    }

    #[test]
    fn test_model_fallback_decides_unknown_domains() {
        let pipeline = VerdictPipeline::with_seed_lists();
        let report = pipeline.train_from_dataset(&training_dataset()).unwrap();
        assert!(report.holdout_accuracy > 0.9);

        // Unseen domains, so the lists stay silent and the model decides
        assert_eq!(
            pipeline
                .classify("http://account-update-verify9876.example/free-gift?lucky=1")
                .unwrap(),
            Verdict::Malicious
        );
        assert_eq!(
            pipeline.classify("https://docs.github.com/en/actions").unwrap(),
            Verdict::Safe
        );
    }

    #[test]
    fn test_rules_win_over_model() {
        let pipeline = VerdictPipeline::with_seed_lists();
        pipeline.train_from_dataset(&training_dataset()).unwrap();

        // The model would call this one safe; blacklisting must override
        pipeline.add_to_blacklist("docs.github.com");
        assert_eq!(
            pipeline.classify("https://docs.github.com/en/actions").unwrap(),
            Verdict::Malicious
        );

        // And whitelisting must override a malicious-looking URL
        pipeline.add_to_whitelist("secure-login-verify1234.example");
        assert_eq!(
            pipeline
                .classify("http://secure-login-verify1234.example/free-prize?win=1")
                .unwrap(),
            Verdict::Safe
        );
    }

    #[test]
    fn test_list_additions_take_effect_immediately() {
        let pipeline = VerdictPipeline::new();
        assert_eq!(
            pipeline.classify("https://fresh.example").unwrap(),
            Verdict::Unknown
        );
        pipeline.add_to_blacklist("fresh.example");
        assert_eq!(
            pipeline.classify("https://fresh.example").unwrap(),
            Verdict::Malicious
        );
    }

    #[test]
    fn test_model_round_trips_through_disk() {
        let pipeline = VerdictPipeline::with_seed_lists();
        pipeline.train_from_dataset(&training_dataset()).unwrap();

        let path = std::env::temp_dir().join(format!(
            "urlgate-pipeline-model-{}.json",
            std::process::id()
        ));
        pipeline.save_model(&path).unwrap();

        let restored = VerdictPipeline::with_seed_lists();
        assert!(!restored.is_trained());
        restored.load_model(&path).unwrap();
        assert!(restored.is_trained());

        let url = "http://secure-login-verify0000.example/free-prize?win=0";
        assert_eq!(
            pipeline.classify(url).unwrap(),
            restored.classify(url).unwrap()
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_stats_reflect_decision_paths() {
        let pipeline = VerdictPipeline::with_seed_lists();
        let _ = pipeline.classify("https://example-malicious-site.com/x");
        let _ = pipeline.classify("https://nobody-knows-me.example");
        let _ = pipeline.classify("not-a-url");

        let stats = pipeline.stats();
        assert_eq!(stats.classified, 2); // invalid URL never counts
        assert_eq!(stats.rule_verdicts, 1);
        assert_eq!(stats.model_verdicts, 0);
        assert!(!stats.model_trained);
    }
}
