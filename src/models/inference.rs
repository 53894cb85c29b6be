//! Process-wide risk classifier with one-time training

use crate::config::AppConfig;
use crate::dataset::{Corpus, SyntheticGenerator};
use crate::error::{Error, Result};
use crate::models::forest::{FeatureImportance, RandomForest};
use crate::types::patient::PatientRecord;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

/// Fitted forest together with the corpus it was trained on
#[derive(Debug)]
pub struct TrainedModel {
    pub corpus: Corpus,
    pub forest: RandomForest,
}

impl TrainedModel {
    /// Generate the corpus and fit the forest
    pub fn train(config: &AppConfig) -> Result<Self> {
        let start = Instant::now();
        let corpus = SyntheticGenerator::from_config(&config.data).generate();
        let forest = RandomForest::fit(corpus.rows(), &config.model)?;

        info!(
            samples = corpus.len(),
            trees = forest.tree_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Risk model trained"
        );

        Ok(Self { corpus, forest })
    }

    pub fn predict_proba(&self, record: &PatientRecord) -> f64 {
        self.forest.predict_proba(record)
    }

    pub fn feature_importances(&self) -> Vec<FeatureImportance> {
        self.forest.feature_importances()
    }
}

/// Lazily trained classifier shared by every prediction in the process.
///
/// Training runs at most once, on the first `ensure_trained` call. After
/// that the model is read-only and is never retrained.
pub struct RiskClassifier {
    config: AppConfig,
    model: OnceLock<TrainedModel>,
}

impl RiskClassifier {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            model: OnceLock::new(),
        }
    }

    /// Train on first call; later calls return the cached model
    pub fn ensure_trained(&self) -> Result<&TrainedModel> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        let model = TrainedModel::train(&self.config)?;
        Ok(self.model.get_or_init(|| model))
    }

    /// The trained model, or `Error::ModelNotTrained` if training has not run
    pub fn trained(&self) -> Result<&TrainedModel> {
        self.model.get().ok_or(Error::ModelNotTrained)
    }

    pub fn is_trained(&self) -> bool {
        self.model.get().is_some()
    }

    /// Positive-class probability. Fails if the model is not trained.
    pub fn predict_proba(&self, record: &PatientRecord) -> Result<f64> {
        Ok(self.trained()?.predict_proba(record))
    }

    pub fn feature_importances(&self) -> Result<Vec<FeatureImportance>> {
        Ok(self.trained()?.feature_importances())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.model.n_trees = 10;
        config
    }

    #[test]
    fn test_untrained_classifier_refuses_to_predict() {
        let classifier = RiskClassifier::new(test_config());

        assert!(!classifier.is_trained());
        assert!(matches!(
            classifier.predict_proba(&PatientRecord::default()),
            Err(Error::ModelNotTrained)
        ));
        assert!(matches!(
            classifier.feature_importances(),
            Err(Error::ModelNotTrained)
        ));
    }

    #[test]
    fn test_ensure_trained_caches_model() {
        let classifier = RiskClassifier::new(test_config());

        let first = classifier.ensure_trained().unwrap() as *const TrainedModel;
        let second = classifier.ensure_trained().unwrap() as *const TrainedModel;

        assert!(classifier.is_trained());
        assert_eq!(first, second);
        assert_eq!(classifier.trained().unwrap().corpus.len(), 300);
    }

    #[test]
    fn test_trained_classifier_predicts() {
        let classifier = RiskClassifier::new(test_config());
        classifier.ensure_trained().unwrap();

        let p = classifier.predict_proba(&PatientRecord::default()).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
}
