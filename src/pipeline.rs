//! Prediction pipeline: probability, then label, then result

use crate::error::Result;
use crate::models::inference::RiskClassifier;
use crate::types::patient::PatientRecord;
use crate::types::prediction::{PredictionResult, RiskLabel, RiskThresholds};
use tracing::debug;

/// Runs a patient record through the trained classifier and labels it.
pub struct PredictionPipeline<'a> {
    classifier: &'a RiskClassifier,
    thresholds: RiskThresholds,
}

impl<'a> PredictionPipeline<'a> {
    /// Pipeline using the thresholds from the classifier's configuration
    pub fn new(classifier: &'a RiskClassifier) -> Self {
        Self::with_thresholds(classifier, classifier.config().risk)
    }

    pub fn with_thresholds(classifier: &'a RiskClassifier, thresholds: RiskThresholds) -> Self {
        Self {
            classifier,
            thresholds,
        }
    }

    /// Predict the risk for one record.
    ///
    /// Fails with `Error::ModelNotTrained` when called before
    /// `RiskClassifier::ensure_trained`. Values are passed to the model
    /// as-is; range checks belong to the caller.
    pub fn predict_risk(&self, record: &PatientRecord) -> Result<PredictionResult> {
        let probability = self.classifier.predict_proba(record)?;
        let risk_label = self.classify(probability);

        debug!(
            age = record.age,
            blood_pressure = record.blood_pressure,
            glucose = record.glucose,
            bmi = record.bmi,
            probability,
            risk_label = ?risk_label,
            "Risk predicted"
        );

        Ok(PredictionResult::new(*record, probability, risk_label))
    }

    pub fn classify(&self, probability: f64) -> RiskLabel {
        RiskLabel::from_probability(probability, &self.thresholds)
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::Error;

    fn trained_classifier() -> RiskClassifier {
        let mut config = AppConfig::default();
        config.model.n_trees = 15;
        let classifier = RiskClassifier::new(config);
        classifier.ensure_trained().unwrap();
        classifier
    }

    #[test]
    fn test_pipeline_requires_training() {
        let classifier = RiskClassifier::new(AppConfig::default());
        let pipeline = PredictionPipeline::new(&classifier);

        let result = pipeline.predict_risk(&PatientRecord::default());
        assert!(matches!(result, Err(Error::ModelNotTrained)));
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let classifier = trained_classifier();
        let pipeline = PredictionPipeline::new(&classifier);
        let record = PatientRecord::new(30, 120, 100, 22.0);

        let first = pipeline.predict_risk(&record).unwrap();
        let second = pipeline.predict_risk(&record).unwrap();

        assert!((0.0..=1.0).contains(&first.probability));
        assert_eq!(first.probability, second.probability);
        assert_eq!(first.risk_label, second.risk_label);
        assert_eq!(first.input, record);
    }

    #[test]
    fn test_label_matches_probability() {
        let classifier = trained_classifier();
        let pipeline = PredictionPipeline::new(&classifier);

        for row in classifier.trained().unwrap().corpus.head(30) {
            let result = pipeline.predict_risk(&row.record).unwrap();
            let expected = if result.probability < 0.4 {
                RiskLabel::Low
            } else if result.probability < 0.7 {
                RiskLabel::Medium
            } else {
                RiskLabel::High
            };
            assert_eq!(result.risk_label, expected);
        }
    }

    #[test]
    fn test_out_of_range_input_passes_through() {
        let classifier = trained_classifier();
        let pipeline = PredictionPipeline::new(&classifier);
        let record = PatientRecord::new(150, 400, 900, 80.0);

        let result = pipeline.predict_risk(&record).unwrap();
        assert_eq!(result.input, record);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = trained_classifier();
        let pipeline = PredictionPipeline::with_thresholds(
            &classifier,
            RiskThresholds {
                medium: 0.0,
                high: 0.0,
            },
        );

        assert_eq!(pipeline.classify(0.0), RiskLabel::High);
    }
}
