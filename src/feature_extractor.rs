//! Feature extraction for risk model training and inference.
//!
//! Training and prediction both go through this module so the feature
//! order cannot drift between them.

use crate::types::patient::PatientRecord;

/// Number of features fed to the model
pub const FEATURE_COUNT: usize = 4;

/// Feature names, in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["Age", "BloodPressure", "Glucose", "BMI"];

/// Model input row
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Feature extractor that transforms patient records into model input features.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a patient record.
    pub fn extract(&self, record: &PatientRecord) -> FeatureVector {
        [
            record.age as f64,
            record.blood_pressure as f64,
            record.glucose as f64,
            record.bmi,
        ]
    }

    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
