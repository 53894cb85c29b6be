//! Type definitions for the risk prediction workflow

pub mod patient;
pub mod prediction;

pub use patient::{LabeledRecord, PatientRecord};
pub use prediction::{PredictionResult, RiskLabel, RiskThresholds};
