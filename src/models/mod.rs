//! Risk model components

pub mod forest;
pub mod inference;

pub use forest::{FeatureImportance, RandomForest};
pub use inference::{RiskClassifier, TrainedModel};
