//! Medical Risk Analyst Library
//!
//! Trains a random forest risk classifier on a seeded synthetic patient
//! corpus, labels predictions as low, medium or high risk, and keeps a
//! per-session history that can be exported as CSV.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod export;
pub mod feature_extractor;
pub mod history;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod types;
pub mod upload;

pub use config::AppConfig;
pub use dataset::{Corpus, SyntheticGenerator};
pub use error::{Error, Result};
pub use export::{to_table, Export, ExportKind};
pub use feature_extractor::FeatureExtractor;
pub use history::HistoryLog;
pub use models::inference::RiskClassifier;
pub use pipeline::PredictionPipeline;
pub use session::Session;
pub use types::{LabeledRecord, PatientRecord, PredictionResult, RiskLabel, RiskThresholds};
