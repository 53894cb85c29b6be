//! Prediction result data structures

use crate::types::patient::PatientRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub const ALL: [RiskLabel; 3] = [RiskLabel::Low, RiskLabel::Medium, RiskLabel::High];

    /// Determine risk label from probability and thresholds.
    ///
    /// Each threshold is inclusive for the bucket above it.
    pub fn from_probability(probability: f64, thresholds: &RiskThresholds) -> Self {
        if probability >= thresholds.high {
            RiskLabel::High
        } else if probability >= thresholds.medium {
            RiskLabel::Medium
        } else {
            RiskLabel::Low
        }
    }

    /// Text used in exports and on the console
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "LOW RISK",
            RiskLabel::Medium => "MEDIUM RISK",
            RiskLabel::High => "HIGH RISK",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurable risk label cut points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Lowest probability labelled MEDIUM
    pub medium: f64,
    /// Lowest probability labelled HIGH
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 0.4,
            high: 0.7,
        }
    }
}

/// Outcome of one run through the prediction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Record the prediction was made for
    pub input: PatientRecord,

    /// Probability of the high-risk class (0.0 - 1.0)
    pub probability: f64,

    /// Risk label derived from the probability
    pub risk_label: RiskLabel,

    /// When the prediction was produced
    pub predicted_at: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(input: PatientRecord, probability: f64, risk_label: RiskLabel) -> Self {
        Self {
            input,
            probability,
            risk_label,
            predicted_at: Utc::now(),
        }
    }

    /// Probability expressed as a percentage
    pub fn probability_percent(&self) -> f64 {
        self.probability * 100.0
    }
}

impl PartialEq for PredictionResult {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input
            && self.probability == other.probability
            && self.risk_label == other.risk_label
    }
}
