//! Patient data structures used for training and live prediction

use serde::{Deserialize, Serialize};

/// Clinical measurements for a single patient.
///
/// No range validation happens here; bounds are a concern of the input
/// surface, not of the record itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years
    #[serde(alias = "Age")]
    pub age: i32,

    /// Blood pressure in mmHg
    #[serde(alias = "BloodPressure", alias = "BP")]
    pub blood_pressure: i32,

    /// Glucose in mg/dL
    #[serde(alias = "Glucose")]
    pub glucose: i32,

    /// Body mass index
    #[serde(alias = "BMI")]
    pub bmi: f64,
}

impl PatientRecord {
    /// Create a new patient record
    pub fn new(age: i32, blood_pressure: i32, glucose: i32, bmi: f64) -> Self {
        Self {
            age,
            blood_pressure,
            glucose,
            bmi,
        }
    }
}

impl Default for PatientRecord {
    /// Starting position of the prediction inputs
    fn default() -> Self {
        Self::new(30, 120, 100, 22.0)
    }
}

/// A patient record with its binary risk label (0 = low, 1 = high).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub record: PatientRecord,
    pub risk: u8,
}

impl LabeledRecord {
    pub fn new(record: PatientRecord, risk: u8) -> Self {
        Self { record, risk }
    }

    /// Whether this row belongs to the positive (high-risk) class
    pub fn is_positive(&self) -> bool {
        self.risk == 1
    }
}
