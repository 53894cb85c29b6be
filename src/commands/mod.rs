//! Command implementations for the CLI

pub mod predict;
pub mod session;
pub mod views;

use std::io::Write;
use std::ops::RangeInclusive;

use anyhow::{bail, Result};
use clap::Args;
use medical_risk_analyst::{PatientRecord, PredictionResult};

/// Input bounds enforced by the front end. The library accepts any value.
pub const AGE_BOUNDS: RangeInclusive<i32> = 18..=80;
pub const BLOOD_PRESSURE_BOUNDS: RangeInclusive<i32> = 80..=200;
pub const GLUCOSE_BOUNDS: RangeInclusive<i32> = 60..=250;
pub const BMI_BOUNDS: RangeInclusive<f64> = 15.0..=45.0;

/// Patient measurements given on the command line
#[derive(Args, Debug, Clone)]
pub struct PatientArgs {
    /// Age in years (18-80)
    #[arg(long, default_value_t = 30)]
    pub age: i32,

    /// Blood pressure in mmHg (80-200)
    #[arg(long, default_value_t = 120)]
    pub blood_pressure: i32,

    /// Glucose in mg/dL (60-250)
    #[arg(long, default_value_t = 100)]
    pub glucose: i32,

    /// Body mass index (15.0-45.0)
    #[arg(long, default_value_t = 22.0)]
    pub bmi: f64,
}

impl PatientArgs {
    pub fn to_record(&self) -> Result<PatientRecord> {
        let record = PatientRecord::new(self.age, self.blood_pressure, self.glucose, self.bmi);
        check_bounds(&record)?;
        Ok(record)
    }
}

/// Reject values outside the input bounds
pub fn check_bounds(record: &PatientRecord) -> Result<()> {
    if !AGE_BOUNDS.contains(&record.age) {
        bail!("age must be within {:?}, got {}", AGE_BOUNDS, record.age);
    }
    if !BLOOD_PRESSURE_BOUNDS.contains(&record.blood_pressure) {
        bail!(
            "blood pressure must be within {:?}, got {}",
            BLOOD_PRESSURE_BOUNDS,
            record.blood_pressure
        );
    }
    if !GLUCOSE_BOUNDS.contains(&record.glucose) {
        bail!("glucose must be within {:?}, got {}", GLUCOSE_BOUNDS, record.glucose);
    }
    if !BMI_BOUNDS.contains(&record.bmi) {
        bail!("BMI must be within {:?}, got {}", BMI_BOUNDS, record.bmi);
    }
    Ok(())
}

/// Print a prediction the way the prediction view shows it
pub fn print_prediction<W: Write>(out: &mut W, result: &PredictionResult) -> Result<()> {
    writeln!(out, "Risk probability: {:.2}%", result.probability_percent())?;
    writeln!(out, "Classification:   {}", result.risk_label)?;
    Ok(())
}
