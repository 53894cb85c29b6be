//! Predict command - one prediction in a short-lived session.

use std::path::Path;

use anyhow::{Context, Result};
use medical_risk_analyst::{PredictionPipeline, RiskClassifier, Session};

use super::{print_prediction, PatientArgs};

pub fn run(
    classifier: &RiskClassifier,
    input: &PatientArgs,
    export_dir: Option<&Path>,
) -> Result<()> {
    let record = input.to_record()?;
    classifier.ensure_trained().context("Failed to train risk model")?;

    let pipeline = PredictionPipeline::new(classifier);
    let mut session = Session::new(classifier.config().session.clone());
    let result = session.predict(&pipeline, &record)?;

    let mut stdout = std::io::stdout();
    print_prediction(&mut stdout, &result)?;

    if let Some(dir) = export_dir {
        if let Some(export) = session.export_latest()? {
            let path = export
                .write_to_dir(dir)
                .with_context(|| format!("Failed to write export into {}", dir.display()))?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}
