//! Read-only views over the training corpus and the trained model.

use std::path::Path;

use anyhow::{Context, Result};
use medical_risk_analyst::dashboard::{
    age_histogram, bmi_glucose_scatter, health_tip, DatasetSummary,
};
use medical_risk_analyst::upload::preview_file;
use medical_risk_analyst::RiskClassifier;
use tracing::warn;

pub fn dashboard(classifier: &RiskClassifier) -> Result<()> {
    let model = classifier.ensure_trained().context("Failed to train risk model")?;
    let summary = DatasetSummary::from_corpus(&model.corpus);

    println!("Patients:    {}", summary.patients);
    println!("Avg Age:     {:.1}", summary.mean_age);
    println!("High Risk %: {:.1}%", summary.high_risk_percent);
    println!();
    println!("{:>4} {:>4} {:>4} {:>8} {:>8} {:>5}", "#", "Age", "BP", "Glucose", "BMI", "Risk");

    let rows = classifier.config().session.dashboard_rows;
    for (i, row) in model.corpus.head(rows).iter().enumerate() {
        println!(
            "{:>4} {:>4} {:>4} {:>8} {:>8.2} {:>5}",
            i, row.record.age, row.record.blood_pressure, row.record.glucose, row.record.bmi, row.risk
        );
    }
    Ok(())
}

pub fn graphs(classifier: &RiskClassifier, json: bool) -> Result<()> {
    let model = classifier.ensure_trained().context("Failed to train risk model")?;
    let histogram = age_histogram(&model.corpus, classifier.config().session.histogram_bins);

    if json {
        let document = serde_json::json!({
            "age_histogram": histogram,
            "bmi_vs_glucose": bmi_glucose_scatter(&model.corpus),
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("Age Distribution");
    let peak = histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in &histogram {
        let bar = "█".repeat(bin.count * 40 / peak);
        println!("{:>5.1}-{:<5.1} {:>4} {}", bin.start, bin.end, bin.count, bar);
    }
    Ok(())
}

pub fn explain(classifier: &RiskClassifier) -> Result<()> {
    let model = classifier.ensure_trained().context("Failed to train risk model")?;

    println!("Feature Importance");
    for item in model.feature_importances() {
        let bar = "█".repeat((item.importance * 50.0).round() as usize);
        println!("{:>14} {:>6.3} {}", item.feature, item.importance, bar);
    }
    println!();
    println!("Higher Glucose & BP increase health risk.");
    Ok(())
}

/// Upload failures are shown to the user and never affect the model.
pub fn preview(classifier: &RiskClassifier, file: &Path) {
    let max_rows = classifier.config().session.preview_rows;
    match preview_file(file, max_rows) {
        Ok(preview) => {
            println!("File Uploaded Successfully!");
            println!("{}", preview.headers.join(","));
            for row in &preview.rows {
                println!("{}", row.join(","));
            }
            if preview.is_truncated() {
                println!("... {} more rows", preview.total_rows - preview.rows.len());
            }
        }
        Err(e) => {
            warn!(path = %file.display(), error = %e, "Upload preview failed");
            println!("Could not read {}: {}", file.display(), e);
        }
    }
}

pub fn tip() {
    println!("{}", health_tip(&mut rand::thread_rng()));
}
