//! CSV export of predictions and of the training corpus

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::types::patient::LabeledRecord;
use crate::types::prediction::PredictionResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column order of a prediction export
pub const PREDICTION_HEADER: [&str; 6] = [
    "Age",
    "BloodPressure",
    "Glucose",
    "BMI",
    "RiskLabel",
    "Probability%",
];

/// Column order of a corpus export
pub const CORPUS_HEADER: [&str; 5] = ["Age", "BloodPressure", "Glucose", "BMI", "Risk"];

/// Which artifact an export represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The most recent prediction only
    Latest,
    /// Every prediction of the session
    FullHistory,
}

impl ExportKind {
    pub fn file_name<'a>(&self, config: &'a SessionConfig) -> &'a str {
        match self {
            ExportKind::Latest => &config.latest_export_name,
            ExportKind::FullHistory => &config.history_export_name,
        }
    }
}

/// A rendered CSV document and the name it should be saved under
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub kind: ExportKind,
    pub file_name: String,
    pub contents: String,
}

impl Export {
    pub fn new(
        kind: ExportKind,
        records: &[PredictionResult],
        config: &SessionConfig,
    ) -> Result<Self> {
        Ok(Self {
            kind,
            file_name: kind.file_name(config).to_string(),
            contents: to_table(records)?,
        })
    }

    /// Write the export into `dir` and return the full path
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)?;

        info!(
            kind = ?self.kind,
            path = %path.display(),
            bytes = self.contents.len(),
            "Export written"
        );
        Ok(path)
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.contents.lines().count().saturating_sub(1)
    }
}

/// Render predictions as CSV: header first, then one row per result.
pub fn to_table(records: &[PredictionResult]) -> Result<String> {
    let mut writer = csv_writer();
    writer.write_record(PREDICTION_HEADER)?;
    for record in records {
        writer.write_record(prediction_row(record))?;
    }
    into_string(writer)
}

/// Render the labeled training corpus as CSV
pub fn corpus_to_table(rows: &[LabeledRecord]) -> Result<String> {
    let mut writer = csv_writer();
    writer.write_record(CORPUS_HEADER)?;
    for row in rows {
        writer.write_record([
            row.record.age.to_string(),
            row.record.blood_pressure.to_string(),
            row.record.glucose.to_string(),
            format_decimal(row.record.bmi),
            row.risk.to_string(),
        ])?;
    }
    into_string(writer)
}

/// Cell values of one prediction, in `PREDICTION_HEADER` order
pub fn prediction_row(result: &PredictionResult) -> [String; 6] {
    [
        result.input.age.to_string(),
        result.input.blood_pressure.to_string(),
        result.input.glucose.to_string(),
        format_decimal(result.input.bmi),
        result.risk_label.to_string(),
        format!("{:.2}", result.probability_percent()),
    ]
}

/// Shortest round-trip decimal in plain notation that always keeps a
/// fractional part (`22` becomes `22.0`, `1e-5` becomes `0.00001`).
/// Non-finite values are written as `NaN`, `inf` or `-inf`.
fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
