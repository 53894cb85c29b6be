//! Corpus insights for the dashboard, graph and tips views.
//!
//! Only the numbers are produced here; drawing them is left to whatever
//! front end consumes them.

use crate::dataset::Corpus;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const HEALTH_TIPS: [&str; 6] = [
    "Drink enough water daily",
    "Exercise at least 30 minutes",
    "Reduce sugar intake",
    "Sleep 7-8 hours",
    "Eat fruits and vegetables",
    "Manage stress and relax",
];

/// Headline figures for the training corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub patients: usize,
    /// Mean age, rounded to one decimal
    pub mean_age: f64,
    /// Share of high-risk rows in percent, rounded to one decimal
    pub high_risk_percent: f64,
}

impl DatasetSummary {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let patients = corpus.len();
        if patients == 0 {
            return Self {
                patients,
                mean_age: 0.0,
                high_risk_percent: 0.0,
            };
        }

        let age_sum: f64 = corpus.rows().iter().map(|r| r.record.age as f64).sum();
        let positives = corpus.rows().iter().filter(|r| r.is_positive()).count();

        Self {
            patients,
            mean_age: round1(age_sum / patients as f64),
            high_risk_percent: round1(positives as f64 / patients as f64 * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Point of the BMI vs glucose scatter plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub bmi: f64,
    pub glucose: i32,
    pub risk: u8,
}

/// Equal-width age histogram over the observed range.
///
/// Every bin is half-open except the last, which also holds the maximum.
pub fn age_histogram(corpus: &Corpus, bins: usize) -> Vec<HistogramBin> {
    let ages: Vec<f64> = corpus.rows().iter().map(|r| r.record.age as f64).collect();
    let (Some(min), Some(max)) = (
        ages.iter().copied().reduce(f64::min),
        ages.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for age in ages {
        let index = (((age - min) / width) as usize).min(bins - 1);
        histogram[index].count += 1;
    }
    histogram
}

pub fn bmi_glucose_scatter(corpus: &Corpus) -> Vec<ScatterPoint> {
    corpus
        .rows()
        .iter()
        .map(|r| ScatterPoint {
            bmi: r.record.bmi,
            glucose: r.record.glucose,
            risk: r.risk,
        })
        .collect()
}

/// Pick a random health tip
pub fn health_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    HEALTH_TIPS.choose(rng).copied().unwrap_or(HEALTH_TIPS[0])
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
