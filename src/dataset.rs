//! Synthetic training corpus.
//!
//! Columns are drawn one after another from a single seeded stream (all
//! ages first, then all blood pressures, and so on), so a given seed always
//! yields the same corpus.

use crate::config::DataConfig;
use crate::types::patient::{LabeledRecord, PatientRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use tracing::info;

pub const AGE_RANGE: Range<i32> = 18..80;
pub const BLOOD_PRESSURE_RANGE: Range<i32> = 90..180;
pub const GLUCOSE_RANGE: Range<i32> = 70..200;
pub const BMI_RANGE: Range<f64> = 18.0..40.0;

/// Immutable labeled training corpus
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    rows: Vec<LabeledRecord>,
}

impl Corpus {
    pub fn new(rows: Vec<LabeledRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LabeledRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, for display
    pub fn head(&self, n: usize) -> &[LabeledRecord] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Deterministic generator of labeled patient rows
pub struct SyntheticGenerator {
    seed: u64,
    samples: usize,
}

impl SyntheticGenerator {
    pub fn new(seed: u64, samples: usize) -> Self {
        Self { seed, samples }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.seed, config.samples)
    }

    /// Generate the corpus. The same seed always produces the same rows.
    pub fn generate(&self) -> Corpus {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.samples;

        let ages: Vec<i32> = (0..n).map(|_| rng.gen_range(AGE_RANGE)).collect();
        let pressures: Vec<i32> = (0..n).map(|_| rng.gen_range(BLOOD_PRESSURE_RANGE)).collect();
        let glucose: Vec<i32> = (0..n).map(|_| rng.gen_range(GLUCOSE_RANGE)).collect();
        let bmi: Vec<f64> = (0..n).map(|_| rng.gen_range(BMI_RANGE)).collect();
        let risk: Vec<u8> = (0..n).map(|_| rng.gen_range(0..=1)).collect();

        let rows = (0..n)
            .map(|i| {
                LabeledRecord::new(
                    PatientRecord::new(ages[i], pressures[i], glucose[i], bmi[i]),
                    risk[i],
                )
            })
            .collect::<Vec<_>>();

        let corpus = Corpus::new(rows);
        info!(
            seed = self.seed,
            samples = corpus.len(),
            "Synthetic corpus generated"
        );
        corpus
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::from_config(&DataConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_corpus() {
        let first = SyntheticGenerator::new(42, 300).generate();
        let second = SyntheticGenerator::new(42, 300).generate();

        assert_eq!(first.len(), 300);
        for (a, b) in first.rows().iter().zip(second.rows()) {
            assert_eq!(a.record.age, b.record.age);
            assert_eq!(a.record.blood_pressure, b.record.blood_pressure);
            assert_eq!(a.record.glucose, b.record.glucose);
            assert_eq!(a.record.bmi.to_bits(), b.record.bmi.to_bits());
            assert_eq!(a.risk, b.risk);
        }
    }

    #[test]
    fn test_different_seed_differs() {
        let first = SyntheticGenerator::new(42, 300).generate();
        let second = SyntheticGenerator::new(7, 300).generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_values_within_ranges() {
        let corpus = SyntheticGenerator::default().generate();

        for row in corpus.rows() {
            assert!(AGE_RANGE.contains(&row.record.age));
            assert!(BLOOD_PRESSURE_RANGE.contains(&row.record.blood_pressure));
            assert!(GLUCOSE_RANGE.contains(&row.record.glucose));
            assert!(BMI_RANGE.contains(&row.record.bmi));
            assert!(row.risk <= 1);
        }
    }

    #[test]
    fn test_both_classes_present() {
        let corpus = SyntheticGenerator::default().generate();
        let positives = corpus.rows().iter().filter(|r| r.is_positive()).count();

        assert!(positives > 0);
        assert!(positives < corpus.len());
    }

    #[test]
    fn test_head_is_clamped() {
        let corpus = SyntheticGenerator::new(1, 5).generate();
        assert_eq!(corpus.head(20).len(), 5);
        assert_eq!(corpus.head(2), &corpus.rows()[..2]);
    }
}
