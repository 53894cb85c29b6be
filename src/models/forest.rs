//! Random forest: a bagged ensemble of linfa decision trees

use crate::config::ForestConfig;
use crate::error::{Error, Result};
use crate::feature_extractor::{FeatureExtractor, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::types::patient::{LabeledRecord, PatientRecord};
use linfa::prelude::*;
use linfa_ensemble::EnsembleLearnerParams;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{arr2, Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

const POSITIVE: usize = 1;

/// Relative contribution of one input feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

/// Bagged ensemble of Gini decision trees.
///
/// Each tree is fitted on a bootstrap sample of the corpus. The forest
/// probability is the share of trees voting for the high-risk class.
pub struct RandomForest {
    trees: Vec<DecisionTree<f64, usize>>,
    extractor: FeatureExtractor,
}

impl fmt::Debug for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomForest")
            .field("trees", &self.trees.len())
            .finish_non_exhaustive()
    }
}

impl RandomForest {
    /// Fit the forest. Training is deterministic for a given config seed.
    ///
    /// A corpus containing a single class is accepted; every tree then
    /// predicts that class.
    pub fn fit(corpus: &[LabeledRecord], config: &ForestConfig) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let extractor = FeatureExtractor::new();
        let features: Vec<FeatureVector> =
            corpus.iter().map(|row| extractor.extract(&row.record)).collect();
        let labels: Vec<usize> = corpus.iter().map(|row| row.risk as usize).collect();

        let positives = labels.iter().filter(|&&l| l == POSITIVE).count();
        if positives == 0 || positives == labels.len() {
            debug!(positives, samples = labels.len(), "Training corpus holds a single class");
        }

        let dataset = Dataset::new(Array2::from(features), Array1::from(labels))
            .with_feature_names(FEATURE_NAMES.to_vec());

        let rng = StdRng::seed_from_u64(config.seed);
        let ensemble = EnsembleLearnerParams::new_fixed_rng(tree_params(config), rng)
            .ensemble_size(config.n_trees.max(1))
            .bootstrap_proportion(config.bootstrap_proportion)
            .fit(&dataset)
            .map_err(|e| Error::Training(e.to_string()))?;

        info!(
            trees = ensemble.models.len(),
            samples = corpus.len(),
            "Random forest trained"
        );

        Ok(Self {
            trees: ensemble.models,
            extractor,
        })
    }

    /// Probability of the positive (high-risk) class
    pub fn predict_proba(&self, record: &PatientRecord) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let row = arr2(&[self.extractor.extract(record)]);
        let votes = self
            .trees
            .iter()
            .filter(|tree| {
                let predicted: Array1<usize> = tree.predict(&row);
                predicted.first() == Some(&POSITIVE)
            })
            .count();
        (votes as f64 / self.trees.len() as f64).clamp(0.0, 1.0)
    }

    /// Mean decrease in impurity per feature.
    ///
    /// Each tree's importances are normalised before averaging. Weights sum
    /// to 1 unless no tree ever split, in which case they are all zero.
    pub fn feature_importances(&self) -> Vec<FeatureImportance> {
        let mut totals = [0.0; FEATURE_COUNT];
        for tree in &self.trees {
            for (total, share) in totals.iter_mut().zip(normalised(&tree.feature_importance())) {
                *total += share;
            }
        }

        let sum: f64 = totals.iter().sum();
        FEATURE_NAMES
            .iter()
            .zip(totals)
            .map(|(&feature, total)| FeatureImportance {
                feature,
                importance: if sum > 0.0 { total / sum } else { 0.0 },
            })
            .collect()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

fn tree_params(config: &ForestConfig) -> linfa_trees::DecisionTreeParams<f64, usize> {
    DecisionTree::params()
        .split_quality(SplitQuality::Gini)
        .max_depth((config.max_depth > 0).then_some(config.max_depth))
        .min_weight_split(config.min_samples_split.max(2) as f32)
}

/// Per-tree importances scaled to sum to 1. A tree that never split (or
/// reports non-finite values) contributes zeros.
fn normalised(raw: &[f64]) -> [f64; FEATURE_COUNT] {
    let mut shares = [0.0; FEATURE_COUNT];
    for (share, &value) in shares.iter_mut().zip(raw) {
        if value.is_finite() && value > 0.0 {
            *share = value;
        }
    }
    let sum: f64 = shares.iter().sum();
    if sum > 0.0 {
        shares.iter_mut().for_each(|share| *share /= sum);
    }
    shares
}
