//! Trained robocaller classifier.
//!
//! A bagged ensemble of decision trees (random forest) over the two numeric
//! caller features, trained on threshold-derived labels and evaluated on a
//! held-out partition. All randomness (the train/test shuffle and every
//! bootstrap resample) flows from one seeded generator, so identical input
//! and seed reproduce identical results.

use std::collections::HashMap;

use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::info;

use crate::classifier::evaluation::{ConfusionMatrix, ModelEvaluation};
use crate::error::{Error, Result};
use crate::features::FeatureExtractor;
use crate::types::{CallerStats, ClassificationResult};

/// Training parameters for the forest.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Fraction of callers used for training, in (0, 1)
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,

    /// Seed for the shuffle and every bootstrap resample
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Trees in the ensemble
    #[serde(default = "default_num_trees")]
    pub num_trees: usize,

    /// Per-tree depth cap; None lets trees grow until pure
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_train_fraction() -> f64 {
    0.75
}

fn default_seed() -> u64 {
    42
}

fn default_num_trees() -> usize {
    100
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            train_fraction: default_train_fraction(),
            seed: default_seed(),
            num_trees: default_num_trees(),
            max_depth: None,
        }
    }
}

/// Bagged decision-tree ensemble with majority-vote prediction.
pub struct RandomForest {
    trees: Vec<DecisionTree<f64, usize>>,
}

impl RandomForest {
    /// Fit the ensemble. Each tree trains on a bootstrap resample drawn from
    /// `rng`.
    pub fn fit(
        x: &Array2<f64>,
        y: &Array1<usize>,
        config: &ModelConfig,
        rng: &mut StdRng,
    ) -> Result<Self> {
        let samples = x.nrows();
        let mut trees = Vec::with_capacity(config.num_trees);

        for _ in 0..config.num_trees {
            let indices: Vec<usize> = (0..samples).map(|_| rng.gen_range(0..samples)).collect();
            let dataset = Dataset::new(x.select(Axis(0), &indices), y.select(Axis(0), &indices));

            let tree = DecisionTree::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(config.max_depth)
                .fit(&dataset)
                .map_err(|e| Error::Training(e.to_string()))?;
            trees.push(tree);
        }

        Ok(Self { trees })
    }

    /// Number of trees in the ensemble.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Majority vote over all trees. Ties resolve to the negative class.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<usize> {
        let mut votes = vec![0usize; x.nrows()];
        for tree in &self.trees {
            let predicted = tree.predict(x);
            for (sample, &label) in predicted.iter().enumerate() {
                votes[sample] += label;
            }
        }

        let majority = self.trees.len() / 2;
        votes
            .into_iter()
            .map(|positive_votes| usize::from(positive_votes > majority))
            .collect()
    }
}

/// Train on a labeled split of the callers and predict on the held-out rest.
///
/// Labels are expected to come from the threshold rule (self-supervised), but
/// any boolean labeling keyed by caller works. Fails with a degenerate-labels
/// error when every label is the same class, either over the whole table or
/// inside the train partition after the split, and with an
/// insufficient-samples error when there are too few callers to hold any out.
pub fn classify_model(
    stats: &HashMap<String, CallerStats>,
    labels: &HashMap<String, bool>,
    config: &ModelConfig,
) -> Result<(HashMap<String, ClassificationResult>, ModelEvaluation)> {
    // sorted ids give the seeded shuffle a stable starting order
    let mut caller_ids: Vec<&String> = stats.keys().filter(|id| labels.contains_key(*id)).collect();
    caller_ids.sort_unstable();

    let total = caller_ids.len();
    if total < 2 {
        return Err(Error::InsufficientSamples { callers: total });
    }

    check_both_classes(caller_ids.iter().map(|id| labels[*id]))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut order: Vec<usize> = (0..total).collect();
    order.shuffle(&mut rng);

    let train_size = ((total as f64) * config.train_fraction).round() as usize;
    let train_size = train_size.clamp(1, total - 1);
    let (train_idx, test_idx) = order.split_at(train_size);

    // a lopsided split can degenerate even when the full table is mixed
    check_both_classes(train_idx.iter().map(|&i| labels[caller_ids[i]]))?;

    let extractor = FeatureExtractor::new();
    let x_train = feature_matrix(&extractor, stats, &caller_ids, train_idx);
    let y_train: Array1<usize> = train_idx
        .iter()
        .map(|&i| labels[caller_ids[i]] as usize)
        .collect();

    let forest = RandomForest::fit(&x_train, &y_train, config, &mut rng)?;

    let x_test = feature_matrix(&extractor, stats, &caller_ids, test_idx);
    let predictions = forest.predict(&x_test);

    let mut results = HashMap::with_capacity(test_idx.len());
    let mut confusion = ConfusionMatrix::default();
    for (row, &i) in test_idx.iter().enumerate() {
        let predicted = predictions[row] == 1;
        confusion.record(labels[caller_ids[i]], predicted);
        results.insert(
            caller_ids[i].clone(),
            ClassificationResult::from_model(predicted),
        );
    }

    let evaluation = ModelEvaluation::from_confusion(confusion, train_idx.len(), test_idx.len());
    info!(
        trees = forest.tree_count(),
        train = evaluation.train_size,
        held_out = evaluation.test_size,
        accuracy = evaluation.accuracy,
        "Trained robocaller classifier"
    );

    Ok((results, evaluation))
}

fn check_both_classes<I: IntoIterator<Item = bool>>(labels: I) -> Result<()> {
    let mut saw_positive = false;
    let mut saw_negative = false;
    for label in labels {
        if label {
            saw_positive = true;
        } else {
            saw_negative = true;
        }
    }

    if !saw_positive {
        Err(Error::DegenerateLabels { observed: "legitimate" })
    } else if !saw_negative {
        Err(Error::DegenerateLabels { observed: "robocaller" })
    } else {
        Ok(())
    }
}

fn feature_matrix(
    extractor: &FeatureExtractor,
    stats: &HashMap<String, CallerStats>,
    caller_ids: &[&String],
    rows: &[usize],
) -> Array2<f64> {
    let mut x = Array2::zeros((rows.len(), extractor.feature_count()));
    for (row, &i) in rows.iter().enumerate() {
        let features = extractor.extract(&stats[caller_ids[i]]);
        for (column, value) in features.into_iter().enumerate() {
            x[[row, column]] = value;
        }
    }
    x
}
