//! Held-out evaluation metrics for the trained classifier.

use serde::Serialize;

/// 2x2 count of predicted-vs-actual outcomes on the held-out partition.
///
/// "Positive" is the robocaller class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    /// Build the matrix from paired (actual, predicted) labels.
    pub fn from_pairs<I: IntoIterator<Item = (bool, bool)>>(pairs: I) -> Self {
        let mut matrix = ConfusionMatrix::default();
        for (actual, predicted) in pairs {
            matrix.record(actual, predicted);
        }
        matrix
    }

    /// Record one outcome.
    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true) => self.true_positive += 1,
            (false, true) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_negative += 1,
        }
    }

    /// Total outcomes recorded.
    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// Fraction of correct predictions, 0.0 when empty.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    /// Precision for one class: of everything predicted as `class`, how much
    /// actually was. Zero denominators yield 0.0.
    pub fn precision(&self, class: bool) -> f64 {
        if class {
            ratio(self.true_positive, self.true_positive + self.false_positive)
        } else {
            ratio(self.true_negative, self.true_negative + self.false_negative)
        }
    }

    /// Recall for one class: of everything actually `class`, how much was
    /// predicted as such. Zero denominators yield 0.0.
    pub fn recall(&self, class: bool) -> f64 {
        if class {
            ratio(self.true_positive, self.true_positive + self.false_negative)
        } else {
            ratio(self.true_negative, self.true_negative + self.false_positive)
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Summary of a trained model's held-out performance.
#[derive(Debug, Clone, Serialize)]
pub struct ModelEvaluation {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub robocaller_precision: f64,
    pub robocaller_recall: f64,
    pub legitimate_precision: f64,
    pub legitimate_recall: f64,
    /// Callers used for training
    pub train_size: usize,
    /// Callers held out for evaluation
    pub test_size: usize,
}

impl ModelEvaluation {
    /// Derive the summary from a confusion matrix and partition sizes.
    pub fn from_confusion(confusion: ConfusionMatrix, train_size: usize, test_size: usize) -> Self {
        Self {
            confusion,
            accuracy: confusion.accuracy(),
            robocaller_precision: confusion.precision(true),
            robocaller_recall: confusion.recall(true),
            legitimate_precision: confusion.precision(false),
            legitimate_recall: confusion.recall(false),
            train_size,
            test_size,
        }
    }
}
