use super::feature_importance::FeatureImportance;
use crate::error::{PipelineError, Result};

/// Confusion matrix pre binárnu klasifikáciu.
/// Riadky = skutočná trieda, stĺpce = predikovaná, poradie {non-buyer, buyer}.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn from_labels(y_true: &[u8], y_pred: &[u8]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} predikcií", y_true.len()),
                actual: format!("{} predikcií", y_pred.len()),
            });
        }

        let mut cm = Self::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t, p) {
                (1, 1) => cm.true_positives += 1,
                (0, 0) => cm.true_negatives += 1,
                (0, _) => cm.false_positives += 1,
                _ => cm.false_negatives += 1,
            }
        }
        Ok(cm)
    }

    pub fn grid(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }

    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    /// Skutočné labely obsahujú kupujúcich aj nekupujúcich
    pub fn has_both_classes(&self) -> bool {
        self.true_positives + self.false_negatives > 0
            && self.true_negatives + self.false_positives > 0
    }

    pub fn max_cell(&self) -> usize {
        self.grid().iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Metriky klasifikácie. Nulový menovateľ dáva 0, nie NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub roc_auc: f64,
    pub specificity: f64,
    /// Matthews Correlation Coefficient, v intervale [-1, 1]
    pub mcc: f64,
}

impl ClassificationMetrics {
    /// Štyri hlavné metriky v poradí pre graf
    pub fn headline(&self) -> [(&'static str, f64); 4] {
        [
            ("Accuracy", self.accuracy),
            ("Precision", self.precision),
            ("Recall", self.recall),
            ("F1 Score", self.f1_score),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub model_name: String,
    pub metrics: ClassificationMetrics,
    pub confusion_matrix: ConfusionMatrix,
    /// Zoradené podľa |koeficientu| zostupne
    pub feature_importance: Vec<FeatureImportance>,
}

impl EvaluationReport {
    pub fn top_features(&self, k: usize) -> &[FeatureImportance] {
        &self.feature_importance[..k.min(self.feature_importance.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_rows_are_actual_classes() {
        let y_true = [0, 0, 0, 1, 1, 0, 1];
        let y_pred = [0, 1, 0, 1, 0, 0, 1];
        let cm = ConfusionMatrix::from_labels(&y_true, &y_pred).unwrap();
        assert_eq!(cm.grid(), [[3, 1], [1, 2]]);
        assert_eq!(cm.total(), 7);
        assert_eq!(cm.max_cell(), 3);
    }

    #[test]
    fn detects_missing_class() {
        assert!(ConfusionMatrix::from_labels(&[0, 1], &[0, 0]).unwrap().has_both_classes());
        assert!(!ConfusionMatrix::from_labels(&[0, 0], &[1, 0]).unwrap().has_both_classes());
    }

    #[test]
    fn length_mismatch_is_error() {
        assert!(ConfusionMatrix::from_labels(&[0, 1], &[0]).is_err());
    }
}
