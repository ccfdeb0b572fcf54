use super::feature_importance::rank_features;
use super::metrics::{ClassificationMetrics, ConfusionMatrix, EvaluationReport};
use crate::error::{PipelineError, Result};
use crate::models::Classifier;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::{f1, precision, recall, roc_auc_score};
use tracing::debug;

pub struct ModelEvaluator;

impl ModelEvaluator {
    /// Ohodnotí model na testovacej množine a zoradí features podľa vplyvu
    pub fn evaluate<M: Classifier + ?Sized>(
        model: &M,
        x_test: &DenseMatrix<f64>,
        y_test: &[u8],
        feature_names: &[&str],
    ) -> Result<EvaluationReport> {
        let (rows, _) = x_test.shape();
        if rows != y_test.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} labelov", rows),
                actual: format!("{} labelov", y_test.len()),
            });
        }

        let y_proba = model.predict_proba(x_test)?;
        let y_pred = model.predict(x_test)?;
        let (metrics, confusion_matrix) =
            Self::evaluate_classification(y_test, &y_pred, &y_proba)?;

        let feature_importance = match model.linear_coefficients() {
            Some(coefficients) => rank_features(feature_names, coefficients)?,
            None => Vec::new(),
        };

        debug!(
            accuracy = metrics.accuracy,
            roc_auc = metrics.roc_auc,
            "evaluation done"
        );

        Ok(EvaluationReport {
            model_name: model.get_name().to_string(),
            metrics,
            confusion_matrix,
            feature_importance,
        })
    }

    /// Vypočíta metriky pre binárnu klasifikáciu
    pub fn evaluate_classification(
        y_true: &[u8],
        y_pred: &[u8],
        y_proba: &[f64],
    ) -> Result<(ClassificationMetrics, ConfusionMatrix)> {
        if y_proba.len() != y_true.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} pravdepodobností", y_true.len()),
                actual: format!("{} pravdepodobností", y_proba.len()),
            });
        }

        let cm = ConfusionMatrix::from_labels(y_true, y_pred)?;
        let tp = cm.true_positives as f64;
        let tn = cm.true_negatives as f64;
        let fp = cm.false_positives as f64;
        let fn_ = cm.false_negatives as f64;

        let (precision, recall, f1_score) = if cm.has_both_classes() {
            let truth = as_f64(y_true);
            let predicted = as_f64(y_pred);
            let precision = precision(&truth, &predicted);
            let recall = recall(&truth, &predicted);
            // smartcore vracia NaN, keď precision aj recall sú 0
            let f1_score = if precision + recall > 0.0 {
                f1(&truth, &predicted, 1.0)
            } else {
                0.0
            };
            (precision, recall, f1_score)
        } else {
            // pri jedinej triede v y_true smartcore prepne na makro priemer
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            (precision, recall, ratio(2.0 * precision * recall, precision + recall))
        };

        // MCC - lepší ako accuracy pre nevyvážené datasety
        let mcc_denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();

        let metrics = ClassificationMetrics {
            accuracy: ratio(tp + tn, cm.total() as f64),
            precision,
            recall,
            f1_score,
            roc_auc: Self::roc_auc(y_true, y_proba),
            specificity: ratio(tn, tn + fp),
            mcc: ratio(tp * tn - fp * fn_, mcc_denom),
        };

        Ok((metrics, cm))
    }

    /// ROC AUC so spriemerovaným rankom pre rovnaké skóre.
    /// Bez pozitívnych alebo negatívnych vzoriek vráti 0.
    pub fn roc_auc(y_true: &[u8], y_proba: &[f64]) -> f64 {
        let n = y_true.len().min(y_proba.len());
        let n_pos = y_true[..n].iter().filter(|&&l| l == 1).count();
        if n_pos == 0 || n_pos == n {
            return 0.0;
        }

        // smartcore spája do jedného ranku iba rovnaké skóre idúce vo vstupe za sebou
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| y_proba[a].total_cmp(&y_proba[b]));
        let truth: Vec<f64> = order.iter().map(|&i| f64::from(u8::from(y_true[i] == 1))).collect();
        let scores: Vec<f64> = order.iter().map(|&i| y_proba[i]).collect();
        roc_auc_score(&truth, &scores)
    }
}

fn as_f64(labels: &[u8]) -> Vec<f64> {
    labels.iter().map(|&l| f64::from(l)).collect()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
