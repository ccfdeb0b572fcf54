use crate::error::Result;
use smartcore::linalg::basic::matrix::DenseMatrix;

pub mod logreg;
pub mod newton;

pub use logreg::{
    class_weights, ClassWeight, LogisticRegressionModel, LogisticRegressionParams,
    LogisticRegressionTrainer,
};

/// Pravdepodobnosť, nad ktorou sa session klasifikuje ako nákup
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Natrénovaný binárny klasifikátor
pub trait Classifier {
    fn get_name(&self) -> &str;

    /// Pravdepodobnosť triedy 1 (nákup) pre každý riadok
    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>>;

    /// Koeficienty lineárneho modelu, ak ich model má
    fn linear_coefficients(&self) -> Option<&[f64]> {
        None
    }

    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<u8>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| u8::from(p > DECISION_THRESHOLD))
            .collect())
    }
}
