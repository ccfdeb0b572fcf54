use super::newton::{sigmoid, NewtonSolver};
use super::Classifier;
use crate::error::{PipelineError, Result};
use crate::linalg::to_array2;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::{debug, warn};

/// Váhovanie tried v loss funkcii
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    /// `n / (2 * n_c)` - menšinová trieda (kupujúci) má väčšiu váhu
    Balanced,
    Uniform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionParams {
    /// Inverzná sila L2 regularizácie
    pub c: f64,
    pub max_iter: usize,
    pub tol: f64,
    pub class_weight: ClassWeight,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-6,
            class_weight: ClassWeight::Balanced,
        }
    }
}

impl LogisticRegressionParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "C musí byť kladné číslo, zadané {}",
                self.c
            )));
        }
        if self.max_iter == 0 {
            return Err(PipelineError::InvalidConfig("max_iter musí byť aspoň 1".into()));
        }
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "tol musí byť kladné číslo, zadané {}",
                self.tol
            )));
        }
        Ok(())
    }
}

/// Váhy pre triedy 0 a 1
pub fn class_weights(labels: &[u8], mode: ClassWeight) -> Result<[f64; 2]> {
    let positives = labels.iter().filter(|&&l| l == 1).count();
    let negatives = labels.len() - positives;

    if positives == 0 {
        return Err(PipelineError::SingleClass(0));
    }
    if negatives == 0 {
        return Err(PipelineError::SingleClass(1));
    }

    Ok(match mode {
        ClassWeight::Uniform => [1.0, 1.0],
        ClassWeight::Balanced => {
            let n = labels.len() as f64;
            [n / (2.0 * negatives as f64), n / (2.0 * positives as f64)]
        }
    })
}

/// Trénovanie logistickej regresie s class-balanced váhami
#[derive(Debug, Clone)]
pub struct LogisticRegressionTrainer {
    params: LogisticRegressionParams,
}

impl LogisticRegressionTrainer {
    pub fn new(params: LogisticRegressionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &LogisticRegressionParams {
        &self.params
    }

    pub fn fit(&self, x: &DenseMatrix<f64>, y: &[u8]) -> Result<LogisticRegressionModel> {
        let (rows, _) = x.shape();
        if rows != y.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} labelov", rows),
                actual: format!("{} labelov", y.len()),
            });
        }

        let weights = class_weights(y, self.params.class_weight)?;
        debug!(
            weight_non_buyer = weights[0],
            weight_buyer = weights[1],
            "class weights"
        );

        let targets: Array1<f64> = y.iter().map(|&l| f64::from(l)).collect();
        let sample_weight: Array1<f64> = y.iter().map(|&l| weights[usize::from(l)]).collect();

        let solver = NewtonSolver {
            c: self.params.c,
            max_iter: self.params.max_iter,
            tol: self.params.tol,
        };
        let solution = solver.minimize(&to_array2(x), &targets, &sample_weight)?;

        if solution.converged {
            debug!(
                iterations = solution.iterations,
                objective = solution.objective,
                "solver converged"
            );
        } else {
            warn!(
                iterations = solution.iterations,
                max_iter = self.params.max_iter,
                objective = solution.objective,
                "logistic regression did not converge, using best iterate"
            );
        }

        Ok(LogisticRegressionModel {
            coefficients: solution.coefficients.to_vec(),
            intercept: solution.intercept,
            iterations: solution.iterations,
            converged: solution.converged,
        })
    }
}

/// Natrénovaný model: jeden koeficient na feature + intercept. Po vytvorení nemenný.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionModel {
    coefficients: Vec<f64>,
    intercept: f64,
    iterations: usize,
    converged: bool,
}

impl LogisticRegressionModel {
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl Classifier for LogisticRegressionModel {
    fn get_name(&self) -> &str {
        "Logistic Regression"
    }

    fn linear_coefficients(&self) -> Option<&[f64]> {
        Some(&self.coefficients)
    }

    fn predict_proba(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>> {
        let (rows, cols) = x.shape();
        if cols != self.coefficients.len() {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} features", self.coefficients.len()),
                actual: format!("{} features", cols),
            });
        }

        Ok((0..rows)
            .map(|i| {
                let z = self.intercept
                    + self
                        .coefficients
                        .iter()
                        .enumerate()
                        .map(|(j, w)| w * x.get((i, j)))
                        .sum::<f64>();
                sigmoid(z)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Jeden informatívny feature, jeden šum, 10 % pozitívnych
    fn imbalanced(n: usize, seed: u64) -> (DenseMatrix<f64>, Vec<u8>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let label = u8::from(i % 10 == 0);
            let shift = if label == 1 { 1.0 } else { -0.2 };
            let signal = shift + rng.gen_range(-1.0..1.0);
            rows.push(vec![signal, rng.gen_range(-1.0..1.0)]);
            labels.push(label);
        }
        (DenseMatrix::from_2d_vec(&rows).unwrap(), labels)
    }

    fn recall(model: &LogisticRegressionModel, x: &DenseMatrix<f64>, y: &[u8]) -> f64 {
        let pred = model.predict(x).unwrap();
        let tp = pred.iter().zip(y).filter(|(p, t)| **p == 1 && **t == 1).count();
        tp as f64 / y.iter().filter(|&&t| t == 1).count() as f64
    }

    #[test]
    fn balanced_weights_follow_frequency() {
        let labels = [0, 0, 0, 1];
        let w = class_weights(&labels, ClassWeight::Balanced).unwrap();
        assert!((w[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((w[1] - 2.0).abs() < 1e-12);
        // obe triedy prispievajú rovnakou celkovou váhou
        assert!((w[0] * 3.0 - w[1] * 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_class_is_rejected() {
        assert!(matches!(
            class_weights(&[1, 1, 1], ClassWeight::Balanced),
            Err(PipelineError::SingleClass(1))
        ));
        let trainer = LogisticRegressionTrainer::new(LogisticRegressionParams::default()).unwrap();
        let x = DenseMatrix::from_2d_vec(&vec![vec![0.0], vec![1.0]]).unwrap();
        assert!(trainer.fit(&x, &[0, 0]).is_err());
    }

    #[test]
    fn learns_direction_of_signal() {
        let (x, y) = imbalanced(600, 3);
        let trainer = LogisticRegressionTrainer::new(LogisticRegressionParams::default()).unwrap();
        let model = trainer.fit(&x, &y).unwrap();

        assert!(model.converged());
        assert_eq!(model.coefficients().len(), 2);
        assert!(model.coefficients()[0] > 0.0);
        assert!(model.coefficients()[0].abs() > model.coefficients()[1].abs());

        let proba = model.predict_proba(&x).unwrap();
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn balancing_raises_minority_recall() {
        let (x, y) = imbalanced(1000, 11);
        let balanced = LogisticRegressionTrainer::new(LogisticRegressionParams::default())
            .unwrap()
            .fit(&x, &y)
            .unwrap();
        let uniform = LogisticRegressionTrainer::new(LogisticRegressionParams {
            class_weight: ClassWeight::Uniform,
            ..LogisticRegressionParams::default()
        })
        .unwrap()
        .fit(&x, &y)
        .unwrap();

        assert!(recall(&balanced, &x, &y) > recall(&uniform, &x, &y));
    }

    #[test]
    fn capped_iterations_still_yield_model() {
        let (x, y) = imbalanced(200, 5);
        let params = LogisticRegressionParams {
            max_iter: 1,
            tol: 1e-14,
            ..LogisticRegressionParams::default()
        };
        let model = LogisticRegressionTrainer::new(params).unwrap().fit(&x, &y).unwrap();
        assert!(!model.converged());
        assert_eq!(model.iterations(), 1);
        assert!(model.predict(&x).is_ok());
    }

    #[test]
    fn fit_is_deterministic() {
        let (x, y) = imbalanced(300, 9);
        let trainer = LogisticRegressionTrainer::new(LogisticRegressionParams::default()).unwrap();
        assert_eq!(trainer.fit(&x, &y).unwrap(), trainer.fit(&x, &y).unwrap());
    }

    #[test]
    fn rejects_invalid_params() {
        for params in [
            LogisticRegressionParams { c: 0.0, ..Default::default() },
            LogisticRegressionParams { c: f64::INFINITY, ..Default::default() },
            LogisticRegressionParams { max_iter: 0, ..Default::default() },
            LogisticRegressionParams { tol: -1.0, ..Default::default() },
        ] {
            assert!(LogisticRegressionTrainer::new(params).is_err());
        }
    }

    #[test]
    fn predict_checks_width() {
        let (x, y) = imbalanced(100, 1);
        let model = LogisticRegressionTrainer::new(LogisticRegressionParams::default())
            .unwrap()
            .fit(&x, &y)
            .unwrap();
        let narrow = DenseMatrix::from_2d_vec(&vec![vec![1.0]]).unwrap();
        assert!(matches!(
            model.predict_proba(&narrow),
            Err(PipelineError::ShapeMismatch { .. })
        ));
    }
}
