use crate::error::{PipelineError, Result};
use ndarray::{s, Array1, Array2, Axis};

/// Armijo konštanta pre backtracking line search
const ARMIJO: f64 = 1e-4;
const MAX_HALVINGS: usize = 40;
/// Pokusy o stabilizáciu Hessiánu pridaním ridge na diagonálu
const MAX_RIDGE_ATTEMPTS: usize = 6;

/// Výsledok minimalizácie váženého, L2-regularizovaného log-loss
#[derive(Debug, Clone)]
pub struct NewtonSolution {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
    pub iterations: usize,
    pub converged: bool,
    pub objective: f64,
}

/// Newtonova metóda (IRLS) pre logistickú regresiu.
///
/// Minimalizuje `c * Σ w_i * logloss(y_i, σ(x_i·β + b)) + ½‖β‖²`,
/// intercept nie je regularizovaný. Každý krok znižuje cieľovú funkciu,
/// takže posledná iterácia je zároveň najlepšia.
#[derive(Debug, Clone)]
pub struct NewtonSolver {
    pub c: f64,
    pub max_iter: usize,
    pub tol: f64,
}

impl NewtonSolver {
    pub fn minimize(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        sample_weight: &Array1<f64>,
    ) -> Result<NewtonSolution> {
        let (n, p) = x.dim();
        if y.len() != n || sample_weight.len() != n {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} labelov a váh", n),
                actual: format!("{} labelov, {} váh", y.len(), sample_weight.len()),
            });
        }

        // posledný stĺpec je intercept
        let mut design = Array2::<f64>::ones((n, p + 1));
        design.slice_mut(s![.., ..p]).assign(x);

        let mut beta = Array1::<f64>::zeros(p + 1);
        let mut objective = self.objective(&design, y, sample_weight, &beta);

        for iteration in 1..=self.max_iter {
            let prob = design.dot(&beta).mapv(sigmoid);

            let residual = (&prob - y) * sample_weight * self.c;
            let mut grad = design.t().dot(&residual);
            for j in 0..p {
                grad[j] += beta[j];
            }

            let curvature = prob.mapv(|q| q * (1.0 - q)) * sample_weight * self.c;
            let weighted = &design * &curvature.view().insert_axis(Axis(1));
            let mut hessian = design.t().dot(&weighted);
            for j in 0..p {
                hessian[[j, j]] += 1.0;
            }

            let step = solve_stabilized(&hessian, &grad)?;
            let max_step = max_abs(&step);

            if max_step < self.tol {
                let candidate = &beta - &step;
                let candidate_objective = self.objective(&design, y, sample_weight, &candidate);
                if candidate_objective <= objective {
                    beta = candidate;
                    objective = candidate_objective;
                }
                return Ok(Self::solution(beta, p, iteration, true, objective));
            }

            let slope = grad.dot(&step);
            let mut t = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_HALVINGS {
                let candidate = &beta - &(&step * t);
                let candidate_objective = self.objective(&design, y, sample_weight, &candidate);
                if candidate_objective <= objective - ARMIJO * t * slope {
                    accepted = Some((candidate, candidate_objective));
                    break;
                }
                t *= 0.5;
            }

            match accepted {
                Some((candidate, candidate_objective)) => {
                    beta = candidate;
                    objective = candidate_objective;
                    if t * max_step < self.tol {
                        return Ok(Self::solution(beta, p, iteration, true, objective));
                    }
                }
                // žiadny pokles - ostávame na najlepšom bode
                None => return Ok(Self::solution(beta, p, iteration, false, objective)),
            }
        }

        Ok(Self::solution(beta, p, self.max_iter, false, objective))
    }

    fn solution(
        beta: Array1<f64>,
        p: usize,
        iterations: usize,
        converged: bool,
        objective: f64,
    ) -> NewtonSolution {
        NewtonSolution {
            coefficients: beta.slice(s![..p]).to_owned(),
            intercept: beta[p],
            iterations,
            converged,
            objective,
        }
    }

    fn objective(
        &self,
        design: &Array2<f64>,
        y: &Array1<f64>,
        sample_weight: &Array1<f64>,
        beta: &Array1<f64>,
    ) -> f64 {
        let z = design.dot(beta);
        let loss: f64 = z
            .iter()
            .zip(y.iter())
            .zip(sample_weight.iter())
            .map(|((&zi, &yi), &wi)| wi * (log1p_exp(zi) - yi * zi))
            .sum();
        let p = beta.len() - 1;
        let penalty: f64 = beta.slice(s![..p]).iter().map(|b| b * b).sum();
        self.c * loss + 0.5 * penalty
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// ln(1 + e^z) bez pretečenia
fn log1p_exp(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

fn max_abs(v: &Array1<f64>) -> f64 {
    v.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// Cholesky solve; ak Hessián nie je kladne definitný, pridá sa rastúci ridge
fn solve_stabilized(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    if let Some(x) = cholesky_solve(a, b) {
        return Ok(x);
    }

    let max_diag = a.diag().iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    let mut ridge = (max_diag * 1e-10).max(1e-12);
    for _ in 0..MAX_RIDGE_ATTEMPTS {
        let mut stabilized = a.clone();
        stabilized.diag_mut().mapv_inplace(|d| d + ridge);
        if let Some(x) = cholesky_solve(&stabilized, b) {
            return Ok(x);
        }
        ridge *= 100.0;
    }

    Err(PipelineError::Solver(
        "Hessián nie je kladne definitný ani po stabilizácii".to_string(),
    ))
}

/// Rieši A x = b pre symetrickú kladne definitnú A (A = L Lᵀ)
pub fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return None;
    }

    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 || !diag.is_finite() {
                    return None;
                }
                l[[i, i]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L y = b
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|k| l[[i, k]] * y[k]).sum();
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Lᵀ x = y
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|k| l[[k, i]] * x[k]).sum();
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}
