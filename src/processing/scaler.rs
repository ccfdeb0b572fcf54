use crate::error::{PipelineError, Result};
use crate::linalg::{from_array2, to_array2};
use ndarray::{Array1, Axis};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Relatívna hranica, pod ktorou sa smerodajná odchýlka považuje za nulovú
const ZERO_VARIANCE_EPS: f64 = 1e-10;

/// Štatistiky naučené z trénovacej množiny (populačná std, ddof = 0)
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingStats
{
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl ScalingStats
{
    /// Stĺpec s nulovým rozptylom sa škáluje na 0
    pub fn is_constant(&self, column: usize) -> bool
    {
        self.std[column] <= ZERO_VARIANCE_EPS * self.mean[column].abs().max(1.0)
    }

    pub fn constant_columns(&self) -> Vec<usize>
    {
        (0..self.std.len()).filter(|&j| self.is_constant(j)).collect()
    }
}

/// Standard Scaler - normalizácia dát (mean=0, std=1)
/// Fit iba na trénovacích dátach, transform na oboch množinách.
#[derive(Debug, Clone)]
pub struct StandardScaler
{
    stats: ScalingStats,
}

impl StandardScaler
{
    pub fn fit(data: &DenseMatrix<f64>) -> Result<Self>
    {
        let x = to_array2(data);
        let mean = x.mean_axis(Axis(0)).ok_or(PipelineError::EmptyDataset)?;
        let std = x.std_axis(Axis(0), 0.0);

        Ok(Self { stats: ScalingStats { mean, std } })
    }

    pub fn transform(&self, data: &DenseMatrix<f64>) -> Result<DenseMatrix<f64>>
    {
        let (_, cols) = data.shape();
        if cols != self.stats.mean.len()
        {
            return Err(PipelineError::ShapeMismatch {
                expected: format!("{} stĺpcov", self.stats.mean.len()),
                actual: format!("{} stĺpcov", cols),
            });
        }

        let mut x = to_array2(data);
        for (j, mut column) in x.axis_iter_mut(Axis(1)).enumerate()
        {
            if self.stats.is_constant(j)
            {
                column.fill(0.0);
            }
            else
            {
                let (mean, std) = (self.stats.mean[j], self.stats.std[j]);
                column.mapv_inplace(|v| (v - mean) / std);
            }
        }

        from_array2(&x)
    }

    pub fn stats(&self) -> &ScalingStats
    {
        &self.stats
    }
}
