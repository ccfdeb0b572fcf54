//! Prevody medzi smartcore `DenseMatrix` a ndarray.

use crate::error::Result;
use ndarray::Array2;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

pub fn to_array2(matrix: &DenseMatrix<f64>) -> Array2<f64> {
    let (rows, cols) = matrix.shape();
    Array2::from_shape_fn((rows, cols), |(i, j)| *matrix.get((i, j)))
}

pub fn from_array2(array: &Array2<f64>) -> Result<DenseMatrix<f64>> {
    let rows: Vec<Vec<f64>> = array.outer_iter().map(|row| row.to_vec()).collect();
    Ok(DenseMatrix::from_2d_vec(&rows)?)
}

/// Vyberie riadky v zadanom poradí
pub fn select_rows(matrix: &DenseMatrix<f64>, indices: &[usize]) -> Result<DenseMatrix<f64>> {
    let (_, cols) = matrix.shape();
    let rows: Vec<Vec<f64>> = indices
        .iter()
        .map(|&i| (0..cols).map(|j| *matrix.get((i, j))).collect())
        .collect();
    Ok(DenseMatrix::from_2d_vec(&rows)?)
}
