use crate::error::{PipelineError, Result};
use std::cmp::Ordering;

/// Smer vplyvu feature na pravdepodobnosť nákupu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increases,
    Decreases,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImportance {
    pub feature: String,
    /// Koeficient na škálovaných dátach, preto porovnateľný medzi features
    pub coefficient: f64,
}

impl FeatureImportance {
    pub fn magnitude(&self) -> f64 {
        self.coefficient.abs()
    }

    pub fn direction(&self) -> Direction {
        if self.coefficient > 0.0 {
            Direction::Increases
        } else {
            Direction::Decreases
        }
    }

    pub fn sign(&self) -> char {
        match self.direction() {
            Direction::Increases => '+',
            Direction::Decreases => '-',
        }
    }
}

/// Zoradí features podľa absolútnej hodnoty koeficientu zostupne.
/// Pri rovnosti ostáva pôvodné poradie stĺpcov.
pub fn rank_features(names: &[&str], coefficients: &[f64]) -> Result<Vec<FeatureImportance>> {
    if names.len() != coefficients.len() {
        return Err(PipelineError::ShapeMismatch {
            expected: format!("{} koeficientov", names.len()),
            actual: format!("{} koeficientov", coefficients.len()),
        });
    }

    let mut ranked: Vec<FeatureImportance> = names
        .iter()
        .zip(coefficients)
        .map(|(name, &coefficient)| FeatureImportance {
            feature: name.to_string(),
            coefficient,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.magnitude()
            .partial_cmp(&a.magnitude())
            .unwrap_or(Ordering::Equal)
    });
    Ok(ranked)
}
