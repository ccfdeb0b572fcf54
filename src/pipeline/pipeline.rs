use super::builder::PurchasePipelineBuilder;
use crate::error::Result;
use crate::evaluation::{EvaluationReport, ModelEvaluator};
use crate::linalg::select_rows;
use crate::models::{LogisticRegressionModel, LogisticRegressionTrainer};
use crate::processing::{FeatureEncoder, ScalingStats, StandardScaler, FEATURE_COUNT, FEATURE_NAMES};
use crate::session::SessionRecord;
use crate::splitting::StratifiedSplitter;
use tracing::info;

/// Facade pre celý pipeline: encoding -> split -> scaling -> training -> evaluation
#[derive(Debug, Clone)]
pub struct PurchasePipeline {
    pub(crate) splitter: StratifiedSplitter,
    pub(crate) trainer: LogisticRegressionTrainer,
}

/// Veľkosť a rozloženie tried celého datasetu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub num_samples: usize,
    pub num_features: usize,
    pub num_buyers: usize,
}

impl DatasetSummary {
    pub fn num_non_buyers(&self) -> usize {
        self.num_samples - self.num_buyers
    }

    /// Podiel kupujúcich v percentách
    pub fn buyer_rate(&self) -> f64 {
        if self.num_samples == 0 {
            0.0
        } else {
            100.0 * self.num_buyers as f64 / self.num_samples as f64
        }
    }
}

/// Všetko, čo pipeline vyprodukoval; vstup pre reporting
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub dataset: DatasetSummary,
    pub train_size: usize,
    pub test_size: usize,
    pub encoder: FeatureEncoder,
    pub scaling: ScalingStats,
    pub model: LogisticRegressionModel,
    pub report: EvaluationReport,
}

impl PurchasePipeline {
    pub fn builder() -> PurchasePipelineBuilder {
        PurchasePipelineBuilder::new()
    }

    pub fn splitter(&self) -> &StratifiedSplitter {
        &self.splitter
    }

    pub fn trainer(&self) -> &LogisticRegressionTrainer {
        &self.trainer
    }

    /// Komplétny workflow nad načítanými záznamami
    pub fn run(&self, records: &[SessionRecord]) -> Result<PipelineOutcome> {
        // 1. Feature encoding (dva prechody: fit mapovania, potom transform)
        let encoder = FeatureEncoder::fit(records);
        let encoded = encoder.encode_all(records)?;
        let dataset = DatasetSummary {
            num_samples: encoded.num_samples(),
            num_features: FEATURE_COUNT,
            num_buyers: encoded.num_positive(),
        };
        info!(
            samples = dataset.num_samples,
            features = dataset.num_features,
            buyers = dataset.num_buyers,
            "features encoded"
        );

        // 2. Stratifikovaný split
        let partition = self.splitter.split(&encoded.labels)?;
        let x_train = select_rows(&encoded.features, &partition.train)?;
        let x_test = select_rows(&encoded.features, &partition.test)?;
        let y_train: Vec<u8> = partition.train.iter().map(|&i| encoded.labels[i]).collect();
        let y_test: Vec<u8> = partition.test.iter().map(|&i| encoded.labels[i]).collect();
        info!(
            train = partition.train_size(),
            test = partition.test_size(),
            seed = self.splitter.seed(),
            "data split"
        );

        // 3. Scaling - štatistiky iba z trénovacej množiny
        let scaler = StandardScaler::fit(&x_train)?;
        let x_train = scaler.transform(&x_train)?;
        let x_test = scaler.transform(&x_test)?;
        info!(
            constant_columns = scaler.stats().constant_columns().len(),
            "features scaled"
        );

        // 4. Tréning
        let model = self.trainer.fit(&x_train, &y_train)?;
        info!(
            iterations = model.iterations(),
            converged = model.converged(),
            "model trained"
        );

        // 5. Evaluácia
        let report = ModelEvaluator::evaluate(&model, &x_test, &y_test, &FEATURE_NAMES)?;
        info!(
            accuracy = report.metrics.accuracy,
            roc_auc = report.metrics.roc_auc,
            "model evaluated"
        );

        Ok(PipelineOutcome {
            dataset,
            train_size: partition.train_size(),
            test_size: partition.test_size(),
            encoder,
            scaling: scaler.stats().clone(),
            model,
            report,
        })
    }
}
