use super::pipeline::PurchasePipeline;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{ClassWeight, LogisticRegressionParams, LogisticRegressionTrainer};
use crate::splitting::StratifiedSplitter;

/// Builder pre konfiguráciu pipeline
#[derive(Debug, Clone)]
pub struct PurchasePipelineBuilder {
    test_fraction: f64,
    seed: u64,
    model_params: LogisticRegressionParams,
}

impl PurchasePipelineBuilder {
    pub fn new() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            model_params: LogisticRegressionParams::default(),
        }
    }

    /// Prevezme split a model sekciu z konfigurácie
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new()
            .test_fraction(config.split.test_fraction)
            .seed(config.split.seed)
            .model_params(config.model.clone())
    }

    pub fn test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn model_params(mut self, params: LogisticRegressionParams) -> Self {
        self.model_params = params;
        self
    }

    /// Inverzná sila regularizácie
    pub fn c(mut self, c: f64) -> Self {
        self.model_params.c = c;
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.model_params.max_iter = max_iter;
        self
    }

    pub fn class_weight(mut self, class_weight: ClassWeight) -> Self {
        self.model_params.class_weight = class_weight;
        self
    }

    /// Vytvorí pipeline; neplatné parametre sa odmietnu ešte pred načítaním dát
    pub fn build(self) -> Result<PurchasePipeline> {
        Ok(PurchasePipeline {
            splitter: StratifiedSplitter::new(self.test_fraction, self.seed)?,
            trainer: LogisticRegressionTrainer::new(self.model_params)?,
        })
    }
}

impl Default for PurchasePipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
