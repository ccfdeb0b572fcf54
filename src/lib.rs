//! Model nákupného úmyslu návštevníkov e-shopu.
//!
//! Pipeline: načítanie session záznamov -> feature encoding -> stratifikovaný split
//! -> standard scaling -> logistická regresia s class-balanced váhami -> evaluácia.

pub mod config;
pub mod data_loading;
pub mod error;
pub mod evaluation;
pub mod linalg;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod processing;
pub mod reporting;
pub mod session;
pub mod splitting;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use evaluation::{ClassificationMetrics, ConfusionMatrix, EvaluationReport};
pub use models::{Classifier, LogisticRegressionModel};
pub use pipeline::{PipelineOutcome, PurchasePipeline};
pub use session::SessionRecord;
