pub mod evaluator;
pub mod feature_importance;
pub mod metrics;

pub use evaluator::ModelEvaluator;
pub use feature_importance::{rank_features, Direction, FeatureImportance};
pub use metrics::{ClassificationMetrics, ConfusionMatrix, EvaluationReport};
