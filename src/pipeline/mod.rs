pub mod pipeline;
pub mod builder;

pub use pipeline::{DatasetSummary, PipelineOutcome, PurchasePipeline};
pub use builder::PurchasePipelineBuilder;
