use purchase_intent::config::{PipelineConfig, CONFIG_FILE};
use purchase_intent::data_loading::DataLoaderFactory;
use purchase_intent::pipeline::PurchasePipelineBuilder;
use purchase_intent::reporting::{chart, console};
use purchase_intent::logging;
use std::path::Path;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = PipelineConfig::load(Path::new(CONFIG_FILE))?;
    logging::init(config.log.json, &config.log.level);
    config.log_summary();

    let pipeline = PurchasePipelineBuilder::from_config(&config).build()?;

    let loader = DataLoaderFactory::create_for_path(&config.data.path, &config.data.table)?;
    info!(loader = loader.get_name(), path = %config.data.path.display(), "loading sessions");
    let records = loader.load(&config.data.path)?;

    let outcome = pipeline.run(&records)?;
    print!("{}", console::render(&outcome)?);

    chart::render_to_file(&outcome.report, &config.output.chart_path)?;
    println!("\nChart saved: {}", config.output.chart_path.display());

    Ok(())
}
