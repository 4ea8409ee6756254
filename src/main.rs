use std::path::Path;
use tmdb_eda::config::{AnalysisConfig, CONFIG_FILE};
use tmdb_eda::render::{ConsoleRenderer, CsvRenderer, Renderer};
use tmdb_eda::{logging, pipeline};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    debug!(
        "polars is configured to use {} threads",
        polars_core::POOL.current_num_threads()
    );

    let config = AnalysisConfig::load(Path::new(CONFIG_FILE))?;
    let analysis = pipeline::run(&config)?;

    ConsoleRenderer.render(&analysis)?;
    CsvRenderer::new(&config.output_dir).render(&analysis)?;
    Ok(())
}
