//! Trend Estimator - renders `hasil_estimasi.png` from the embedded dataset.

use anyhow::{Context, Result};
use trend_estimator::charts::{confirmation_message, ChartRenderer, PngCanvas};
use trend_estimator::config::RenderConfig;
use trend_estimator::data::Dataset;
use trend_estimator::logging;

fn main() -> Result<()> {
    let config = RenderConfig::default();

    logging::init_logging(&config.log_level)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let dataset = Dataset::indonesia().context("embedded dataset is invalid")?;

    let mut canvas = PngCanvas::new(ChartRenderer::PANEL_COUNT, config.width, config.height);
    let summary = ChartRenderer::render_figure(&dataset, &config, &mut canvas)
        .with_context(|| format!("failed to render {}", config.output_path.display()))?;

    println!("{}", confirmation_message(&summary.output_path));
    Ok(())
}
