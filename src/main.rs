use std::path::Path;

use anyhow::{Context, Result};
use env_logger::Env;
use log::{error, info};

use star_charter::data::loader::{self, HYG_SOURCES};
use star_charter::data::normalize::normalize;
use star_charter::plot::hr::render_hr_diagram;

/// Output path for the rendered diagram.
const OUTPUT_PATH: &str = "hr_diagram.png";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("starting data pipeline: downloading star catalog");
    let payload = match loader::download_catalog(&HYG_SOURCES) {
        Ok(payload) => payload,
        Err(e) => {
            // A failed retrieval ends the run without a plot, but is not a
            // process failure.
            error!("{e}");
            return Ok(());
        }
    };

    let records = loader::parse_catalog(&payload).context("processing catalog payload")?;
    let rows = normalize(records);

    render_hr_diagram(&rows, Path::new(OUTPUT_PATH))?;
    info!("H-R diagram saved to '{OUTPUT_PATH}'");
    Ok(())
}
