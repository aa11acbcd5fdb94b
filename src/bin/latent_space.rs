use std::path::Path;

use anyhow::{Context, Result};
use env_logger::Env;
use log::{error, info};

use star_charter::data::loader;
use star_charter::data::normalize::normalize_latent;
use star_charter::plot::latent::{render_latent_space, ViewAngles};

/// Default location of the latent-space catalog export.
const INPUT_PATH: &str = "latent_stars.csv.gz";
/// Output path for the rendered projection.
const OUTPUT_PATH: &str = "latent_space_3d.png";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let payload = match loader::read_local(Path::new(INPUT_PATH)) {
        Ok(payload) => payload,
        Err(e) => {
            error!("{e}");
            return Ok(());
        }
    };

    let records = loader::parse_latent(&payload).context("processing latent catalog payload")?;
    let points = normalize_latent(records);

    render_latent_space(&points, ViewAngles::default(), Path::new(OUTPUT_PATH))?;
    info!("latent space plot saved to '{OUTPUT_PATH}'");
    Ok(())
}
