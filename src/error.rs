use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline-level error taxonomy
// ---------------------------------------------------------------------------

/// Failure to obtain a catalog payload. Per-source failures are handled and
/// logged inside the loader; these variants are what crosses its boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("all {attempts} catalog sources failed; check the network connection or the source URLs")]
    AllSourcesFailed { attempts: usize },

    #[error("catalog file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure to draw a plot or save it to disk. Fatal to the run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("could not write image to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
