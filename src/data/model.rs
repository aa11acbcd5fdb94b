use palette::Srgb;
use serde::Deserialize;

use crate::spectral::SpectralClassification;

// ---------------------------------------------------------------------------
// CatalogRecord – one row of the HYG catalog
// ---------------------------------------------------------------------------

/// One row of the HYG source catalog. Only the columns the pipeline uses are
/// deserialized; the remaining catalog columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogRecord {
    pub id: u32,
    pub absmag: Option<f64>,
    pub ci: Option<f64>,
    pub lum: Option<f64>,
    pub spect: Option<String>,
}

impl CatalogRecord {
    /// A record is eligible for classification only when `absmag`, `ci` and
    /// `spect` are all present. `lum` is deliberately not required here: the
    /// H-R renderer skips rows it cannot place instead.
    pub fn has_required_fields(&self) -> bool {
        self.absmag.is_some() && self.ci.is_some() && self.spect.is_some()
    }
}

// ---------------------------------------------------------------------------
// LatentRecord – one row of the latent-space variant catalog
// ---------------------------------------------------------------------------

/// One row of the latent-space catalog export. Same spectral-string contract
/// as the main catalog; position comes from the autoencoder embedding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LatentRecord {
    pub spect: Option<String>,
    pub latent_x: f64,
    pub latent_y: f64,
    pub latent_z: f64,
}

// ---------------------------------------------------------------------------
// Derived rows – produced by the normalizer, consumed by the renderers
// ---------------------------------------------------------------------------

/// A catalog record augmented with its derived classification and color.
/// Either derived field may be absent when the spectral string did not
/// classify or the class has no table color.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottableRow {
    pub record: CatalogRecord,
    pub classification: Option<SpectralClassification>,
    pub color: Option<Srgb<u8>>,
}

impl PlottableRow {
    pub fn class_letter(&self) -> Option<char> {
        self.classification.map(|c| c.class_letter)
    }
}

/// A latent-space row with its derived classification and color.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub classification: Option<SpectralClassification>,
    pub color: Option<Srgb<u8>>,
}
