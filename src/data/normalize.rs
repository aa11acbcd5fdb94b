use palette::Srgb;

use super::model::{CatalogRecord, LatentPoint, LatentRecord, PlottableRow};
use crate::color::resolve_color;
use crate::spectral::{classify, SpectralClassification};

// ---------------------------------------------------------------------------
// Known-anomaly overrides
// ---------------------------------------------------------------------------

/// Point-fixes for individual catalog records, keyed by catalog id.
///
/// HIP 65423 (catalog id 65218) carries the composite spectral string
/// `(G3w)F7` in the source data; the `F7` component describes the system's
/// primary, so that single entry is rewritten before classification. Kept as
/// a table so any future one-off correction lands here, auditable, instead of
/// leaking into the classifier.
const SPECT_OVERRIDES: [(u32, &str); 1] = [(65218, "F7")];

fn apply_overrides(record: &mut CatalogRecord) {
    for &(id, replacement) in &SPECT_OVERRIDES {
        if record.id == id {
            log::info!(
                "spectral override for catalog id {id}: {:?} -> {replacement:?}",
                record.spect.as_deref()
            );
            record.spect = Some(replacement.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization pass
// ---------------------------------------------------------------------------

fn classify_and_resolve(
    spect: Option<&str>,
) -> (Option<SpectralClassification>, Option<Srgb<u8>>) {
    let classification = spect.and_then(classify);
    let color = classification.and_then(|c| resolve_color(c.class_letter));
    (classification, color)
}

/// Turn raw catalog records into plottable rows.
///
/// Records missing any of `absmag`, `ci` or `spect` are dropped and reported
/// as one aggregate count. Every retained record yields exactly one row, in
/// input order, even when its spectral string does not classify; such rows
/// keep `None` classification and color and render without grouping.
pub fn normalize(records: Vec<CatalogRecord>) -> Vec<PlottableRow> {
    let total = records.len();

    let mut rows = Vec::with_capacity(total);
    for mut record in records {
        if !record.has_required_fields() {
            continue;
        }
        apply_overrides(&mut record);
        let (classification, color) = classify_and_resolve(record.spect.as_deref());
        rows.push(PlottableRow {
            record,
            classification,
            color,
        });
    }

    let dropped = total - rows.len();
    if dropped > 0 {
        log::info!("dropped {dropped} of {total} records missing absmag/ci/spect");
    }
    log::info!("stars remaining after normalization: {}", rows.len());
    rows
}

/// Latent-catalog variant: the same classifier and color contract applied to
/// embedding rows. No override pass; latent rows carry no catalog id.
pub fn normalize_latent(records: Vec<LatentRecord>) -> Vec<LatentPoint> {
    records
        .into_iter()
        .map(|r| {
            let (classification, color) = classify_and_resolve(r.spect.as_deref());
            LatentPoint {
                x: r.latent_x,
                y: r.latent_y,
                z: r.latent_z,
                classification,
                color,
            }
        })
        .collect()
}
