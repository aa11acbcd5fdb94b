use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use super::model::{CatalogRecord, LatentRecord};
use crate::error::FetchError;

// ---------------------------------------------------------------------------
// Catalog sources
// ---------------------------------------------------------------------------

/// Ordered download sources for the HYG catalog: the official Codeberg
/// repository first, then a mirror copy. The first reachable source wins.
pub const HYG_SOURCES: [&str; 2] = [
    "https://codeberg.org/astronexus/hyg/media/branch/main/data/hyg/CURRENT/hyg_v42.csv.gz",
    "https://drive.google.com/uc?export=download&id=1U2apsUPjQR_DllzF74y-pV3KjVTK3FJW",
];

/// Upper bound on a single download attempt.
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// Download the gzip-compressed catalog, trying each source in order.
///
/// Individual failures (connect error, timeout, non-success status) are
/// logged and the next source is tried; only when every source has failed
/// does this return an error.
pub fn download_catalog(urls: &[&str]) -> Result<Vec<u8>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(ATTEMPT_TIMEOUT)
        .build()?;

    try_sources(urls, |url| {
        let response = client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    })
}

/// Attempt each source in order, returning the first successful payload.
/// Separated from the HTTP client so the fallback policy is testable.
fn try_sources<F>(urls: &[&str], mut fetch: F) -> Result<Vec<u8>, FetchError>
where
    F: FnMut(&str) -> Result<Vec<u8>>,
{
    for url in urls {
        log::info!("trying catalog source: {url}");
        match fetch(url) {
            Ok(payload) => {
                log::info!("download successful ({} bytes)", payload.len());
                return Ok(payload);
            }
            Err(e) => log::warn!("source failed: {e:#}"),
        }
    }
    Err(FetchError::AllSourcesFailed {
        attempts: urls.len(),
    })
}

/// Read a compressed catalog from disk. A missing file yields the
/// distinguishable [`FetchError::NotFound`].
pub fn read_local(path: &Path) -> Result<Vec<u8>, FetchError> {
    std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => FetchError::NotFound {
            path: path.to_path_buf(),
        },
        _ => FetchError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a gzip CSV payload into catalog records.
pub fn parse_catalog(payload: &[u8]) -> Result<Vec<CatalogRecord>> {
    decode_rows(payload, "catalog")
}

/// Decode a gzip CSV payload into latent-space records.
pub fn parse_latent(payload: &[u8]) -> Result<Vec<LatentRecord>> {
    decode_rows(payload, "latent catalog")
}

/// Gunzip, then CSV-decode by header name. A row that fails to deserialize
/// is skipped and counted rather than aborting the batch; surplus columns
/// are ignored.
fn decode_rows<T: DeserializeOwned>(payload: &[u8], what: &str) -> Result<Vec<T>> {
    let mut csv_bytes = Vec::new();
    GzDecoder::new(payload)
        .read_to_end(&mut csv_bytes)
        .with_context(|| format!("decompressing {what} payload"))?;

    let mut reader = csv::Reader::from_reader(csv_bytes.as_slice());
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                log::debug!("{what} row {row_no}: {e}");
            }
        }
    }

    if rows.is_empty() && skipped > 0 {
        bail!("no decodable rows in {what} payload ({skipped} rows skipped)");
    }
    if skipped > 0 {
        log::info!("skipped {skipped} undecodable {what} rows");
    }
    log::info!("total {what} rows: {}", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    fn gzip(text: &str) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(text.as_bytes()).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn parses_the_columns_the_pipeline_uses() {
        let payload = gzip(
            "id,proper,absmag,ci,lum,spect\n\
             1,Sol,4.85,0.656,1.0,G2V\n\
             2,,-5.0,-0.2,50000,O5\n",
        );
        let records = parse_catalog(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].spect.as_deref(), Some("G2V"));
        assert_eq!(records[1].ci, Some(-0.2));
        assert_eq!(records[1].lum, Some(50_000.0));
    }

    #[test]
    fn empty_fields_deserialize_as_none() {
        let payload = gzip("id,absmag,ci,lum,spect\n3,,1.2,10,\n");
        let records = parse_catalog(&payload).unwrap();
        assert_eq!(records[0].absmag, None);
        assert_eq!(records[0].spect, None);
        assert_eq!(records[0].ci, Some(1.2));
    }

    #[test]
    fn undecodable_rows_are_skipped_not_fatal() {
        let payload = gzip(
            "id,absmag,ci,lum,spect\n\
             1,4.85,0.656,1.0,G2V\n\
             not-a-number,x,y,z,w\n\
             2,1.0,0.5,2.0,K0\n",
        );
        let records = parse_catalog(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn invalid_gzip_payload_is_an_error() {
        assert!(parse_catalog(b"definitely not gzip").is_err());
    }

    #[test]
    fn fallback_returns_the_first_successful_source() {
        let urls = ["https://a.example/cat.gz", "https://b.example/cat.gz"];
        let payload = try_sources(&urls, |url| {
            if url.contains("a.example") {
                bail!("timed out");
            }
            Ok(vec![1, 2, 3])
        })
        .unwrap();
        assert_eq!(payload, vec![1, 2, 3]);
    }

    #[test]
    fn all_sources_failing_is_reported_with_the_attempt_count() {
        let urls = ["https://a.example", "https://b.example"];
        let err = try_sources(&urls, |_| bail!("connection refused")).unwrap_err();
        assert!(matches!(err, FetchError::AllSourcesFailed { attempts: 2 }));
    }

    #[test]
    fn missing_local_file_is_distinguishable() {
        let err = read_local(Path::new("definitely/not/here.csv.gz")).unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[test]
    fn local_latent_catalog_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latent.csv.gz");
        std::fs::write(&path, gzip("spect,latent_x,latent_y,latent_z\nG2V,0.1,0.2,0.3\n"))
            .unwrap();

        let records = parse_latent(&read_local(&path).unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].spect.as_deref(), Some("G2V"));
        assert_eq!(records[0].latent_z, 0.3);
    }
}
