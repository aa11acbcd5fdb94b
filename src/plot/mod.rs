//! Plot layer: turning normalized rows into static PNG images.
//!
//! Both renderers draw into an RGB buffer with `plotters`, encode it to PNG
//! with `image`, and write the file to the caller's path. Styling mirrors a
//! dark-background astronomy figure: black canvas, white text, dim grid,
//! half-transparent markers against overplotting.

pub mod hr;
pub mod latent;

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use palette::Srgb;
use plotters::style::RGBColor;

use crate::error::RenderError;

/// Output image edge length in pixels (square figures).
pub(crate) const PLOT_SIZE: u32 = 1000;

/// Figure background.
pub(crate) const BG_COLOR: RGBColor = RGBColor(0, 0, 0);

/// Neutral marker for rows whose class has no table color.
pub(crate) const FALLBACK_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Marker alpha; dense catalogs overplot heavily.
pub(crate) const MARKER_ALPHA: f64 = 0.5;

pub(crate) fn to_backend_color(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Encode a raw RGB pixel buffer to PNG and write it to `path`.
pub(crate) fn write_png(
    rgb: &[u8],
    width: u32,
    height: u32,
    path: &Path,
) -> Result<(), RenderError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(rgb, width, height, image::ExtendedColorType::Rgb8)?;
    std::fs::write(path, &png).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Min/max of the finite values with proportional padding; safe fallbacks for
/// empty or constant input.
pub(crate) fn padded_range<I: Iterator<Item = f64>>(values: I, pad_fraction: f64) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    if (max - min).abs() < 1e-10 {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * pad_fraction;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_pads_both_ends() {
        let (lo, hi) = padded_range([0.0, 10.0].into_iter(), 0.1);
        assert_eq!(lo, -1.0);
        assert_eq!(hi, 11.0);
    }

    #[test]
    fn padded_range_handles_empty_and_constant_input() {
        let (lo, hi) = padded_range(std::iter::empty(), 0.1);
        assert!(lo < hi);

        let (lo, hi) = padded_range([5.0, 5.0].into_iter(), 0.1);
        assert!(lo < 5.0);
        assert!(hi > 5.0);
    }

    #[test]
    fn write_png_produces_a_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let rgb = vec![0u8; 4 * 4 * 3];

        write_png(&rgb, 4, 4, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn write_png_reports_an_unwritable_path() {
        let rgb = vec![0u8; 4 * 4 * 3];
        let err = write_png(&rgb, 4, 4, Path::new("no-such-dir/out.png")).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
    }
}
