use std::path::Path;

use plotters::prelude::*;

use super::{
    draw_err, padded_range, to_backend_color, write_png, BG_COLOR, FALLBACK_COLOR, MARKER_ALPHA,
    PLOT_SIZE,
};
use crate::color;
use crate::data::model::PlottableRow;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Hertzsprung–Russell diagram (color index vs. log luminosity)
// ---------------------------------------------------------------------------

/// Render the H-R diagram to a PNG at `output`.
pub fn render_hr_diagram(rows: &[PlottableRow], output: &Path) -> Result<(), RenderError> {
    let mut buf = vec![0u8; (PLOT_SIZE * PLOT_SIZE * 3) as usize];
    draw(rows, &mut buf)?;
    write_png(&buf, PLOT_SIZE, PLOT_SIZE, output)
}

fn draw(rows: &[PlottableRow], buf: &mut [u8]) -> Result<(), RenderError> {
    // The luminosity axis is logarithmic, so a row is placeable only with a
    // finite ci and a positive finite lum.
    let usable: Vec<(&PlottableRow, f64, f64)> = rows
        .iter()
        .filter_map(|row| {
            let ci = row.record.ci.filter(|c| c.is_finite())?;
            let lum = row.record.lum.filter(|l| l.is_finite() && *l > 0.0)?;
            Some((row, ci, lum))
        })
        .collect();

    let unplaceable = rows.len() - usable.len();
    if unplaceable > 0 {
        log::info!("skipping {unplaceable} rows without a usable ci/lum");
    }

    let (x_min, x_max) = padded_range(usable.iter().map(|(_, ci, _)| *ci), 0.05);
    let (y_min, y_max) = log_range(usable.iter().map(|(_, _, lum)| *lum));

    let root = BitMapBackend::with_buffer(buf, (PLOT_SIZE, PLOT_SIZE)).into_drawing_area();
    root.fill(&BG_COLOR).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Hertzsprung-Russell Diagram",
            ("sans-serif", 40).into_font().color(&WHITE),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .axis_style(WHITE.mix(0.8))
        .bold_line_style(WHITE.mix(0.2))
        .light_line_style(WHITE.mix(0.08))
        .x_desc("Color Index")
        .y_desc("Luminosity")
        .axis_desc_style(("sans-serif", 22).into_font().color(&WHITE))
        .label_style(("sans-serif", 16).into_font().color(&WHITE))
        .draw()
        .map_err(draw_err)?;

    // One series per canonical class keeps the legend complete even when a
    // class has no star in the data.
    for (letter, table_color) in color::legend_entries() {
        let marker = to_backend_color(table_color);
        let style = marker.mix(MARKER_ALPHA).filled();
        chart
            .draw_series(
                usable
                    .iter()
                    .filter(|(row, _, _)| row.class_letter() == Some(letter))
                    .map(|(_, ci, lum)| Circle::new((*ci, *lum), 2, style)),
            )
            .map_err(draw_err)?
            .label(letter.to_string())
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, marker.filled()));
    }

    // Classified-but-uncolored rows (e.g. L class) and unclassifiable rows
    // share a neutral marker and stay out of the legend.
    chart
        .draw_series(
            usable
                .iter()
                .filter(|(row, _, _)| row.color.is_none())
                .map(|(_, ci, lum)| {
                    Circle::new((*ci, *lum), 2, FALLBACK_COLOR.mix(MARKER_ALPHA).filled())
                }),
        )
        .map_err(draw_err)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(RGBColor(20, 20, 20).mix(0.8))
        .border_style(WHITE.mix(0.4))
        .label_font(("sans-serif", 18).into_font().color(&WHITE))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Positive range for the log-scale luminosity axis, padded multiplicatively.
fn log_range<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() && v > 0.0 {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return (0.1, 10.0);
    }
    (min / 2.0, max * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::resolve_color;
    use crate::data::model::CatalogRecord;
    use crate::spectral::classify;

    fn row(ci: f64, lum: f64, spect: &str) -> PlottableRow {
        let classification = classify(spect);
        let color = classification.and_then(|c| resolve_color(c.class_letter));
        PlottableRow {
            record: CatalogRecord {
                id: 0,
                absmag: Some(0.0),
                ci: Some(ci),
                lum: Some(lum),
                spect: Some(spect.to_string()),
            },
            classification,
            color,
        }
    }

    #[test]
    fn draws_classified_and_uncolored_rows() {
        let rows = vec![
            row(0.65, 1.0, "G2V"),
            row(-0.2, 50_000.0, "O5"),
            row(1.5, 0.1, "L5"),
        ];
        let mut buf = vec![0u8; (PLOT_SIZE * PLOT_SIZE * 3) as usize];
        draw(&rows, &mut buf).unwrap();
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn empty_input_still_renders_a_figure() {
        let mut buf = vec![0u8; (PLOT_SIZE * PLOT_SIZE * 3) as usize];
        draw(&[], &mut buf).unwrap();
    }

    #[test]
    fn rows_without_usable_lum_are_skipped() {
        let mut incomplete = row(0.5, 1.0, "K0");
        incomplete.record.lum = None;
        let negative = row(0.5, -3.0, "K0");

        let mut buf = vec![0u8; (PLOT_SIZE * PLOT_SIZE * 3) as usize];
        draw(&[incomplete, negative], &mut buf).unwrap();
    }

    #[test]
    fn saves_a_png_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hr.png");

        render_hr_diagram(&[row(0.5, 1.0, "G2V")], &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn unwritable_output_path_is_reported() {
        let err = render_hr_diagram(&[], Path::new("no-such-dir/hr.png")).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
    }
}
