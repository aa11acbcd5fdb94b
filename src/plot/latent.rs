use std::path::Path;

use plotters::coord::ranged3d::ProjectionMatrix;
use plotters::prelude::*;

use super::{
    draw_err, padded_range, to_backend_color, write_png, BG_COLOR, FALLBACK_COLOR, MARKER_ALPHA,
    PLOT_SIZE,
};
use crate::color;
use crate::data::model::LatentPoint;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// 3D latent-space projection
// ---------------------------------------------------------------------------

/// Axis panel fill behind the 3D scatter.
const PANEL_COLOR: RGBColor = RGBColor(10, 10, 26);

/// Camera orientation for the 3D projection, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    pub elevation: f64,
    pub azimuth: f64,
    pub roll: f64,
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self {
            elevation: 0.0,
            azimuth: 0.0,
            roll: 0.0,
        }
    }
}

/// Render the latent-space scatter to a PNG at `output`. The image is a pure
/// function of the points and the view angles.
pub fn render_latent_space(
    points: &[LatentPoint],
    view: ViewAngles,
    output: &Path,
) -> Result<(), RenderError> {
    let mut buf = vec![0u8; (PLOT_SIZE * PLOT_SIZE * 3) as usize];
    draw(points, view, &mut buf)?;
    write_png(&buf, PLOT_SIZE, PLOT_SIZE, output)
}

fn draw(points: &[LatentPoint], view: ViewAngles, buf: &mut [u8]) -> Result<(), RenderError> {
    let (x_min, x_max) = padded_range(points.iter().map(|p| p.x), 0.05);
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.y), 0.05);
    let (z_min, z_max) = padded_range(points.iter().map(|p| p.z), 0.05);

    let root = BitMapBackend::with_buffer(buf, (PLOT_SIZE, PLOT_SIZE)).into_drawing_area();
    root.fill(&BG_COLOR).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Autoencoder 3D Latent Space",
            ("sans-serif", 36).into_font().color(&WHITE),
        )
        .margin(20)
        .build_cartesian_3d(x_min..x_max, y_min..y_max, z_min..z_max)
        .map_err(draw_err)?;

    chart.with_projection(|mut pb| {
        pb.pitch = view.elevation.to_radians();
        pb.yaw = view.azimuth.to_radians();
        pb.scale = 0.85;
        pb.into_matrix() * ProjectionMatrix::rotate(0.0, 0.0, view.roll.to_radians())
    });

    chart
        .configure_axes()
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .axis_panel_style(PANEL_COLOR.mix(0.9))
        .light_grid_style(WHITE.mix(0.08))
        .max_light_lines(3)
        .draw()
        .map_err(draw_err)?;

    for (letter, table_color) in color::legend_entries() {
        let marker = to_backend_color(table_color);
        let style = marker.mix(MARKER_ALPHA).filled();
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.classification.map(|c| c.class_letter) == Some(letter))
                    .map(|p| Circle::new((p.x, p.y, p.z), 2, style)),
            )
            .map_err(draw_err)?
            .label(letter.to_string())
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, marker.filled()));
    }

    chart
        .draw_series(
            points
                .iter()
                .filter(|p| p.color.is_none())
                .map(|p| Circle::new((p.x, p.y, p.z), 2, FALLBACK_COLOR.mix(MARKER_ALPHA).filled())),
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
