//! PNG Chart Plotter
//! Draws a [`Figure`] with plotters into an RGB buffer and writes it as PNG.
//!
//! Layout (1000x1000 by default):
//! 1. Panels split the image evenly, stacked top to bottom
//! 2. Each panel: caption, grid, axis descriptions, legend in the upper left
//! 3. Layers draw in insertion order, so estimates sit on top of the curve

use crate::charts::canvas::{
    ChartCanvas, Figure, LayerKind, Marker, Panel, PanelLabels, RenderError, Rgb, SeriesStyle,
};
use log::{debug, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::DrawingErrorKind;
use std::fs::File;
use std::io::{Cursor, Write};
use std::ops::Range;
use std::path::Path;

const GRID_LIGHT: RGBColor = RGBColor(235, 235, 235);
const GRID_BOLD: RGBColor = RGBColor(200, 200, 200);

/// Whether text elements are drawn. `Bare` is the fallback for hosts where
/// the font backend cannot resolve a typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMode {
    Full,
    Bare,
}

/// Canvas that renders to a PNG file on `save`.
pub struct PngCanvas {
    figure: Figure,
    width: u32,
    height: u32,
}

impl PngCanvas {
    pub fn new(panels: usize, width: u32, height: u32) -> Self {
        Self {
            figure: Figure::with_panels(panels),
            width,
            height,
        }
    }

    /// Render the figure to packed RGB pixels, falling back to a text-free
    /// drawing when no font is available.
    pub fn render_rgb(&self) -> Result<Vec<u8>, RenderError> {
        match self.draw(TextMode::Full) {
            Err(RenderError::Font(reason)) => {
                warn!(
                    "event=render module=plotter status=degraded reason=font_unavailable detail={}",
                    reason
                );
                self.draw(TextMode::Bare)
            }
            other => other,
        }
    }

    fn draw(&self, text: TextMode) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(drawing_error)?;

            if !self.figure.panels.is_empty() {
                let areas = root.split_evenly((self.figure.panels.len(), 1));
                for (panel, area) in self.figure.panels.iter().zip(areas.iter()) {
                    draw_panel(area, panel, text)?;
                }
            }
            root.present().map_err(drawing_error)?;
        }
        Ok(buffer)
    }
}

impl ChartCanvas for PngCanvas {
    fn set_labels(&mut self, panel: usize, labels: PanelLabels) -> Result<(), RenderError> {
        self.figure.panel_mut(panel)?.labels = labels;
        Ok(())
    }

    fn scatter(
        &mut self,
        panel: usize,
        points: &[(f64, f64)],
        style: &SeriesStyle,
    ) -> Result<(), RenderError> {
        self.figure.push_layer(panel, LayerKind::Scatter, points, style)
    }

    fn line(
        &mut self,
        panel: usize,
        points: &[(f64, f64)],
        style: &SeriesStyle,
    ) -> Result<(), RenderError> {
        self.figure.push_layer(panel, LayerKind::Line, points, style)
    }

    fn save(&mut self, path: &Path) -> Result<(), RenderError> {
        let pixels = self.render_rgb()?;
        let image = image::RgbImage::from_raw(self.width, self.height, pixels).ok_or(
            RenderError::Encode {
                width: self.width,
                height: self.height,
            },
        )?;
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, image::ImageFormat::Png)?;
        write_synced(path, png.get_ref()).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "event=save module=plotter status=ok path={} size={}x{}",
            path.display(),
            self.width,
            self.height
        );
        Ok(())
    }

    fn figure(&self) -> &Figure {
        &self.figure
    }
}

/// Write `bytes` and wait for them to reach the device, so a full disk
/// surfaces here instead of in a destructor.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    text: TextMode,
) -> Result<(), RenderError> {
    let Some(((x_min, x_max), (y_min, y_max))) = panel.bounds() else {
        return Ok(());
    };
    let x_range = padded(x_min, x_max);
    let y_range = padded(y_min, y_max);

    let mut builder = ChartBuilder::on(area);
    builder.margin(15);
    if text == TextMode::Full {
        builder
            .caption(&panel.labels.title, ("sans-serif", 22))
            .x_label_area_size(45)
            .y_label_area_size(80);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing_error)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(GRID_LIGHT).bold_line_style(GRID_BOLD);
        if text == TextMode::Full {
            mesh.x_desc(panel.labels.x_label.as_str())
                .y_desc(panel.labels.y_label.as_str())
                .x_label_formatter(&format_year)
                .y_label_formatter(&format_value);
        }
        mesh.draw().map_err(drawing_error)?;
    }

    for layer in &panel.layers {
        let color = to_rgb(layer.style.color);
        let size = layer.style.size;
        let points = layer.points.iter().copied();
        let anno = match (&layer.kind, layer.style.marker) {
            (LayerKind::Line, _) => chart
                .draw_series(LineSeries::new(points, color.stroke_width(size)))
                .map_err(drawing_error)?
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(size))
                }),
            (LayerKind::Scatter, Marker::Circle) => chart
                .draw_series(points.map(|point| Circle::new(point, size, color.filled())))
                .map_err(drawing_error)?
                .legend(move |(x, y)| Circle::new((x + 10, y), size, color.filled())),
            (LayerKind::Scatter, Marker::Cross) => chart
                .draw_series(points.map(|point| Cross::new(point, size, color.stroke_width(2))))
                .map_err(drawing_error)?
                .legend(move |(x, y)| Cross::new((x + 10, y), size, color.stroke_width(2))),
        };
        anno.label(layer.style.label.as_str());
    }

    if text == TextMode::Full {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.4))
            .draw()
            .map_err(drawing_error)?;
    }
    Ok(())
}

/// Widen `[lo, hi]` by 5% on each side; a flat range gets a unit margin.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

fn format_year(x: &f64) -> String {
    format!("{:.0}", x)
}

fn format_value(y: &f64) -> String {
    let magnitude = y.abs();
    if magnitude >= 1e6 {
        format!("{:.1}M", y / 1e6)
    } else if magnitude >= 100.0 {
        format!("{:.0}", y)
    } else {
        format!("{:.1}", y)
    }
}

fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn drawing_error<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    match err {
        DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(reason)) => {
            RenderError::Font(reason.to_string())
        }
        other => RenderError::Drawing(other.to_string()),
    }
}
