//! Chart Canvas Module
//! Backend-neutral charting interface and the figure model it builds.
//!
//! The renderer only talks to [`ChartCanvas`]; [`RecordingCanvas`] keeps the
//! figure in memory for inspection while `PngCanvas` draws it to disk.

use crate::data::DatasetError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Panel {0} does not exist")]
    MissingPanel(usize),
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("No usable font: {0}")]
    Font(String),
    #[error("Pixel buffer does not match a {width}x{height} image")]
    Encode { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// RGB color, independent of the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(31, 119, 180);
pub const RED: Rgb = Rgb(214, 39, 40);
pub const GREEN: Rgb = Rgb(44, 160, 44);
pub const ORANGE: Rgb = Rgb(255, 127, 14);
pub const BLACK: Rgb = Rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub color: Rgb,
    pub marker: Marker,
    /// Marker radius, or stroke width for lines.
    pub size: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Scatter,
    Line,
}

/// One drawn series.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Axes, labels and layers of one panel. Layers draw in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub labels: PanelLabels,
    pub layers: Vec<Layer>,
}

impl Panel {
    /// Bounding box over every layer, `None` when nothing is plotted.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self.layers.iter().flat_map(|layer| layer.points.iter());
        let &(x0, y0) = points.next()?;
        let init = ((x0, x0), (y0, y0));
        Some(points.fold(init, |((xl, xh), (yl, yh)), &(x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        }))
    }
}

/// Panels stacked top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn with_panels(count: usize) -> Self {
        Self {
            panels: vec![Panel::default(); count],
        }
    }

    pub fn panel_mut(&mut self, index: usize) -> Result<&mut Panel, RenderError> {
        self.panels
            .get_mut(index)
            .ok_or(RenderError::MissingPanel(index))
    }

    pub(crate) fn push_layer(
        &mut self,
        panel: usize,
        kind: LayerKind,
        points: &[(f64, f64)],
        style: &SeriesStyle,
    ) -> Result<(), RenderError> {
        self.panel_mut(panel)?.layers.push(Layer {
            kind,
            points: points.to_vec(),
            style: style.clone(),
        });
        Ok(())
    }
}

/// Minimal charting surface: panels addressed by index, saved once.
pub trait ChartCanvas {
    fn set_labels(&mut self, panel: usize, labels: PanelLabels) -> Result<(), RenderError>;

    fn scatter(
        &mut self,
        panel: usize,
        points: &[(f64, f64)],
        style: &SeriesStyle,
    ) -> Result<(), RenderError>;

    fn line(
        &mut self,
        panel: usize,
        points: &[(f64, f64)],
        style: &SeriesStyle,
    ) -> Result<(), RenderError>;

    /// Write the figure to `path`. The file is closed before this returns.
    fn save(&mut self, path: &Path) -> Result<(), RenderError>;

    /// The figure as composed so far.
    fn figure(&self) -> &Figure;
}

/// Builds the figure without rendering; `save` only records the path.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    figure: Figure,
    pub saved: Vec<PathBuf>,
}

impl RecordingCanvas {
    pub fn new(panels: usize) -> Self {
        Self {
            figure: Figure::with_panels(panels),
            saved: Vec::new(),
        }
    }
}

impl ChartCanvas for RecordingCanvas {
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
        self.saved.push(path.to_path_buf());
        Ok(())
    }

    fn figure(&self) -> &Figure {
        &self.figure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> SeriesStyle {
        SeriesStyle {
            color: BLUE,
            marker: Marker::Circle,
            size: 3,
            label: "s".to_string(),
        }
    }

    #[test]
    fn layers_keep_insertion_order() {
        let mut canvas = RecordingCanvas::new(1);
        canvas.scatter(0, &[(1.0, 2.0)], &style()).unwrap();
        canvas.line(0, &[(0.0, 0.0), (3.0, 1.0)], &style()).unwrap();

        let kinds: Vec<_> = canvas.figure().panels[0]
            .layers
            .iter()
            .map(|layer| layer.kind.clone())
            .collect();
        assert_eq!(kinds, vec![LayerKind::Scatter, LayerKind::Line]);
    }

    #[test]
    fn unknown_panel_is_an_error() {
        let mut canvas = RecordingCanvas::new(2);
        let err = canvas.scatter(2, &[(0.0, 0.0)], &style()).unwrap_err();
        assert!(matches!(err, RenderError::MissingPanel(2)));
    }

    #[test]
    fn bounds_span_all_layers() {
        let mut canvas = RecordingCanvas::new(1);
        assert_eq!(canvas.figure().panels[0].bounds(), None);
        canvas.scatter(0, &[(2.0, -1.0), (5.0, 4.0)], &style()).unwrap();
        canvas.line(0, &[(1.0, 0.0), (3.0, 9.0)], &style()).unwrap();
        assert_eq!(
            canvas.figure().panels[0].bounds(),
            Some(((1.0, 5.0), (-1.0, 9.0)))
        );
    }

    #[test]
    fn save_records_path_only() {
        let mut canvas = RecordingCanvas::new(1);
        canvas.save(Path::new("out.png")).unwrap();
        assert_eq!(canvas.saved, vec![PathBuf::from("out.png")]);
    }
}
