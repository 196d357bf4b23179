//! Charts module - Chart composition and rendering

mod canvas;
mod plotter;
mod renderer;

pub use canvas::{
    ChartCanvas, Figure, Layer, LayerKind, Marker, Panel, PanelLabels, RecordingCanvas,
    RenderError, Rgb, SeriesStyle,
};
pub use plotter::PngCanvas;
pub use renderer::{confirmation_message, ChartRenderer, PanelSummary, RenderSummary};
