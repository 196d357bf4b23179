//! Render configuration passed explicitly into the renderer.

use std::ops::RangeInclusive;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILE: &str = "hasil_estimasi.png";

/// Immutable settings for one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub output_path: PathBuf,
    /// Figure size in pixels (two panels stacked vertically).
    pub width: u32,
    pub height: u32,
    /// Points per fitted curve.
    pub sample_count: usize,
    /// Curve sampling domain; must cover every observation and missing year.
    pub x_domain: RangeInclusive<f64>,
    pub log_level: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            width: 1000,
            height: 1000,
            sample_count: 300,
            x_domain: 2000.0..=2020.0,
            log_level: "warn".to_string(),
        }
    }
}

impl RenderConfig {
    /// Same settings, writing to another file.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}
