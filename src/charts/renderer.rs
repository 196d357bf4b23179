//! Trend Chart Renderer
//! Composes the population and internet-adoption panels on a [`ChartCanvas`].
//!
//! Each panel, top to bottom in the figure:
//! 1. Observed values as filled circles
//! 2. The fitted cubic sampled densely over the x-domain
//! 3. Missing-year estimates as black crosses

use crate::charts::canvas::{
    ChartCanvas, Marker, PanelLabels, RenderError, Rgb, SeriesStyle, BLACK, BLUE, GREEN, ORANGE,
    RED,
};
use crate::config::RenderConfig;
use crate::data::{Dataset, EstimateSource, Trend};
use crate::stats::sample_curve;
use log::{debug, info};
use std::path::{Path, PathBuf};

const OBSERVED_RADIUS: u32 = 4;
const CURVE_WIDTH: u32 = 2;
const ESTIMATE_SIZE: u32 = 8;

/// Observation and curve colors for one panel.
struct PanelPalette {
    observed: Rgb,
    fitted: Rgb,
}

/// Population panel first, internet panel second.
const PALETTES: [PanelPalette; 2] = [
    PanelPalette {
        observed: BLUE,
        fitted: RED,
    },
    PanelPalette {
        observed: GREEN,
        fitted: ORANGE,
    },
];

/// Estimates plotted on one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSummary {
    pub series: String,
    pub estimates: Vec<(i32, f64)>,
}

/// What a successful render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub output_path: PathBuf,
    pub panels: Vec<PanelSummary>,
}

pub struct ChartRenderer;

impl ChartRenderer {
    pub const PANEL_COUNT: usize = 2;

    /// Draw both trend panels onto `canvas` and save it to the configured path.
    ///
    /// The dataset is validated against `config.x_domain` before anything is
    /// drawn. A failed save aborts with [`RenderError::Write`].
    pub fn render_figure<C: ChartCanvas>(
        dataset: &Dataset,
        config: &RenderConfig,
        canvas: &mut C,
    ) -> Result<RenderSummary, RenderError> {
        dataset.validate(&config.x_domain)?;
        Self::log_coefficients(dataset);

        let mut panels = Vec::with_capacity(Self::PANEL_COUNT);
        for (index, (trend, palette)) in dataset.trends().into_iter().zip(&PALETTES).enumerate() {
            let summary =
                Self::draw_trend(canvas, index, trend, palette, &dataset.missing_years, config)?;
            panels.push(summary);
        }

        Self::log_estimates(dataset, &panels);

        canvas.save(&config.output_path)?;
        info!(
            "event=render module=renderer status=ok path={} panels={}",
            config.output_path.display(),
            panels.len()
        );

        Ok(RenderSummary {
            output_path: config.output_path.clone(),
            panels,
        })
    }

    fn draw_trend<C: ChartCanvas>(
        canvas: &mut C,
        panel: usize,
        trend: &Trend,
        palette: &PanelPalette,
        missing_years: &[i32],
        config: &RenderConfig,
    ) -> Result<PanelSummary, RenderError> {
        let labels = &trend.labels;
        canvas.set_labels(
            panel,
            PanelLabels {
                title: labels.title.clone(),
                x_label: labels.x_label.clone(),
                y_label: labels.y_label.clone(),
            },
        )?;

        canvas.scatter(
            panel,
            &trend.series.plot_points(),
            &SeriesStyle {
                color: palette.observed,
                marker: Marker::Circle,
                size: OBSERVED_RADIUS,
                label: labels.observed.clone(),
            },
        )?;

        let curve: Vec<(f64, f64)> = sample_curve(
            |year| trend.fitted_at(year),
            *config.x_domain.start(),
            *config.x_domain.end(),
            config.sample_count,
        )
        .collect();
        canvas.line(
            panel,
            &curve,
            &SeriesStyle {
                color: palette.fitted,
                marker: Marker::Circle,
                size: CURVE_WIDTH,
                label: labels.fitted.clone(),
            },
        )?;

        let estimates = trend.estimates_for(missing_years);
        let estimate_points: Vec<(f64, f64)> = estimates
            .iter()
            .map(|&(year, value)| (f64::from(year), value))
            .collect();
        canvas.scatter(
            panel,
            &estimate_points,
            &SeriesStyle {
                color: BLACK,
                marker: Marker::Cross,
                size: ESTIMATE_SIZE,
                label: labels.estimated.clone(),
            },
        )?;

        Ok(PanelSummary {
            series: trend.series.name.clone(),
            estimates,
        })
    }

    fn log_coefficients(dataset: &Dataset) {
        for trend in dataset.trends() {
            let poly = &trend.polynomial;
            let [c0, c1, c2, c3] = poly.coefficients();
            debug!(
                "event=coefficients module=renderer series={} offset={} c0={:.5} c1={:.5} c2={:.5} c3={:.5}",
                trend.series.name,
                poly.x_offset(),
                c0,
                c1,
                c2,
                c3
            );
        }
    }

    /// Per missing year: population as a whole number, internet share in percent.
    fn log_estimates(dataset: &Dataset, panels: &[PanelSummary]) {
        let [population, internet] = dataset.trends();
        let (Some(pop_panel), Some(net_panel)) = (panels.first(), panels.get(1)) else {
            return;
        };

        for (&(year, pop), &(_, net)) in pop_panel.estimates.iter().zip(&net_panel.estimates) {
            info!(
                "event=estimate module=renderer year={} population={:.0} internet_percent={:.5}",
                year, pop, net
            );
        }

        for trend in [population, internet] {
            if let EstimateSource::Supplied(values) = &trend.estimates {
                for (&year, supplied) in dataset.missing_years.iter().zip(values) {
                    debug!(
                        "event=estimate_check module=renderer series={} year={} supplied={:.0} fitted={:.0}",
                        trend.series.name,
                        year,
                        supplied,
                        trend.fitted_at(f64::from(year))
                    );
                }
            }
        }
    }
}

/// The line printed once the figure is on disk.
pub fn confirmation_message(path: &Path) -> String {
    format!("Figure saved as '{}'", path.display())
}
