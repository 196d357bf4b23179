//! Trend Estimator - Population & Internet Adoption Estimation Charts
//!
//! Plots observed series against precomputed cubic regressions, marks the
//! estimates for years missing from the data, and writes the two-panel
//! figure as a PNG.

pub mod charts;
pub mod config;
pub mod data;
pub mod logging;
pub mod stats;
