//! Data module - Embedded observations and regression inputs

mod dataset;

pub use dataset::{
    Dataset, DatasetError, EstimateSource, ObservationSeries, Trend, TrendLabels,
    INTERNET_YEAR_OFFSET,
};
