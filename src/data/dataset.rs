//! Dataset Module
//! Observation series, regression coefficients and missing-year estimates.
//!
//! Everything here is immutable input handed to the renderer; the embedded
//! Indonesian figures are produced by [`Dataset::indonesia`].

use crate::stats::CubicPolynomial;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("{series}: years and values differ in length ({years} vs {values})")]
    LengthMismatch {
        series: String,
        years: usize,
        values: usize,
    },
    #[error("{series}: year {year} does not follow {previous}")]
    YearsNotIncreasing {
        series: String,
        previous: i32,
        year: i32,
    },
    #[error("{series}: non-finite value at year {year}")]
    NonFiniteValue { series: String, year: i32 },
    #[error("{series}: {estimates} supplied estimates for {years} missing years")]
    EstimateCountMismatch {
        series: String,
        estimates: usize,
        years: usize,
    },
    #[error("{series}: year {year} lies outside the sampled domain {min}..={max}")]
    OutsideDomain {
        series: String,
        year: i32,
        min: f64,
        max: f64,
    },
}

/// Ordered (year, value) observations.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    pub name: String,
    pub points: Vec<(i32, f64)>,
}

impl ObservationSeries {
    /// Pair parallel year and value slices.
    pub fn from_columns(name: &str, years: &[i32], values: &[f64]) -> Result<Self, DatasetError> {
        if years.len() != values.len() {
            return Err(DatasetError::LengthMismatch {
                series: name.to_string(),
                years: years.len(),
                values: values.len(),
            });
        }
        let series = Self {
            name: name.to_string(),
            points: years.iter().copied().zip(values.iter().copied()).collect(),
        };
        series.validate()?;
        Ok(series)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().map(|&(year, _)| year)
    }

    /// Points with the year widened to a plotting coordinate.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|&(year, value)| (f64::from(year), value))
            .collect()
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        for pair in self.points.windows(2) {
            let (previous, year) = (pair[0].0, pair[1].0);
            if year <= previous {
                return Err(DatasetError::YearsNotIncreasing {
                    series: self.name.clone(),
                    previous,
                    year,
                });
            }
        }
        if let Some(&(year, _)) = self.points.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DatasetError::NonFiniteValue {
                series: self.name.clone(),
                year,
            });
        }
        Ok(())
    }
}

/// Where the missing-year estimates of a trend come from.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateSource {
    /// Independently supplied values, one per missing year.
    Supplied(Vec<f64>),
    /// Evaluate the trend polynomial at each missing year.
    Polynomial,
}

/// Panel text for one trend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub observed: String,
    pub fitted: String,
    pub estimated: String,
}

/// One chart panel's worth of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub series: ObservationSeries,
    pub polynomial: CubicPolynomial,
    pub estimates: EstimateSource,
    pub labels: TrendLabels,
}

impl Trend {
    /// Evaluate the fitted curve at a calendar year, honoring the offset the
    /// coefficients were fit against.
    pub fn fitted_at(&self, year: f64) -> f64 {
        self.polynomial.evaluate_year(year)
    }

    /// (year, estimate) pairs for the given missing years.
    pub fn estimates_for(&self, missing_years: &[i32]) -> Vec<(i32, f64)> {
        match &self.estimates {
            EstimateSource::Supplied(values) => missing_years
                .iter()
                .copied()
                .zip(values.iter().copied())
                .collect(),
            EstimateSource::Polynomial => missing_years
                .iter()
                .map(|&year| (year, self.fitted_at(f64::from(year))))
                .collect(),
        }
    }
}

/// The complete embedded input: two trends sharing a set of missing years.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub population: Trend,
    pub internet: Trend,
    pub missing_years: Vec<i32>,
}

const YEARS: [i32; 15] = [
    2000, 2001, 2002, 2003, 2004, 2007, 2008, 2009, 2010, 2011, 2012, 2013, 2014, 2017, 2018,
];

const POPULATION: [f64; 15] = [
    211_540_000.0,
    214_880_000.0,
    218_030_000.0,
    221_100_000.0,
    224_100_000.0,
    230_000_000.0,
    234_000_000.0,
    237_000_000.0,
    240_000_000.0,
    243_000_000.0,
    246_000_000.0,
    249_000_000.0,
    252_000_000.0,
    258_000_000.0,
    261_000_000.0,
];

const INTERNET_PERCENT: [f64; 15] = [
    0.9, 1.1, 1.3, 1.5, 1.8, 3.5, 4.2, 5.0, 6.0, 8.0, 10.5, 15.0, 19.8, 40.0, 47.0,
];

/// Fit on raw years.
const POPULATION_COEFFICIENTS: [f64; 4] = [
    -10182056898958.94922,
    15178883958.25156,
    -7543763.53367,
    1249.94434,
];

/// Fit on `year - 2000`.
const INTERNET_COEFFICIENTS: [f64; 4] = [0.55347, 0.82056, -0.17983, 0.01555];
pub const INTERNET_YEAR_OFFSET: f64 = 2000.0;

const MISSING_YEARS: [i32; 4] = [2005, 2006, 2015, 2016];

const POPULATION_ESTIMATES: [f64; 4] = [
    226_468_653.0,
    229_259_233.0,
    253_330_546.0,
    256_026_641.0,
];

impl Dataset {
    /// Indonesian population and internet adoption, 2000-2018.
    pub fn indonesia() -> Result<Self, DatasetError> {
        let dataset = Self {
            population: Trend {
                series: ObservationSeries::from_columns("population", &YEARS, &POPULATION)?,
                polynomial: CubicPolynomial::new(POPULATION_COEFFICIENTS),
                estimates: EstimateSource::Supplied(POPULATION_ESTIMATES.to_vec()),
                labels: TrendLabels {
                    title: "Indonesia Population Estimate".to_string(),
                    x_label: "Year".to_string(),
                    y_label: "Population".to_string(),
                    observed: "Observed population".to_string(),
                    fitted: "Population regression".to_string(),
                    estimated: "Missing-year estimate".to_string(),
                },
            },
            internet: Trend {
                series: ObservationSeries::from_columns("internet", &YEARS, &INTERNET_PERCENT)?,
                polynomial: CubicPolynomial::with_offset(
                    INTERNET_COEFFICIENTS,
                    INTERNET_YEAR_OFFSET,
                ),
                estimates: EstimateSource::Polynomial,
                labels: TrendLabels {
                    title: "Indonesia Internet Users Estimate".to_string(),
                    x_label: "Year".to_string(),
                    y_label: "Percentage (%)".to_string(),
                    observed: "Observed internet users".to_string(),
                    fitted: "Internet users regression".to_string(),
                    estimated: "Missing-year estimate".to_string(),
                },
            },
            missing_years: MISSING_YEARS.to_vec(),
        };
        Ok(dataset)
    }

    pub fn trends(&self) -> [&Trend; 2] {
        [&self.population, &self.internet]
    }

    /// Check every series and every missing year against the sampling domain.
    pub fn validate(&self, domain: &RangeInclusive<f64>) -> Result<(), DatasetError> {
        for trend in self.trends() {
            let series = &trend.series;
            series.validate()?;

            if let EstimateSource::Supplied(values) = &trend.estimates {
                if values.len() != self.missing_years.len() {
                    return Err(DatasetError::EstimateCountMismatch {
                        series: series.name.clone(),
                        estimates: values.len(),
                        years: self.missing_years.len(),
                    });
                }
            }

            for (year, value) in trend.estimates_for(&self.missing_years) {
                if !value.is_finite() {
                    return Err(DatasetError::NonFiniteValue {
                        series: series.name.clone(),
                        year,
                    });
                }
            }

            let outside = series
                .years()
                .chain(self.missing_years.iter().copied())
                .find(|&year| !domain.contains(&f64::from(year)));
            if let Some(year) = outside {
                return Err(DatasetError::OutsideDomain {
                    series: series.name.clone(),
                    year,
                    min: *domain.start(),
                    max: *domain.end(),
                });
            }
        }
        Ok(())
    }
}
