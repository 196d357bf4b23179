//! Stats module - Polynomial trend evaluation and curve sampling

mod polynomial;
mod sampling;

pub use polynomial::CubicPolynomial;
pub use sampling::{sample_curve, CurveSamples};
