//! Cubic Polynomial Module
//! Evaluates degree-3 regression polynomials with precomputed coefficients.

/// Number of coefficients in a cubic polynomial.
pub const CUBIC_TERMS: usize = 4;

/// A degree-3 polynomial `a0 + a1*x + a2*x^2 + a3*x^3`.
///
/// `x_offset` is the origin the coefficients were fit against. Coefficients
/// fit on raw years use an offset of 0; coefficients fit on zero-based years
/// (`year - 2000`) use 2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPolynomial {
    coefficients: [f64; CUBIC_TERMS],
    x_offset: f64,
}

impl CubicPolynomial {
    /// Coefficients in constant-to-cubic order, evaluated at the raw x value.
    pub const fn new(coefficients: [f64; CUBIC_TERMS]) -> Self {
        Self {
            coefficients,
            x_offset: 0.0,
        }
    }

    /// Coefficients fit against `year - x_offset`.
    pub const fn with_offset(coefficients: [f64; CUBIC_TERMS], x_offset: f64) -> Self {
        Self {
            coefficients,
            x_offset,
        }
    }

    pub fn coefficients(&self) -> &[f64; CUBIC_TERMS] {
        &self.coefficients
    }

    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }

    /// Evaluate at `x` exactly as given. The caller is responsible for
    /// applying the offset convention.
    pub fn evaluate(&self, x: f64) -> f64 {
        let [a0, a1, a2, a3] = self.coefficients;
        a0 + a1 * x + a2 * x.powi(2) + a3 * x.powi(3)
    }

    /// Evaluate at a calendar year, shifting it by the fitted offset first.
    pub fn evaluate_year(&self, year: f64) -> f64 {
        self.evaluate(year - self.x_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POPULATION: [f64; 4] = [
        -10182056898958.94922,
        15178883958.25156,
        -7543763.53367,
        1249.94434,
    ];
    const INTERNET: [f64; 4] = [0.55347, 0.82056, -0.17983, 0.01555];

    fn assert_close(actual: f64, expected: f64, rel: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= rel * scale,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn raw_year_evaluation_matches_direct_cubic() {
        let poly = CubicPolynomial::new(POPULATION);
        let x = 2000.0_f64;
        let direct = POPULATION[0]
            + POPULATION[1] * x
            + POPULATION[2] * x * x
            + POPULATION[3] * x * x * x;
        assert_close(poly.evaluate(x), direct, 1e-12);
        // Roughly 211.6 million at the start of the series.
        assert!((poly.evaluate(x) - 211_602_864.17).abs() < 1.0);
    }

    #[test]
    fn offset_polynomial_at_origin_is_constant_term() {
        let poly = CubicPolynomial::with_offset(INTERNET, 2000.0);
        assert_eq!(poly.evaluate(0.0), 0.55347);
        assert_eq!(poly.evaluate_year(2000.0), 0.55347);
    }

    #[test]
    fn evaluate_year_applies_offset() {
        let poly = CubicPolynomial::with_offset(INTERNET, 2000.0);
        for year in [2005.0, 2006.0, 2015.0, 2016.0] {
            assert_eq!(poly.evaluate_year(year), poly.evaluate(year - 2000.0));
        }
        assert_close(poly.evaluate(15.0), 24.88137, 1e-9);
    }

    #[test]
    fn raw_polynomial_has_zero_offset() {
        let poly = CubicPolynomial::new(POPULATION);
        assert_eq!(poly.x_offset(), 0.0);
        assert_eq!(poly.evaluate_year(2010.0), poly.evaluate(2010.0));
        assert_eq!(poly.coefficients(), &POPULATION);
    }
}
