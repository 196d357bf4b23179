//! Curve Sampling Module
//! Produces evenly spaced (x, f(x)) points for drawing fitted curves.

use std::iter::FusedIterator;

/// Lazily evaluates `f` at `count` evenly spaced x values over `[x_min, x_max]`.
///
/// The first sample is exactly `x_min` and, for two or more samples, the last
/// is exactly `x_max`. The iterator is a pure function of its inputs, so a
/// clone replays the same sequence.
pub fn sample_curve<F>(f: F, x_min: f64, x_max: f64, count: usize) -> CurveSamples<F>
where
    F: Fn(f64) -> f64,
{
    CurveSamples {
        f,
        x_min,
        x_max,
        count,
        index: 0,
    }
}

#[derive(Clone)]
pub struct CurveSamples<F> {
    f: F,
    x_min: f64,
    x_max: f64,
    count: usize,
    index: usize,
}

impl<F> CurveSamples<F> {
    fn x_at(&self, i: usize) -> f64 {
        if i + 1 == self.count && self.count > 1 {
            // Pin the endpoint instead of accumulating rounding error.
            return self.x_max;
        }
        if self.count < 2 {
            return self.x_min;
        }
        let step = (self.x_max - self.x_min) / (self.count - 1) as f64;
        self.x_min + i as f64 * step
    }
}

impl<F> Iterator for CurveSamples<F>
where
    F: Fn(f64) -> f64,
{
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let x = self.x_at(self.index);
        self.index += 1;
        Some((x, (self.f)(x)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<F> ExactSizeIterator for CurveSamples<F> where F: Fn(f64) -> f64 {}

impl<F> FusedIterator for CurveSamples<F> where F: Fn(f64) -> f64 {}
