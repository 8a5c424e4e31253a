//! Axis builders and post-processing helpers for sampled output series.
//!
//! Sweeps are bounded, caller-sized loops: an axis builder produces the sample
//! points, a mapper evaluates the model at each point, and the post-processing
//! helpers convert complex samples to magnitude/dB/phase. Nothing here is
//! incremental or stateful.

use crate::math::{CScalar, Scalar};

/// Generates `n` linearly spaced samples in `[start, stop]`.
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples between `start` and `stop`.
/// Requires both endpoints positive.
#[must_use]
pub fn logspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    assert!(start > 0.0 && stop > 0.0);
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let log_start = start.log10();
            let step = (stop.log10() - log_start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect()
        }
    }
}

/// Time axis for transient sampling: `n` samples from 0 to `duration` seconds.
#[must_use]
pub fn time_axis(duration: Scalar, n: usize) -> Vec<Scalar> {
    linspace(0.0, duration, n)
}

/// Applies `f` to each sample point and collects the results.
#[must_use]
pub fn sample_map<I, F, T>(points: I, mut f: F) -> Vec<T>
where
    I: IntoIterator<Item = Scalar>,
    F: FnMut(Scalar) -> T,
{
    points.into_iter().map(|x| f(x)).collect()
}

/// Magnitude in dB (`20·log10|x|`), clamping very small values.
#[must_use]
pub fn to_db(magnitude: Scalar) -> Scalar {
    const MIN: Scalar = 1e-300;
    20.0 * magnitude.max(MIN).log10()
}

/// Magnitudes of a complex sequence.
#[must_use]
pub fn magnitudes(values: impl IntoIterator<Item = CScalar>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.norm()).collect()
}

/// Phase in degrees of a complex sequence.
#[must_use]
pub fn phases_deg(values: impl IntoIterator<Item = CScalar>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.arg().to_degrees()).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use num_complex::Complex;

    use super::*;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn logspace_endpoints_are_exactish() {
        let v = logspace(20.0, 100_000.0, 7);
        assert_relative_eq!(v[0], 20.0, max_relative = 1e-12);
        assert_relative_eq!(v[6], 100_000.0, max_relative = 1e-9);
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn time_axis_starts_at_zero() {
        let t = time_axis(0.01, 11);
        assert_relative_eq!(t[0], 0.0);
        assert_relative_eq!(t[10], 0.01, epsilon = 1e-15);
    }

    #[test]
    fn db_of_unity_is_zero() {
        assert_relative_eq!(to_db(1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(to_db(10.0), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn sample_map_runs_function() {
        let out = sample_map(vec![1.0, 2.0, 3.0], |x| x * 2.0);
        assert_eq!(out, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn magnitudes_and_phases() {
        let xs = vec![Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)];
        let m = magnitudes(xs.clone());
        let p = phases_deg(xs);
        assert_relative_eq!(m[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 90.0, epsilon = 1e-12);
    }
}
