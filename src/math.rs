//! Shared numerical primitives for frequency-domain work.
//!
//! Complex arithmetic is anchored on `num_complex`; the helpers here add the
//! zero-denominator guards the impedance algebra relies on. Dividing by a
//! zero-magnitude impedance yields an infinite impedance (`{∞, 0}`), never NaN,
//! so every operation stays total over finite inputs.

use num_complex::Complex;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasors and impedances.
pub type CScalar = Complex<Scalar>;

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    Complex::from_polar(1.0, theta)
}

/// Infinite impedance sentinel returned by the zero-denominator guards.
#[must_use]
pub fn infinite_impedance() -> CScalar {
    Complex::new(Scalar::INFINITY, 0.0)
}

/// Complex division with the open-circuit guard: `num / den`, or `{∞, 0}` when
/// the denominator magnitude is zero.
#[must_use]
pub fn safe_div(num: CScalar, den: CScalar) -> CScalar {
    if den.norm() <= Scalar::EPSILON {
        infinite_impedance()
    } else {
        num / den
    }
}

/// Complex reciprocal with the same zero guard as [`safe_div`].
#[must_use]
pub fn safe_recip(z: CScalar) -> CScalar {
    safe_div(Complex::new(1.0, 0.0), z)
}

/// Parallel combination of two impedances, `Z₁Z₂ / (Z₁ + Z₂)`.
///
/// An infinite operand drops out of the combination (open branch); a zero sum
/// returns the infinite-impedance sentinel.
#[must_use]
pub fn parallel(z1: CScalar, z2: CScalar) -> CScalar {
    if !z1.norm().is_finite() {
        return z2;
    }
    if !z2.norm().is_finite() {
        return z1;
    }
    safe_div(z1 * z2, z1 + z2)
}

/// Magnitude `√(re² + im²)`.
#[must_use]
pub fn magnitude(z: CScalar) -> Scalar {
    z.norm()
}

/// Phase angle in radians via `atan2`.
#[must_use]
pub fn phase_rad(z: CScalar) -> Scalar {
    z.arg()
}

/// Phase angle in degrees.
#[must_use]
pub fn phase_deg(z: CScalar) -> Scalar {
    z.arg().to_degrees()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn safe_div_by_zero_is_open_circuit() {
        let z = safe_div(Complex::new(1.0, 0.0), Complex::new(0.0, 0.0));
        assert!(z.re.is_infinite());
        assert_relative_eq!(z.im, 0.0);
    }

    #[test]
    fn safe_recip_matches_division() {
        let z = Complex::new(3.0, -4.0);
        let r = safe_recip(z);
        assert_relative_eq!((r * z).re, 1.0, epsilon = 1e-12);
        assert_relative_eq!((r * z).im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_of_equal_resistances_halves() {
        let z = parallel(Complex::new(100.0, 0.0), Complex::new(100.0, 0.0));
        assert_relative_eq!(z.re, 50.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_with_open_branch_passes_through() {
        let z = parallel(infinite_impedance(), Complex::new(470.0, 33.0));
        assert_relative_eq!(z.re, 470.0);
        assert_relative_eq!(z.im, 33.0);
    }

    #[test]
    fn phase_of_pure_reactance_is_quarter_turn() {
        assert_relative_eq!(phase_deg(Complex::new(0.0, 1.0)), 90.0, epsilon = 1e-12);
        assert_relative_eq!(phase_deg(Complex::new(0.0, -1.0)), -90.0, epsilon = 1e-12);
    }
}
