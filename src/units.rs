//! Strongly typed unit helpers for reporting computed quantities.
//!
//! The engine does its arithmetic on bare [`Scalar`]s; these wrappers exist at
//! the reporting seam so a displayed value always carries its unit symbol.

use core::fmt;
use core::marker::PhantomData;

use crate::math::Scalar;

/// Marker trait for physical units.
pub trait Unit {
    /// Unit symbol appended by the `Display` implementation.
    const SYMBOL: &'static str;
}

macro_rules! unit {
    ($(#[$doc:meta])* $name:ident, $symbol:literal) => {
        $(#[$doc])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Unit for $name {
            const SYMBOL: &'static str = $symbol;
        }
    };
}

unit!(/// Ohm (Ω), electrical resistance/impedance magnitude.
    Ohm, "Ω");
unit!(/// Henry (H), inductance.
    Henry, "H");
unit!(/// Farad (F), capacitance.
    Farad, "F");
unit!(/// Hertz (Hz), frequency.
    Hertz, "Hz");
unit!(/// Tesla (T), magnetic flux density.
    Tesla, "T");
unit!(/// Volt (V), electric potential.
    Volt, "V");

/// A scalar value tagged with its unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<V, U: Unit> {
    value: V,
    _unit: PhantomData<U>,
}

impl<U: Unit> Quantity<Scalar, U> {
    /// Wraps a raw value.
    #[must_use]
    pub const fn new(value: Scalar) -> Self {
        Self {
            value,
            _unit: PhantomData,
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> Scalar {
        self.value
    }
}

impl<U: Unit> fmt::Display for Quantity<Scalar, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, U::SYMBOL)
    }
}

/// Impedance magnitude in ohms.
pub type Impedance<V> = Quantity<V, Ohm>;
/// Inductance in henries.
pub type Inductance<V> = Quantity<V, Henry>;
/// Capacitance in farads.
pub type Capacitance<V> = Quantity<V, Farad>;
/// Frequency in hertz.
pub type Frequency<V> = Quantity<V, Hertz>;
/// Magnetic flux density in tesla.
pub type FluxDensity<V> = Quantity<V, Tesla>;
/// Voltage in volts.
pub type Voltage<V> = Quantity<V, Volt>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_unit_symbol() {
        let z: Impedance<Scalar> = Impedance::new(6_000.0);
        let printed = format!("{z}");
        assert!(
            printed.ends_with('Ω'),
            "expected impedance string to include ohm symbol, got {printed}"
        );
        let b: FluxDensity<Scalar> = FluxDensity::new(0.18);
        assert!(format!("{b}").ends_with('T'));
    }

    #[test]
    fn value_roundtrips() {
        let l: Inductance<Scalar> = Inductance::new(2.2);
        assert_eq!(l.value(), 2.2);
    }
}
