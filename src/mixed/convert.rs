use crate::{Approximation, Fraction, MixedFraction, Problem};
use num::ToPrimitive;

impl MixedFraction {
    /// The closest simple mixed fraction to `value` within [`crate::DEFAULT_PRECISION`]
    ///
    /// ```
    /// use fractional::MixedFraction;
    /// let m = MixedFraction::from_f64(-2.25).unwrap();
    /// assert_eq!(m.to_string(), "-2 1/4");
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, Problem> {
        Approximation::new()
            .fraction(value)
            .map(MixedFraction::from_fraction)
    }

    pub fn from_f64_with_precision(value: f64, precision: f64) -> Result<Self, Problem> {
        Fraction::from_f64_with_precision(value, precision).map(MixedFraction::from_fraction)
    }
}

impl From<Fraction> for MixedFraction {
    fn from(f: Fraction) -> MixedFraction {
        MixedFraction::from_fraction(f)
    }
}

impl TryFrom<MixedFraction> for Fraction {
    type Error = Problem;

    fn try_from(m: MixedFraction) -> Result<Fraction, Self::Error> {
        m.to_fraction()
    }
}

impl From<i32> for MixedFraction {
    fn from(n: i32) -> MixedFraction {
        MixedFraction::from_fraction(Fraction::from(n))
    }
}

impl TryFrom<i64> for MixedFraction {
    type Error = Problem;

    fn try_from(n: i64) -> Result<MixedFraction, Self::Error> {
        Fraction::from_integer(n).map(MixedFraction::from_fraction)
    }
}

impl TryFrom<f64> for MixedFraction {
    type Error = Problem;

    fn try_from(n: f64) -> Result<MixedFraction, Self::Error> {
        MixedFraction::from_f64(n)
    }
}

impl ToPrimitive for MixedFraction {
    fn to_i64(&self) -> Option<i64> {
        self.to_fraction()
            .ok()
            .and_then(|f| i64::try_from(f).ok())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|n| u64::try_from(n).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(MixedFraction::to_f64(self))
    }
}
