use crate::{Fraction, Problem};
use num::ToPrimitive;
use tracing::{debug, trace};

/// Default bound on the error of a float approximation
pub const DEFAULT_PRECISION: f64 = 1.0e-12;

/// Default cap on continued fraction terms, independent of the precision
pub const DEFAULT_MAX_ITERATIONS: u32 = 64;

/// Settings for turning a floating point value into a [`Fraction`]
///
/// The value is expanded as a continued fraction until the convergent is
/// within `precision` of it, the expansion is exact, or `max_iterations`
/// terms have been taken. Floating point noise means some values never
/// converge, so the cap is always applied.
///
/// # Examples
///
/// ```
/// use fractional::{Approximation, Fraction};
/// let rough = Approximation::new().with_precision(1e-4);
/// let pi = rough.fraction(std::f64::consts::PI).unwrap();
/// assert_eq!(pi, Fraction::new(333, 106).unwrap());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Approximation {
    precision: f64,
    max_iterations: u32,
}

impl Default for Approximation {
    fn default() -> Self {
        Self::new()
    }
}

// Some(n) if this non-negative whole float fits in a Fraction part
fn term(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which itself does not fit
    if n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

impl Approximation {
    pub const fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub const fn with_precision(self, precision: f64) -> Self {
        Self { precision, ..self }
    }

    pub const fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// ```
    /// use fractional::{Approximation, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};
    /// let settings = Approximation::default().with_max_iterations(8);
    /// assert_eq!(settings.precision(), DEFAULT_PRECISION);
    /// assert_eq!(settings.max_iterations(), 8);
    /// assert_eq!(Approximation::new().max_iterations(), DEFAULT_MAX_ITERATIONS);
    /// ```
    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The continued fraction approximation of `value`
    ///
    /// Fails with [`Problem::NonFiniteValue`] for NaN or infinity and with
    /// [`Problem::Overflow`] if even the integer part doesn't fit. If a later
    /// convergent would overflow the expansion stops at the previous one.
    pub fn fraction(&self, value: f64) -> Result<Fraction, Problem> {
        if !value.is_finite() {
            return Err(Problem::NonFiniteValue);
        }
        let target = value.abs();
        let whole = target.floor();
        let first = term(whole).ok_or(Problem::Overflow)?;

        let (mut h0, mut k0) = (1_i64, 0_i64);
        let (mut h1, mut k1) = (first, 1_i64);
        let mut rest = target - whole;
        let mut iterations = 0;
        loop {
            let error = (h1 as f64 / k1 as f64 - target).abs();
            if error < self.precision || rest == 0.0 {
                break;
            }
            if iterations == self.max_iterations {
                debug!(value, iterations, error, "Continued fraction hit iteration cap");
                break;
            }
            iterations += 1;

            let reciprocal = rest.recip();
            let a = reciprocal.floor();
            rest = reciprocal - a;
            let next = term(a).and_then(|a| {
                let h2 = a.checked_mul(h1)?.checked_add(h0)?;
                let k2 = a.checked_mul(k1)?.checked_add(k0)?;
                Some((a, h2, k2))
            });
            let Some((a, h2, k2)) = next else {
                debug!(value, iterations, error, "Next convergent would overflow");
                break;
            };
            trace!(term = a, numerator = h2, denominator = k2, "Convergent");
            (h0, k0, h1, k1) = (h1, k1, h2, k2);
        }

        let numerator = if value.is_sign_negative() { -h1 } else { h1 };
        Fraction::new(numerator, k1)
    }
}

impl Fraction {
    /// The closest simple fraction to `value` within [`DEFAULT_PRECISION`]
    ///
    /// # Examples
    ///
    /// ```
    /// use fractional::Fraction;
    /// assert_eq!(Fraction::from_f64(1.5).unwrap(), Fraction::new(3, 2).unwrap());
    /// assert_eq!(Fraction::from_f64(-8.5).unwrap(), Fraction::new(-17, 2).unwrap());
    /// assert!(Fraction::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, Problem> {
        Approximation::new().fraction(value)
    }

    pub fn from_f64_with_precision(value: f64, precision: f64) -> Result<Self, Problem> {
        Approximation::new().with_precision(precision).fraction(value)
    }
}

impl From<i32> for Fraction {
    fn from(n: i32) -> Fraction {
        Fraction::from_normalized(n.into(), 1)
    }
}

impl TryFrom<i64> for Fraction {
    type Error = Problem;

    fn try_from(n: i64) -> Result<Fraction, Self::Error> {
        Fraction::from_integer(n)
    }
}

impl TryFrom<f64> for Fraction {
    type Error = Problem;

    fn try_from(n: f64) -> Result<Fraction, Self::Error> {
        Fraction::from_f64(n)
    }
}

impl TryFrom<f32> for Fraction {
    type Error = Problem;

    fn try_from(n: f32) -> Result<Fraction, Self::Error> {
        Fraction::from_f64(n.into())
    }
}

impl TryFrom<Fraction> for i64 {
    type Error = Problem;

    fn try_from(f: Fraction) -> Result<i64, Self::Error> {
        if f.is_whole() {
            Ok(f.numerator() / f.denominator())
        } else {
            Err(Problem::NotAnInteger)
        }
    }
}

impl ToPrimitive for Fraction {
    fn to_i64(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|n| u64::try_from(n).ok())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Fraction::to_f64(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn halves() {
        assert_eq!(Fraction::from_f64(1.5).unwrap(), frac(3, 2));
        assert_eq!(Fraction::from_f64(-8.5).unwrap(), frac(-17, 2));
        assert_eq!(Fraction::try_from(0.5_f32).unwrap(), frac(1, 2));
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(Fraction::from_f64(0.0).unwrap(), Fraction::zero());
        assert_eq!(Fraction::from_f64(-0.0).unwrap(), Fraction::zero());
        let f = Fraction::from_f64(42.0).unwrap();
        assert_eq!((f.numerator(), f.denominator()), (42, 1));
    }

    #[test]
    fn decimals() {
        assert_eq!(Fraction::from_f64(0.1).unwrap(), frac(1, 10));
        assert_eq!(Fraction::from_f64(0.75).unwrap(), frac(3, 4));
        assert_eq!(Fraction::from_f64(-2.2).unwrap(), frac(-11, 5));
    }

    #[test]
    fn rough_pi() {
        let pi = Fraction::from_f64_with_precision(PI, 1e-4).unwrap();
        assert_eq!((pi.numerator(), pi.denominator()), (333, 106));
        let pi = Fraction::from_f64_with_precision(PI, 1e-2).unwrap();
        assert_eq!((pi.numerator(), pi.denominator()), (22, 7));
    }

    #[test]
    fn close_pi() {
        let pi = Fraction::from_f64(PI).unwrap();
        assert!((pi.to_f64() - PI).abs() < DEFAULT_PRECISION);
        assert!(pi.denominator() > 100_000);
    }

    #[test]
    fn iteration_cap() {
        let just_three = Approximation::new().with_max_iterations(0);
        assert_eq!(just_three.fraction(PI).unwrap(), Fraction::from(3));
        assert_eq!(just_three.max_iterations(), 0);
        assert_eq!(just_three.precision(), DEFAULT_PRECISION);
        let two_terms = Approximation::new()
            .with_precision(0.0)
            .with_max_iterations(2);
        assert_eq!(two_terms.fraction(PI).unwrap(), frac(333, 106));
    }

    #[test]
    fn non_finite() {
        assert_eq!(Fraction::from_f64(f64::NAN), Err(Problem::NonFiniteValue));
        assert_eq!(
            Fraction::from_f64(f64::INFINITY),
            Err(Problem::NonFiniteValue)
        );
        assert_eq!(
            Fraction::try_from(f32::NEG_INFINITY),
            Err(Problem::NonFiniteValue)
        );
    }

    #[test]
    fn too_large() {
        assert_eq!(Fraction::from_f64(1e30), Err(Problem::Overflow));
        assert_eq!(Fraction::from_f64(-1e19), Err(Problem::Overflow));
    }

    #[test]
    fn tiny_values_stop_before_overflow() {
        let tiny = Fraction::from_f64(1e-30).unwrap();
        assert_eq!(tiny, Fraction::zero());
        let tiny = Fraction::from_f64_with_precision(1e-30, 0.0).unwrap();
        assert_eq!(tiny, Fraction::zero());
    }

    #[test]
    fn integers() {
        assert_eq!(i64::try_from(frac(12, 4)), Ok(3));
        assert_eq!(i64::try_from(frac(-12, 4)), Ok(-3));
        assert_eq!(i64::try_from(frac(1, 4)), Err(Problem::NotAnInteger));
        assert_eq!(Fraction::try_from(i64::MIN), Err(Problem::Overflow));
        assert_eq!(frac(-8, 2).to_u64(), None);
        assert_eq!(frac(8, 2).to_u64(), Some(4));
        assert_eq!(ToPrimitive::to_f64(&frac(1, 8)), Some(0.125));
    }
}
