use crate::fraction::{narrow, parse_integer};
use crate::{glyph, Fraction, Problem};
use num::bigint::Sign::{self, *};
use num::Integer;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use tracing::debug;

mod convert;

/// A whole number and a proper fraction, e.g. 3 ¼
///
/// This type is functionally a [`Sign`] with three non-negative integers:
/// the whole part, then the numerator and denominator of a fraction which
/// is never more than one. The fractional part never has a sign of its own,
/// [`MixedFraction::whole`] reports the sign whenever the whole part is
/// non-zero, and minus one half is written "-1/2".
///
/// All arithmetic goes through [`Fraction`], so each operator returns a
/// [`Result`] in the same way.
///
/// # Examples
///
/// Parsing a mixed fraction
/// ```
/// use fractional::MixedFraction;
/// let m: MixedFraction = "-2 3/4".parse().unwrap();
/// assert_eq!(m.whole(), -2);
/// assert_eq!(m.numerator(), 3);
/// assert_eq!(m.to_f64(), -2.75);
/// ```
///
/// Construction normalizes an improper fraction
/// ```
/// use fractional::MixedFraction;
/// let m = MixedFraction::new(1, 7, 3).unwrap();
/// assert_eq!(m.to_string(), "3 1/3");
/// assert_eq!(format!("{m:#}"), "3⅓");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct MixedFraction {
    sign: Sign,
    whole: i64,
    numerator: i64,
    denominator: i64,
}

impl MixedFraction {
    /// Zero, as 0/1
    pub fn zero() -> Self {
        Self {
            sign: NoSign,
            whole: 0,
            numerator: 0,
            denominator: 1,
        }
    }

    // Magnitudes are already normalized, the sign only matters if non-zero
    fn signed(negative: bool, whole: i64, numerator: i64, denominator: i64) -> Self {
        debug_assert!(whole >= 0 && numerator >= 0 && numerator <= denominator);
        let sign = if whole == 0 && numerator == 0 {
            NoSign
        } else if negative {
            Minus
        } else {
            Plus
        };
        Self {
            sign,
            whole,
            numerator,
            denominator,
        }
    }

    /// The value `whole` and `numerator / denominator`
    ///
    /// A negative fraction folds its sign into the whole value rather than
    /// being subtracted. If the numerator is larger than the denominator the
    /// excess moves into the whole part, while exactly one (e.g. 2 3/3) is
    /// left as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use fractional::{MixedFraction, Problem};
    /// let m = MixedFraction::new(-1, 1, 2).unwrap();
    /// assert_eq!(m.to_f64(), -1.5);
    /// let m = MixedFraction::new(1, -1, 2).unwrap();
    /// assert_eq!(m.to_f64(), -1.5);
    /// let m = MixedFraction::new(0, 5, 1).unwrap();
    /// assert_eq!(m, MixedFraction::new(5, 0, 1).unwrap());
    /// assert_eq!(MixedFraction::new(1, 1, 0), Err(Problem::DivideByZero));
    /// ```
    pub fn new(whole: i64, numerator: i64, denominator: i64) -> Result<Self, Problem> {
        if denominator == 0 {
            return Err(Problem::DivideByZero);
        }
        let fraction_negative = numerator != 0 && ((numerator < 0) != (denominator < 0));
        let negative = whole < 0 || fraction_negative;

        let whole = whole.checked_abs().ok_or(Problem::Overflow)?;
        let numerator = numerator.checked_abs().ok_or(Problem::Overflow)?;
        let denominator = denominator.checked_abs().ok_or(Problem::Overflow)?;
        let (whole, numerator) = if numerator > denominator {
            let (carry, numerator) = numerator.div_rem(&denominator);
            (whole.checked_add(carry).ok_or(Problem::Overflow)?, numerator)
        } else {
            (whole, numerator)
        };
        Ok(Self::signed(negative, whole, numerator, denominator))
    }

    /// Split a [`Fraction`] into whole and fractional parts
    ///
    /// The whole part is truncated towards zero
    ///
    /// ```
    /// use fractional::{Fraction, MixedFraction};
    /// let m = MixedFraction::from_fraction(Fraction::new(-22, 7).unwrap());
    /// assert_eq!((m.whole(), m.numerator(), m.denominator()), (-3, 1, 7));
    /// ```
    pub fn from_fraction(f: Fraction) -> Self {
        let (whole, numerator) = f.numerator().div_rem(&f.denominator());
        Self::signed(
            f.is_negative(),
            whole.abs(),
            numerator.abs(),
            f.denominator(),
        )
    }

    /// Parse text such as `"1 3/4"`, `"-2/3"` or `"1¾"`
    ///
    /// This is the same as [`str::parse`]
    pub fn parse(text: &str) -> Result<Self, Problem> {
        text.parse()
    }

    /// Whether [`MixedFraction::parse`] would accept this text
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// The whole part, with the sign applied
    pub fn whole(&self) -> i64 {
        match self.sign {
            Minus => -self.whole,
            _ => self.whole,
        }
    }

    /// Never negative, and never more than the denominator
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Always positive
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// The [`Sign`] of this value
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Positional access: 0 is [`whole`](Self::whole), 1 the numerator, 2 the denominator
    ///
    /// A value between -1 and 0 has a whole part of 0, so these three
    /// numbers alone lose its sign. Use [`sign`](Self::sign) as well to
    /// rebuild it.
    ///
    /// ```
    /// use fractional::{MixedFraction, Problem};
    /// let m = MixedFraction::new(-4, 2, 9).unwrap();
    /// assert_eq!(m.get(0), Ok(-4));
    /// assert_eq!(m.get(2), Ok(9));
    /// assert_eq!(m.get(3), Err(Problem::IndexOutOfRange));
    ///
    /// let minus_half: MixedFraction = "-1/2".parse().unwrap();
    /// assert_eq!(minus_half.get(0), Ok(0));
    /// assert!(minus_half.is_negative());
    /// ```
    pub fn get(&self, index: usize) -> Result<i64, Problem> {
        match index {
            0 => Ok(self.whole()),
            1 => Ok(self.numerator),
            2 => Ok(self.denominator),
            _ => Err(Problem::IndexOutOfRange),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Minus
    }

    pub fn is_zero(&self) -> bool {
        self.sign == NoSign
    }

    /// The value is an integer, either no fractional part or exactly one
    pub fn is_whole(&self) -> bool {
        self.numerator == 0 || self.numerator == self.denominator
    }

    /// Reduce the fractional part to lowest terms, the whole part is unchanged
    pub fn reduce(self) -> Self {
        let divisor = self.numerator.gcd(&self.denominator);
        Self {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
            ..self
        }
    }

    /// Flip the sign, zero stays zero
    pub fn negate(self) -> Self {
        -self
    }

    /// The fractional part alone, which is never negative
    pub fn fractional_part(&self) -> Fraction {
        Fraction::from_normalized(self.numerator, self.denominator)
    }

    /// The same value as an improper [`Fraction`]
    ///
    /// Fails with [`Problem::Overflow`] if the numerator would not fit
    pub fn to_fraction(&self) -> Result<Fraction, Problem> {
        let magnitude =
            i128::from(self.whole) * i128::from(self.denominator) + i128::from(self.numerator);
        let numerator = match self.sign {
            Minus => -magnitude,
            _ => magnitude,
        };
        Ok(Fraction::from_normalized(
            narrow(numerator)?,
            self.denominator,
        ))
    }

    pub fn to_f64(&self) -> f64 {
        let magnitude = self.whole as f64 + self.numerator as f64 / self.denominator as f64;
        match self.sign {
            Minus => -magnitude,
            _ => magnitude,
        }
    }

    fn parse_tokens(text: &str) -> Result<Self, Problem> {
        let mut tokens = text.split(' ');
        match (tokens.next(), tokens.next(), tokens.next()) {
            // The whole part is zero, as when displaying -1/2, so an improper
            // "11/2" is not quietly read as 5 1/2
            (Some(fraction), None, _) if fraction.contains('/') => {
                let fraction: Fraction = fraction.parse()?;
                if !fraction.is_proper() {
                    return Err(Problem::MalformedInput);
                }
                Self::new(0, fraction.numerator(), fraction.denominator())
            }
            (Some(token), Some(fraction), None) if fraction.contains('/') => {
                let whole = parse_integer(token)?;
                let fraction: Fraction = fraction.parse()?;
                let mixed = Self::new(whole, fraction.numerator(), fraction.denominator())?;
                // "-0 1/2" is negative just as "-1 1/2" is
                if whole == 0 && token.starts_with('-') && mixed.sign == Plus {
                    Ok(-mixed)
                } else {
                    Ok(mixed)
                }
            }
            _ => Err(Problem::MalformedInput),
        }
    }
}

use core::fmt;

impl fmt::Display for MixedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.sign == Minus { "-" } else { "" };
        let glyph = if f.alternate() && self.numerator != 0 {
            glyph::encode(self.numerator, self.denominator)
        } else {
            None
        };
        let (n, d) = (self.numerator, self.denominator);
        let text = match (self.whole, glyph) {
            (0, Some(glyph)) => format!("{sign}{glyph}"),
            (0, None) => format!("{sign}{n}/{d}"),
            (whole, Some(glyph)) => format!("{sign}{whole}{glyph}"),
            (whole, None) => format!("{sign}{whole} {n}/{d}"),
        };
        f.pad(&text)
    }
}

impl std::str::FromStr for MixedFraction {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        let text = glyph::decode(s);
        Self::parse_tokens(&text)
            .inspect_err(|problem| debug!(text = s, %problem, "Rejected mixed fraction"))
    }
}

use core::ops::*;

impl Add for MixedFraction {
    type Output = Result<Self, Problem>;

    /// Unlike the other operators, the sum is in lowest terms
    fn add(self, other: Self) -> Self::Output {
        let sum = (self.to_fraction()? + other.to_fraction()?)?;
        Ok(Self::from_fraction(sum.reduce()))
    }
}

impl Sub for MixedFraction {
    type Output = Result<Self, Problem>;

    fn sub(self, other: Self) -> Self::Output {
        let difference = (self.to_fraction()? - other.to_fraction()?)?;
        Ok(Self::from_fraction(difference))
    }
}

impl Mul for MixedFraction {
    type Output = Result<Self, Problem>;

    fn mul(self, other: Self) -> Self::Output {
        let product = (self.to_fraction()? * other.to_fraction()?)?;
        Ok(Self::from_fraction(product))
    }
}

impl Div for MixedFraction {
    type Output = Result<Self, Problem>;

    fn div(self, other: Self) -> Self::Output {
        let quotient = (self.to_fraction()? / other.to_fraction()?)?;
        Ok(Self::from_fraction(quotient))
    }
}

macro_rules! forward_ref_binop {
    ($($imp:ident $method:ident),* $(,)?) => {
        $(
            impl $imp<&MixedFraction> for &MixedFraction {
                type Output = Result<MixedFraction, Problem>;

                fn $method(self, other: &MixedFraction) -> Self::Output {
                    $imp::$method(*self, *other)
                }
            }
        )*
    };
}

forward_ref_binop!(Add add, Sub sub, Mul mul, Div div);

impl Neg for MixedFraction {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}

impl MixedFraction {
    // A fractional part of exactly one counts towards the whole part
    fn carried(&self) -> (i128, i64, i64) {
        if self.numerator == self.denominator {
            (i128::from(self.whole) + 1, 0, self.denominator)
        } else {
            (i128::from(self.whole), self.numerator, self.denominator)
        }
    }

    // Magnitudes only, the sign is compared separately
    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let (whole, n1, d1) = self.carried();
        let (other_whole, n2, d2) = other.carried();
        let left = i128::from(n1) * i128::from(d2);
        let right = i128::from(n2) * i128::from(d1);
        whole.cmp(&other_whole).then(left.cmp(&right))
    }
}

impl PartialEq for MixedFraction {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.cmp_magnitude(other) == Ordering::Equal
    }
}

impl Eq for MixedFraction {}

impl Hash for MixedFraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let reduced = self.reduce();
        reduced.sign.hash(state);
        reduced.carried().hash(state);
    }
}

impl PartialOrd for MixedFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MixedFraction {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => (),
            unequal => return unequal,
        }
        let magnitude = self.cmp_magnitude(other);
        match self.sign {
            Minus => magnitude.reverse(),
            _ => magnitude,
        }
    }
}
