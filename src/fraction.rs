use crate::{glyph, MixedFraction, Problem};
use num::Integer;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use tracing::debug;

pub(crate) mod convert;

/// Ratio of two integers
///
/// This type is a signed 64-bit numerator over a positive 64-bit denominator.
/// The sign always lives in the numerator, a negative denominator supplied
/// at construction is moved across. Neither part is ever [`i64::MIN`], so
/// every value can be negated.
///
/// Fractions are not reduced unless you ask, but equality does not care:
/// 1/2, 2/4 and -1/-2 are all equal.
///
/// Arithmetic is exact. Because the parts have a fixed width, each of the
/// operators returns a [`Result`] which is [`Problem::Overflow`] if the
/// answer can't be represented even in lowest terms.
///
/// # Examples
///
/// Parsing a fraction
/// ```
/// use fractional::Fraction;
/// let half: Fraction = "2/4".parse().unwrap();
/// assert_eq!(half, Fraction::new(1, 2).unwrap());
/// assert_eq!(half.to_string(), "2/4");
/// ```
///
/// Parsing a vulgar fraction glyph
/// ```
/// use fractional::Fraction;
/// let three_quarters: Fraction = "¾".parse().unwrap();
/// assert_eq!(three_quarters, Fraction::new(3, 4).unwrap());
/// ```
///
/// Simple arithmetic
/// ```
/// use fractional::Fraction;
/// let quarter = Fraction::new(1, 4).unwrap();
/// let sixteen = Fraction::from(16);
/// let four = (quarter * sixteen).unwrap();
/// assert_eq!(four, Fraction::from(4));
/// assert_eq!(four.to_string(), "16/4");
/// assert_eq!(four.reduce().to_string(), "4");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

fn in_range(n: i64) -> Result<i64, Problem> {
    if n == i64::MIN {
        Err(Problem::Overflow)
    } else {
        Ok(n)
    }
}

/// Narrow a wide intermediate back into the range a [`Fraction`] can store
pub(crate) fn narrow(n: i128) -> Result<i64, Problem> {
    match i64::try_from(n) {
        Ok(i64::MIN) | Err(_) => Err(Problem::Overflow),
        Ok(n) => Ok(n),
    }
}

fn parse_digits(text: &str) -> Result<i64, Problem> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Problem::MalformedInput);
    }
    // Only ASCII digits remain so the only possible failure is size
    text.parse().map_err(|_| Problem::Overflow)
}

/// An optional `-` followed by decimal digits, nothing else
pub(crate) fn parse_integer(text: &str) -> Result<i64, Problem> {
    match text.strip_prefix('-') {
        Some(digits) => parse_digits(digits).map(|n| -n),
        None => parse_digits(text),
    }
}

impl Fraction {
    /// Zero, the additive identity
    pub fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    /// One, the multiplicative identity
    pub fn one() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }

    /// The fraction `numerator / denominator`, not reduced
    ///
    /// # Examples
    ///
    /// ```
    /// use fractional::{Fraction, Problem};
    /// let minus_half = Fraction::new(1, -2).unwrap();
    /// assert_eq!(minus_half.numerator(), -1);
    /// assert_eq!(minus_half.denominator(), 2);
    /// assert_eq!(Fraction::new(1, 0), Err(Problem::DivideByZero));
    /// ```
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, Problem> {
        if denominator == 0 {
            return Err(Problem::DivideByZero);
        }
        let numerator = in_range(numerator)?;
        let denominator = in_range(denominator)?;
        if denominator < 0 {
            Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            })
        } else {
            Ok(Self {
                numerator,
                denominator,
            })
        }
    }

    /// The whole number `n` as a fraction over one
    pub fn from_integer(n: i64) -> Result<Self, Problem> {
        Self::new(n, 1)
    }

    /// Caller guarantees `denominator > 0` and neither part is [`i64::MIN`]
    pub(crate) fn from_normalized(numerator: i64, denominator: i64) -> Self {
        debug_assert!(denominator > 0);
        debug_assert!(numerator != i64::MIN);
        Self {
            numerator,
            denominator,
        }
    }

    // Results of cross multiplication, which may need reducing to fit
    fn from_wide(numerator: i128, denominator: i128) -> Result<Self, Problem> {
        debug_assert!(denominator != 0);
        let (numerator, denominator) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        if let (Ok(numerator), Ok(denominator)) = (narrow(numerator), narrow(denominator)) {
            return Ok(Self {
                numerator,
                denominator,
            });
        }
        let divisor = numerator.gcd(&denominator);
        Ok(Self {
            numerator: narrow(numerator / divisor)?,
            denominator: narrow(denominator / divisor)?,
        })
    }

    /// Parse text such as `"3/4"`, `"-7"` or `"½"`
    ///
    /// This is the same as [`str::parse`]
    pub fn parse(text: &str) -> Result<Self, Problem> {
        text.parse()
    }

    /// Whether [`Fraction::parse`] would accept this text
    ///
    /// ```
    /// use fractional::Fraction;
    /// assert!(Fraction::is_valid("-12/5"));
    /// assert!(!Fraction::is_valid("12/-5"));
    /// assert!(!Fraction::is_valid("1/0"));
    /// ```
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Always positive
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// The same value in lowest terms
    ///
    /// # Example
    ///
    /// ```
    /// use fractional::Fraction;
    /// let six_eighths = Fraction::new(-6, 8).unwrap();
    /// let reduced = six_eighths.reduce();
    /// assert_eq!((reduced.numerator(), reduced.denominator()), (-3, 4));
    /// assert_eq!(Fraction::new(0, 9).unwrap().reduce().denominator(), 1);
    /// ```
    pub fn reduce(self) -> Self {
        // gcd(0, d) is d, so zero becomes 0/1
        let divisor = self.numerator.gcd(&self.denominator);
        Self {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
        }
    }

    /// The inverse of this Fraction
    ///
    /// # Example
    ///
    /// ```
    /// use fractional::{Fraction, Problem};
    /// let minus_five = Fraction::from(-5);
    /// let inverse = minus_five.inverse().unwrap();
    /// assert_eq!((inverse.numerator(), inverse.denominator()), (-1, 5));
    /// assert_eq!(Fraction::zero().inverse(), Err(Problem::DivideByZero));
    /// ```
    pub fn inverse(self) -> Result<Self, Problem> {
        if self.numerator == 0 {
            return Err(Problem::DivideByZero);
        }
        Self::new(self.denominator, self.numerator)
    }

    /// ```
    /// use fractional::Fraction;
    /// let abs = Fraction::new(3, -4).unwrap().abs();
    /// assert_eq!((abs.numerator(), abs.denominator()), (3, 4));
    /// ```
    pub fn abs(self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            ..self
        }
    }

    /// Checks if the value is an integer, in any terms
    ///
    /// ```
    /// use fractional::Fraction;
    /// assert!(Fraction::new(16, 4).unwrap().is_whole());
    /// assert!(!Fraction::new(5, 4).unwrap().is_whole());
    /// ```
    pub fn is_whole(&self) -> bool {
        self.numerator % self.denominator == 0
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// The magnitude of the numerator does not exceed the denominator
    pub fn is_proper(&self) -> bool {
        self.numerator.unsigned_abs() <= self.denominator.unsigned_abs()
    }

    /// The integer part, truncated towards zero
    ///
    /// ```
    /// use fractional::Fraction;
    /// let approx_pi = Fraction::new(22, 7).unwrap();
    /// assert_eq!(approx_pi.trunc(), Fraction::from(3));
    /// ```
    pub fn trunc(&self) -> Self {
        Self {
            numerator: self.numerator / self.denominator,
            denominator: 1,
        }
    }

    /// The fractional part, negative if this fraction was negative
    ///
    /// ```
    /// use fractional::Fraction;
    /// let backward = Fraction::new(-53, 9).unwrap();
    /// assert_eq!(backward.fract(), Fraction::new(-8, 9).unwrap());
    /// ```
    pub fn fract(&self) -> Self {
        Self {
            numerator: self.numerator % self.denominator,
            denominator: self.denominator,
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn to_mixed_fraction(self) -> MixedFraction {
        MixedFraction::from_fraction(self)
    }

    fn parse_text(text: &str) -> Result<Self, Problem> {
        match text.split_once('/') {
            // Any further '/' lands in the denominator and fails as a non-digit
            Some((n, d)) => Self::new(parse_integer(n)?, parse_digits(d)?),
            None => Self::from_integer(parse_integer(text)?),
        }
    }

    fn cross(&self, other: &Self) -> (i128, i128) {
        (
            i128::from(self.numerator) * i128::from(other.denominator),
            i128::from(other.numerator) * i128::from(self.denominator),
        )
    }
}

use core::fmt;

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            if let Some(glyph) = glyph::encode(self.numerator.abs(), self.denominator) {
                let sign = if self.is_negative() { "-" } else { "" };
                return f.pad(&format!("{sign}{glyph}"));
            }
        }
        if self.denominator == 1 {
            let int = self.numerator.unsigned_abs().to_string();
            return f.pad_integral(self.numerator >= 0, "", &int);
        }
        f.pad(&format!("{}/{}", self.numerator, self.denominator))
    }
}

impl std::str::FromStr for Fraction {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        let text = glyph::decode(s);
        Self::parse_text(&text)
            .inspect_err(|problem| debug!(text = s, %problem, "Rejected fraction"))
    }
}

use core::ops::*;

impl Add for Fraction {
    type Output = Result<Self, Problem>;

    fn add(self, other: Self) -> Self::Output {
        let (a, b) = self.cross(&other);
        let denominator = i128::from(self.denominator) * i128::from(other.denominator);
        Self::from_wide(a + b, denominator)
    }
}

impl Sub for Fraction {
    type Output = Result<Self, Problem>;

    fn sub(self, other: Self) -> Self::Output {
        let (a, b) = self.cross(&other);
        let denominator = i128::from(self.denominator) * i128::from(other.denominator);
        Self::from_wide(a - b, denominator)
    }
}

impl Mul for Fraction {
    type Output = Result<Self, Problem>;

    fn mul(self, other: Self) -> Self::Output {
        let numerator = i128::from(self.numerator) * i128::from(other.numerator);
        let denominator = i128::from(self.denominator) * i128::from(other.denominator);
        Self::from_wide(numerator, denominator)
    }
}

impl Div for Fraction {
    type Output = Result<Self, Problem>;

    fn div(self, other: Self) -> Self::Output {
        if other.numerator == 0 {
            return Err(Problem::DivideByZero);
        }
        let (numerator, denominator) = self.cross(&other);
        Self::from_wide(numerator, denominator)
    }
}

macro_rules! forward_ref_binop {
    ($($imp:ident $method:ident),* $(,)?) => {
        $(
            impl $imp<&Fraction> for &Fraction {
                type Output = Result<Fraction, Problem>;

                fn $method(self, other: &Fraction) -> Self::Output {
                    $imp::$method(*self, *other)
                }
            }
        )*
    };
}

forward_ref_binop!(Add add, Sub sub, Mul mul, Div div);

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            ..self
        }
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.cross(other);
        a == b
    }
}

impl Eq for Fraction {}

// Equal fractions share a reduced form, so hash that
impl Hash for Fraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let reduced = self.reduce();
        reduced.numerator.hash(state);
        reduced.denominator.hash(state);
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Both denominators are positive
        let (left, right) = self.cross(other);
        left.cmp(&right)
    }
}
