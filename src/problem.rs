// We need to refer to these types in the documentation
#[allow(unused_imports)]
use crate::{Fraction, MixedFraction};

use thiserror::Error;

/// Problems when constructing, parsing or doing arithmetic with a [`Fraction`]
/// or a [`MixedFraction`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Problem {
    /// Tried to divide by zero, also arises if attempting to make a fraction with a zero
    /// denominator or to invert zero
    #[error("division by zero")]
    DivideByZero,
    /// The text did not match the grammar for a fraction or mixed fraction
    #[error("malformed input")]
    MalformedInput,
    /// Tried to convert a floating point NaN or Infinity, which have no equivalent
    #[error("floating point value is not finite")]
    NonFiniteValue,
    /// Positional access to a mixed fraction used an index other than 0, 1 or 2
    #[error("index out of range")]
    IndexOutOfRange,
    /// A value or an intermediate result does not fit in 64 bits
    #[error("integer overflow")]
    Overflow,
    /// The fraction was not an integer
    #[error("value is not an integer")]
    NotAnInteger,
}
