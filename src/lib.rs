mod problem;
pub use crate::problem::Problem;

mod glyph;

mod fraction;
pub use crate::fraction::convert::{Approximation, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};
pub use crate::fraction::Fraction;

mod mixed;
pub use crate::mixed::MixedFraction;
