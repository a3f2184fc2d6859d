use fractional::{Fraction, MixedFraction};
use proptest::prelude::*;

fn fraction() -> impl Strategy<Value = Fraction> {
    (-1_000_000_i64..1_000_000, 1_i64..1_000_000, any::<bool>())
        .prop_map(|(n, d, flip)| Fraction::new(n, if flip { -d } else { d }).unwrap())
}

fn small_fraction() -> impl Strategy<Value = Fraction> {
    (-20_i64..20, 1_i64..20).prop_map(|(n, d)| Fraction::new(n, d).unwrap())
}

fn mixed_fraction() -> impl Strategy<Value = MixedFraction> {
    (-1_000_i64..1_000, -1_000_i64..1_000, 1_i64..1_000)
        .prop_map(|(w, n, d)| MixedFraction::new(w, n, d).unwrap())
}

proptest! {
    #[test]
    fn reduce_is_idempotent(f in fraction()) {
        let once = f.reduce();
        let twice = once.reduce();
        prop_assert_eq!(once.numerator(), twice.numerator());
        prop_assert_eq!(once.denominator(), twice.denominator());
        prop_assert_eq!(once, f);
    }

    #[test]
    fn equality_is_cross_product(a in -30_i64..30, b in 1_i64..30, c in -30_i64..30, d in 1_i64..30) {
        let left = Fraction::new(a, b).unwrap();
        let right = Fraction::new(c, d).unwrap();
        prop_assert_eq!(left == right, a * d == c * b);
    }

    #[test]
    fn fraction_text_round_trip(f in fraction()) {
        let text = f.to_string();
        prop_assert_eq!(text.parse::<Fraction>(), Ok(f));
        let glyph = format!("{f:#}");
        prop_assert_eq!(glyph.parse::<Fraction>(), Ok(f));
    }

    #[test]
    fn mixed_text_round_trip(m in mixed_fraction()) {
        let text = m.to_string();
        prop_assert_eq!(text.parse::<MixedFraction>(), Ok(m));
        let glyph = format!("{m:#}");
        prop_assert_eq!(glyph.parse::<MixedFraction>(), Ok(m));
    }

    #[test]
    fn mixed_bijection(f in fraction()) {
        let m = MixedFraction::from_fraction(f);
        prop_assert!(m.numerator() >= 0);
        prop_assert!(m.numerator() < m.denominator());
        prop_assert_eq!(m.to_fraction(), Ok(f));
    }

    #[test]
    fn float_approximation_within_precision(v in -10_000.0_f64..10_000.0, exponent in 2_i32..9) {
        let precision = 10_f64.powi(-exponent);
        let f = Fraction::from_f64_with_precision(v, precision).unwrap();
        prop_assert!((f.to_f64() - v).abs() <= precision);
    }

    #[test]
    fn order_agrees_with_floats(a in fraction(), b in fraction()) {
        if a.to_f64() < b.to_f64() {
            prop_assert!(a < b);
        }
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn arithmetic_matches_definition(a in small_fraction(), b in small_fraction()) {
        let sum = (a + b).unwrap();
        prop_assert!((sum.to_f64() - (a.to_f64() + b.to_f64())).abs() < 1e-12);
        prop_assert_eq!((sum - b).unwrap(), a);
        let product = (a * b).unwrap();
        prop_assert!((product - (b * a).unwrap()).unwrap().is_zero());
        if !b.is_zero() {
            let quotient = (a / b).unwrap();
            prop_assert_eq!((quotient * b).unwrap(), a);
        }
    }

    #[test]
    fn mixed_addition_is_reduced_fraction_addition(a in mixed_fraction(), b in mixed_fraction()) {
        let sum = (a + b).unwrap();
        let expected = (a.to_fraction().unwrap() + b.to_fraction().unwrap()).unwrap().reduce();
        prop_assert_eq!(sum.to_fraction(), Ok(expected));
        let reduced = sum.reduce();
        prop_assert_eq!(reduced.numerator(), sum.numerator());
        prop_assert_eq!(reduced.denominator(), sum.denominator());
    }

    #[test]
    fn negation_flips_only_the_sign(m in mixed_fraction()) {
        let n = -m;
        prop_assert_eq!(n.whole(), -m.whole());
        prop_assert_eq!(n.numerator(), m.numerator());
        prop_assert_eq!(n.denominator(), m.denominator());
        prop_assert_eq!(n.to_f64(), -m.to_f64());
    }
}
