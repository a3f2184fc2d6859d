//! Unicode vulgar fractions
//!
//! Text is decoded before either parser sees it, so "¾" parses exactly like
//! "3/4". Formatting goes the other way for the alternate `{:#}` form.

use std::borrow::Cow;

/// U+2044 FRACTION SLASH, as used in e.g. "3⁄4"
const FRACTION_SLASH: char = '\u{2044}';

const GLYPHS: [(char, i64, i64); 19] = [
    ('¼', 1, 4),
    ('½', 1, 2),
    ('¾', 3, 4),
    ('⅐', 1, 7),
    ('⅑', 1, 9),
    ('⅒', 1, 10),
    ('⅓', 1, 3),
    ('⅔', 2, 3),
    ('⅕', 1, 5),
    ('⅖', 2, 5),
    ('⅗', 3, 5),
    ('⅘', 4, 5),
    ('⅙', 1, 6),
    ('⅚', 5, 6),
    ('⅛', 1, 8),
    ('⅜', 3, 8),
    ('⅝', 5, 8),
    ('⅞', 7, 8),
    ('↉', 0, 3),
];

fn lookup(c: char) -> Option<(i64, i64)> {
    GLYPHS
        .iter()
        .find(|(glyph, _, _)| *glyph == c)
        .map(|&(_, n, d)| (n, d))
}

/// Replace every vulgar fraction glyph with its "n/d" text
///
/// A glyph written directly after a digit, as in "1½", is decoded with a
/// separating space ("1 1/2") so that it reads as a mixed fraction rather
/// than gluing its numerator onto the whole part.
pub(crate) fn decode(text: &str) -> Cow<'_, str> {
    if !text
        .chars()
        .any(|c| c == FRACTION_SLASH || lookup(c).is_some())
    {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len() + 8);
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if c == FRACTION_SLASH {
            decoded.push('/');
        } else if let Some((n, d)) = lookup(c) {
            if previous.is_some_and(|p| p.is_ascii_digit()) {
                decoded.push(' ');
            }
            decoded.push_str(&format!("{n}/{d}"));
        } else {
            decoded.push(c);
        }
        previous = Some(c);
    }
    Cow::Owned(decoded)
}

/// The glyph for exactly this numerator and denominator, if there is one
///
/// No reduction happens here, 2/4 has no glyph even though 1/2 does.
pub(crate) fn encode(numerator: i64, denominator: i64) -> Option<char> {
    GLYPHS
        .iter()
        .find(|&&(_, n, d)| n == numerator && d == denominator)
        .map(|&(glyph, _, _)| glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(decode("3/4"), Cow::Borrowed("3/4")));
        assert!(matches!(decode(""), Cow::Borrowed("")));
    }

    #[test]
    fn single_glyph() {
        assert_eq!(decode("½"), "1/2");
        assert_eq!(decode("¾"), "3/4");
        assert_eq!(decode("-⅞"), "-7/8");
        assert_eq!(decode("↉"), "0/3");
    }

    #[test]
    fn glyph_after_digit_gets_a_space() {
        assert_eq!(decode("1½"), "1 1/2");
        assert_eq!(decode("12⅓"), "12 1/3");
        assert_eq!(decode("2 ⅔"), "2 2/3");
    }

    #[test]
    fn fraction_slash() {
        assert_eq!(decode("3\u{2044}4"), "3/4");
    }

    #[test]
    fn every_glyph_round_trips() {
        for (glyph, n, d) in GLYPHS {
            assert_eq!(encode(n, d), Some(glyph));
            assert_eq!(decode(&glyph.to_string()), format!("{n}/{d}"));
        }
    }

    #[test]
    fn unreduced_has_no_glyph() {
        assert_eq!(encode(2, 4), None);
        assert_eq!(encode(1, 11), None);
    }
}
