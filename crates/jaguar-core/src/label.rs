//! Display labels for indexed variables (`x12` → `x₁₂`).

use crate::grammar::indexed_digits;

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Render a variable name with its index as Unicode subscript digits.
///
/// Names that are not exactly `x` followed by digits are returned unchanged.
#[must_use]
pub fn subscript_label(name: &str) -> String {
    let Some(digits) = indexed_digits(name) else {
        return name.to_string();
    };

    let mut label = String::with_capacity(1 + digits.len() * 3);
    label.push('x');
    label.extend(
        digits
            .bytes()
            .map(|b| SUBSCRIPT_DIGITS[usize::from(b - b'0')]),
    );
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_digit() {
        assert_eq!(subscript_label("x1"), "x₁");
    }

    #[test]
    fn multi_digit_keeps_order() {
        assert_eq!(subscript_label("x12"), "x₁₂");
        assert_eq!(subscript_label("x0123456789"), "x₀₁₂₃₄₅₆₇₈₉");
    }

    #[test]
    fn non_indexed_names_pass_through() {
        assert_eq!(subscript_label("state"), "state");
        assert_eq!(subscript_label("x"), "x");
        assert_eq!(subscript_label("x1a"), "x1a");
        assert_eq!(subscript_label(""), "");
    }

    proptest! {
        #[test]
        fn one_glyph_per_digit(digits in "[0-9]{1,12}") {
            let label = subscript_label(&format!("x{digits}"));
            prop_assert!(label.starts_with('x'));

            let glyphs: Vec<char> = label.chars().skip(1).collect();
            prop_assert_eq!(glyphs.len(), digits.len());
            for (glyph, digit) in glyphs.iter().zip(digits.bytes()) {
                prop_assert_eq!(*glyph, SUBSCRIPT_DIGITS[usize::from(digit - b'0')]);
            }
        }

        #[test]
        fn other_names_unchanged(name in "[a-wyz][a-z0-9]{0,8}") {
            prop_assert_eq!(subscript_label(&name), name);
        }
    }
}
