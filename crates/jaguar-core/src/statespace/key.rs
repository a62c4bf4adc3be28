//! Total order over binary state labels.
//!
//! States sort by Hamming weight (number of `1` digits) and then by the
//! integer value of the digit string read as base 2. Labels can be longer
//! than any machine integer, so [`BinaryValue`] compares digit strings
//! instead of converting them.

use std::cmp::Ordering;

/// Base-2 integer value of a digit string, compared without overflow.
///
/// Stores the significant digits only (leading zeros removed), so two
/// values compare by digit count first and lexicographically second.
/// The empty string and all-zero strings are 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BinaryValue {
    significant: String,
}

impl BinaryValue {
    /// Build from a string of `0`/`1` digits. Any other character is ignored.
    #[must_use]
    pub fn from_digits(digits: &str) -> Self {
        let significant: String = digits
            .chars()
            .filter(|c| matches!(c, '0' | '1'))
            .skip_while(|c| *c == '0')
            .collect();
        Self { significant }
    }

    /// Digits without leading zeros (`""` for zero).
    #[must_use]
    pub fn significant_digits(&self) -> &str {
        &self.significant
    }

    /// The value as `u128`, or `None` if it needs more than 128 bits.
    #[must_use]
    pub fn to_u128(&self) -> Option<u128> {
        if self.significant.is_empty() {
            return Some(0);
        }
        u128::from_str_radix(&self.significant, 2).ok()
    }
}

impl Ord for BinaryValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.significant
            .len()
            .cmp(&other.significant.len())
            .then_with(|| self.significant.cmp(&other.significant))
    }
}

impl PartialOrd for BinaryValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key of a state label: `(weight, value)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StateKey {
    /// Number of `1` digits.
    pub weight: usize,
    /// Digits read as a base-2 integer.
    pub value: BinaryValue,
}

impl StateKey {
    /// Compute the key of a label such as `"0 1 1"`. Whitespace is
    /// discarded; an empty label is `(0, 0)`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let bits: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            weight: bits.chars().filter(|c| *c == '1').count(),
            value: BinaryValue::from_digits(&bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_and_value_of_labels() {
        let key = StateKey::from_label("1 0");
        assert_eq!(key.weight, 1);
        assert_eq!(key.value.to_u128(), Some(2));

        let key = StateKey::from_label("0 0 1 1");
        assert_eq!(key.weight, 2);
        assert_eq!(key.value.to_u128(), Some(3));
        assert_eq!(key.value.significant_digits(), "11");
    }

    #[test]
    fn empty_label_is_zero() {
        assert_eq!(StateKey::from_label(""), StateKey::default());
        assert_eq!(StateKey::from_label("   "), StateKey::default());
        assert_eq!(StateKey::from_label("0 0 0"), StateKey::default());
    }

    #[test]
    fn weight_dominates_value() {
        let order = ["0 0", "0 1", "1 0", "1 1"].map(StateKey::from_label);
        assert!(order.windows(2).all(|w| w[0] < w[1]));

        // 100 (weight 1, value 4) sorts before 011 (weight 2, value 3).
        assert!(StateKey::from_label("1 0 0") < StateKey::from_label("0 1 1"));
    }

    #[test]
    fn long_labels_compare_without_overflow() {
        let long_low = format!("1{}", "0".repeat(200));
        let long_high = format!("1{}1", "0".repeat(199));
        let a = BinaryValue::from_digits(&long_low);
        let b = BinaryValue::from_digits(&long_high);
        assert!(a < b);
        assert_eq!(a.to_u128(), None);
        assert!(BinaryValue::from_digits("0001") < BinaryValue::from_digits("10"));
    }
}
