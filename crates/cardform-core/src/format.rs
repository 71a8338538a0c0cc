//! # Display Formatting
//!
//! Separator insertion and masking for card numbers. Display only: the
//! value handed to validators is always the raw digit string.
//!
//! ```text
//! Visa  4111111111111111  →  4111 1111 1111 1111  →  •••• •••• •••• 1111
//! Amex  378282246310005   →  3782 822463 10005    →  •••• •••••• •0005
//! ```
//!
//! Everything here derives from [`NetworkDefinition::space_indices`] and the
//! input itself; the classifier is never consulted.

use crate::network::NetworkDefinition;

/// Character inserted between digit groups.
pub const SEPARATOR: char = ' ';

/// Character replacing hidden digits.
pub const MASK_GLYPH: char = '•';

/// Number of trailing digits left visible by [`mask`].
pub const VISIBLE_DIGITS: usize = 4;

/// 1-based digit positions after which a separator is displayed.
#[inline]
pub fn space_positions(network: &NetworkDefinition) -> &'static [usize] {
    network.space_indices()
}

/// Inserts [`SEPARATOR`] after each space position that is followed by more
/// characters.
///
/// ## Example
/// ```rust
/// use cardform_core::format::format;
/// use cardform_core::CardType;
///
/// assert_eq!(format("41111111", CardType::Visa.definition()), "4111 1111");
/// assert_eq!(format("411111111", CardType::Visa.definition()), "4111 1111 1");
/// ```
pub fn format(digits: &str, network: &NetworkDefinition) -> String {
    let positions = space_positions(network);
    let mut out = String::with_capacity(digits.len() + positions.len());

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && positions.contains(&i) {
            out.push(SEPARATOR);
        }
        out.push(c);
    }

    out
}

/// Strips display separators (spaces and hyphens) from pasted or formatted
/// text.
pub fn unformat(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Replaces every digit except the last [`VISIBLE_DIGITS`] with
/// [`MASK_GLYPH`]. Separators and any other characters stay where they are.
///
/// ## Example
/// ```rust
/// use cardform_core::format::mask;
///
/// assert_eq!(mask("4111 1111 1111 1111"), "•••• •••• •••• 1111");
/// assert_eq!(mask("4111"), "4111");
/// ```
pub fn mask(text: &str) -> String {
    let digit_count = text.chars().filter(char::is_ascii_digit).count();
    let hidden = digit_count.saturating_sub(VISIBLE_DIGITS);

    let mut seen = 0;
    text.chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            seen += 1;
            if seen <= hidden {
                MASK_GLYPH
            } else {
                c
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{networks, CardType};
    use proptest::prelude::*;

    #[test]
    fn test_space_positions() {
        assert_eq!(space_positions(CardType::Visa.definition()), &[4, 8, 12]);
        assert_eq!(space_positions(CardType::Amex.definition()), &[4, 10]);
    }

    #[test]
    fn test_format_partial_input() {
        let visa = CardType::Visa.definition();
        assert_eq!(format("", visa), "");
        assert_eq!(format("4111", visa), "4111");
        assert_eq!(format("41111", visa), "4111 1");
        assert_eq!(format("4111111111111111", visa), "4111 1111 1111 1111");
        assert_eq!(format("4111111111111111111", visa), "4111 1111 1111 1111111");
    }

    #[test]
    fn test_format_amex() {
        let amex = CardType::Amex.definition();
        assert_eq!(format("378282246310005", amex), "3782 822463 10005");
        assert_eq!(format("37828", amex), "3782 8");
    }

    #[test]
    fn test_format_counts_chars_not_bytes() {
        assert_eq!(format("ééééé", CardType::Visa.definition()), "éééé é");
    }

    #[test]
    fn test_unformat() {
        assert_eq!(unformat("4111 1111-1111 1111"), "4111111111111111");
        assert_eq!(unformat(" 37 "), "37");
    }

    #[test]
    fn test_mask_short_input_unchanged() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("123"), "123");
        assert_eq!(mask("1234"), "1234");
        assert_eq!(mask("12345"), "•2345");
    }

    proptest! {
        #[test]
        fn prop_mask_keeps_last_four_and_layout(digits in "[0-9]{4,19}") {
            for network in networks() {
                let formatted = format(&digits, network);
                let masked = mask(&formatted);

                prop_assert_eq!(masked.chars().count(), formatted.chars().count());
                prop_assert_eq!(unformat(&masked).chars().count(), digits.len());

                let visible: String = masked.chars().filter(char::is_ascii_digit).collect();
                prop_assert_eq!(&visible, &digits[digits.len() - VISIBLE_DIGITS..]);

                for (m, f) in masked.chars().zip(formatted.chars()) {
                    if f == SEPARATOR {
                        prop_assert_eq!(m, SEPARATOR);
                    }
                }
            }
        }
    }
}
