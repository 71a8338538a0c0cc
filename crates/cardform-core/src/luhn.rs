//! # Luhn Checksum
//!
//! Mod-10 checksum used by every card network to catch typos.
//!
//! ## Contract
//! Both functions demand ASCII digits only. A non-digit is a caller bug and
//! comes back as [`CardError::NotADigit`]; it is never "invalid". Route user
//! text through [`crate::card_number::is_valid`] instead.
//!
//! The empty string sums to zero and is therefore reported as valid.
//! Length rules upstream reject empty card numbers before this matters.

use crate::error::{CardError, CardResult};

/// Returns true if `digits` passes the Luhn check.
///
/// Digits are weighted from the right: even positions (0-based) count as-is,
/// odd positions are doubled with 9 subtracted when the result exceeds 9.
/// `digit / 5 + (2 * digit) % 10` is that doubled digit sum in one step.
///
/// ## Example
/// ```rust
/// use cardform_core::luhn::is_luhn_valid;
///
/// assert_eq!(is_luhn_valid("4111111111111111"), Ok(true));
/// assert_eq!(is_luhn_valid("4111111111111112"), Ok(false));
/// assert!(is_luhn_valid("4111-1111").is_err());
/// ```
pub fn is_luhn_valid(digits: &str) -> CardResult<bool> {
    Ok(weighted_sum(digits, 0)? % 10 == 0)
}

/// Computes the digit that makes `payload` followed by it Luhn-valid.
///
/// ## Example
/// ```rust
/// use cardform_core::luhn::{check_digit, is_luhn_valid};
///
/// let digit = check_digit("411111111111111").unwrap();
/// assert_eq!(digit, 1);
/// assert_eq!(is_luhn_valid("4111111111111111"), Ok(true));
/// ```
pub fn check_digit(payload: &str) -> CardResult<u8> {
    // The check digit will sit at position 0, shifting the payload by one.
    let sum = weighted_sum(payload, 1)?;
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Sums `digits` right-to-left, with the rightmost digit at position `offset`.
fn weighted_sum(digits: &str, offset: usize) -> CardResult<u32> {
    let len = digits.chars().count();
    let mut odd_sum = 0;
    let mut even_sum = 0;

    for (i, c) in digits.chars().rev().enumerate() {
        let digit = ascii_digit(c).ok_or(CardError::NotADigit {
            character: c,
            position: len - 1 - i,
        })?;
        if (i + offset) % 2 == 0 {
            odd_sum += digit;
        } else {
            even_sum += digit / 5 + (2 * digit) % 10;
        }
    }

    Ok(odd_sum + even_sum)
}

#[inline]
fn ascii_digit(c: char) -> Option<u32> {
    c.is_ascii_digit().then(|| c as u32 - '0' as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_valid_numbers() {
        for number in [
            "4111111111111111",
            "5500000000000004",
            "378282246310005",
            "6011111111111117",
            "30569309025904",
            "3530111333300000",
            "6304000000000000",
        ] {
            assert_eq!(is_luhn_valid(number), Ok(true), "{number}");
        }
    }

    #[test]
    fn test_known_invalid_numbers() {
        assert_eq!(is_luhn_valid("4111111111111112"), Ok(false));
        assert_eq!(is_luhn_valid("5500000000000005"), Ok(false));
        assert_eq!(is_luhn_valid("1"), Ok(false));
    }

    #[test]
    fn test_empty_string_is_valid() {
        assert_eq!(is_luhn_valid(""), Ok(true));
        assert_eq!(check_digit(""), Ok(0));
    }

    #[test]
    fn test_doubling_shortcut_matches_subtract_nine() {
        for digit in 0..=9u32 {
            let doubled = digit * 2;
            let expected = if doubled > 9 { doubled - 9 } else { doubled };
            assert_eq!(digit / 5 + (2 * digit) % 10, expected);
        }
    }

    #[test]
    fn test_non_digit_is_a_precondition_error() {
        assert_eq!(
            is_luhn_valid("41x1"),
            Err(CardError::NotADigit {
                character: 'x',
                position: 2
            })
        );
        assert_eq!(
            check_digit("4 1"),
            Err(CardError::NotADigit {
                character: ' ',
                position: 1
            })
        );
        // Non-ASCII digits are not digits here.
        assert!(is_luhn_valid("\u{0661}").is_err());
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(check_digit("550000000000000"), Ok(4));
        assert_eq!(check_digit("37828224631000"), Ok(5));
    }

    proptest! {
        #[test]
        fn prop_check_digit_completes_payload(payload in "[0-9]{0,18}") {
            let digit = check_digit(&payload).unwrap();
            let number = format!("{payload}{digit}");
            prop_assert_eq!(is_luhn_valid(&number), Ok(true));
        }

        #[test]
        fn prop_single_digit_change_is_detected(
            payload in "[0-9]{1,18}",
            index in any::<prop::sample::Index>(),
            delta in 1u32..=9,
        ) {
            let digit = check_digit(&payload).unwrap();
            let number = format!("{payload}{digit}");
            let position = index.index(number.len());
            let mut bytes = number.into_bytes();
            let original = (bytes[position] - b'0') as u32;
            bytes[position] = b'0' + ((original + delta) % 10) as u8;
            let altered = String::from_utf8(bytes).unwrap();
            prop_assert_eq!(is_luhn_valid(&altered), Ok(false));
        }
    }
}
