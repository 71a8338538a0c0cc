//! # Security Code Validation
//!
//! CVV / CVC / CID / CVN checks. The expected length comes from the card
//! number's network: 4 digits for Amex, 3 for everyone else. Until a
//! network is known the field assumes 3.

use crate::card_number::NetworkChange;
use crate::network::{NetworkDefinition, SecurityCodeName};

/// Length used before any network has been classified.
pub const DEFAULT_SECURITY_CODE_LENGTH: usize = 3;

/// Returns true if `code` is exactly the network's security code length,
/// all ASCII digits.
pub fn is_valid_security_code(code: &str, network: &NetworkDefinition) -> bool {
    has_valid_shape(code, network.security_code_length())
}

fn has_valid_shape(code: &str, length: usize) -> bool {
    !code.is_empty() && code.len() == length && code.bytes().all(|b| b.is_ascii_digit())
}

/// Incremental state of a security code input.
#[derive(Debug, Clone)]
pub struct SecurityCodeField {
    text: String,
    length: usize,
    name: SecurityCodeName,
}

impl Default for SecurityCodeField {
    fn default() -> Self {
        SecurityCodeField {
            text: String::new(),
            length: DEFAULT_SECURITY_CODE_LENGTH,
            name: SecurityCodeName::Cvv,
        }
    }
}

impl SecurityCodeField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts the constraints of a newly classified network.
    ///
    /// Existing text is kept; a shorter cap takes effect on the next edit.
    pub fn apply_network_change(&mut self, change: &NetworkChange) {
        self.length = change.security_code_length;
        self.name = change.security_code_name;
    }

    /// Replaces the text, capped at the expected length.
    pub fn update(&mut self, text: &str) {
        self.text = text.chars().take(self.length).collect();
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Expected number of digits; doubles as the input cap.
    #[inline]
    pub fn expected_length(&self) -> usize {
        self.length
    }

    /// What to call the code in hints and error messages.
    #[inline]
    pub fn name(&self) -> SecurityCodeName {
        self.name
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True once the expected number of characters has been typed.
    pub fn is_complete(&self) -> bool {
        self.text.chars().count() == self.length
    }

    pub fn is_valid(&self) -> bool {
        has_valid_shape(&self.text, self.length)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_number::CardNumberField;
    use crate::network::CardType;

    #[test]
    fn test_is_valid_security_code() {
        let visa = CardType::Visa.definition();
        let amex = CardType::Amex.definition();

        assert!(is_valid_security_code("123", visa));
        assert!(!is_valid_security_code("1234", visa));
        assert!(!is_valid_security_code("12", visa));
        assert!(!is_valid_security_code("", visa));
        assert!(!is_valid_security_code("12a", visa));

        assert!(is_valid_security_code("1234", amex));
        assert!(!is_valid_security_code("123", amex));
    }

    #[test]
    fn test_field_defaults_to_three_digits() {
        let mut field = SecurityCodeField::new();
        assert_eq!(field.expected_length(), 3);
        assert_eq!(field.name(), SecurityCodeName::Cvv);

        field.update("1234");
        assert_eq!(field.text(), "123");
        assert!(field.is_complete());
        assert!(field.is_valid());
    }

    #[test]
    fn test_field_follows_network_changes() {
        let mut card = CardNumberField::new();
        let mut code = SecurityCodeField::new();

        let change = card.update("37").unwrap();
        code.apply_network_change(&change);
        assert_eq!(code.expected_length(), 4);
        assert_eq!(code.name(), SecurityCodeName::Cid);

        code.update("1234");
        assert!(code.is_valid());

        let change = card.update("4").unwrap();
        code.apply_network_change(&change);
        // Four characters against a three-digit rule until the next edit.
        assert!(!code.is_valid());
        let retyped = code.text().to_string();
        code.update(&retyped);
        assert_eq!(code.text(), "123");
        assert!(code.is_valid());
    }

    #[test]
    fn test_field_rejects_non_digits() {
        let mut field = SecurityCodeField::new();
        field.update("1 3");
        assert!(field.is_complete());
        assert!(!field.is_valid());
    }
}
