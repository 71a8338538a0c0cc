//! # Card Form
//!
//! Wires the card number, expiration date and security code fields together
//! under a host [`FormConfig`].
//!
//! ## Field Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_card_number("37...")                                               │
//! │       │                                                                 │
//! │       ├── cap at current network's max length                           │
//! │       ├── reclassify                                                    │
//! │       └── network changed? ──► security code field: new length + name   │
//! │                                                                         │
//! │  is_valid() = AND over enabled fields of (optional OR field valid)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Error wording stays with the host. [`FieldStatus`] only says which kind
//! of message applies: "required" for an empty field, "invalid" otherwise.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::card_number::{CardNumberField, NetworkChange};
use crate::config::{FieldRequirement, FormConfig};
use crate::expiration::{Clock, ExpirationInput, SystemClock};
use crate::format;
use crate::network::CardType;
use crate::security_code::SecurityCodeField;

/// Validation verdict for one field, as a host would surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldStatus {
    Valid,
    /// Empty and not optional.
    Required,
    /// Has content that does not validate.
    Invalid,
}

impl FieldStatus {
    fn evaluate(requirement: FieldRequirement, is_empty: bool, is_valid: bool) -> Self {
        if requirement.is_optional() || is_valid {
            FieldStatus::Valid
        } else if is_empty {
            FieldStatus::Required
        } else {
            FieldStatus::Invalid
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldStatus::Valid)
    }
}

/// Per-field verdicts. Disabled fields are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormStatus {
    pub card_number: Option<FieldStatus>,
    pub expiration_date: Option<FieldStatus>,
    pub security_code: Option<FieldStatus>,
}

impl FormStatus {
    /// True when every enabled field is valid.
    pub fn is_valid(&self) -> bool {
        [self.card_number, self.expiration_date, self.security_code]
            .iter()
            .flatten()
            .all(FieldStatus::is_valid)
    }
}

// =============================================================================
// Card Form
// =============================================================================

/// The engine-side state of one card entry form.
#[derive(Debug, Clone)]
pub struct CardForm<C = SystemClock> {
    config: FormConfig,
    clock: C,
    card_number: CardNumberField,
    expiration: ExpirationInput,
    security_code: SecurityCodeField,
}

impl CardForm<SystemClock> {
    /// A form checking expiration dates against the local date.
    pub fn new(config: FormConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CardForm<C> {
    pub fn with_clock(config: FormConfig, clock: C) -> Self {
        CardForm {
            config,
            clock,
            card_number: CardNumberField::new(),
            expiration: ExpirationInput::new(),
            security_code: SecurityCodeField::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Applies card number text, capped at the current network's maximum.
    ///
    /// Returns the network change, already pushed to the security code field.
    pub fn set_card_number(&mut self, text: &str) -> Option<NetworkChange> {
        let capped = self.card_number.truncate_to_max(text);
        let change = self.card_number.update(capped)?;
        self.security_code.apply_network_change(&change);
        Some(change)
    }

    pub fn set_expiration(&mut self, text: &str) {
        self.expiration.update(text);
    }

    pub fn set_security_code(&mut self, text: &str) {
        self.security_code.update(text);
    }

    // =========================================================================
    // Field Access
    // =========================================================================

    #[inline]
    pub fn card_number(&self) -> &CardNumberField {
        &self.card_number
    }

    #[inline]
    pub fn expiration(&self) -> &ExpirationInput {
        &self.expiration
    }

    #[inline]
    pub fn security_code(&self) -> &SecurityCodeField {
        &self.security_code
    }

    #[inline]
    pub fn card_type(&self) -> CardType {
        self.card_number.card_type()
    }

    // =========================================================================
    // Validity
    // =========================================================================

    pub fn statuses(&self) -> FormStatus {
        let today = self.clock.today();
        FormStatus {
            card_number: self.config.card_number.is_enabled().then(|| {
                FieldStatus::evaluate(
                    self.config.card_number,
                    self.card_number.is_empty(),
                    self.card_number.is_valid(),
                )
            }),
            expiration_date: self.config.expiration_date.is_enabled().then(|| {
                FieldStatus::evaluate(
                    self.config.expiration_date,
                    self.expiration.is_empty(),
                    self.expiration.is_valid_at(today),
                )
            }),
            security_code: self.config.security_code.is_enabled().then(|| {
                FieldStatus::evaluate(
                    self.config.security_code,
                    self.security_code.is_empty(),
                    self.security_code.is_valid(),
                )
            }),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.statuses().is_valid()
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Card number as the host should draw it.
    ///
    /// Masked only when masking is configured, the field is not focused and
    /// the number is valid; formatted otherwise.
    pub fn card_number_display(&self, focused: bool) -> String {
        if self.config.mask_card_number && !focused && self.card_number.is_valid() {
            self.card_number.masked()
        } else {
            self.card_number.formatted()
        }
    }

    /// Expiration date as the host should draw it, e.g. "12/28".
    pub fn expiration_display(&self) -> String {
        self.expiration.display()
    }

    /// Security code as the host should draw it.
    pub fn security_code_display(&self) -> String {
        if self.config.mask_security_code {
            self.security_code
                .text()
                .chars()
                .map(|_| format::MASK_GLYPH)
                .collect()
        } else {
            self.security_code.text().to_string()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiration::{FixedClock, ReferenceDate};
    use crate::network::SecurityCodeName;

    fn form(config: FormConfig) -> CardForm<FixedClock> {
        CardForm::with_clock(config, FixedClock(ReferenceDate::new(6, 2024)))
    }

    #[test]
    fn test_empty_form_reports_required() {
        let form = form(FormConfig::default());
        assert_eq!(
            form.statuses(),
            FormStatus {
                card_number: Some(FieldStatus::Required),
                expiration_date: Some(FieldStatus::Required),
                security_code: Some(FieldStatus::Required),
            }
        );
        assert!(!form.is_valid());
    }

    #[test]
    fn test_complete_form_is_valid() {
        let mut form = form(FormConfig::default());
        form.set_card_number("4111111111111111");
        form.set_expiration("1228");
        form.set_security_code("123");
        assert!(form.is_valid());
        assert_eq!(form.card_type(), CardType::Visa);
    }

    #[test]
    fn test_invalid_content_reports_invalid() {
        let mut form = form(FormConfig::default());
        form.set_card_number("4111111111111112");
        form.set_expiration("0124");
        form.set_security_code("12");
        let status = form.statuses();
        assert_eq!(status.card_number, Some(FieldStatus::Invalid));
        assert_eq!(status.expiration_date, Some(FieldStatus::Invalid));
        assert_eq!(status.security_code, Some(FieldStatus::Invalid));
    }

    #[test]
    fn test_optional_and_disabled_fields() {
        let config = FormConfig {
            security_code: FieldRequirement::Optional,
            expiration_date: FieldRequirement::Disabled,
            ..FormConfig::default()
        };
        let mut form = form(config);
        form.set_card_number("5500000000000004");

        let status = form.statuses();
        assert_eq!(status.expiration_date, None);
        assert_eq!(status.security_code, Some(FieldStatus::Valid));
        assert!(form.is_valid());
    }

    #[test]
    fn test_card_number_capped_and_propagated() {
        let mut form = form(FormConfig::default());
        let change = form.set_card_number("37").unwrap();
        assert_eq!(change.card_type, CardType::Amex);
        assert_eq!(form.security_code().expected_length(), 4);
        assert_eq!(form.security_code().name(), SecurityCodeName::Cid);

        assert_eq!(form.set_card_number("3782822463100059"), None);
        assert_eq!(form.card_number().text(), "378282246310005");
        assert!(form.card_number().is_valid());
    }

    #[test]
    fn test_card_number_display_masking() {
        let config = FormConfig {
            mask_card_number: true,
            ..FormConfig::default()
        };
        let mut form = form(config);
        form.set_card_number("41111111");
        assert_eq!(form.card_number_display(false), "4111 1111");

        form.set_card_number("4111111111111111");
        assert_eq!(form.card_number_display(true), "4111 1111 1111 1111");
        assert_eq!(form.card_number_display(false), "•••• •••• •••• 1111");
    }

    #[test]
    fn test_other_displays() {
        let config = FormConfig {
            mask_security_code: true,
            ..FormConfig::default()
        };
        let mut form = form(config);
        form.set_expiration("1228");
        form.set_security_code("123");
        assert_eq!(form.expiration_display(), "12/28");
        assert_eq!(form.security_code_display(), "•••");
    }

    #[test]
    fn test_statuses_agree_with_is_valid() {
        let mut form = form(FormConfig::default());
        form.set_card_number("4111111111111111");
        form.set_expiration("1228");
        assert!(!form.statuses().is_valid());
        assert!(!form.is_valid());

        form.set_security_code("123");
        assert_eq!(form.statuses().security_code, Some(FieldStatus::Valid));
        assert!(form.statuses().is_valid());
        assert!(form.is_valid());
    }

    #[test]
    fn test_status_serde_shape() {
        let form = form(FormConfig {
            security_code: FieldRequirement::Disabled,
            ..FormConfig::default()
        });
        let json = serde_json::to_string(&form.statuses()).unwrap();
        assert_eq!(
            json,
            r#"{"cardNumber":"required","expirationDate":"required","securityCode":null}"#
        );
    }
}
