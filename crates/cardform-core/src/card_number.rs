//! # Card Number Validation
//!
//! Full validity of a card number for a given network, plus the incremental
//! field state a host keeps between keystrokes.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_valid(input, network)                                               │
//! │       │                                                                 │
//! │       ├── empty?                         → false                        │
//! │       ├── any non-digit?                 → false                        │
//! │       ├── length outside [min, max]?     → false                        │
//! │       ├── matches neither pattern?       → false                        │
//! │       └── otherwise                      → Luhn checksum                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invalidity is a value, never an error: it is the normal state while the
//! user is still typing. The host's "optional field" policy is applied by
//! [`crate::form`], not here.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::classify::{classify, Classification};
use crate::format;
use crate::luhn::is_luhn_valid;
use crate::network::{CardType, NetworkDefinition, SecurityCodeName};

/// Returns true if `input` is a complete, valid card number for `network`.
///
/// ## Example
/// ```rust
/// use cardform_core::card_number::is_valid;
/// use cardform_core::CardType;
///
/// let visa = CardType::Visa.definition();
/// assert!(is_valid("4111111111111111", visa));
/// assert!(!is_valid("4111 1111 1111 1111", visa));
/// assert!(!is_valid("411111111111111", visa));
/// ```
pub fn is_valid(input: &str, network: &NetworkDefinition) -> bool {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    // All ASCII from here on, so byte length is digit count.
    let len = input.len();
    if len < network.min_length() || len > network.max_length() {
        return false;
    }

    if !network.matches_pattern(input) && !network.matches_relaxed_prefix(input) {
        return false;
    }

    // Digits were checked above; the checksum cannot reject its argument.
    is_luhn_valid(input).unwrap_or(false)
}

// =============================================================================
// Network Change
// =============================================================================

/// What a host must re-apply when the classified network changes.
///
/// ## Host Workflow
/// ```text
/// User types "3" → "34"
///      │
///      ▼
/// CardNumberField::update("34") → Some(NetworkChange { Amex, 15, 4, CID })
///      │
///      ├── card input: cap length at 15
///      └── security code input: cap length at 4, hint "CID"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NetworkChange {
    pub card_type: CardType,
    pub max_length: usize,
    pub security_code_length: usize,
    pub security_code_name: SecurityCodeName,
}

impl NetworkChange {
    fn for_network(network: &NetworkDefinition) -> Self {
        NetworkChange {
            card_type: network.card_type(),
            max_length: network.max_length(),
            security_code_length: network.security_code_length(),
            security_code_name: network.security_code_name(),
        }
    }
}

// =============================================================================
// Card Number Field
// =============================================================================

/// Incremental state of a card number input.
///
/// The only thing carried across keystrokes is the last classification,
/// so a network change is reported once rather than on every character.
#[derive(Debug, Clone)]
pub struct CardNumberField {
    text: String,
    classification: Classification,
}

impl Default for CardNumberField {
    fn default() -> Self {
        CardNumberField {
            text: String::new(),
            classification: classify(""),
        }
    }
}

impl CardNumberField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the field text and reclassifies it.
    ///
    /// Returns the new constraints when the network changed, `None` otherwise.
    pub fn update(&mut self, text: &str) -> Option<NetworkChange> {
        text.clone_into(&mut self.text);

        let classification = classify(&self.text);
        if classification.card_type == self.classification.card_type {
            self.classification = classification;
            return None;
        }

        debug!(
            from = %self.classification.card_type,
            to = %classification.card_type,
            matched_by = ?classification.matched_by,
            len = self.text.chars().count(),
            "Card network changed"
        );
        self.classification = classification;
        Some(NetworkChange::for_network(classification.network()))
    }

    /// Current raw text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[inline]
    pub fn card_type(&self) -> CardType {
        self.classification.card_type
    }

    #[inline]
    pub fn network(&self) -> &'static NetworkDefinition {
        self.classification.network()
    }

    /// Applies the network's length cap to candidate text, the way an input
    /// filter would before the text reaches [`update`](Self::update).
    pub fn truncate_to_max<'a>(&self, candidate: &'a str) -> &'a str {
        let max = self.network().max_length();
        match candidate.char_indices().nth(max) {
            Some((byte_index, _)) => &candidate[..byte_index],
            None => candidate,
        }
    }

    /// True once the text has reached the network's maximum length.
    ///
    /// Hosts validate and move focus on this transition.
    pub fn is_complete(&self) -> bool {
        self.text.chars().count() == self.network().max_length()
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.text, self.network())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text with the network's separators inserted.
    pub fn formatted(&self) -> String {
        format::format(&self.text, self.network())
    }

    /// Formatted text with all but the last four digits hidden.
    pub fn masked(&self) -> String {
        format::mask(&self.formatted())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
