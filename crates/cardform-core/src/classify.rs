//! # Card Classification
//!
//! Maps raw, possibly partial input to a row of the network table.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  classify("6304...")                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. First row whose PRIMARY pattern matches in full                     │
//! │       ├── real network? → (network, Pattern)                            │
//! │       └── Unknown/Empty → keep going                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. First row whose RELAXED PREFIX pattern matches in full              │
//! │       ├── real network? → (network, RelaxedPrefix)                      │
//! │       └── none          → keep going                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. non-empty → (Unknown, None)    empty → (Empty, None)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Total and pure: any string is accepted, nothing is cached between calls.
//! Hosts call it on every keystroke.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::network::{networks, CardType, NetworkDefinition};

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MatchedBy {
    /// A primary network pattern.
    Pattern,
    /// A relaxed prefix pattern (no primary pattern matched).
    RelaxedPrefix,
    /// Nothing matched; the result is a sentinel.
    None,
}

/// Result of [`classify`]. A fresh value per input; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Classification {
    pub card_type: CardType,
    pub matched_by: MatchedBy,
}

impl Classification {
    /// The table row for the classified network.
    #[inline]
    pub fn network(&self) -> &'static NetworkDefinition {
        self.card_type.definition()
    }

    /// True when a real network (not a sentinel) was found.
    #[inline]
    pub fn is_known(&self) -> bool {
        !self.card_type.is_sentinel()
    }
}

/// Classifies `input` against the network table.
///
/// ## Example
/// ```rust
/// use cardform_core::classify::{classify, MatchedBy};
/// use cardform_core::CardType;
///
/// assert_eq!(classify("4").card_type, CardType::Visa);
/// assert_eq!(classify("6011").card_type, CardType::Discover);
///
/// let ambiguous = classify("60");
/// assert_eq!(ambiguous.card_type, CardType::Maestro);
/// assert_eq!(ambiguous.matched_by, MatchedBy::RelaxedPrefix);
/// ```
pub fn classify(input: &str) -> Classification {
    let by_pattern = networks()
        .iter()
        .find(|network| network.matches_pattern(input))
        .map(NetworkDefinition::card_type);
    if let Some(card_type) = by_pattern.filter(|t| !t.is_sentinel()) {
        return Classification {
            card_type,
            matched_by: MatchedBy::Pattern,
        };
    }

    let by_relaxed_prefix = networks()
        .iter()
        .find(|network| network.matches_relaxed_prefix(input))
        .map(NetworkDefinition::card_type);
    if let Some(card_type) = by_relaxed_prefix.filter(|t| !t.is_sentinel()) {
        return Classification {
            card_type,
            matched_by: MatchedBy::RelaxedPrefix,
        };
    }

    let card_type = if input.is_empty() {
        CardType::Empty
    } else {
        CardType::Unknown
    };
    Classification {
        card_type,
        matched_by: MatchedBy::None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
