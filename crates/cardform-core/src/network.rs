//! # Card Network Table
//!
//! The static, ordered table of supported payment card networks.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  Network       Prefixes                       Len    Code  Spaces   │
//! │  ─  ───────────   ────────────────────────────   ─────  ────  ──────   │
//! │  0  Visa          4                              16     3     4,8,12   │
//! │  1  Mastercard    51-55, 2221-2720               16     3     4,8,12   │
//! │  2  Discover      6011, 65, 644-649, 622         16     3     4,8,12   │
//! │  3  Amex          34, 37                         15     4     4,10     │
//! │  4  Diners Club   36, 38, 300-305                14     3     4,8,12   │
//! │  5  JCB           35                             16     3     4,8,12   │
//! │  6  Maestro       5018, 5020, 5038, 56-59, ...   12-19  3     4,8,12   │
//! │                   (relaxed: any 6...)                                   │
//! │  7  UnionPay      62                             16-19  3     4,8,12   │
//! │  8  Hiper         637095, 637568, 637599, ...    16     3     4,8,12   │
//! │  9  Hipercard     606282                         16     3     4,8,12   │
//! │ 10  Unknown       any digits (catch-all)         12-19  3     4,8,12   │
//! │ 11  Empty         "" only (sentinel)             12-19  3     4,8,12   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Is Behavior
//! Classification returns the FIRST row whose pattern matches. Ambiguous
//! prefixes resolve by row order, not by specificity: `622` is Discover
//! (row 2) even though UnionPay (row 7) also claims `62`. Never reorder.
//!
//! Patterns are matched against the whole input. They are compiled once, on
//! first use, and shared read-only for the life of the process.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

/// Space indices used by every network except Amex.
const DEFAULT_SPACE_INDICES: &[usize] = &[4, 8, 12];

/// Amex groups its 15 digits as 4-6-5.
const AMEX_SPACE_INDICES: &[usize] = &[4, 10];

// =============================================================================
// Card Type
// =============================================================================

/// Identifier of a row in the network table.
///
/// Variants are declared in table order, so `card_type as usize` addresses the
/// table directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum CardType {
    Visa,
    Mastercard,
    Discover,
    Amex,
    DinersClub,
    Jcb,
    Maestro,
    UnionPay,
    Hiper,
    Hipercard,
    /// Catch-all for digits that match no real network.
    Unknown,
    /// Sentinel for empty input.
    Empty,
}

impl CardType {
    /// Returns the table row for this card type.
    #[inline]
    pub fn definition(self) -> &'static NetworkDefinition {
        &NETWORKS[self as usize]
    }

    /// Returns true for the `Unknown` and `Empty` sentinels.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, CardType::Unknown | CardType::Empty)
    }

    /// Human readable network name.
    pub const fn display_name(self) -> &'static str {
        match self {
            CardType::Visa => "Visa",
            CardType::Mastercard => "Mastercard",
            CardType::Discover => "Discover",
            CardType::Amex => "American Express",
            CardType::DinersClub => "Diners Club",
            CardType::Jcb => "JCB",
            CardType::Maestro => "Maestro",
            CardType::UnionPay => "UnionPay",
            CardType::Hiper => "Hiper",
            CardType::Hipercard => "Hipercard",
            CardType::Unknown => "Unknown",
            CardType::Empty => "Empty",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Security Code Name
// =============================================================================

/// What the network calls its security code.
///
/// Hosts use this for the security code field's hint and error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum SecurityCodeName {
    /// Card Verification Value.
    Cvv,
    /// Card Validation Code.
    Cvc,
    /// Card Identification number.
    Cid,
    /// Card Verification Number.
    Cvn,
}

impl SecurityCodeName {
    /// Short label, e.g. "CVV".
    pub const fn label(self) -> &'static str {
        match self {
            SecurityCodeName::Cvv => "CVV",
            SecurityCodeName::Cvc => "CVC",
            SecurityCodeName::Cid => "CID",
            SecurityCodeName::Cvn => "CVN",
        }
    }
}

impl fmt::Display for SecurityCodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Network Definition
// =============================================================================

/// One row of the network table.
///
/// Rows only exist inside the static table; obtain them through
/// [`CardType::definition`] or [`networks`].
#[derive(Debug, PartialEq, Eq)]
pub struct NetworkDefinition {
    card_type: CardType,
    pattern: &'static str,
    relaxed_prefix_pattern: Option<&'static str>,
    min_length: usize,
    max_length: usize,
    security_code_length: usize,
    security_code_name: SecurityCodeName,
    space_indices: &'static [usize],
}

impl NetworkDefinition {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        card_type: CardType,
        pattern: &'static str,
        relaxed_prefix_pattern: Option<&'static str>,
        min_length: usize,
        max_length: usize,
        security_code_length: usize,
        security_code_name: SecurityCodeName,
        space_indices: &'static [usize],
    ) -> Self {
        NetworkDefinition {
            card_type,
            pattern,
            relaxed_prefix_pattern,
            min_length,
            max_length,
            security_code_length,
            security_code_name,
            space_indices,
        }
    }

    #[inline]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Source of the primary pattern (matched in full).
    #[inline]
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Source of the fallback pattern, if this network has one.
    #[inline]
    pub fn relaxed_prefix_pattern(&self) -> Option<&'static str> {
        self.relaxed_prefix_pattern
    }

    /// Minimum number of digits (inclusive).
    #[inline]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Maximum number of digits (inclusive). Hosts cap input at this length.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    #[inline]
    pub fn security_code_length(&self) -> usize {
        self.security_code_length
    }

    #[inline]
    pub fn security_code_name(&self) -> SecurityCodeName {
        self.security_code_name
    }

    /// 1-based digit positions followed by a display separator.
    #[inline]
    pub fn space_indices(&self) -> &'static [usize] {
        self.space_indices
    }

    /// Returns true if `input` matches the primary pattern in full.
    pub fn matches_pattern(&self, input: &str) -> bool {
        self.compiled().pattern.is_match(input)
    }

    /// Returns true if `input` matches the relaxed prefix pattern in full.
    ///
    /// Always false for networks without one.
    pub fn matches_relaxed_prefix(&self, input: &str) -> bool {
        self.compiled()
            .relaxed_prefix_pattern
            .as_ref()
            .is_some_and(|re| re.is_match(input))
    }

    #[inline]
    fn compiled(&self) -> &'static CompiledPatterns {
        &COMPILED[self.card_type as usize]
    }
}

// =============================================================================
// The Table
// =============================================================================

static NETWORKS: [NetworkDefinition; 12] = [
    NetworkDefinition::new(
        CardType::Visa,
        "4[0-9]*",
        None,
        16,
        16,
        3,
        SecurityCodeName::Cvv,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Mastercard,
        "(5[1-5]|222[1-9]|22[3-9]|2[3-6]|27[0-1]|2720)[0-9]*",
        None,
        16,
        16,
        3,
        SecurityCodeName::Cvc,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Discover,
        "(6011|65|64[4-9]|622)[0-9]*",
        None,
        16,
        16,
        3,
        SecurityCodeName::Cid,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Amex,
        "3[47][0-9]*",
        None,
        15,
        15,
        4,
        SecurityCodeName::Cid,
        AMEX_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::DinersClub,
        "(36|38|30[0-5])[0-9]*",
        None,
        14,
        14,
        3,
        SecurityCodeName::Cvv,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Jcb,
        "35[0-9]*",
        None,
        16,
        16,
        3,
        SecurityCodeName::Cvv,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Maestro,
        "(5018|5020|5038|5[6-9]|6020|6304|6703|6759|676[1-3])[0-9]*",
        Some("6[0-9]*"),
        12,
        19,
        3,
        SecurityCodeName::Cvc,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::UnionPay,
        "62[0-9]*",
        None,
        16,
        19,
        3,
        SecurityCodeName::Cvn,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Hiper,
        "637(095|568|599|609|612)[0-9]*",
        None,
        16,
        16,
        3,
        SecurityCodeName::Cvc,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Hipercard,
        "606282[0-9]*",
        None,
        16,
        16,
        3,
        SecurityCodeName::Cvc,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Unknown,
        "[0-9]+",
        None,
        12,
        19,
        3,
        SecurityCodeName::Cvv,
        DEFAULT_SPACE_INDICES,
    ),
    NetworkDefinition::new(
        CardType::Empty,
        "",
        None,
        12,
        19,
        3,
        SecurityCodeName::Cvv,
        DEFAULT_SPACE_INDICES,
    ),
];

/// Returns the whole table in classification order.
#[inline]
pub fn networks() -> &'static [NetworkDefinition] {
    &NETWORKS
}

// =============================================================================
// Compiled Patterns
// =============================================================================

struct CompiledPatterns {
    pattern: Regex,
    relaxed_prefix_pattern: Option<Regex>,
}

static COMPILED: LazyLock<Vec<CompiledPatterns>> = LazyLock::new(|| {
    let compiled: Vec<CompiledPatterns> = NETWORKS
        .iter()
        .map(|network| CompiledPatterns {
            pattern: compile_full_match(network.pattern),
            relaxed_prefix_pattern: network.relaxed_prefix_pattern.map(compile_full_match),
        })
        .collect();
    debug!(count = compiled.len(), "Compiled card network patterns");
    compiled
});

/// Anchors `source` at both ends so `is_match` means "matches in full".
fn compile_full_match(source: &str) -> Regex {
    Regex::new(&format!("^(?:{source})$"))
        .unwrap_or_else(|e| panic!("static network pattern {source:?} must compile: {e}"))
}

// =============================================================================
// Unit Tests
// =============================================================================
