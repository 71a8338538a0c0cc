//! # cardform-core: Card Classification & Validation Engine
//!
//! The logic behind a payment card entry form, as pure functions with zero
//! I/O. Host UI toolkits call in with the text a user has typed and get back
//! a network, a validity verdict and display hints.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CardForm Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host UI (any toolkit)                           │   │
//! │  │   Card input ──► Expiry input ──► CVV input ──► Submit          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ text per keystroke                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cardform-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   network ──► classify ──► card_number ──► form                 │   │
//! │  │                  │            │   ▲                             │   │
//! │  │                  ▼            ▼   │                             │   │
//! │  │               format        luhn  security_code, expiration     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RENDERING • NO SHARED MUTABLE STATE               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`network`] - The ordered network table (Visa, Amex, Maestro, ...)
//! - [`classify`] - First-match classification with relaxed-prefix fallback
//! - [`luhn`] - Mod-10 checksum
//! - [`card_number`] - Full card number validity and incremental field state
//! - [`security_code`] - CVV/CVC/CID/CVN validation
//! - [`expiration`] - Expiration date rules with an injectable clock
//! - [`format`] - Separator insertion and masking
//! - [`form`] - The three fields wired together under a host policy
//! - [`config`] - Host policy (required / optional / disabled, masking)
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; safe from any thread
//! 2. **Invalid Is Not An Error**: typing produces `false`, never `Err`
//! 3. **Compile Once**: network patterns are built on first use and reused
//! 4. **Injectable Time**: expiration checks never read the clock implicitly
//!
//! ## Example Usage
//!
//! ```rust
//! use cardform_core::{card_number, classify, format, CardType};
//!
//! let typed = "378282246310005";
//! let result = classify(typed);
//! assert_eq!(result.card_type, CardType::Amex);
//!
//! assert!(card_number::is_valid(typed, result.network()));
//! assert_eq!(format::format(typed, result.network()), "3782 822463 10005");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod card_number;
pub mod classify;
pub mod config;
pub mod error;
pub mod expiration;
pub mod form;
pub mod format;
pub mod luhn;
pub mod network;
pub mod security_code;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cardform_core::CardType` instead of
// `use cardform_core::network::CardType`

pub use card_number::{CardNumberField, NetworkChange};
pub use classify::{classify, Classification, MatchedBy};
pub use config::{FieldRequirement, FormConfig};
pub use error::{CardError, CardResult, ConfigError, ConfigResult};
pub use expiration::{
    is_valid_expiration, Clock, ExpirationDateValidator, ExpirationInput, FixedClock,
    ReferenceDate, SystemClock,
};
pub use form::{CardForm, FieldStatus, FormStatus};
pub use luhn::is_luhn_valid;
pub use network::{networks, CardType, NetworkDefinition, SecurityCodeName};
pub use security_code::{is_valid_security_code, SecurityCodeField};
