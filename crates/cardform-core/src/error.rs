//! # Error Types
//!
//! Domain-specific error types for cardform-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cardform-core errors (this file)                                      │
//! │  ├── CardError    - Precondition violations (non-digit to checksum)    │
//! │  └── ConfigError  - Host form configuration failures                   │
//! │                                                                         │
//! │  NOT errors: wrong length, unknown prefix, failed checksum, expired   │
//! │  date. Those are ordinary invalidity and come back as `false`.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (offending character, position)
//! 3. Errors are enum variants, never String
//! 4. User typing never produces an `Err`; only programmer mistakes do

use thiserror::Error;

// =============================================================================
// Card Error
// =============================================================================

/// Precondition violations raised by the checksum functions.
///
/// ## When This Occurs
/// A caller passed raw, unfiltered text to [`crate::luhn::is_luhn_valid`]
/// or [`crate::luhn::check_digit`]. User input should go through
/// [`crate::card_number::is_valid`], which reports non-digits as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// A character that is not an ASCII decimal digit.
    ///
    /// `position` is the 0-based character index from the left.
    #[error("Not a digit: '{character}' at position {position}")]
    NotADigit { character: char, position: usize },
}

// =============================================================================
// Config Error
// =============================================================================

/// Host form configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed.
    #[error("Failed to parse form config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but describes an unusable form.
    #[error("Invalid form config: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CardError.
pub type CardResult<T> = Result<T, CardError>;

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
