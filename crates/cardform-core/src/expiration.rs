//! # Expiration Date Validation
//!
//! Validates card expiration dates against a rolling window anchored at an
//! injectable "today".
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_valid_expiration("MM", "YY" | "YYYY", today)                        │
//! │       │                                                                 │
//! │       ├── empty or non-digit month/year        → false                  │
//! │       ├── month outside 1..=12                 → false                  │
//! │       ├── year not 2 or 4 digits               → false                  │
//! │       │   (4 digits: only the last two count)                           │
//! │       ├── same year, earlier month             → false (expired)        │
//! │       ├── year < this year:                                             │
//! │       │     treat as next century; more than 20 years out → false       │
//! │       └── otherwise                            → year <= this year + 20 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Century Wrap
//! Two-digit years are ambiguous near a century boundary. In 2099, "01/01"
//! means 2101: `1 < 99`, `1 + 100 - 99 = 2 <= 20`, so it is accepted.
//!
//! ## Text Entry
//! [`ExpirationInput`] models the raw `MMYY` / `MMYYYY` text a host collects,
//! including the leading zero inserted when the first typed digit cannot
//! start a two-digit month.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How many years ahead an expiration date is trusted.
pub const MAXIMUM_VALID_YEAR_DIFFERENCE: u32 = 20;

/// Longest raw expiration text: `MMYYYY`.
pub const MAX_INPUT_LENGTH: usize = 6;

// =============================================================================
// Reference Date & Clock
// =============================================================================

/// The "today" an expiration date is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReferenceDate {
    /// 1..=12
    pub month: u32,
    /// Full four-digit year.
    pub year: u32,
}

impl ReferenceDate {
    /// `month` must be in 1..=12; checked in debug builds.
    pub const fn new(month: u32, year: u32) -> Self {
        debug_assert!(month >= 1 && month <= 12, "reference month must be 1..=12");
        ReferenceDate { month, year }
    }

    #[inline]
    fn short_year(&self) -> u32 {
        self.year % 100
    }
}

/// Source of the reference date.
///
/// Validators take a clock instead of reading the system time so every rule
/// can be tested for any "today".
pub trait Clock {
    fn today(&self) -> ReferenceDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> ReferenceDate {
        let now = Local::now();
        ReferenceDate::new(now.month(), now.year().unsigned_abs())
    }
}

/// A clock frozen at one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub ReferenceDate);

impl Clock for FixedClock {
    fn today(&self) -> ReferenceDate {
        self.0
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Returns true if `month`/`year` is an acceptable expiration at `today`.
///
/// ## Example
/// ```rust
/// use cardform_core::expiration::{is_valid_expiration, ReferenceDate};
///
/// let today = ReferenceDate::new(6, 2024);
/// assert!(is_valid_expiration("06", "24", today));
/// assert!(is_valid_expiration("06", "2024", today));
/// assert!(!is_valid_expiration("05", "24", today));
/// assert!(!is_valid_expiration("01", "45", today));
/// ```
pub fn is_valid_expiration(month: &str, year: &str, today: ReferenceDate) -> bool {
    let (Some(month), Some(_)) = (parse_digits(month), parse_digits(year)) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    // All ASCII digits from here on, so byte offsets are character offsets.
    let year = match year.len() {
        2 => parse_digits(year),
        4 => parse_digits(&year[2..]),
        _ => None,
    };
    let Some(year) = year else {
        return false;
    };

    let current_year = today.short_year();

    if year == current_year && month < today.month {
        return false;
    }

    if year < current_year {
        let adjusted_year = year + 100;
        if adjusted_year - current_year > MAXIMUM_VALID_YEAR_DIFFERENCE {
            return false;
        }
    }

    year <= current_year + MAXIMUM_VALID_YEAR_DIFFERENCE
}

/// Parses a non-empty, all-ASCII-digit string. Overflow counts as malformed.
fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Validator bound to a clock.
///
/// ```rust
/// use cardform_core::expiration::{ExpirationDateValidator, FixedClock, ReferenceDate};
///
/// let validator = ExpirationDateValidator::new(FixedClock(ReferenceDate::new(12, 2099)));
/// assert!(validator.is_valid("01", "01"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpirationDateValidator<C = SystemClock> {
    clock: C,
}

impl<C: Clock> ExpirationDateValidator<C> {
    pub fn new(clock: C) -> Self {
        ExpirationDateValidator { clock }
    }

    pub fn is_valid(&self, month: &str, year: &str) -> bool {
        is_valid_expiration(month, year, self.clock.today())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

// =============================================================================
// Text Entry
// =============================================================================

/// Raw expiration text as typed, without the slash.
///
/// ## Input Flow
/// ```text
/// keystroke "3"  → "03"      (no month starts with 3, so zero-pad)
/// keystroke "1"  → "1"       (could be 10..12, leave alone)
/// "1228"         → month "12", year "28"
/// "122028"       → month "12", year "2028"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpirationInput {
    text: String,
}

impl ExpirationInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an edit from the host.
    ///
    /// Text is capped at [`MAX_INPUT_LENGTH`] characters. When the edit
    /// grew the text to a single digit of 2 or more, a leading zero is
    /// prepended.
    pub fn update(&mut self, text: &str) {
        let grew = text.chars().count() > self.text.chars().count();
        let mut text: String = text.chars().take(MAX_INPUT_LENGTH).collect();

        if grew {
            let mut chars = text.chars();
            if let (Some(first), None) = (chars.next(), chars.next()) {
                if first.to_digit(10).is_some_and(|d| d >= 2) {
                    text.insert(0, '0');
                }
            }
        }

        self.text = text;
    }

    /// Current raw text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The two-character month, or "" until two characters are present.
    pub fn month(&self) -> &str {
        match self.text.char_indices().nth(2) {
            Some((end, _)) => &self.text[..end],
            None if self.text.chars().count() == 2 => &self.text,
            None => "",
        }
    }

    /// The 2- or 4-character year, or "" unless the text is 4 or 6 long.
    pub fn year(&self) -> &str {
        match self.text.chars().count() {
            4 | 6 => {
                let start = self.text.char_indices().nth(2).map_or(0, |(i, _)| i);
                &self.text[start..]
            }
            _ => "",
        }
    }

    /// Text with a `/` after the month, e.g. "12/28".
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 1);
        for (i, c) in self.text.chars().enumerate() {
            if i == 2 {
                out.push('/');
            }
            out.push(c);
        }
        out
    }

    pub fn is_valid_at(&self, today: ReferenceDate) -> bool {
        is_valid_expiration(self.month(), self.year(), today)
    }

    /// Whether a host should move focus to the next field.
    ///
    /// "MM20" is held back: the user may be typing a four-digit 20xx year.
    pub fn should_advance(&self, today: ReferenceDate) -> bool {
        let len = self.text.chars().count();
        let complete = (len == 4 && !self.text.ends_with("20")) || len == MAX_INPUT_LENGTH;
        complete && self.is_valid_at(today)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
