//! # Form Configuration
//!
//! Host policy for a card form: which fields are shown, which may be left
//! empty, and whether values are masked when focus leaves them.
//!
//! ## Configuration Format
//! ```toml
//! card_number = "required"
//! expiration_date = "required"
//! security_code = "optional"   # required | optional | disabled
//! mask_card_number = true
//! mask_security_code = false
//! ```
//!
//! Missing keys take their defaults: every field required, nothing masked.
//! The host reads the file; this crate only parses text, keeping the core
//! free of I/O.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Field Requirement
// =============================================================================

/// How the host treats one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldRequirement {
    /// Shown, and must be valid.
    #[default]
    Required,
    /// Shown, but always counts as valid.
    Optional,
    /// Not shown; ignored by form validity.
    Disabled,
}

impl FieldRequirement {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, FieldRequirement::Disabled)
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        matches!(self, FieldRequirement::Optional)
    }
}

impl std::fmt::Display for FieldRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRequirement::Required => write!(f, "required"),
            FieldRequirement::Optional => write!(f, "optional"),
            FieldRequirement::Disabled => write!(f, "disabled"),
        }
    }
}

// =============================================================================
// Form Config
// =============================================================================

/// Card form policy supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct FormConfig {
    pub card_number: FieldRequirement,
    pub expiration_date: FieldRequirement,
    pub security_code: FieldRequirement,
    /// Mask all but the last four digits once the number is valid and
    /// focus has left the field.
    pub mask_card_number: bool,
    /// Render the security code as a password input.
    pub mask_security_code: bool,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: FormConfig = toml::from_str(text)?;
        config.validate()?;
        debug!(
            card_number = %config.card_number,
            expiration_date = %config.expiration_date,
            security_code = %config.security_code,
            "Loaded form config"
        );
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// A card form without a card number field is meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.card_number.is_enabled() {
            return Err(Self::invalid("card_number cannot be disabled"));
        }

        if self.mask_security_code && !self.security_code.is_enabled() {
            return Err(Self::invalid(
                "mask_security_code set but security_code is disabled",
            ));
        }

        Ok(())
    }

    fn invalid(reason: &str) -> ConfigError {
        warn!(reason, "Rejected form config");
        ConfigError::InvalidConfig(reason.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
