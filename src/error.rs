//! Error types for SDK configuration.
//!
//! This module contains the error type returned by configuration constructors
//! and validators.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use shopee_partner_api::{PartnerKey, ConfigError};
//!
//! let result = PartnerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyPartnerKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Partner key cannot be empty.
    #[error("Partner key cannot be empty. Please provide the signing key issued for your Shopee partner account.")]
    EmptyPartnerKey,

    /// API host is invalid.
    #[error("Invalid API host '{host}'. Expected a host name (e.g. 'partner.shopeemobile.com') or a base URL with scheme.")]
    InvalidApiHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Inbound API key cannot be empty.
    #[error("Inbound API key cannot be empty. Use ApiKeyGuard::disabled() to explicitly opt out of validation.")]
    EmptyInboundApiKey,

    /// A persisted configuration value could not be parsed.
    #[error("Invalid value '{value}' for configuration key '{key}'.")]
    InvalidConfigValue {
        /// The configuration key whose value was rejected.
        key: String,
        /// The value that could not be parsed.
        value: String,
    },
}
