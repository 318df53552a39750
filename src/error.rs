//! Error types for the Levels API client.
//!
//! This module contains the configuration and validation errors used
//! throughout the crate. Transport, GraphQL and authentication failures
//! live next to the code that produces them (see
//! [`HttpError`](crate::clients::HttpError),
//! [`GraphqlError`](crate::clients::graphql::GraphqlError) and
//! [`AuthError`](crate::auth::AuthError)).
//!
//! # Example
//!
//! ```rust
//! use levels_api::{ConfigError, Email};
//!
//! let result = Email::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyEmail)));
//! ```

use thiserror::Error;

/// Errors that can occur while building configuration or credentials.
///
/// Every constructor of a validated newtype returns `Result<T, ConfigError>`
/// so invalid values are rejected before any network traffic happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Email (the Levels account identity) cannot be empty.
    #[error("Email cannot be empty. Please provide the email address of your Levels account.")]
    EmptyEmail,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the password of your Levels account.")]
    EmptyPassword,

    /// An endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://app.levelshealth.com/api/graphql').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The user pool id does not have the `<region>_<id>` shape.
    #[error("Invalid user pool id '{pool_id}'. Expected format: '<region>_<id>' (e.g., 'us-east-2_HrbIXNNBD').")]
    InvalidUserPoolId {
        /// The invalid pool id that was provided.
        pool_id: String,
    },

    /// The user agent prefix cannot be sent as an HTTP header.
    #[error("Invalid user agent prefix '{prefix}'. The prefix must not contain control characters.")]
    InvalidUserAgent {
        /// The rejected prefix.
        prefix: String,
    },

    /// The identity provider client id cannot be empty.
    #[error("Client id cannot be empty. Please provide the app client id of the user pool.")]
    EmptyClientId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_email_error_message() {
        let message = ConfigError::EmptyEmail.to_string();
        assert!(message.contains("Email cannot be empty"));
        assert!(message.contains("Levels account"));
    }

    #[test]
    fn test_invalid_endpoint_error_includes_url() {
        let error = ConfigError::InvalidEndpointUrl {
            url: "not a url".to_string(),
        };
        assert!(error.to_string().contains("not a url"));
    }

    #[test]
    fn test_invalid_user_pool_error_includes_expected_format() {
        let error = ConfigError::InvalidUserPoolId {
            pool_id: "nounderscore".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("nounderscore"));
        assert!(message.contains("Expected format"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyPassword;
        let _: &dyn std::error::Error = &error;
    }
}
