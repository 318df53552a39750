//! Authentication error types for the Levels API client.
//!
//! # Error Types
//!
//! - [`AuthError::Config`]: the email or password failed validation
//! - [`AuthError::Rejected`]: the identity provider refused the credentials
//! - [`AuthError::ChallengeRequired`]: the provider asked for an extra step
//! - [`AuthError::Network`]: the identity provider could not be reached
//! - [`AuthError::InvalidResponse`]: the provider answered with something unexpected
//! - [`AuthError::InvalidToken`]: an access token is empty or cannot be decoded
//!
//! # Example
//!
//! ```rust
//! use levels_api::auth::AuthError;
//!
//! let error = AuthError::Rejected {
//!     status: 400,
//!     kind: "NotAuthorizedException".to_string(),
//!     message: "Incorrect username or password.".to_string(),
//! };
//! assert!(error.to_string().contains("NotAuthorizedException"));
//! ```

use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur while authenticating.
///
/// Every failure is returned to the caller as-is; nothing is retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The supplied credentials failed local validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The identity provider rejected the credentials.
    #[error("Authentication rejected with status {status} ({kind}): {message}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
        /// The provider's error kind (e.g., `NotAuthorizedException`).
        kind: String,
        /// The provider's error message.
        message: String,
    },

    /// The identity provider requires a challenge this client cannot answer.
    #[error("Identity provider requires the '{challenge}' challenge to complete sign-in")]
    ChallengeRequired {
        /// The challenge name (e.g., `NEW_PASSWORD_REQUIRED`).
        challenge: String,
    },

    /// The identity provider could not be reached.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The identity provider's response could not be understood.
    #[error("Invalid identity provider response: {message}")]
    InvalidResponse {
        /// Description of what was wrong with the response.
        message: String,
    },

    /// An access token is empty or malformed.
    #[error("Invalid access token: {reason}")]
    InvalidToken {
        /// Why the token was rejected.
        reason: String,
    },
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
