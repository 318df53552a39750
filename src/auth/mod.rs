//! Authentication for the Levels API.
//!
//! # Overview
//!
//! - [`AccessToken`]: the bearer credential sent with every query
//! - [`AccessTokenClaims`]: decoded token payload, for diagnostics
//! - [`IdentityProvider`]: exchanges an email and password for a token
//! - [`CognitoIdentityProvider`]: the provider used by the Levels service,
//!   signing in with the Cognito SRP handshake by default
//! - [`AuthError`]: authentication failures
//!
//! Tokens are never refreshed: when one expires the caller signs in again.

mod cognito;
mod error;
mod srp;
mod token;

pub use cognito::{CognitoIdentityProvider, IdentityProvider};
pub use error::AuthError;
pub use token::{AccessToken, AccessTokenClaims};
