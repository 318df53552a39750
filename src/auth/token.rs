//! Access tokens issued by the Levels identity provider.
//!
//! An [`AccessToken`] is the bearer credential attached to every GraphQL
//! request. It is opaque to the client: format and lifetime are defined by
//! the provider. For diagnostics, [`AccessToken::claims`] decodes the
//! token's payload without verifying its signature.
//!
//! # Security
//!
//! The `Debug` implementation masks the token value.
//!
//! ```rust
//! use levels_api::AccessToken;
//!
//! let token = AccessToken::new("eyJhbGciOi...").unwrap();
//! assert_eq!(format!("{:?}", token), "AccessToken(*****)");
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::auth::AuthError;

/// A bearer access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is empty or only
    /// whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AuthError::InvalidToken {
                reason: "token is empty".to_string(),
            });
        }
        Ok(Self(token))
    }

    /// Decodes the token's claims without verifying the signature.
    ///
    /// The signature and expiry are not checked: this is for display and
    /// diagnostics only, never for authorization decisions.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is not a JWT or its
    /// payload lacks a `sub` claim.
    pub fn claims(&self) -> Result<AccessTokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<AccessTokenClaims>(&self.0, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken {
                reason: format!("Error decoding access token: {e}"),
            })
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// Claims carried by a Cognito access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: the user's stable id in the user pool.
    pub sub: String,

    /// The user name the token was issued to.
    #[serde(default)]
    pub username: Option<String>,

    /// The app client the token was issued for.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Token use, `access` for access tokens.
    #[serde(default)]
    pub token_use: Option<String>,

    /// Issuer URL of the user pool.
    #[serde(default)]
    pub iss: Option<String>,

    /// Expiration timestamp (Unix seconds).
    #[serde(default)]
    pub exp: Option<i64>,

    /// Issued-at timestamp (Unix seconds).
    #[serde(default)]
    pub iat: Option<i64>,
}

impl AccessTokenClaims {
    /// Returns the expiry as a date-time, if the token carries one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

// Verify token types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
    assert_send_sync::<AccessTokenClaims>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn signed(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"any-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_blank_token() {
        assert!(matches!(
            AccessToken::new("  "),
            Err(AuthError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_debug_masks_token() {
        let token = AccessToken::new("very-secret-token").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("very-secret-token"));
    }

    #[test]
    fn test_claims_are_decoded_without_verification() {
        let jwt = signed(&json!({
            "sub": "2f1c-user",
            "username": "2f1c-user",
            "client_id": "7h2gfvbt69fhijvvn0vfn10ih2",
            "token_use": "access",
            "iss": "https://cognito-idp.us-east-2.amazonaws.com/us-east-2_HrbIXNNBD",
            "exp": 1_704_931_200,
            "iat": 1_704_927_600
        }));
        let claims = AccessToken::new(jwt).unwrap().claims().unwrap();

        assert_eq!(claims.sub, "2f1c-user");
        assert_eq!(claims.client_id.as_deref(), Some("7h2gfvbt69fhijvvn0vfn10ih2"));
        assert_eq!(claims.token_use.as_deref(), Some("access"));
        assert_eq!(
            claims.expires_at().unwrap().to_rfc3339(),
            "2024-01-11T00:00:00+00:00"
        );
    }

    #[test]
    fn test_expired_token_still_decodes() {
        let jwt = signed(&json!({ "sub": "user", "exp": 1 }));
        let claims = AccessToken::new(jwt).unwrap().claims().unwrap();
        assert_eq!(claims.exp, Some(1));
    }

    #[test]
    fn test_claims_reject_non_jwt() {
        let token = AccessToken::new("not-a-jwt").unwrap();
        assert!(matches!(
            token.claims(),
            Err(AuthError::InvalidToken { .. })
        ));
    }
}
