//! Validated newtype wrappers for configuration and credential values.
//!
//! Each wrapper validates its contents on construction, so a value that
//! exists is a value that can be sent to the service.

use crate::error::ConfigError;
use std::fmt;

/// The email address identifying a Levels account.
///
/// Emails are trimmed but otherwise passed to the identity provider as-is;
/// the provider owns the real validation rules.
///
/// # Example
///
/// ```rust
/// use levels_api::Email;
///
/// let email = Email::new("  me@example.com ").unwrap();
/// assert_eq!(email.as_ref(), "me@example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Creates a new validated email.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEmail`] if the email is empty or only whitespace.
    pub fn new(email: impl Into<String>) -> Result<Self, ConfigError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(ConfigError::EmptyEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The password of a Levels account.
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
///
/// # Example
///
/// ```rust
/// use levels_api::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// Passwords are not trimmed; whitespace may be significant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A validated absolute endpoint URL.
///
/// Used for the GraphQL endpoint and the identity provider endpoint. The URL
/// must carry a scheme and a non-empty host; the path is kept verbatim.
///
/// # Example
///
/// ```rust
/// use levels_api::EndpointUrl;
///
/// let url = EndpointUrl::new("https://app.levelshealth.com/api/graphql").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "app.levelshealth.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL is missing a
    /// scheme or a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let invalid = || ConfigError::InvalidEndpointUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let host_end = url[host_start..]
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A Cognito user pool and the app client used to sign in to it.
///
/// The pool id has the form `<region>_<id>`; the region prefix selects the
/// identity endpoint.
///
/// # Example
///
/// ```rust
/// use levels_api::UserPool;
///
/// let pool = UserPool::levels();
/// assert_eq!(pool.region(), "us-east-2");
/// assert_eq!(pool.client_id(), "7h2gfvbt69fhijvvn0vfn10ih2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserPool {
    pool_id: String,
    client_id: String,
    region_end: usize,
}

impl UserPool {
    /// The user pool backing Levels accounts.
    pub const LEVELS_POOL_ID: &'static str = "us-east-2_HrbIXNNBD";

    /// The Levels app client registered with [`Self::LEVELS_POOL_ID`].
    pub const LEVELS_CLIENT_ID: &'static str = "7h2gfvbt69fhijvvn0vfn10ih2";

    /// Creates a new validated user pool description.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUserPoolId`] if the pool id has no
    /// region prefix, or [`ConfigError::EmptyClientId`] if the client id is
    /// empty.
    pub fn new(
        pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let pool_id = pool_id.into().trim().to_string();
        let client_id = client_id.into().trim().to_string();

        let region_end = match pool_id.find('_') {
            Some(i) if i > 0 && i + 1 < pool_id.len() => i,
            _ => return Err(ConfigError::InvalidUserPoolId { pool_id }),
        };
        if client_id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }

        Ok(Self {
            pool_id,
            client_id,
            region_end,
        })
    }

    /// Returns the pool used by the Levels service.
    #[must_use]
    pub fn levels() -> Self {
        Self {
            pool_id: Self::LEVELS_POOL_ID.to_string(),
            client_id: Self::LEVELS_CLIENT_ID.to_string(),
            region_end: "us-east-2".len(),
        }
    }

    /// Returns the full pool id.
    #[must_use]
    pub fn pool_id(&self) -> &str {
        &self.pool_id
    }

    /// Returns the app client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the pool id without its region prefix.
    ///
    /// Cognito mixes this name into the SRP password proof.
    #[must_use]
    pub fn pool_name(&self) -> &str {
        &self.pool_id[self.region_end + 1..]
    }

    /// Returns the AWS region encoded in the pool id.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.pool_id[..self.region_end]
    }
}

impl Default for UserPool {
    fn default() -> Self {
        Self::levels()
    }
}
