//! Configuration types for the Levels API client.
//!
//! # Overview
//!
//! - [`LevelsConfig`]: all client settings, immutable once built
//! - [`LevelsConfigBuilder`]: a builder for [`LevelsConfig`]
//! - [`Email`] and [`Password`]: validated account credentials
//! - [`EndpointUrl`]: a validated absolute URL
//! - [`UserPool`]: the Cognito user pool and app client used to sign in
//! - [`AuthFlow`]: the Cognito sign-in flow
//!
//! Every setting has a default pointing at the production Levels service, so
//! most applications only need `LevelsConfig::default()`.
//!
//! # Example
//!
//! ```rust
//! use levels_api::{EndpointUrl, LevelsConfig};
//!
//! let config = LevelsConfig::builder()
//!     .graphql_endpoint(EndpointUrl::new("https://app.levelshealth.com/api/graphql").unwrap())
//!     .user_agent_prefix("GlucoseDash/0.3")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.user_agent_prefix(), Some("GlucoseDash/0.3"));
//! ```

mod newtypes;

pub use newtypes::{Email, EndpointUrl, Password, UserPool};

use chrono::{FixedOffset, Offset, Utc};

use crate::error::ConfigError;

/// The production GraphQL endpoint of the Levels service.
pub const LEVELS_GRAPHQL_ENDPOINT: &str = "https://app.levelshealth.com/api/graphql";

/// Cognito flow used to exchange an email and password for tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthFlow {
    /// `USER_SRP_AUTH` answered with a `PASSWORD_VERIFIER` proof. The
    /// password itself is never sent. The Levels app client requires this.
    #[default]
    UserSrp,
    /// `USER_PASSWORD_AUTH`. Only works for app clients that enable
    /// `ALLOW_USER_PASSWORD_AUTH`.
    UserPassword,
}

impl AuthFlow {
    /// Returns the `AuthFlow` value sent to Cognito.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserSrp => "USER_SRP_AUTH",
            Self::UserPassword => "USER_PASSWORD_AUTH",
        }
    }
}

/// Configuration for the Levels API client.
///
/// # Thread Safety
///
/// `LevelsConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Day Boundaries
///
/// Default query ranges are aligned to the start of a day. `day_offset`
/// selects the UTC offset in which that day starts; it defaults to UTC.
#[derive(Clone, Debug)]
pub struct LevelsConfig {
    graphql_endpoint: EndpointUrl,
    user_pool: UserPool,
    identity_endpoint: Option<EndpointUrl>,
    auth_flow: AuthFlow,
    user_agent_prefix: Option<String>,
    day_offset: FixedOffset,
}

impl LevelsConfig {
    /// Creates a new builder for constructing a `LevelsConfig`.
    #[must_use]
    pub fn builder() -> LevelsConfigBuilder {
        LevelsConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn graphql_endpoint(&self) -> &EndpointUrl {
        &self.graphql_endpoint
    }

    /// Returns the user pool used for authentication.
    #[must_use]
    pub const fn user_pool(&self) -> &UserPool {
        &self.user_pool
    }

    /// Returns the identity endpoint override, if configured.
    #[must_use]
    pub const fn identity_endpoint(&self) -> Option<&EndpointUrl> {
        self.identity_endpoint.as_ref()
    }

    /// Returns the identity endpoint to sign in against.
    ///
    /// This is the configured override, or the regional Cognito endpoint of
    /// the user pool.
    #[must_use]
    pub fn resolved_identity_endpoint(&self) -> String {
        self.identity_endpoint.as_ref().map_or_else(
            || format!("https://cognito-idp.{}.amazonaws.com/", self.user_pool.region()),
            |endpoint| endpoint.as_ref().to_string(),
        )
    }

    /// Returns the Cognito sign-in flow.
    #[must_use]
    pub const fn auth_flow(&self) -> AuthFlow {
        self.auth_flow
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the UTC offset used for day alignment.
    #[must_use]
    pub const fn day_offset(&self) -> FixedOffset {
        self.day_offset
    }
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: default_graphql_endpoint(),
            user_pool: UserPool::levels(),
            identity_endpoint: None,
            auth_flow: AuthFlow::default(),
            user_agent_prefix: None,
            day_offset: utc(),
        }
    }
}

fn default_graphql_endpoint() -> EndpointUrl {
    EndpointUrl::new(LEVELS_GRAPHQL_ENDPOINT).expect("default GraphQL endpoint is a valid URL")
}

fn utc() -> FixedOffset {
    Utc.fix()
}

// Verify LevelsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LevelsConfig>();
};

/// Builder for constructing [`LevelsConfig`] instances.
///
/// # Defaults
///
/// - `graphql_endpoint`: [`LEVELS_GRAPHQL_ENDPOINT`]
/// - `user_pool`: [`UserPool::levels`]
/// - `identity_endpoint`: regional Cognito endpoint of the pool
/// - `auth_flow`: [`AuthFlow::UserSrp`]
/// - `user_agent_prefix`: `None`
/// - `day_offset`: UTC
#[derive(Debug, Default)]
pub struct LevelsConfigBuilder {
    graphql_endpoint: Option<EndpointUrl>,
    user_pool: Option<UserPool>,
    identity_endpoint: Option<EndpointUrl>,
    auth_flow: Option<AuthFlow>,
    user_agent_prefix: Option<String>,
    day_offset: Option<FixedOffset>,
}

impl LevelsConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint.
    #[must_use]
    pub fn graphql_endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.graphql_endpoint = Some(endpoint);
        self
    }

    /// Sets the user pool used for authentication.
    #[must_use]
    pub fn user_pool(mut self, pool: UserPool) -> Self {
        self.user_pool = Some(pool);
        self
    }

    /// Overrides the identity provider endpoint.
    #[must_use]
    pub fn identity_endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.identity_endpoint = Some(endpoint);
        self
    }

    /// Sets the Cognito sign-in flow.
    #[must_use]
    pub const fn auth_flow(mut self, flow: AuthFlow) -> Self {
        self.auth_flow = Some(flow);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the UTC offset in which days start.
    #[must_use]
    pub const fn day_offset(mut self, offset: FixedOffset) -> Self {
        self.day_offset = Some(offset);
        self
    }

    /// Builds the [`LevelsConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUserAgent`] if the user agent prefix
    /// contains control characters, which cannot appear in an HTTP header.
    pub fn build(self) -> Result<LevelsConfig, ConfigError> {
        let defaults = LevelsConfig::default();

        let user_agent_prefix = match self.user_agent_prefix {
            Some(prefix) if prefix.chars().any(char::is_control) => {
                return Err(ConfigError::InvalidUserAgent { prefix });
            }
            other => other,
        };

        Ok(LevelsConfig {
            graphql_endpoint: self.graphql_endpoint.unwrap_or(defaults.graphql_endpoint),
            user_pool: self.user_pool.unwrap_or(defaults.user_pool),
            identity_endpoint: self.identity_endpoint,
            auth_flow: self.auth_flow.unwrap_or(defaults.auth_flow),
            user_agent_prefix,
            day_offset: self.day_offset.unwrap_or(defaults.day_offset),
        })
    }
}
