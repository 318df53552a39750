//! The user-facing Levels client.
//!
//! [`LevelsClient`] owns the configuration, the query dispatcher, the
//! identity provider and the session credential. It exposes one method per
//! catalog query.
//!
//! # Session Credential
//!
//! A new client holds no access token. [`LevelsClient::authenticate`] or
//! [`LevelsClient::set_access_token`] stores one; there is no way back to
//! the empty state. Data methods called before that return
//! [`GraphqlError::NotAuthenticated`] without touching the network.
//!
//! Credential changes take `&mut self` while data methods take `&self`, so
//! the token can never change under a call in flight.

use std::fmt;

use serde_json::Value;

use crate::auth::{AccessToken, AuthError, CognitoIdentityProvider, IdentityProvider};
use crate::clients::build_reqwest_client;
use crate::clients::graphql::{GraphqlClient, GraphqlError, GraphqlRequest};
use crate::config::{Email, LevelsConfig, Password};
use crate::queries::Query;
use crate::range::RangeOverride;

/// Client for the Levels Health API.
///
/// # Example
///
/// ```rust,ignore
/// use levels_api::{LevelsClient, RangeOverride};
///
/// let mut client = LevelsClient::new();
/// client.authenticate("me@example.com", "hunter2").await?;
///
/// let profile = client.user_data().await?;
/// let glucose = client.glucose_history(None).await?;
/// let last_week = client
///     .sleep_logs(Some(RangeOverride::new(1_704_326_400_000, 1_704_931_200_000)))
///     .await?;
/// ```
pub struct LevelsClient {
    config: LevelsConfig,
    graphql: GraphqlClient,
    identity: Box<dyn IdentityProvider>,
    access_token: Option<AccessToken>,
}

// Verify LevelsClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LevelsClient>();
};

impl LevelsClient {
    /// Creates a client for the production Levels service.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LevelsConfig::default())
    }

    /// Creates a client from `config`, signing in through Cognito.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn with_config(config: LevelsConfig) -> Self {
        Self::with_http_client(config, build_reqwest_client())
    }

    /// Creates a client from `config` that sends sign-in and query traffic
    /// through `http_client`.
    ///
    /// Both share one connection pool and whatever settings `http_client`
    /// was built with (proxies, timeouts, default headers).
    #[must_use]
    pub fn with_http_client(config: LevelsConfig, http_client: reqwest::Client) -> Self {
        let identity = CognitoIdentityProvider::with_client(http_client.clone(), &config);
        Self {
            graphql: GraphqlClient::with_client(http_client, &config),
            config,
            identity: Box::new(identity),
            access_token: None,
        }
    }

    /// Creates a client from `config` with a custom identity provider.
    #[must_use]
    pub fn with_identity_provider(
        config: LevelsConfig,
        identity: impl IdentityProvider + 'static,
    ) -> Self {
        Self {
            graphql: GraphqlClient::new(&config),
            config,
            identity: Box::new(identity),
            access_token: None,
        }
    }

    /// Stores an access token obtained elsewhere, consuming the client.
    #[must_use]
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Stores an access token obtained elsewhere.
    pub fn set_access_token(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    /// Returns the stored access token, if any.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns `true` once an access token is stored.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LevelsConfig {
        &self.config
    }

    /// Returns the query dispatcher.
    #[must_use]
    pub const fn graphql(&self) -> &GraphqlClient {
        &self.graphql
    }

    /// Signs in with an email and password and stores the issued token.
    ///
    /// On failure the previously stored token, if any, is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if either credential is empty, or the
    /// identity provider's error if sign-in fails.
    pub async fn authenticate(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AccessToken, AuthError> {
        let email = Email::new(email)?;
        let password = Password::new(password)?;

        let token = self.identity.authenticate(&email, &password).await?;
        self.access_token = Some(token.clone());
        Ok(token)
    }

    /// Executes a catalog query with an optional range override.
    ///
    /// The override only matters for queries that take a range.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::NotAuthenticated`] if no token is stored, or
    /// [`GraphqlError::Http`] if the request fails.
    pub async fn execute(
        &self,
        query: Query,
        range: Option<RangeOverride>,
    ) -> Result<Value, GraphqlError> {
        let token = self.token()?;
        self.graphql.execute(token, query, range).await
    }

    /// Sends a custom GraphQL request with the stored token.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn send(&self, request: &GraphqlRequest) -> Result<Value, GraphqlError> {
        let token = self.token()?;
        self.graphql.send(token, request).await
    }

    /// Fetches the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn user_data(&self) -> Result<Value, GraphqlError> {
        self.execute(Query::UserData, None).await
    }

    /// Asks the service to pull fresh readings from the glucose sensor.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn request_sensor_refresh(&self) -> Result<Value, GraphqlError> {
        self.execute(Query::RequestSensorRefresh, None).await
    }

    /// Lists activity zones (food, exercise and notes) by score.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn find_zones(&self) -> Result<Value, GraphqlError> {
        self.execute(Query::FindZones, None).await
    }

    /// Fetches the glucose sensor status.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn sensor_status(&self) -> Result<Value, GraphqlError> {
        self.execute(Query::SensorStatus, None).await
    }

    /// Fetches current and best metabolic fitness streaks.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn metabolic_fitness_streaks(&self) -> Result<Value, GraphqlError> {
        self.execute(Query::MetabolicFitnessStreaks, None).await
    }

    /// Fetches heart rate metrics for `range`, or the default window.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn heart_rate_metrics(
        &self,
        range: Option<RangeOverride>,
    ) -> Result<Value, GraphqlError> {
        self.execute(Query::HeartRateMetrics, range).await
    }

    /// Fetches sleep logs for `range`, or the default window.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn sleep_logs(&self, range: Option<RangeOverride>) -> Result<Value, GraphqlError> {
        self.execute(Query::SleepLogs, range).await
    }

    /// Fetches daily metabolic fitness scores for `range`, or the default
    /// window.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn metabolic_fitness(
        &self,
        range: Option<RangeOverride>,
    ) -> Result<Value, GraphqlError> {
        self.execute(Query::DailyMetabolicFitnessScore, range).await
    }

    /// Fetches the insight feed for `range`, or the default window.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn insight_feed(&self, range: Option<RangeOverride>) -> Result<Value, GraphqlError> {
        self.execute(Query::InsightFeed, range).await
    }

    /// Fetches glucose history for `range`, or the default window, along
    /// with the comparison statistics for the preceding days.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn glucose_history(
        &self,
        range: Option<RangeOverride>,
    ) -> Result<Value, GraphqlError> {
        self.execute(Query::GlucoseHistory, range).await
    }

    fn token(&self) -> Result<&AccessToken, GraphqlError> {
        self.access_token
            .as_ref()
            .ok_or(GraphqlError::NotAuthenticated)
    }
}

impl Default for LevelsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LevelsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelsClient")
            .field("config", &self.config)
            .field("graphql", &self.graphql)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}
