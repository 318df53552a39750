//! Query dispatcher for the Levels GraphQL endpoint.
//!
//! This module provides the [`GraphqlClient`] type, which turns a catalog
//! [`Query`] into a [`GraphqlRequest`] and sends it.

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use crate::auth::AccessToken;
use crate::clients::graphql::{GraphqlError, GraphqlRequest};
use crate::clients::{build_reqwest_client, HttpClient};
use crate::config::LevelsConfig;
use crate::queries::{Query, PREV_STAT_RANGE_VARIABLE, RANGE_VARIABLE};
use crate::range::RangeOverride;

/// Dispatcher for the Levels GraphQL endpoint.
///
/// Each call resolves the template's range variables at the current time,
/// makes exactly one POST and returns the decoded body unchanged. A body
/// carrying a GraphQL `errors` array is still a success; it is logged at
/// `warn` and returned as-is.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use levels_api::{AccessToken, GraphqlClient, LevelsConfig, Query};
///
/// let client = GraphqlClient::new(&LevelsConfig::default());
/// let token = AccessToken::new("eyJ...")?;
///
/// let body = client.execute(&token, Query::SensorStatus, None).await?;
/// println!("{}", body["data"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// Offset in which default ranges are day-aligned.
    day_offset: FixedOffset,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a dispatcher for the GraphQL endpoint in `config`.
    #[must_use]
    pub fn new(config: &LevelsConfig) -> Self {
        Self::with_client(build_reqwest_client(), config)
    }

    /// Creates a dispatcher that sends through an existing reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &LevelsConfig) -> Self {
        Self {
            http_client: HttpClient::with_client(
                client,
                config.graphql_endpoint().to_string(),
                config,
            ),
            day_offset: config.day_offset(),
        }
    }

    /// Returns the endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.http_client.endpoint()
    }

    /// Builds the request for `query` as if issued at `now`.
    ///
    /// No I/O happens here. The catalog template is left untouched; the
    /// returned request owns a copy of its variables with `range` and
    /// `prevStatRange` resolved where the template declares them.
    #[must_use]
    pub fn prepare_at(
        &self,
        query: Query,
        range_override: Option<RangeOverride>,
        now: DateTime<Utc>,
    ) -> GraphqlRequest {
        let template = query.template();
        let variables = template.variables_at(range_override, now, self.day_offset);
        GraphqlRequest::from_template(template, variables)
    }

    /// Builds the request for `query` at the current time.
    #[must_use]
    pub fn prepare(&self, query: Query, range_override: Option<RangeOverride>) -> GraphqlRequest {
        self.prepare_at(query, range_override, Utc::now())
    }

    /// Executes a catalog query.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the request fails, the status is
    /// not 2xx, or the body is not JSON.
    pub async fn execute(
        &self,
        token: &AccessToken,
        query: Query,
        range_override: Option<RangeOverride>,
    ) -> Result<Value, GraphqlError> {
        let request = self.prepare(query, range_override);

        tracing::debug!(
            query = %query,
            range = ?request.variables.get(RANGE_VARIABLE),
            prev_stat_range = ?request.variables.get(PREV_STAT_RANGE_VARIABLE),
            "Dispatching Levels query"
        );

        self.send(token, &request).await
    }

    /// Sends an arbitrary GraphQL request through the same transport.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the request fails, the status is
    /// not 2xx, or the body is not JSON.
    pub async fn send(
        &self,
        token: &AccessToken,
        request: &GraphqlRequest,
    ) -> Result<Value, GraphqlError> {
        let response = self.http_client.post_json(request, token).await?;

        if let Some(errors) = response.graphql_errors() {
            tracing::warn!(
                operation = request.operation_name.as_deref().unwrap_or("<anonymous>"),
                count = errors.len(),
                request_id = response.request_id().unwrap_or_default(),
                "GraphQL response carries errors"
            );
        }

        Ok(response.body)
    }
}
