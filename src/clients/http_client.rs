//! HTTP client for Levels API communication.
//!
//! This module provides the [`HttpClient`] type, which posts JSON to one
//! endpoint with a bearer credential and decodes the JSON reply.

use std::collections::HashMap;

use serde::Serialize;

use crate::auth::AccessToken;
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_response::{request_id, HttpResponse};
use crate::config::LevelsConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for requests to a single Levels endpoint.
///
/// The client handles:
/// - Default headers including User-Agent and JSON content negotiation
/// - The `Authorization: Bearer` header for each request
/// - Decoding of the JSON response body
///
/// Each call is exactly one round trip: there is no retry, caching or rate
/// limiting.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. The underlying connection pool is shared
/// by all requests made through one client, and with any other component
/// handed the same `reqwest::Client` through [`HttpClient::with_client`].
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Absolute URL every request is posted to.
    endpoint: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client posting to `endpoint`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(endpoint: impl Into<String>, config: &LevelsConfig) -> Self {
        Self::with_client(build_reqwest_client(), endpoint, config)
    }

    /// Creates an HTTP client that sends through an existing reqwest client.
    ///
    /// Connections are pooled with every other user of `client`.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        config: &LevelsConfig,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Levels API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            client,
            endpoint: endpoint.into(),
            default_headers,
        }
    }

    /// Returns the endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `body` as JSON with a bearer credential and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The request cannot be sent or the body cannot be read (`Network`)
    /// - The status is not 2xx (`Response`, carrying the raw body)
    /// - A 2xx body is not valid JSON (`Decode`)
    pub async fn post_json<B>(&self, body: &B, token: &AccessToken) -> Result<HttpResponse, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let mut req_builder = self.client.post(&self.endpoint);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        let res = req_builder
            .bearer_auth(token.as_ref())
            .json(body)
            .send()
            .await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        tracing::debug!(endpoint = %self.endpoint, status = code, "Levels API responded");

        if !(200..=299).contains(&code) {
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: body_text,
                error_reference: request_id(&headers).map(String::from),
            }));
        }

        let body = serde_json::from_str(&body_text)
            .map_err(|source| HttpError::Decode { code, source })?;

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Builds the reqwest client used for all Levels traffic.
///
/// # Panics
///
/// Panics if TLS cannot be initialized.
pub(crate) fn build_reqwest_client() -> reqwest::Client {
    reqwest::Client::builder()
        .use_rustls_tls()
        .build()
        .expect("Failed to create HTTP client")
}
