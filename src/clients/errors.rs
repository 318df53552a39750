//! HTTP-level error types for the Levels API client.
//!
//! - [`HttpResponseError`]: a non-2xx response from the API
//! - [`HttpError`]: every way a single round trip can fail
//!
//! The client never retries, so each error describes exactly one attempt.
//!
//! # Example
//!
//! ```rust,ignore
//! use levels_api::clients::HttpError;
//!
//! match http_client.post_json(&body, &token).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Decode { code, source }) => println!("bad JSON ({code}): {source}"),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the API answers with a non-successful status.
///
/// `message` holds the raw response body so application-level details
/// (for example a GraphQL `errors` array) are not lost.
///
/// ```rust
/// use levels_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: r#"{"message":"Unauthorized"}"#.to_string(),
///     error_reference: None,
/// };
/// assert!(error.to_string().contains("401"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request failed with status {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub message: String,
    /// Request id reported by the server, if any.
    pub error_reference: Option<String>,
}

/// Unified error type for a single HTTP round trip.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// A 2xx response whose body is not valid JSON.
    #[error("Response with status {code} is not valid JSON: {source}")]
    Decode {
        /// The HTTP status code of the response.
        code: u16,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
