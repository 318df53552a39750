//! GraphQL dispatch error types for the Levels API client.
//!
//! Only transport-level failures and a missing credential are errors.
//! Application-level failures come back as an `errors` array in a 200
//! response body; that body is returned to the caller unchanged.
//!
//! - [`GraphqlError::Http`]: wraps the underlying [`HttpError`]
//! - [`GraphqlError::NotAuthenticated`]: no access token is held
//!
//! # Example
//!
//! ```rust,ignore
//! use levels_api::GraphqlError;
//!
//! match client.user_data().await {
//!     Ok(body) => {
//!         if let Some(errors) = body.get("errors") {
//!             println!("GraphQL errors: {errors}");
//!         } else {
//!             println!("Data: {}", body["data"]);
//!         }
//!     }
//!     Err(GraphqlError::NotAuthenticated) => println!("sign in first"),
//!     Err(GraphqlError::Http(e)) => println!("HTTP error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL operations.
///
/// ```rust
/// use levels_api::clients::graphql::GraphqlError;
/// use levels_api::clients::{HttpError, HttpResponseError};
///
/// let http_error = HttpError::Response(HttpResponseError {
///     code: 401,
///     message: r#"{"message":"Unauthorized"}"#.to_string(),
///     error_reference: None,
/// });
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("Unauthorized"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred: network failure, non-2xx status or a
    /// body that is not JSON.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A data operation was called before a token was obtained.
    #[error("Not authenticated: call authenticate() or provide an access token first")]
    NotAuthenticated,
}

// Verify GraphqlError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlError>();
};
