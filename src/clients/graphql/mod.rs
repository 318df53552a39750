//! Query dispatch against the Levels GraphQL endpoint.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: resolves catalog queries and sends them
//! - [`GraphqlRequest`]: the JSON body of one request
//! - [`GraphqlError`]: error type for dispatch
//!
//! # Response Structure
//!
//! Bodies are returned as decoded JSON, unchanged:
//!
//! - `data`: the query result
//! - `errors`: GraphQL errors, still delivered with HTTP 200
//!
//! # Retry Behavior
//!
//! None. Each call is attempted exactly once and every failure is returned
//! to the caller.

mod client;
mod errors;
mod request;

pub use client::GraphqlClient;
pub use errors::GraphqlError;
pub use request::GraphqlRequest;
