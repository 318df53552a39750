//! HTTP client types for Levels API communication.
//!
//! This module provides the transport layer for authenticated requests to
//! the Levels GraphQL endpoint.
//!
//! # Overview
//!
//! - [`HttpClient`]: posts JSON with a bearer credential
//! - [`HttpResponse`]: a decoded response
//! - [`HttpError`] and [`HttpResponseError`]: transport and status failures
//! - [`graphql::GraphqlClient`]: the query dispatcher built on top
//!
//! # Example
//!
//! ```rust,ignore
//! use levels_api::clients::HttpClient;
//! use levels_api::{AccessToken, LevelsConfig};
//! use serde_json::json;
//!
//! let config = LevelsConfig::default();
//! let client = HttpClient::new(config.graphql_endpoint().to_string(), &config);
//! let token = AccessToken::new("eyJ...")?;
//!
//! let response = client.post_json(&json!({ "query": "{ __typename }" }), &token).await?;
//! println!("{}", response.body);
//! ```

mod errors;
pub mod graphql;
mod http_client;
mod http_response;

pub use errors::{HttpError, HttpResponseError};
pub(crate) use http_client::build_reqwest_client;
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_response::HttpResponse;

pub use graphql::{GraphqlClient, GraphqlError, GraphqlRequest};
