//! # Levels API Rust Client
//!
//! A Rust client for the Levels Health API: sign in with a Levels account
//! and run the predefined GraphQL queries behind the Levels app (glucose
//! history, metabolic fitness, sleep, heart rate, insights and more).
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`LevelsConfig`] and [`LevelsConfigBuilder`]
//! - Validated newtypes for credentials and endpoints
//! - Email/password sign-in against the Levels Cognito user pool via [`auth`],
//!   using the Cognito SRP handshake so the password is never sent
//! - A fixed catalog of queries ([`Query`]) with day-aligned time ranges
//!   ([`range`])
//! - The [`LevelsClient`] facade with one method per query
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use levels_api::LevelsClient;
//!
//! let mut client = LevelsClient::new();
//! client.authenticate("me@example.com", "hunter2").await?;
//!
//! // Yesterday through tomorrow, aligned to the start of each day
//! let glucose = client.glucose_history(None).await?;
//! println!("{}", glucose["data"]);
//! ```
//!
//! ## Time Ranges
//!
//! Queries that take a range accept an optional [`RangeOverride`]. Missing
//! bounds fall back to the default window independently:
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use levels_api::{LevelsClient, Query, RangeOverride};
//!
//! let client = LevelsClient::new();
//! let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
//!
//! let request = client.graphql().prepare_at(
//!     Query::HeartRateMetrics,
//!     Some(RangeOverride::starting_at(1_704_067_200_000)),
//!     now,
//! );
//! assert_eq!(request.variables["range"][0], 1_704_067_200_000_i64);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use chrono::FixedOffset;
//! use levels_api::{EndpointUrl, LevelsConfig};
//!
//! let config = LevelsConfig::builder()
//!     .graphql_endpoint(EndpointUrl::new("https://staging.example.com/api/graphql").unwrap())
//!     .day_offset(FixedOffset::east_opt(10 * 3600).unwrap())
//!     .user_agent_prefix("GlucoseDash/0.3")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. Access
//! tokens and passwords are never logged.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One attempt per call**: No retries, caching or token refresh

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod queries;
pub mod range;

pub use client::LevelsClient;

// Re-export public types at crate root for convenience
pub use auth::{AccessToken, AccessTokenClaims, AuthError, CognitoIdentityProvider, IdentityProvider};
pub use config::{
    AuthFlow, Email, EndpointUrl, LevelsConfig, LevelsConfigBuilder, Password, UserPool,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    GraphqlClient, GraphqlError, GraphqlRequest, HttpClient, HttpError, HttpResponse,
    HttpResponseError,
};

pub use queries::{Query, QueryTemplate, UnknownQueryError};
pub use range::{RangeOverride, TimeRange};
