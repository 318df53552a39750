//! Email/password sign-in against the Levels Cognito user pool.
//!
//! The Levels service issues access tokens from an AWS Cognito user pool.
//! [`CognitoIdentityProvider`] talks to the Cognito JSON API directly.
//!
//! # Flows
//!
//! By default ([`AuthFlow::UserSrp`]) sign-in is a two-step handshake:
//!
//! 1. `InitiateAuth` with `USER_SRP_AUTH` and the client's SRP public value
//! 2. `RespondToAuthChallenge` answering `PASSWORD_VERIFIER` with a password
//!    proof
//!
//! The password is never sent. [`AuthFlow::UserPassword`] sends it in a
//! single `InitiateAuth` call instead, for app clients that allow it.
//!
//! Any other sign-in mechanism can be plugged into
//! [`LevelsClient`](crate::LevelsClient) by implementing [`IdentityProvider`].
//!
//! # Outcomes
//!
//! - `AuthenticationResult` in the reply: the access token is returned
//! - Any challenge other than `PASSWORD_VERIFIER`: [`AuthError::ChallengeRequired`]
//! - Non-2xx reply: [`AuthError::Rejected`] carrying Cognito's `__type` and
//!   `message`
//!
//! # Example
//!
//! ```rust,ignore
//! use levels_api::auth::{CognitoIdentityProvider, IdentityProvider};
//! use levels_api::{Email, LevelsConfig, Password};
//!
//! let provider = CognitoIdentityProvider::new(&LevelsConfig::default());
//! let token = provider
//!     .authenticate(
//!         &Email::new("me@example.com")?,
//!         &Password::new("hunter2")?,
//!     )
//!     .await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::srp::{PasswordVerifier, SrpHandshake};
use crate::auth::{AccessToken, AuthError};
use crate::clients::build_reqwest_client;
use crate::config::{AuthFlow, Email, LevelsConfig, Password, UserPool};

/// Cognito action that starts sign-in.
const INITIATE_AUTH_TARGET: &str = "AWSCognitoIdentityProviderService.InitiateAuth";

/// Cognito action that answers a sign-in challenge.
const RESPOND_TO_AUTH_CHALLENGE_TARGET: &str =
    "AWSCognitoIdentityProviderService.RespondToAuthChallenge";

/// Content type of the Cognito JSON API.
const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Challenge answered with the SRP password proof.
const PASSWORD_VERIFIER_CHALLENGE: &str = "PASSWORD_VERIFIER";

/// Exchanges account credentials for an access token.
///
/// Implementations must be `Send + Sync` so a [`LevelsClient`](crate::LevelsClient)
/// can be shared across tasks.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs in and returns the issued access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the credentials are refused, the provider
    /// cannot be reached, or its reply cannot be understood.
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AccessToken, AuthError>;
}

/// Identity provider backed by the Cognito JSON API.
#[derive(Debug)]
pub struct CognitoIdentityProvider {
    client: reqwest::Client,
    endpoint: String,
    user_pool: UserPool,
    auth_flow: AuthFlow,
}

// Verify CognitoIdentityProvider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CognitoIdentityProvider>();
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct AuthParameters<'a> {
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    srp_a: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RespondToAuthChallengeRequest<'a> {
    challenge_name: &'a str,
    client_id: &'a str,
    challenge_responses: PasswordVerifierResponses<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct PasswordVerifierResponses<'a> {
    username: &'a str,
    password_claim_secret_block: &'a str,
    password_claim_signature: &'a str,
    timestamp: &'a str,
}

/// Reply of `InitiateAuth` and `RespondToAuthChallenge`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthReply {
    #[serde(default)]
    authentication_result: Option<AuthenticationResult>,
    #[serde(default)]
    challenge_name: Option<String>,
    #[serde(default)]
    challenge_parameters: Option<serde_json::Value>,
    #[serde(default)]
    session: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Error body of the Cognito JSON API.
#[derive(Debug, Default, Deserialize)]
struct CognitoErrorBody {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(default, alias = "Message")]
    message: Option<String>,
}

impl CognitoIdentityProvider {
    /// Creates a provider for the user pool, endpoint and flow in `config`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn new(config: &LevelsConfig) -> Self {
        Self::with_client(build_reqwest_client(), config)
    }

    /// Creates a provider that sends through an existing reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &LevelsConfig) -> Self {
        Self {
            client,
            endpoint: config.resolved_identity_endpoint(),
            user_pool: config.user_pool().clone(),
            auth_flow: config.auth_flow(),
        }
    }

    /// Returns the endpoint sign-in requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the user pool this provider signs in to.
    #[must_use]
    pub const fn user_pool(&self) -> &UserPool {
        &self.user_pool
    }

    /// Returns the sign-in flow.
    #[must_use]
    pub const fn auth_flow(&self) -> AuthFlow {
        self.auth_flow
    }

    async fn call<B>(&self, target: &str, body: &B) -> Result<AuthReply, AuthError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Amz-Target", target)
            .header("Content-Type", AMZ_JSON_CONTENT_TYPE)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..=299).contains(&status) {
            let error = Self::rejection(status, &text);
            tracing::warn!(pool_id = self.user_pool.pool_id(), %error, "Sign-in rejected");
            return Err(error);
        }

        serde_json::from_str(&text).map_err(|e| AuthError::InvalidResponse {
            message: format!("Failed to parse {target} response: {e}"),
        })
    }

    fn rejection(status: u16, body: &str) -> AuthError {
        let parsed: CognitoErrorBody = serde_json::from_str(body).unwrap_or_default();
        // Cognito may qualify the kind, e.g. "com.amazonaws...#NotAuthorizedException".
        let kind = parsed
            .kind
            .as_deref()
            .map(|kind| kind.rsplit('#').next().unwrap_or(kind).to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let message = parsed.message.unwrap_or_else(|| body.to_string());

        AuthError::Rejected {
            status,
            kind,
            message,
        }
    }

    fn finish(&self, reply: AuthReply) -> Result<AccessToken, AuthError> {
        match (reply.authentication_result, reply.challenge_name) {
            (Some(result), _) => {
                tracing::info!(
                    pool_id = self.user_pool.pool_id(),
                    flow = self.auth_flow.as_str(),
                    expires_in = ?result.expires_in,
                    "Signed in to Levels"
                );
                AccessToken::new(result.access_token)
            }
            (None, Some(challenge)) => {
                tracing::warn!(pool_id = self.user_pool.pool_id(), %challenge, "Sign-in needs a challenge");
                Err(AuthError::ChallengeRequired { challenge })
            }
            (None, None) => Err(AuthError::InvalidResponse {
                message: "Reply has neither AuthenticationResult nor ChallengeName".to_string(),
            }),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AccessToken, AuthError> {
        let request = InitiateAuthRequest {
            auth_flow: AuthFlow::UserPassword.as_str(),
            client_id: self.user_pool.client_id(),
            auth_parameters: AuthParameters {
                username: email.as_ref(),
                password: Some(password.as_ref()),
                srp_a: None,
            },
        };

        let reply = self.call(INITIATE_AUTH_TARGET, &request).await?;
        self.finish(reply)
    }

    async fn sign_in_with_srp(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AccessToken, AuthError> {
        let handshake = SrpHandshake::new(self.user_pool.pool_name());
        let request = InitiateAuthRequest {
            auth_flow: AuthFlow::UserSrp.as_str(),
            client_id: self.user_pool.client_id(),
            auth_parameters: AuthParameters {
                username: email.as_ref(),
                password: None,
                srp_a: Some(handshake.public_key()),
            },
        };

        let reply = self.call(INITIATE_AUTH_TARGET, &request).await?;
        if reply.authentication_result.is_some()
            || reply.challenge_name.as_deref() != Some(PASSWORD_VERIFIER_CHALLENGE)
        {
            return self.finish(reply);
        }

        let challenge: PasswordVerifier =
            serde_json::from_value(reply.challenge_parameters.unwrap_or_default()).map_err(
                |e| AuthError::InvalidResponse {
                    message: format!("Malformed PASSWORD_VERIFIER parameters: {e}"),
                },
            )?;
        let claim = handshake.password_claim(&challenge, password.as_ref(), Utc::now())?;

        tracing::debug!(
            pool_id = self.user_pool.pool_id(),
            "Answering PASSWORD_VERIFIER challenge"
        );

        let response = RespondToAuthChallengeRequest {
            challenge_name: PASSWORD_VERIFIER_CHALLENGE,
            client_id: self.user_pool.client_id(),
            challenge_responses: PasswordVerifierResponses {
                username: &challenge.user_id_for_srp,
                password_claim_secret_block: &challenge.secret_block,
                password_claim_signature: &claim.signature,
                timestamp: &claim.timestamp,
            },
            session: reply.session.as_deref(),
        };

        let reply = self
            .call(RESPOND_TO_AUTH_CHALLENGE_TARGET, &response)
            .await?;
        self.finish(reply)
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AccessToken, AuthError> {
        match self.auth_flow {
            AuthFlow::UserSrp => self.sign_in_with_srp(email, password).await,
            AuthFlow::UserPassword => self.sign_in_with_password(email, password).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointUrl;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER_ID: &str = "3f1c-user-id";

    /// Length of a base64-encoded HMAC-SHA256 digest.
    const SIGNATURE_BASE64_LEN: usize = 44;

    fn config_for(server: &MockServer) -> LevelsConfig {
        LevelsConfig::builder()
            .identity_endpoint(EndpointUrl::new(server.uri()).unwrap())
            .build()
            .unwrap()
    }

    fn provider_for(server: &MockServer) -> CognitoIdentityProvider {
        CognitoIdentityProvider::new(&config_for(server))
    }

    fn password_provider_for(server: &MockServer) -> CognitoIdentityProvider {
        let config = LevelsConfig::builder()
            .identity_endpoint(EndpointUrl::new(server.uri()).unwrap())
            .auth_flow(AuthFlow::UserPassword)
            .build()
            .unwrap();
        CognitoIdentityProvider::new(&config)
    }

    fn credentials() -> (Email, Password) {
        (
            Email::new("me@example.com").unwrap(),
            Password::new("correct horse").unwrap(),
        )
    }

    fn signed_in(token: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "AuthenticationResult": {
                "AccessToken": token,
                "ExpiresIn": 3600,
                "IdToken": "id-token",
                "RefreshToken": "refresh-token",
                "TokenType": "Bearer"
            },
            "ChallengeParameters": {}
        }))
    }

    fn password_verifier(session: Option<&str>) -> ResponseTemplate {
        let mut body = json!({
            "ChallengeName": "PASSWORD_VERIFIER",
            "ChallengeParameters": {
                "SALT": "9f3c27d1",
                "SRP_B": "b2".repeat(48),
                "SECRET_BLOCK": "c2VjcmV0LWJsb2Nr",
                "USER_ID_FOR_SRP": USER_ID,
                "USERNAME": USER_ID
            }
        });
        if let Some(session) = session {
            body["Session"] = json!(session);
        }
        ResponseTemplate::new(200).set_body_json(body)
    }

    async fn mount_initiate_auth(server: &MockServer, reply: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(header("x-amz-target", INITIATE_AUTH_TARGET))
            .respond_with(reply)
            .mount(server)
            .await;
    }

    async fn mount_respond_to_challenge(server: &MockServer, reply: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(header("x-amz-target", RESPOND_TO_AUTH_CHALLENGE_TARGET))
            .respond_with(reply)
            .mount(server)
            .await;
    }

    async fn request_bodies(server: &MockServer) -> Vec<Value> {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }

    #[test]
    fn test_default_endpoint_is_regional_cognito() {
        let provider = CognitoIdentityProvider::new(&LevelsConfig::default());
        assert_eq!(
            provider.endpoint(),
            "https://cognito-idp.us-east-2.amazonaws.com/"
        );
        assert_eq!(provider.user_pool().pool_id(), UserPool::LEVELS_POOL_ID);
        assert_eq!(provider.auth_flow(), AuthFlow::UserSrp);
    }

    #[test]
    fn test_srp_initiate_auth_body_omits_password() {
        let request = InitiateAuthRequest {
            auth_flow: AuthFlow::UserSrp.as_str(),
            client_id: "client",
            auth_parameters: AuthParameters {
                username: "me@example.com",
                password: None,
                srp_a: Some("abc123".to_string()),
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "AuthFlow": "USER_SRP_AUTH",
                "ClientId": "client",
                "AuthParameters": { "USERNAME": "me@example.com", "SRP_A": "abc123" }
            })
        );
    }

    #[test]
    fn test_challenge_response_body_shape() {
        let request = RespondToAuthChallengeRequest {
            challenge_name: PASSWORD_VERIFIER_CHALLENGE,
            client_id: "client",
            challenge_responses: PasswordVerifierResponses {
                username: USER_ID,
                password_claim_secret_block: "c2VjcmV0",
                password_claim_signature: "c2ln",
                timestamp: "Tue Jan 9 12:00:00 UTC 2024",
            },
            session: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "ChallengeName": "PASSWORD_VERIFIER",
                "ClientId": "client",
                "ChallengeResponses": {
                    "USERNAME": USER_ID,
                    "PASSWORD_CLAIM_SECRET_BLOCK": "c2VjcmV0",
                    "PASSWORD_CLAIM_SIGNATURE": "c2ln",
                    "TIMESTAMP": "Tue Jan 9 12:00:00 UTC 2024"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_srp_sign_in_answers_password_verifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", INITIATE_AUTH_TARGET))
            .and(header("content-type", AMZ_JSON_CONTENT_TYPE))
            .and(body_partial_json(json!({
                "AuthFlow": "USER_SRP_AUTH",
                "ClientId": UserPool::LEVELS_CLIENT_ID,
                "AuthParameters": { "USERNAME": "me@example.com" }
            })))
            .respond_with(password_verifier(Some("srp-session")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", RESPOND_TO_AUTH_CHALLENGE_TARGET))
            .and(header("content-type", AMZ_JSON_CONTENT_TYPE))
            .and(body_partial_json(json!({
                "ChallengeName": "PASSWORD_VERIFIER",
                "ClientId": UserPool::LEVELS_CLIENT_ID,
                "Session": "srp-session",
                "ChallengeResponses": {
                    "USERNAME": USER_ID,
                    "PASSWORD_CLAIM_SECRET_BLOCK": "c2VjcmV0LWJsb2Nr"
                }
            })))
            .respond_with(signed_in("issued-access-token"))
            .expect(1)
            .mount(&server)
            .await;

        let (email, password) = credentials();
        let token = provider_for(&server)
            .authenticate(&email, &password)
            .await
            .unwrap();

        assert_eq!(token.as_ref(), "issued-access-token");

        let bodies = request_bodies(&server).await;
        assert_eq!(bodies.len(), 2);

        let srp_a = bodies[0]["AuthParameters"]["SRP_A"].as_str().unwrap();
        assert!(!srp_a.is_empty());
        assert!(srp_a.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(bodies[0]["AuthParameters"].get("PASSWORD").is_none());

        let responses = &bodies[1]["ChallengeResponses"];
        let signature = responses["PASSWORD_CLAIM_SIGNATURE"].as_str().unwrap();
        assert_eq!(signature.len(), SIGNATURE_BASE64_LEN);
        assert!(responses["TIMESTAMP"].as_str().unwrap().contains(" UTC "));

        for body in &bodies {
            assert!(!body.to_string().contains("correct horse"));
        }
    }

    #[tokio::test]
    async fn test_srp_sign_in_without_session_omits_it() {
        let server = MockServer::start().await;
        mount_initiate_auth(&server, password_verifier(None)).await;
        mount_respond_to_challenge(&server, signed_in("token")).await;

        let (email, password) = credentials();
        provider_for(&server)
            .authenticate(&email, &password)
            .await
            .unwrap();

        let bodies = request_bodies(&server).await;
        assert!(bodies[1].get("Session").is_none());
    }

    #[tokio::test]
    async fn test_challenge_after_password_verifier_is_reported() {
        let server = MockServer::start().await;
        mount_initiate_auth(&server, password_verifier(Some("s1"))).await;
        mount_respond_to_challenge(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "ChallengeName": "SOFTWARE_TOKEN_MFA",
                "Session": "s2",
                "ChallengeParameters": {}
            })),
        )
        .await;

        let (email, password) = credentials();
        let result = provider_for(&server).authenticate(&email, &password).await;

        assert!(matches!(
            result,
            Err(AuthError::ChallengeRequired { ref challenge }) if challenge == "SOFTWARE_TOKEN_MFA"
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected_at_verifier_step() {
        let server = MockServer::start().await;
        mount_initiate_auth(&server, password_verifier(None)).await;
        mount_respond_to_challenge(
            &server,
            ResponseTemplate::new(400).set_body_json(json!({
                "__type": "NotAuthorizedException",
                "message": "Incorrect username or password."
            })),
        )
        .await;

        let (email, password) = credentials();
        let result = provider_for(&server).authenticate(&email, &password).await;

        assert!(matches!(
            result,
            Err(AuthError::Rejected { status: 400, ref kind, .. }) if kind == "NotAuthorizedException"
        ));
    }

    #[tokio::test]
    async fn test_missing_verifier_parameters_are_invalid_response() {
        let server = MockServer::start().await;
        mount_initiate_auth(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "ChallengeName": "PASSWORD_VERIFIER",
                "ChallengeParameters": { "SALT": "9f3c27d1" }
            })),
        )
        .await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", RESPOND_TO_AUTH_CHALLENGE_TARGET))
            .respond_with(signed_in("never"))
            .expect(0)
            .mount(&server)
            .await;

        let (email, password) = credentials();
        let result = provider_for(&server).authenticate(&email, &password).await;

        assert!(matches!(result, Err(AuthError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_password_flow_is_single_initiate_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", INITIATE_AUTH_TARGET))
            .and(header("content-type", AMZ_JSON_CONTENT_TYPE))
            .and(body_json(json!({
                "AuthFlow": "USER_PASSWORD_AUTH",
                "ClientId": UserPool::LEVELS_CLIENT_ID,
                "AuthParameters": { "USERNAME": "me@example.com", "PASSWORD": "correct horse" }
            })))
            .respond_with(signed_in("issued-access-token"))
            .expect(1)
            .mount(&server)
            .await;

        let (email, password) = credentials();
        let token = password_provider_for(&server)
            .authenticate(&email, &password)
            .await
            .unwrap();

        assert_eq!(token.as_ref(), "issued-access-token");
    }

    #[tokio::test]
    async fn test_rejected_credentials_map_to_rejected_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "NotAuthorizedException",
                "message": "Incorrect username or password."
            })))
            .mount(&server)
            .await;

        let (email, password) = credentials();
        let result = password_provider_for(&server)
            .authenticate(&email, &password)
            .await;

        match result {
            Err(AuthError::Rejected {
                status,
                kind,
                message,
            }) => {
                assert_eq!(status, 400);
                assert_eq!(kind, "NotAuthorizedException");
                assert_eq!(message, "Incorrect username or password.");
            }
            other => panic!("Expected Rejected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_qualified_error_kind_is_shortened() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "com.amazonaws.cognito#UserNotFoundException",
                "Message": "User does not exist."
            })))
            .mount(&server)
            .await;

        let (email, password) = credentials();
        let result = provider_for(&server).authenticate(&email, &password).await;

        assert!(matches!(
            result,
            Err(AuthError::Rejected { ref kind, ref message, .. })
                if kind == "UserNotFoundException" && message == "User does not exist."
        ));
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        let (email, password) = credentials();
        let result = provider_for(&server).authenticate(&email, &password).await;

        assert!(matches!(
            result,
            Err(AuthError::Rejected { status: 503, ref kind, ref message })
                if kind == "Unknown" && message == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn test_challenge_maps_to_challenge_required() {
        let server = MockServer::start().await;
        mount_initiate_auth(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "ChallengeName": "NEW_PASSWORD_REQUIRED",
                "Session": "opaque-session",
                "ChallengeParameters": {}
            })),
        )
        .await;

        let (email, password) = credentials();
        let result = provider_for(&server).authenticate(&email, &password).await;

        assert!(matches!(
            result,
            Err(AuthError::ChallengeRequired { ref challenge }) if challenge == "NEW_PASSWORD_REQUIRED"
        ));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        mount_initiate_auth(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

        let (email, password) = credentials();
        let result = provider_for(&server).authenticate(&email, &password).await;

        assert!(matches!(result, Err(AuthError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_with_client_sends_through_given_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-shared-pool", "yes"))
            .respond_with(signed_in("token"))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-shared-pool", reqwest::header::HeaderValue::from_static("yes"));
        let shared = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap();

        let (email, password) = credentials();
        CognitoIdentityProvider::with_client(shared, &config_for(&server))
            .authenticate(&email, &password)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_maps_to_network_error() {
        let config = LevelsConfig::builder()
            .identity_endpoint(EndpointUrl::new("http://127.0.0.1:9/").unwrap())
            .build()
            .unwrap();
        let (email, password) = credentials();
        let result = CognitoIdentityProvider::new(&config)
            .authenticate(&email, &password)
            .await;

        assert!(matches!(result, Err(AuthError::Network(_))));
    }
}
