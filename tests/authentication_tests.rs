//! Integration tests for sign-in and the session credential.
//!
//! A mock Cognito endpoint and a mock GraphQL endpoint run side by side so
//! the whole flow from `authenticate` to a data call is exercised.

use levels_api::{
    AuthError, AuthFlow, ConfigError, EndpointUrl, GraphqlError, LevelsClient, LevelsConfig,
    UserPool,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INITIATE_AUTH: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
const RESPOND_TO_AUTH_CHALLENGE: &str = "AWSCognitoIdentityProviderService.RespondToAuthChallenge";

struct Servers {
    identity: MockServer,
    graphql: MockServer,
}

impl Servers {
    async fn start() -> Self {
        Self {
            identity: MockServer::start().await,
            graphql: MockServer::start().await,
        }
    }

    fn config(&self) -> LevelsConfig {
        LevelsConfig::builder()
            .identity_endpoint(EndpointUrl::new(self.identity.uri()).unwrap())
            .graphql_endpoint(EndpointUrl::new(self.graphql.uri()).unwrap())
            .build()
            .unwrap()
    }

    fn client(&self) -> LevelsClient {
        LevelsClient::with_config(self.config())
    }
}

fn password_verifier_reply() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ChallengeName": "PASSWORD_VERIFIER",
        "ChallengeParameters": {
            "SALT": "5a17",
            "SRP_B": "c4".repeat(64),
            "SECRET_BLOCK": "c2VjcmV0LWJsb2Nr",
            "USER_ID_FOR_SRP": "0b9e-user",
            "USERNAME": "0b9e-user"
        },
        "Session": "srp-session"
    }))
}

fn signed_in_reply(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "AuthenticationResult": {
            "AccessToken": token,
            "ExpiresIn": 3600,
            "TokenType": "Bearer"
        },
        "ChallengeParameters": {}
    }))
}

// ============================================================================
// Successful Sign-in
// ============================================================================

#[tokio::test]
async fn test_authenticate_then_query_uses_issued_token() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", INITIATE_AUTH))
        .and(body_partial_json(json!({
            "AuthFlow": "USER_SRP_AUTH",
            "ClientId": UserPool::LEVELS_CLIENT_ID,
            "AuthParameters": { "USERNAME": "me@example.com" }
        })))
        .respond_with(password_verifier_reply())
        .expect(1)
        .mount(&servers.identity)
        .await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", RESPOND_TO_AUTH_CHALLENGE))
        .and(body_partial_json(json!({
            "ChallengeName": "PASSWORD_VERIFIER",
            "Session": "srp-session",
            "ChallengeResponses": {
                "USERNAME": "0b9e-user",
                "PASSWORD_CLAIM_SECRET_BLOCK": "c2VjcmV0LWJsb2Nr"
            }
        })))
        .respond_with(signed_in_reply("issued-token"))
        .expect(1)
        .mount(&servers.identity)
        .await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer issued-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "getUserData": { "id": "u1" } } })),
        )
        .expect(1)
        .mount(&servers.graphql)
        .await;

    let mut client = servers.client();
    let token = client
        .authenticate("me@example.com", "correct horse")
        .await
        .unwrap();

    assert_eq!(token.as_ref(), "issued-token");
    assert!(client.is_authenticated());

    let body = client.user_data().await.unwrap();
    assert_eq!(body["data"]["getUserData"]["id"], "u1");

    let requests = servers.identity.received_requests().await.unwrap();
    for request in &requests {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert!(!body.to_string().contains("correct horse"));
    }
    let answer: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert!(answer["ChallengeResponses"]["PASSWORD_CLAIM_SIGNATURE"].is_string());
    assert!(answer["ChallengeResponses"]["TIMESTAMP"].is_string());
}

#[tokio::test]
async fn test_password_flow_is_opt_in() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", INITIATE_AUTH))
        .and(body_partial_json(json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "AuthParameters": { "USERNAME": "me@example.com", "PASSWORD": "pw" }
        })))
        .respond_with(signed_in_reply("password-token"))
        .expect(1)
        .mount(&servers.identity)
        .await;

    let config = LevelsConfig::builder()
        .identity_endpoint(EndpointUrl::new(servers.identity.uri()).unwrap())
        .auth_flow(AuthFlow::UserPassword)
        .build()
        .unwrap();
    let mut client = LevelsClient::with_config(config);
    client.authenticate("me@example.com", "pw").await.unwrap();

    assert_eq!(client.access_token().unwrap().as_ref(), "password-token");
}

#[tokio::test]
async fn test_sign_in_and_queries_share_one_http_client() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .and(header("x-app-instance", "dash-7"))
        .respond_with(signed_in_reply("shared-token"))
        .expect(1)
        .mount(&servers.identity)
        .await;
    Mock::given(method("POST"))
        .and(header("x-app-instance", "dash-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&servers.graphql)
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        "x-app-instance",
        reqwest::header::HeaderValue::from_static("dash-7"),
    );
    let http_client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap();

    let mut client = LevelsClient::with_http_client(servers.config(), http_client);
    client.authenticate("me@example.com", "pw").await.unwrap();
    client.sensor_status().await.unwrap();
}

#[tokio::test]
async fn test_second_sign_in_replaces_token() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .respond_with(signed_in_reply("first-token"))
        .up_to_n_times(1)
        .mount(&servers.identity)
        .await;
    Mock::given(method("POST"))
        .respond_with(signed_in_reply("second-token"))
        .mount(&servers.identity)
        .await;

    let mut client = servers.client();
    client.authenticate("me@example.com", "pw").await.unwrap();
    client.authenticate("me@example.com", "pw").await.unwrap();

    assert_eq!(client.access_token().unwrap().as_ref(), "second-token");
}

// ============================================================================
// Failed Sign-in
// ============================================================================

#[tokio::test]
async fn test_rejected_sign_in_stores_no_token() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "NotAuthorizedException",
            "message": "Incorrect username or password."
        })))
        .expect(1)
        .mount(&servers.identity)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(0)
        .mount(&servers.graphql)
        .await;

    let mut client = servers.client();
    let result = client.authenticate("me@example.com", "wrong").await;

    assert!(matches!(
        result,
        Err(AuthError::Rejected { status: 400, ref kind, .. }) if kind == "NotAuthorizedException"
    ));
    assert!(!client.is_authenticated());
    assert!(matches!(
        client.glucose_history(None).await,
        Err(GraphqlError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_challenge_is_reported() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ChallengeName": "NEW_PASSWORD_REQUIRED",
            "Session": "opaque"
        })))
        .mount(&servers.identity)
        .await;

    let mut client = servers.client();
    let result = client.authenticate("me@example.com", "temporary").await;

    assert!(matches!(
        result,
        Err(AuthError::ChallengeRequired { ref challenge }) if challenge == "NEW_PASSWORD_REQUIRED"
    ));
    assert!(client.access_token().is_none());
}

#[tokio::test]
async fn test_blank_credentials_are_rejected_locally() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .respond_with(signed_in_reply("never"))
        .expect(0)
        .mount(&servers.identity)
        .await;

    let mut client = servers.client();

    assert!(matches!(
        client.authenticate("", "pw").await,
        Err(AuthError::Config(ConfigError::EmptyEmail))
    ));
    assert!(matches!(
        client.authenticate("me@example.com", "").await,
        Err(AuthError::Config(ConfigError::EmptyPassword))
    ));
}

#[tokio::test]
async fn test_expired_token_is_not_refreshed() {
    let servers = Servers::start().await;
    Mock::given(method("POST"))
        .respond_with(signed_in_reply("short-lived"))
        .expect(1)
        .mount(&servers.identity)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })),
        )
        .expect(1)
        .mount(&servers.graphql)
        .await;

    let mut client = servers.client();
    client.authenticate("me@example.com", "pw").await.unwrap();

    let result = client.sensor_status().await;
    assert!(matches!(result, Err(GraphqlError::Http(_))));
    assert_eq!(client.access_token().unwrap().as_ref(), "short-lived");
}
