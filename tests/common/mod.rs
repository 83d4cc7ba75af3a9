//! Common test utilities and helpers
//!
//! Shared fixtures for the integration suites: an in-memory database, a
//! `TestApp` wrapping the real router in an axum-test server, and helpers
//! for registering users and obtaining tokens.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use jsonwebtoken::Algorithm;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use resrv::auth::identity::IdentityProvider;
use resrv::chat::generation::GenerationClient;
use resrv::chat::memory::ConversationBuffer;
use resrv::routes::create_router;
use resrv::server::config::TokenConfig;
use resrv::server::state::AppState;

/// Full application over an in-memory database
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub tokens: TokenConfig,
    pub conversations: ConversationBuffer,
}

/// In-memory database with migrations applied
///
/// Capped to one connection: each in-memory SQLite connection is its own
/// database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        secret: "integration-test-secret".to_string(),
        algorithm: Algorithm::HS256,
        expire_minutes: 60,
    }
}

/// Identity provider with no credentials (local path only)
pub fn unconfigured_identity() -> IdentityProvider {
    IdentityProvider::new(None, "http://127.0.0.1:1")
}

/// Generation client with no API key
pub fn unconfigured_generation() -> GenerationClient {
    GenerationClient::new(None, "http://127.0.0.1:1", "test-model")
}

/// Build the real router around the given external-service clients
pub async fn spawn_app(identity: IdentityProvider, generation: GenerationClient) -> TestApp {
    let pool = memory_pool().await;
    let tokens = test_token_config();
    let conversations = ConversationBuffer::new();

    let state = AppState {
        pool: pool.clone(),
        tokens: tokens.clone(),
        identity,
        generation,
        conversations: conversations.clone(),
    };

    let server = TestServer::new(create_router(state)).expect("failed to start test server");

    TestApp {
        server,
        pool,
        tokens,
        conversations,
    }
}

/// App with both external services unconfigured
pub async fn spawn_bare_app() -> TestApp {
    spawn_app(unconfigured_identity(), unconfigured_generation()).await
}

/// Register a local (password) user and return the response body
pub async fn register_local_user(
    app: &TestApp,
    name: &str,
    email: &str,
    password: &str,
) -> serde_json::Value {
    let response = app
        .server
        .post("/auth/register")
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

/// Log a registered user in and return the bearer token
pub async fn login_token(app: &TestApp, email: &str, password: &str) -> String {
    let response = app
        .server
        .post("/auth/login")
        .json(&serde_json::json!({
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    body["access_token"]
        .as_str()
        .expect("login response carried no access_token")
        .to_string()
}

/// Register and log in, returning (user id, bearer token)
pub async fn registered_user_token(app: &TestApp, email: &str) -> (i64, String) {
    let user = register_local_user(app, "Test", email, "password123").await;
    let token = login_token(app, email, "password123").await;
    (user["id"].as_i64().unwrap(), token)
}
