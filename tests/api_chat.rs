//! Chat API integration tests
//!
//! Drives the send/history/clear endpoints through the real router, with
//! wiremock standing in for the external generation service.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    registered_user_token, spawn_app, spawn_bare_app, unconfigured_identity,
};
use resrv::chat::generation::GenerationClient;

/// Mock generation server that always replies with `reply`
async fn generation_mock(reply: &str) -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": reply}]}}
            ]
        })))
        .mount(&mock)
        .await;
    mock
}

fn generation_client(mock: &MockServer) -> GenerationClient {
    GenerationClient::new(Some("test-key".to_string()), mock.uri(), "test-model")
}

#[tokio::test]
async fn test_send_requires_authentication() {
    let app = spawn_bare_app().await;

    let response = app
        .server
        .post("/chat/send")
        .json(&serde_json::json!({"message": "hello"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_message_rejected_before_any_external_call() {
    // Generation is unconfigured: reaching it would produce a 500, so the
    // 400 proves validation runs first
    let app = spawn_bare_app().await;
    let (_, token) = registered_user_token(&app, "alice@example.com").await;

    for message in ["", "   ", "\n\t"] {
        let response = app
            .server
            .post("/chat/send")
            .add_header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({"message": message}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_send_without_generation_key_is_server_error() {
    let app = spawn_bare_app().await;
    let (_, token) = registered_user_token(&app, "alice@example.com").await;

    let response = app
        .server
        .post("/chat/send")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"message": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("not configured"));
}

#[tokio::test]
async fn test_send_success_persists_exchange() {
    let mock = generation_mock("Hi Alice!").await;
    let app = spawn_app(unconfigured_identity(), generation_client(&mock)).await;
    let (user_id, token) = registered_user_token(&app, "alice@example.com").await;

    let response = app
        .server
        .post("/chat/send")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"message": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_message"], "hello");
    assert_eq!(body["ai_response"], "Hi Alice!");
    assert!(body["timestamp"].as_str().is_some());

    // Exchange is persisted and buffered
    let rows = resrv::chat::db::recent_messages(&app.pool, user_id, 50)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ai_response, "Hi Alice!");
    assert_eq!(app.conversations.history(user_id).len(), 2);
}

#[tokio::test]
async fn test_send_forwards_prior_turns() {
    let mock = generation_mock("reply").await;
    let app = spawn_app(unconfigured_identity(), generation_client(&mock)).await;
    let (user_id, token) = registered_user_token(&app, "alice@example.com").await;

    for message in ["first", "second"] {
        let response = app
            .server
            .post("/chat/send")
            .add_header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({"message": message}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    // The second request carried the first exchange as context
    let requests = mock.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let second: serde_json::Value = requests[1].body_json().unwrap();
    let contents = second["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[0]["parts"][0]["text"], "first");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["parts"][0]["text"], "second");

    assert_eq!(app.conversations.history(user_id).len(), 4);
}

#[tokio::test]
async fn test_provider_failure_surfaces_reason() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&mock)
        .await;

    let app = spawn_app(unconfigured_identity(), generation_client(&mock)).await;
    let (user_id, token) = registered_user_token(&app, "alice@example.com").await;

    let response = app
        .server
        .post("/chat/send")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"message": "hello"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("503"));
    assert!(error.contains("upstream overloaded"));

    // Nothing was persisted or buffered for the failed exchange
    assert!(resrv::chat::db::recent_messages(&app.pool, user_id, 50)
        .await
        .unwrap()
        .is_empty());
    assert!(app.conversations.history(user_id).is_empty());
}

#[tokio::test]
async fn test_history_round_trip_is_chronological() {
    let mock = generation_mock("reply").await;
    let app = spawn_app(unconfigured_identity(), generation_client(&mock)).await;
    let (_, token) = registered_user_token(&app, "alice@example.com").await;

    for message in ["A", "B", "C"] {
        app.server
            .post("/chat/send")
            .add_header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({"message": message}))
            .await;
    }

    let response = app
        .server
        .get("/chat/history")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let items: Vec<serde_json::Value> = response.json();
    let order: Vec<&str> = items
        .iter()
        .map(|i| i["user_message"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    assert!(items[0]["id"].as_i64().is_some());
    assert!(items[0]["created_at"].as_str().is_some());
}

#[tokio::test]
async fn test_history_limit_keeps_latest() {
    let mock = generation_mock("reply").await;
    let app = spawn_app(unconfigured_identity(), generation_client(&mock)).await;
    let (_, token) = registered_user_token(&app, "alice@example.com").await;

    for message in ["A", "B", "C"] {
        app.server
            .post("/chat/send")
            .add_header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({"message": message}))
            .await;
    }

    let response = app
        .server
        .get("/chat/history?limit=2")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let items: Vec<serde_json::Value> = response.json();
    let order: Vec<&str> = items
        .iter()
        .map(|i| i["user_message"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["B", "C"]);
}

#[tokio::test]
async fn test_history_requires_authentication() {
    let app = spawn_bare_app().await;

    let response = app.server.get("/chat/history").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_clear_history_scoped_to_user() {
    let mock = generation_mock("reply").await;
    let app = spawn_app(unconfigured_identity(), generation_client(&mock)).await;
    let (alice_id, alice_token) = registered_user_token(&app, "alice@example.com").await;
    let (bob_id, bob_token) = registered_user_token(&app, "bob@example.com").await;

    for token in [&alice_token, &bob_token] {
        app.server
            .post("/chat/send")
            .add_header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({"message": "hello"}))
            .await;
    }

    let response = app
        .server
        .delete("/chat/history")
        .add_header("Authorization", format!("Bearer {}", alice_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["message"].as_str().is_some());

    // Alice is cleared (rows and buffer), Bob is untouched
    assert!(resrv::chat::db::recent_messages(&app.pool, alice_id, 50)
        .await
        .unwrap()
        .is_empty());
    assert!(app.conversations.history(alice_id).is_empty());
    assert_eq!(
        resrv::chat::db::recent_messages(&app.pool, bob_id, 50)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(app.conversations.history(bob_id).len(), 2);

    let response = app
        .server
        .get("/chat/history")
        .add_header("Authorization", format!("Bearer {}", alice_token))
        .await;
    let items: Vec<serde_json::Value> = response.json();
    assert!(items.is_empty());
}
