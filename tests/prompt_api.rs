// tests/prompt_api.rs


use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use persona_backend::config::Config;
use persona_backend::llm::{ChatClient, OpenAiClient};
use persona_backend::persona::prompt::SYSTEM_PROMPT_PREAMBLE;
use test_helpers::{StubBehavior, StubChatClient, create_test_app_with_chat, send_json};

async fn create_persona(app: &axum::Router, body: serde_json::Value) -> i64 {
    let (status, created) = send_json(app, "POST", "/personas", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_prompt_builds_system_prompt_from_present_fields_only() {
    let chat = StubChatClient::new(StubBehavior::Reply("Not today, thanks."));
    let app = create_test_app_with_chat(chat.clone()).await;
    let id = create_persona(&app, json!({ "name": "Alice", "annual_income": 50000 })).await;

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/personas/{id}/prompt"),
        Some(json!({ "message": "Buy now?" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ai_response": "Not today, thanks." }));

    let calls = chat.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (system_prompt, user_message) = &calls[0];
    assert!(system_prompt.starts_with(SYSTEM_PROMPT_PREAMBLE));
    assert!(system_prompt.ends_with("Name: Alice, Annual Income: 50000.0"));
    assert!(!system_prompt.contains("Location:"));
    assert!(!system_prompt.contains("Extras:"));
    assert_eq!(user_message, "Buy now?");
}

#[tokio::test]
async fn test_prompt_unknown_persona_is_404_without_outbound_call() {
    let chat = StubChatClient::new(StubBehavior::Reply("unreachable"));
    let app = create_test_app_with_chat(chat.clone()).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/personas/999999/prompt",
        Some(json!({ "message": "Buy now?" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(chat.call_count(), 0);
}

#[tokio::test]
async fn test_prompt_requires_message_before_lookup_or_call() {
    let chat = StubChatClient::new(StubBehavior::Reply("unreachable"));
    let app = create_test_app_with_chat(chat.clone()).await;
    let id = create_persona(&app, json!({ "name": "Alice" })).await;

    // Missing key and empty string are both rejected; neither reaches the
    // chat backend. The missing-message case even on a missing persona id
    // answers 400, proving validation precedes the lookup.
    let (status, _) = send_json(&app, "POST", &format!("/personas/{id}/prompt"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/personas/{id}/prompt"),
        Some(json!({ "message": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, "POST", "/personas/999999/prompt", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(chat.call_count(), 0);
}

#[tokio::test]
async fn test_prompt_maps_upstream_timeout_to_502() {
    let chat = StubChatClient::new(StubBehavior::Unavailable);
    let app = create_test_app_with_chat(chat.clone()).await;
    let id = create_persona(&app, json!({ "name": "Alice" })).await;

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/personas/{id}/prompt"),
        Some(json!({ "message": "Buy now?" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], true);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("failed to reach the chat completions API")
    );
}

#[tokio::test]
async fn test_prompt_forwards_upstream_status_and_body() {
    let chat = StubChatClient::new(StubBehavior::Status(429, "rate limited"));
    let app = create_test_app_with_chat(chat.clone()).await;
    let id = create_persona(&app, json!({ "name": "Alice" })).await;

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/personas/{id}/prompt"),
        Some(json!({ "message": "Buy now?" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("429"));
    assert_eq!(body["details"], "rate limited");
}

#[tokio::test]
async fn test_prompt_maps_protocol_error_to_502() {
    let chat = StubChatClient::new(StubBehavior::Protocol);
    let app = create_test_app_with_chat(chat.clone()).await;
    let id = create_persona(&app, json!({ "name": "Alice" })).await;

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/personas/{id}/prompt"),
        Some(json!({ "message": "Buy now?" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("unexpected response")
    );
}

#[tokio::test]
async fn test_prompt_without_credential_is_500_not_a_crash() {
    // Real client, no key: the credential check fires before any network
    // I/O, so the dead base URL is never contacted.
    let config = Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        sqlite_max_connections: 1,
        openai_api_key: None,
        openai_base_url: "http://127.0.0.1:9".into(),
        openai_model: "gpt-5-mini".into(),
        max_completion_tokens: 2000,
        openai_timeout: 30,
    };
    let client: Arc<dyn ChatClient> = Arc::new(OpenAiClient::new(&config).unwrap());
    let app = create_test_app_with_chat(client).await;
    let id = create_persona(&app, json!({ "name": "Alice" })).await;

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/personas/{id}/prompt"),
        Some(json!({ "message": "Buy now?" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "OPENAI_API_KEY is not set");
}
