//! API integration tests.
//!
//! Each test builds the full router over a fresh SQLite database in a temp
//! directory and a deterministic model provider, then drives it with
//! `tower::ServiceExt::oneshot`.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use chatbot_api::http::router::build_router;
use chatbot_api::state::AppState;
use chatbot_core::llm::box_provider::BoxLlmProvider;
use chatbot_core::llm::client::{ModelClient, ModelSettings};
use chatbot_core::llm::provider::{EventStream, LlmProvider};
use chatbot_infra::sqlite::pool::{DatabasePool, database_url_in};
use chatbot_types::config::ChatbotConfig;
use chatbot_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent, Usage};

const REPLY: &str = "Ownership means each value has exactly one owner.";

/// Replies with a fixed text, streamed two characters at a time.
struct FakeProvider;

impl LlmProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            id: "cmpl-test".to_string(),
            content: REPLY.to_string(),
            model: request.model.clone(),
            usage: Usage::default(),
        })
    }

    fn stream(&self, _request: CompletionRequest) -> EventStream {
        let chunks: Vec<String> = REPLY
            .chars()
            .collect::<Vec<_>>()
            .chunks(2)
            .map(|c| c.iter().collect())
            .collect();

        Box::pin(async_stream::stream! {
            yield Ok::<_, LlmError>(StreamEvent::Connected);
            for chunk in chunks {
                yield Ok(StreamEvent::TextDelta { text: chunk });
            }
            yield Ok(StreamEvent::Done);
        })
    }

    fn check_credentials(&self) -> Result<(), LlmError> {
        Ok(())
    }
}

struct TestApp {
    router: Router,
    _dir: TempDir,
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let pool = DatabasePool::new(&database_url_in(dir.path())).await.unwrap();

    let config = ChatbotConfig::default();
    let model = ModelClient::new(
        BoxLlmProvider::new(FakeProvider),
        ModelSettings::from(&config.model),
    );
    let state = AppState::from_parts(pool, model, config, dir.path().to_path_buf());

    TestApp {
        router: build_router(state),
        _dir: dir,
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &TestApp, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_conversation(app: &TestApp, body: Option<&str>) -> Value {
    let (status, json) = send_json(app, Method::POST, "/api/v1/conversations", body).await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"].clone()
}

/// Let detached renames and touches land.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// Payloads of every `data:` line in an SSE body.
fn sse_payloads(body: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(body)
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.trim_start().to_string())
        .collect()
}

// --- Health and routing ---

#[tokio::test]
async fn test_health_on_both_paths() {
    let app = test_app().await;

    for uri in ["/health", "/api/v1/health"] {
        let (status, json) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["status"], "ok");
    }
}

#[tokio::test]
async fn test_unknown_route_is_enveloped_404() {
    let app = test_app().await;

    for uri in ["/api/v1/nope", "/definitely/not/here"] {
        let (status, json) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], 1002);
        assert!(json["data"].is_null());
    }
}

// --- Conversations ---

#[tokio::test]
async fn test_create_without_body_uses_placeholder() {
    let app = test_app().await;

    let created = create_conversation(&app, None).await;
    assert_eq!(created["title"], "新对话");
    assert!(created["id"].as_i64().unwrap() > 0);

    let named = create_conversation(&app, Some(r#"{"title":"Trip plan"}"#)).await;
    assert_eq!(named["title"], "Trip plan");
}

#[tokio::test]
async fn test_create_with_malformed_json_is_400() {
    let app = test_app().await;

    let (status, json) =
        send_json(&app, Method::POST, "/api/v1/conversations", Some("{\"title\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 1001);
}

#[tokio::test]
async fn test_delete_unknown_ids_are_404() {
    let app = test_app().await;
    create_conversation(&app, None).await;

    for id in ["999999", "-1", "0", "abc"] {
        let uri = format!("/api/v1/conversations/{id}");
        let (status, json) = send_json(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(json["code"], 1002, "id {id}");
    }
}

#[tokio::test]
async fn test_delete_removes_conversation_and_messages() {
    let app = test_app().await;
    let id = create_conversation(&app, None).await["id"].as_i64().unwrap();

    let uri = format!("/api/v1/conversations/{id}/messages");
    let (status, _) = send_json(&app, Method::POST, &uri, Some(r#"{"content":"hi"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) =
        send_json(&app, Method::DELETE, &format!("/api/v1/conversations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], 0);
    assert!(json["data"].is_null());

    let (status, json) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 1002);

    let (_, json) = send_json(&app, Method::GET, "/api/v1/conversations", None).await;
    assert_eq!(json["data"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_pagination_defaults_and_clamping() {
    let app = test_app().await;
    for _ in 0..3 {
        create_conversation(&app, None).await;
    }

    let (status, json) = send_json(&app, Method::GET, "/api/v1/conversations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["pagination"], json!({ "page": 1, "limit": 10, "total": 3 }));
    assert_eq!(json["data"]["list"].as_array().unwrap().len(), 3);

    let (_, json) = send_json(
        &app,
        Method::GET,
        "/api/v1/conversations?page=abc&limit=xyz",
        None,
    )
    .await;
    assert_eq!(json["data"]["pagination"]["page"], 1);
    assert_eq!(json["data"]["pagination"]["limit"], 10);

    let (_, json) = send_json(
        &app,
        Method::GET,
        "/api/v1/conversations?page=-4&limit=1000",
        None,
    )
    .await;
    assert_eq!(json["data"]["pagination"]["page"], 1);
    assert_eq!(json["data"]["pagination"]["limit"], 100);

    let (_, json) = send_json(
        &app,
        Method::GET,
        "/api/v1/conversations?page=2&limit=2",
        None,
    )
    .await;
    assert_eq!(json["data"]["list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_orders_by_most_recent_activity() {
    let app = test_app().await;
    let first = create_conversation(&app, Some(r#"{"title":"first"}"#)).await["id"]
        .as_i64()
        .unwrap();
    create_conversation(&app, Some(r#"{"title":"second"}"#)).await;

    let uri = format!("/api/v1/conversations/{first}/messages");
    send_json(&app, Method::POST, &uri, Some(r#"{"content":"bump"}"#)).await;
    settle().await;

    let (_, json) = send_json(&app, Method::GET, "/api/v1/conversations", None).await;
    assert_eq!(json["data"]["list"][0]["title"], "first");
}

// --- Messages ---

#[tokio::test]
async fn test_blank_content_rejected_without_writes() {
    let app = test_app().await;
    let id = create_conversation(&app, None).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/conversations/{id}/messages");

    for body in [r#"{"content":""}"#, r#"{"content":"   "}"#, r#"{}"#, r#"{"content":5}"#] {
        let (status, json) = send_json(&app, Method::POST, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json["code"], 1001, "body {body}");

        let (status, json) = send_json(&app, Method::POST, &format!("{uri}/stream"), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "stream body {body}");
        assert_eq!(json["code"], 1001, "stream body {body}");
    }

    let (_, json) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_content_checked_before_conversation() {
    let app = test_app().await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/v1/conversations/999999/messages",
        Some(r#"{"content":""}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send_json(
        &app,
        Method::POST,
        "/api/v1/conversations/999999/messages",
        Some(r#"{"content":"hello"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 1002);
}

#[tokio::test]
async fn test_send_message_returns_both_turns() {
    let app = test_app().await;
    let id = create_conversation(&app, None).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/conversations/{id}/messages");

    let (status, json) =
        send_json(&app, Method::POST, &uri, Some(r#"{"content":"What is ownership?"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user_message"]["role"], "user");
    assert_eq!(json["data"]["user_message"]["content"], "What is ownership?");
    assert_eq!(json["data"]["assistant_message"]["role"], "assistant");
    assert_eq!(json["data"]["assistant_message"]["content"], REPLY);

    let (_, json) = send_json(&app, Method::GET, &uri, None).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
}

#[tokio::test]
async fn test_placeholder_title_replaced_on_first_turn_only() {
    let app = test_app().await;
    let id = create_conversation(&app, None).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/conversations/{id}/messages");

    send_json(
        &app,
        Method::POST,
        &uri,
        Some(r#"{"content":"请帮我写一个快速排序算法并解释它的时间复杂度"}"#),
    )
    .await;
    settle().await;

    let (_, json) = send_json(&app, Method::GET, "/api/v1/conversations", None).await;
    assert_eq!(json["data"]["list"][0]["title"], "请帮我写一个快速排序算法并解释...");

    send_json(&app, Method::POST, &uri, Some(r#"{"content":"second question"}"#)).await;
    settle().await;

    let (_, json) = send_json(&app, Method::GET, "/api/v1/conversations", None).await;
    assert_eq!(json["data"]["list"][0]["title"], "请帮我写一个快速排序算法并解释...");
}

// --- Streaming ---

#[tokio::test]
async fn test_stream_chunks_match_persisted_reply() {
    let app = test_app().await;
    let id = create_conversation(&app, None).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/conversations/{id}/messages");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("{uri}/stream"),
        Some(r#"{"content":"stream please"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let payloads = sse_payloads(&body);
    assert_eq!(payloads.last().map(String::as_str), Some("[DONE]"));

    let events: Vec<Value> = payloads[..payloads.len() - 1]
        .iter()
        .map(|p| serde_json::from_str(p).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["type"], "start");
    let end = events.last().unwrap();
    assert_eq!(end["type"], "end");

    let streamed: String = events
        .iter()
        .filter(|e| e["type"] == "chunk")
        .map(|e| e["data"]["content"].as_str().unwrap())
        .collect();
    assert_eq!(streamed, REPLY);

    let (_, json) = send_json(&app, Method::GET, &uri, None).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["content"], streamed.as_str());
    assert_eq!(messages[1]["id"], end["data"]["message_id"]);
}

#[tokio::test]
async fn test_stream_to_missing_conversation_is_404_before_open() {
    let app = test_app().await;

    let (status, json) = send_json(
        &app,
        Method::POST,
        "/api/v1/conversations/424242/messages/stream",
        Some(r#"{"content":"anyone?"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 1002);
}
