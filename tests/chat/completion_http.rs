use std::time::Duration;

use chatkra::chat::{Notice, Role, SEND_FAILED_NOTICE, SendOutcome};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::chat_harness::{http_store, memory_backend};

fn endpoint(server: &MockServer) -> String {
    format!("{}/v1/chat/completions", server.uri())
}

fn reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    }))
}

#[tokio::test]
async fn send_appends_user_and_assistant_and_derives_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test-harness"))
        .and(body_partial_json(json!({
            "model": "harness-model",
            "max_tokens": 256,
            "messages": [
                {"role": "system", "content": "You are a test harness."},
                {"role": "user", "content": "What is Rust?"}
            ]
        })))
        .respond_with(reply("A systems programming language."))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = http_store(memory_backend(), &endpoint(&server));
    let outcome = store.send_message("What is Rust?").await;

    assert!(matches!(outcome, SendOutcome::Reply(_)));
    let convo = store.active_conversation().unwrap();
    assert_eq!(convo.title, "What is Rust?");
    let roles: Vec<Role> = convo.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(convo.messages[1].content, "A systems programming language.");
    assert!(!store.is_loading());
}

#[tokio::test]
async fn unauthorized_response_appends_error_message_and_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "invalid key"}})),
        )
        .mount(&server)
        .await;

    let mut store = http_store(memory_backend(), &endpoint(&server));
    store.send_message("hello").await;

    let convo = store.active_conversation().unwrap();
    assert_eq!(convo.messages.len(), 2);
    assert_eq!(convo.messages[1].role, Role::Error);
    assert_eq!(convo.messages[1].content, "invalid key");
    assert_eq!(store.take_notices(), vec![Notice::error("invalid key")]);
}

#[tokio::test]
async fn zero_choices_leave_only_the_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let mut store = http_store(memory_backend(), &endpoint(&server));

    assert_eq!(store.send_message("hello").await, SendOutcome::Empty);
    assert_eq!(store.active_conversation().unwrap().messages.len(), 1);
    assert!(store.take_notices().is_empty());
}

#[tokio::test]
async fn blank_input_never_reaches_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = http_store(memory_backend(), &endpoint(&server));

    assert_eq!(store.send_message(" \n ").await, SendOutcome::Skipped);
    assert!(store.active_conversation().unwrap().messages.is_empty());
}

#[tokio::test]
async fn follow_up_sends_history_without_error_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": "You are a test harness."},
                {"role": "user", "content": "first"},
                {"role": "user", "content": "second"}
            ]
        })))
        .respond_with(reply("recovered"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": {"message": "overloaded"}})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let mut store = http_store(memory_backend(), &endpoint(&server));
    let first = store.send_message("first").await;
    let second = store.send_message("second").await;

    assert!(matches!(first, SendOutcome::Error(ref m) if m.content == "overloaded"));
    assert!(matches!(second, SendOutcome::Reply(ref m) if m.content == "recovered"));
    assert_eq!(store.active_conversation().unwrap().messages.len(), 4);
}

#[tokio::test]
async fn slow_endpoint_times_out_into_an_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("too late").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut store = http_store(memory_backend(), &endpoint(&server))
        .with_request_timeout(Duration::from_millis(100));
    let flag = store.loading_flag();

    let outcome = store.send_message("hello").await;

    let message = outcome.message().unwrap();
    assert_eq!(message.role, Role::Error);
    assert!(message.content.starts_with("Error: "));
    assert!(!flag.load(std::sync::atomic::Ordering::SeqCst));
    assert_eq!(store.take_notices(), vec![Notice::error(SEND_FAILED_NOTICE)]);
}
