//! Provider adapter tests against a local stub chat-completions server.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use std::time::Duration;
use textgate_core::{ProviderError, TextProvider};
use textgate_providers::GroqProvider;
use textgate_providers::OpenAiProvider;
use tokio_util::sync::CancellationToken;

/// Bind a stub server on an ephemeral port and return the endpoint URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}/v1/chat/completions")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-stub",
        "choices": [
            { "index": 0,
              "message": { "role": "assistant", "content": content },
              "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
    })
}

#[tokio::test]
async fn groq_provider_round_trip() {
    // Echo the user message back so the request serialization is
    // exercised end to end.
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["model"], "llama-3.1-8b-instant");
            let content = body["messages"][0]["content"].as_str().unwrap_or_default();
            Json(completion_body(&format!("echo:{content}")))
        }),
    );
    let url = spawn_stub(router).await;

    let provider = GroqProvider::new("test-key".to_owned()).with_base_url(url);
    let reply = provider
        .generate("hello", &CancellationToken::new())
        .await
        .expect("stub call succeeds");
    assert_eq!(reply, "echo:hello");
}

#[tokio::test]
async fn openai_provider_round_trip() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["model"], "gpt-3.5-turbo");
            Json(completion_body("world"))
        }),
    );
    let url = spawn_stub(router).await;

    let provider = OpenAiProvider::new("test-key".to_owned()).with_base_url(url);
    let reply = provider
        .generate("hello", &CancellationToken::new())
        .await
        .expect("stub call succeeds");
    assert_eq!(reply, "world");
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
    );
    let url = spawn_stub(router).await;

    let provider = GroqProvider::new("test-key".to_owned()).with_base_url(url);
    let err = provider
        .generate("hello", &CancellationToken::new())
        .await
        .expect_err("429 must fail");
    match err {
        ProviderError::Api { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choice_list_is_an_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(serde_json::json!({ "id": "chatcmpl-stub", "choices": [] })) }),
    );
    let url = spawn_stub(router).await;

    let provider = GroqProvider::new("test-key".to_owned()).with_base_url(url);
    let err = provider
        .generate("hello", &CancellationToken::new())
        .await
        .expect_err("no choices must fail");
    assert!(matches!(err, ProviderError::EmptyResponse), "got {err:?}");
}

#[tokio::test]
async fn missing_api_key_short_circuits_before_any_network_call() {
    // Unroutable endpoint: if the adapter tried the network, the test
    // would fail with a transport error instead.
    let provider =
        GroqProvider::new(String::new()).with_base_url("http://127.0.0.1:1/unused".to_owned());
    let err = provider
        .generate("hello", &CancellationToken::new())
        .await
        .expect_err("missing key must fail");
    assert!(matches!(err, ProviderError::MissingApiKey), "got {err:?}");
}

#[tokio::test]
async fn cancellation_aborts_a_stalled_call() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Json(completion_body("too late"))
        }),
    );
    let url = spawn_stub(router).await;

    let provider = GroqProvider::new("test-key".to_owned()).with_base_url(url);
    let cancel = CancellationToken::new();
    let call = provider.generate("hello", &cancel);
    tokio::pin!(call);

    // Let the request get in flight, then pull the plug.
    tokio::select! {
        _ = &mut call => panic!("call must not finish before cancellation"),
        () = tokio::time::sleep(Duration::from_millis(100)) => cancel.cancel(),
    }

    let err = call.await.expect_err("cancelled call must fail");
    assert!(matches!(err, ProviderError::Cancelled), "got {err:?}");
}
