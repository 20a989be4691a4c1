use std::time::Duration;

use serde_json::{json, Value};
use truthlens_core::{ImagePayload, ModelGateway};
use truthlens_gemini::GeminiClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-1.5-flash";
const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(&server.uri(), "test-key", Duration::from_secs(5)).unwrap()
}

fn text_reply(parts: &[&str]) -> Value {
    let parts: Vec<Value> = parts.iter().map(|t| json!({ "text": t })).collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(&[
            "{\"classification\": ",
            "\"REAL\"}",
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .invoke(MODEL, "Is this real?", None)
        .await
        .unwrap();
    assert_eq!(response.raw_text(), "{\"classification\": \"REAL\"}");
}

#[tokio::test]
async fn sends_prompt_and_inline_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(&["Looks authentic."])))
        .mount(&server)
        .await;

    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3];
    let image = ImagePayload::from_bytes(jpeg).unwrap();
    client_for(&server)
        .invoke(MODEL, "Inspect this image", Some(&image))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], "Inspect this image");
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
    assert_eq!(parts[1]["inline_data"]["data"], "/9j/4AECAw==");
}

#[tokio::test]
async fn text_only_request_has_single_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(&["ok"])))
        .mount(&server)
        .await;

    client_for(&server).invoke(MODEL, "hello", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn provider_error_message_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).invoke(MODEL, "x", None).await.unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "API key not valid. Please pass a valid API key.");
}

#[tokio::test]
async fn unstructured_error_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).invoke(MODEL, "x", None).await.unwrap_err();
    assert_eq!(err.status, Some(502));
    assert!(err.message.contains("502"));
    assert!(err.message.contains("Bad Gateway"));
}

#[tokio::test]
async fn blocked_prompt_is_a_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).invoke(MODEL, "x", None).await.unwrap_err();
    assert!(err.message.contains("blocked"));
    assert!(err.message.contains("SAFETY"));
}

#[tokio::test]
async fn failed_call_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Internal error", "status": "INTERNAL" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).invoke(MODEL, "x", None).await.unwrap_err();
    assert_eq!(err.message, "Internal error");
    server.verify().await;
}

#[tokio::test]
async fn unreachable_endpoint_is_a_remote_error() {
    let client =
        GeminiClient::new("http://127.0.0.1:9", "test-key", Duration::from_secs(2)).unwrap();
    let err = client.invoke(MODEL, "x", None).await.unwrap_err();
    assert_eq!(err.status, None);
    assert!(err.message.starts_with("Failed to reach Gemini"));
}

#[tokio::test]
async fn health_check_lists_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .mount(&server)
        .await;

    assert!(client_for(&server).health_check().await);

    let down = GeminiClient::new("http://127.0.0.1:9", "k", Duration::from_secs(2)).unwrap();
    assert!(!down.health_check().await);
}
