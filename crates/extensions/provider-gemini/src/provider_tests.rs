use super::*;
use markwise_protocols::GenerationSettings;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn model_request() -> ModelRequest {
    ModelRequest {
        api_key: "AIza-test".to_string(),
        system_instruction: "You file bookmarks.".to_string(),
        prompt: "URL: https://react.dev".to_string(),
        generation: GenerationSettings::default(),
        response_schema: Some(json!({"type": "OBJECT"})),
    }
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 8, "totalTokenCount": 20}
    })
}

async fn mount_error(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::with_url(DEFAULT_MODEL, server.uri())
}

#[test]
fn test_provider_model() {
    assert_eq!(GeminiProvider::default().model(), "gemini-2.5-flash");
    assert_eq!(GeminiProvider::new("gemini-2.0-flash").model(), "gemini-2.0-flash");
}

#[test]
fn test_build_request() {
    let provider = GeminiProvider::default();
    let request = provider.build_request(&model_request());

    assert_eq!(request.contents.len(), 1);
    assert_eq!(request.contents[0].parts[0].text, "URL: https://react.dev");
    assert_eq!(
        request.system_instruction.unwrap().parts[0].text,
        "You file bookmarks."
    );
    let config = request.generation_config.unwrap();
    assert_eq!(config.temperature, Some(1.0));
    assert_eq!(config.top_p, Some(0.95));
    assert_eq!(config.top_k, Some(40));
    assert_eq!(config.max_output_tokens, Some(8192));
    assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
}

#[test]
fn test_build_request_without_schema() {
    let mut model_request = model_request();
    model_request.response_schema = None;
    let config = GeminiProvider::default()
        .build_request(&model_request)
        .generation_config
        .unwrap();
    assert!(config.response_mime_type.is_none());
    assert!(config.response_schema.is_none());
}

#[tokio::test]
async fn test_generate_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "AIza-test"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "URL: https://react.dev"}]}],
            "systemInstruction": {"parts": [{"text": "You file bookmarks."}]},
            "generationConfig": {"topK": 40, "responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(
            r#"{"recommendations":[]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider(&server).generate(model_request()).await.unwrap();
    assert_eq!(text, r#"{"recommendations":[]}"#);
}

#[tokio::test]
async fn test_invalid_api_key() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        400,
        json!({"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}),
    )
    .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    assert!(matches!(err, RecommendationError::InvalidApiKey(_)));
}

#[tokio::test]
async fn test_quota_exceeded() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        429,
        json!({"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}),
    )
    .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    assert!(matches!(err, RecommendationError::QuotaExceeded(_)));
}

#[tokio::test]
async fn test_model_not_found() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        404,
        json!({"error": {"code": 404, "message": "models/gemini-9 is not found", "status": "NOT_FOUND"}}),
    )
    .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    assert!(matches!(err, RecommendationError::ModelUnavailable(_)));
}

#[tokio::test]
async fn test_forbidden() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        403,
        json!({"error": {"code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED"}}),
    )
    .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    assert!(matches!(err, RecommendationError::InvalidApiKey(_)));
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    match err {
        RecommendationError::Failed(message) => assert!(message.contains("upstream unavailable")),
        other => panic!("Expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparsable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    assert!(matches!(err, RecommendationError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_blocked_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    match err {
        RecommendationError::Failed(message) => assert!(message.contains("SAFETY")),
        other => panic!("Expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"candidates": [{"finishReason": "MAX_TOKENS"}]})),
        )
        .mount(&server)
        .await;

    let err = provider(&server).generate(model_request()).await.unwrap_err();
    match err {
        RecommendationError::MalformedResponse(message) => assert!(message.contains("MAX_TOKENS")),
        other => panic!("Expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = GeminiProvider::with_url(DEFAULT_MODEL, uri)
        .generate(model_request())
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendationError::Network(_)));
}
