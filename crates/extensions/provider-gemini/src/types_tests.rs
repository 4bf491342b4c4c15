use super::*;

#[test]
fn test_generation_config_default() {
    let config = GenerationConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_generation_config_with_values() {
    let config = GenerationConfig {
        temperature: Some(1.0),
        top_p: Some(0.95),
        top_k: Some(40),
        max_output_tokens: Some(8192),
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(serde_json::json!({"type": "OBJECT"})),
    };
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["temperature"], 1.0);
    assert_eq!(json["topK"], 40);
    assert_eq!(json["maxOutputTokens"], 8192);
    assert_eq!(json["responseMimeType"], "application/json");
    assert_eq!(json["responseSchema"]["type"], "OBJECT");
}

#[test]
fn test_request_serialization() {
    let request = GenerateContentRequest {
        contents: vec![Content::user("Where does this go?")],
        system_instruction: Some(Content::system("You file bookmarks.")),
        generation_config: None,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["contents"][0]["role"], "user");
    assert_eq!(json["contents"][0]["parts"][0]["text"], "Where does this go?");
    assert!(json["systemInstruction"].get("role").is_none());
    assert!(json.get("generationConfig").is_none());
}

#[test]
fn test_response_text_joins_parts() {
    let json = r#"{
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "{\"recommendations\":"}, {"text": " []}"}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
    }"#;
    let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.text().as_deref(), Some("{\"recommendations\": []}"));
    assert_eq!(response.usage_metadata.unwrap().total_token_count, 15);
}

#[test]
fn test_response_without_candidates() {
    let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
    let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
    assert!(response.text().is_none());
    assert_eq!(response.block_reason(), Some("SAFETY"));
}

#[test]
fn test_candidate_without_content() {
    let json = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
    let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
    assert!(response.text().is_none());
    assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("MAX_TOKENS"));
}

#[test]
fn test_error_deserialization() {
    let json = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
    let error: GeminiError = serde_json::from_str(json).unwrap();
    assert_eq!(error.error.code, 400);
    assert_eq!(
        error.error.describe(),
        "API key not valid. Please pass a valid API key. (INVALID_ARGUMENT)"
    );
}

#[test]
fn test_error_without_status() {
    let json = r#"{"error": {"message": "boom"}}"#;
    let error: GeminiError = serde_json::from_str(json).unwrap();
    assert_eq!(error.error.describe(), "boom");
}
