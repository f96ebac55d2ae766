//! Data model unit tests

use coderelay::models::chat::*;
use coderelay::models::relay::*;
use serde_json::json;

#[test]
fn test_route_table() {
    let expected = [
        (RouteKind::GenerateCode, "/generate-code", "query", "code"),
        (RouteKind::ExplainCode, "/explain-code", "code", "explanation"),
        (RouteKind::DebugCode, "/debug-code", "code", "code"),
        (RouteKind::RunCode, "/run-code", "code", "output"),
    ];

    for (route, path, input, output) in expected {
        let spec = route.spec();
        assert_eq!(spec.path, path);
        assert_eq!(spec.input_field, input);
        assert_eq!(spec.output_field, output);
        assert!(spec.template.contains(INPUT_PLACEHOLDER));
    }
}

#[test]
fn test_prompt_templates() {
    assert_eq!(
        RouteKind::ExplainCode.spec().render_prompt("x = 1"),
        "Explain the following code: x = 1"
    );
    assert_eq!(
        RouteKind::DebugCode.spec().render_prompt("x ="),
        "Solve the errors in the following code and return the updated code with comments showing the changes made:\n\nx ="
    );
}

#[test]
fn test_wrap_output_serializes_single_field() {
    let body = RouteKind::RunCode.spec().wrap_output("hello\n".to_string());
    assert_eq!(serde_json::to_value(&body).unwrap(), json!({"output": "hello\n"}));
}

#[test]
fn test_chat_response_with_extra_fields() {
    let response: ChatResponse = serde_json::from_value(json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000u64,
        "model": "llama3-8b-8192",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "first"}, "finish_reason": "stop"},
            {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12},
        "x_groq": {"id": "req_abc"}
    }))
    .unwrap();

    assert_eq!(response.id.as_deref(), Some("chatcmpl-123"));
    assert_eq!(response.first_content(), Ok("first"));
}

#[test]
fn test_null_content_is_missing() {
    let response: ChatResponse = serde_json::from_value(json!({
        "choices": [{"message": {"role": "assistant", "content": null}}]
    }))
    .unwrap();

    assert_eq!(response.first_content(), Err(ResponseShapeError::MissingContent));
}

#[test]
fn test_error_response_parsing() {
    let error: ChatErrorResponse = serde_json::from_value(json!({
        "error": {"message": "Invalid API Key", "type": "invalid_request_error", "code": "invalid_api_key"}
    }))
    .unwrap();

    assert_eq!(error.error.message, "Invalid API Key");
}

#[test]
fn test_route_kind_serializes_kebab_case() {
    assert_eq!(serde_json::to_value(RouteKind::GenerateCode).unwrap(), json!("generate-code"));
}
