use super::*;
use serde_json::json;

fn req() -> CanonicalRequest {
    CanonicalRequest {
        model: "gpt-4o".to_string(),
        messages: vec![CanonicalMessage { role: "user".to_string(), content: "hi".to_string() }],
        max_tokens: Some(100),
        tools: None,
    }
}

#[test]
fn openai_round_trip_preserves_content_and_usage() {
    let body = to_openai_request(&req());
    assert_eq!(body["messages"][0]["content"], "hi");
    assert_eq!(body["max_tokens"], 100);

    let response = json!({
        "choices": [{"message": {"role": "assistant", "content": "hello back"}}],
        "usage": {"prompt_tokens": 3, "completion_tokens": 5}
    });
    let canonical = from_openai_response(&response).unwrap();
    assert_eq!(canonical.content, "hello back");
    assert_eq!(canonical.input_tokens, 3);
    assert_eq!(canonical.output_tokens, 5);
}

#[test]
fn gemini_round_trip_maps_assistant_to_model_role() {
    let body = to_gemini_request(&req());
    assert_eq!(body["contents"][0]["role"], "user");

    let response = json!({
        "candidates": [{"content": {"parts": [{"text": "hello"}, {"text": " world"}]}}],
        "usageMetadata": {"promptTokenCount": 2, "candidatesTokenCount": 4}
    });
    let canonical = from_gemini_response(&response).unwrap();
    assert_eq!(canonical.content, "hello world");
    assert_eq!(canonical.output_tokens, 4);
}

#[test]
fn streaming_buffer_holds_partial_lines_until_newline() {
    let mut buf = StreamingBuffer::new();
    assert!(buf.push("event: a").is_empty());
    assert!(buf.has_pending());
    let complete = buf.push("1\nevent: a2\nevent: par");
    assert_eq!(complete, vec!["event: a1".to_string(), "event: a2".to_string()]);
    assert!(buf.has_pending());
}
