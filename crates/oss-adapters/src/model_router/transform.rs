// SPDX-License-Identifier: MIT

//! Bidirectional dialect transformers between the canonical (Anthropic-shaped)
//! wire format and OpenAI/Gemini dialects (spec.md section 4.8 and section 9,
//! "Streaming dialect translation").

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Canonical (Anthropic `/v1/messages`-shaped) request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRequest {
    pub model: String,
    pub messages: Vec<CanonicalMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalResponse {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<Value>>,
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Translate a canonical request into an OpenAI-chat-completions-shaped body.
/// Parameters with no OpenAI equivalent are dropped silently (spec.md section 4.8).
pub fn to_openai_request(req: &CanonicalRequest) -> Value {
    let messages: Vec<Value> =
        req.messages.iter().map(|m| json!({"role": m.role, "content": m.content})).collect();
    let mut body = json!({ "model": req.model, "messages": messages });
    if let Some(max_tokens) = req.max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }
    if let Some(tools) = &req.tools {
        body["functions"] = json!(tools);
    }
    body
}

/// Parse an OpenAI chat-completion response body into the canonical shape.
/// Tool/function calls become `tool_calls`.
pub fn from_openai_response(body: &Value) -> Option<CanonicalResponse> {
    let choice = body.get("choices")?.as_array()?.first()?;
    let message = choice.get("message")?;
    let content = message.get("content").and_then(Value::as_str).unwrap_or_default().to_string();
    let tool_calls = message.get("function_call").map(|fc| vec![fc.clone()]);
    let usage = body.get("usage");
    Some(CanonicalResponse {
        role: message.get("role").and_then(Value::as_str).unwrap_or("assistant").to_string(),
        content,
        tool_calls,
        input_tokens: usage.and_then(|u| u.get("prompt_tokens")).and_then(Value::as_u64).unwrap_or(0) as u32,
        output_tokens: usage.and_then(|u| u.get("completion_tokens")).and_then(Value::as_u64).unwrap_or(0) as u32,
    })
}

/// Translate a canonical request into a Gemini `generateContent`-shaped body.
pub fn to_gemini_request(req: &CanonicalRequest) -> Value {
    let contents: Vec<Value> = req
        .messages
        .iter()
        .map(|m| json!({"role": if m.role == "assistant" { "model" } else { "user" }, "parts": [{"text": m.content}]}))
        .collect();
    json!({ "contents": contents })
}

/// Parse a Gemini response body into the canonical shape.
pub fn from_gemini_response(body: &Value) -> Option<CanonicalResponse> {
    let candidate = body.get("candidates")?.as_array()?.first()?;
    let parts = candidate.get("content")?.get("parts")?.as_array()?;
    let content = parts.iter().filter_map(|p| p.get("text").and_then(Value::as_str)).collect::<Vec<_>>().join("");
    let usage = body.get("usageMetadata");
    Some(CanonicalResponse {
        role: "assistant".to_string(),
        content,
        tool_calls: None,
        input_tokens: usage.and_then(|u| u.get("promptTokenCount")).and_then(Value::as_u64).unwrap_or(0) as u32,
        output_tokens: usage.and_then(|u| u.get("candidatesTokenCount")).and_then(Value::as_u64).unwrap_or(0) as u32,
    })
}

/// Buffers partial streaming chunks until a complete event can be emitted.
/// Transport reads never align with event framing, so chunk boundaries are
/// not meaningful (spec.md section 9).
#[derive(Debug, Default)]
pub struct StreamingBuffer {
    pending: String,
}

impl StreamingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes (newline-delimited JSON events); returns every
    /// complete event found so far, retaining any trailing partial line.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);
        let mut complete = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let line = self.pending[..pos].to_string();
            self.pending.drain(..=pos);
            if !line.is_empty() {
                complete.push(line);
            }
        }
        complete
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
