//! SSE fixture helpers for integration tests.

#![allow(dead_code)]

use wiremock::ResponseTemplate;

// Load fixture templates at compile time
pub const SSE_ROLE: &str = include_str!("fixtures/chat_role.sse");
pub const SSE_DELTA: &str = include_str!("fixtures/chat_delta.sse");

/// Builds a chat-completions stream that sends each delta as its own event.
pub fn chat_sse(deltas: &[&str]) -> String {
    let mut body = SSE_ROLE.to_string();
    for delta in deltas {
        body.push_str(&SSE_DELTA.replace("{{TEXT}}", &escape_json(delta)));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

/// Wrap SSE body string in a ResponseTemplate.
pub fn sse_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body.to_string())
}

/// Escape special characters for JSON string embedding.
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
