//! Test fixtures and helper data.
//!
//! Canned SSE frames and poll bodies shared across test suites.

use serde_json::json;

/// Sample index name
pub const TEST_INDEX: &str = "handbook";

/// Sample user question
pub const TEST_QUERY: &str = "What does chapter 3 cover?";

/// Wrap a payload in SSE framing: `data: <payload>\n\n`
pub fn sse_frame(payload: &str) -> String {
    format!("data: {}\n\n", payload)
}

/// A `token` event frame
pub fn token_frame(content: &str) -> String {
    sse_frame(&json!({ "type": "token", "content": content }).to_string())
}

/// A `contexts` event frame with one evidence snippet
pub fn contexts_frame() -> String {
    sse_frame(
        &json!({
            "type": "contexts",
            "data": [{
                "source": "handbook.pdf",
                "page": 3,
                "chunk_id": "c-42",
                "score": 0.87,
                "preview": "Chapter 3 introduces retrieval..."
            }]
        })
        .to_string(),
    )
}

/// A `qg_job` event frame
pub fn qg_job_frame(job_id: &str) -> String {
    sse_frame(
        &json!({
            "type": "qg_job",
            "job_id": job_id,
            "poll_url": format!("/api/chat/qg/{}", job_id)
        })
        .to_string(),
    )
}

/// An `error` event frame
pub fn error_frame(content: &str) -> String {
    sse_frame(&json!({ "type": "error", "content": content }).to_string())
}

/// The `[DONE]` completion frame
pub fn done_frame() -> String {
    sse_frame("[DONE]")
}

/// A pending poll response body
pub fn poll_pending(job_id: &str) -> String {
    json!({ "status": "pending", "job_id": job_id }).to_string()
}

/// A completed poll response body; `legacy_key` uses the old
/// `followup_questions` spelling and the `done` status vocabulary
pub fn poll_completed(job_id: &str, questions: &[&str], legacy_key: bool) -> String {
    let mut body = serde_json::Map::new();
    let (status, key) = if legacy_key {
        ("done", "followup_questions")
    } else {
        ("completed", "questions")
    };
    body.insert("status".to_string(), json!(status));
    body.insert("job_id".to_string(), json!(job_id));
    body.insert(key.to_string(), json!(questions));
    serde_json::Value::Object(body).to_string()
}

/// A failed poll response body
pub fn poll_error(job_id: &str, message: &str) -> String {
    json!({ "status": "error", "job_id": job_id, "error": message }).to_string()
}

/// A non-streaming chat answer body
pub fn chat_answer_body() -> String {
    json!({
        "ok": true,
        "answer": "Chapter 3 covers retrieval-augmented generation.",
        "contexts": [{
            "source": "handbook.pdf",
            "page": 3,
            "preview": "Chapter 3 introduces retrieval...",
            "score": 0.87
        }],
        "model": "gemini-pro",
        "followup_questions": ["What about chapter 4?"]
    })
    .to_string()
}
