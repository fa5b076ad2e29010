//! Wire types for the chat endpoints.
//!
//! Parsing is deliberately defensive: the backend drifted between key
//! spellings (`questions` vs `followup_questions`, `model` vs `model_name`)
//! and status vocabularies (`completed` vs `done`, `error` vs `failed`)
//! across revisions, so both sides of each drift are accepted.

use serde::{Deserialize, Serialize};

/// Outbound body for both chat endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatQuery {
    /// The user's question
    pub query_text: String,
    /// Name of the document index to retrieve evidence from
    pub index_name: String,
}

impl ChatQuery {
    /// Create a new chat query
    pub fn new(query_text: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            index_name: index_name.into(),
        }
    }
}

/// A retrieved document snippet used as evidence for an answer.
///
/// Read-only once received. The backend omits fields it has no value for,
/// so everything except the preview is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Context {
    /// Document identifier
    #[serde(default)]
    pub source: Option<String>,
    /// 1-based page number within the source document
    #[serde(default)]
    pub page: Option<u32>,
    /// Opaque chunk identifier
    #[serde(default)]
    pub chunk_id: Option<String>,
    /// Similarity/relevance score
    #[serde(default)]
    pub score: Option<f64>,
    /// Short text excerpt
    #[serde(default)]
    pub preview: String,
}

/// One decoded event from the chat stream, discriminated by `type`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// One incremental fragment of the answer text
    Token {
        /// The text fragment
        content: String,
    },
    /// Retrieved-document evidence snippets
    Contexts {
        /// The evidence snippets
        data: Vec<Context>,
    },
    /// An asynchronous follow-up-question job was started
    QgJob {
        /// Opaque job identifier
        job_id: String,
        /// Poll endpoint, possibly relative to the API origin
        poll_url: String,
    },
    /// Terminal failure reported by the producer
    Error {
        /// Error description
        content: String,
    },
    /// Event type this client does not know; skipped without aborting
    #[serde(other)]
    Unknown,
}

/// Status reported by the follow-up-question poll endpoint.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job is still running; poll again later
    Pending,
    /// Job finished and a question list is available
    #[serde(alias = "done")]
    Completed,
    /// Job failed; no questions will be produced
    #[serde(alias = "failed")]
    Error,
    /// Status this client does not know; treated as terminal
    #[serde(other)]
    Unknown,
}

/// Response body of the job poll endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PollResponse {
    /// Job status; polled until a terminal value is observed
    pub status: JobStatus,
    /// Generated follow-up questions, present once completed
    #[serde(default, alias = "followup_questions")]
    pub questions: Option<Vec<String>>,
    /// Error description, present on failure
    #[serde(default)]
    pub error: Option<String>,
    /// Echoed job identifier
    #[serde(default)]
    pub job_id: Option<String>,
}

/// Response of the non-streaming chat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatAnswer {
    /// Whether the backend considers the request successful
    #[serde(default = "default_ok")]
    pub ok: bool,
    /// The complete answer text
    pub answer: String,
    /// Evidence snippets backing the answer
    #[serde(default)]
    pub contexts: Vec<Context>,
    /// Name of the model that produced the answer
    #[serde(default, alias = "model_name")]
    pub model: Option<String>,
    /// Follow-up questions, when the backend generated them inline
    #[serde(default)]
    pub followup_questions: Vec<String>,
}

fn default_ok() -> bool {
    true
}
