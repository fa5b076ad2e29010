//! Chat service implementation.

use super::callbacks::ChatCallbacks;
use super::poll::JobPoller;
use super::stream::ChatStream;
use super::types::{ChatAnswer, ChatQuery, StreamEvent};
use crate::errors::{AskForgeError, AskForgeResult};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use http::{header, HeaderMap, Method};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Chat service trait for testability
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Ask a question without streaming; the full answer arrives at once.
    async fn chat(&self, query: ChatQuery) -> AskForgeResult<ChatAnswer>;

    /// Ask a question and get back the typed event stream for callers that
    /// prefer `Stream` composition. Follow-up-question jobs announced on
    /// the stream are surfaced as [`StreamEvent::QgJob`] but not polled.
    async fn chat_stream(&self, query: ChatQuery) -> AskForgeResult<ChatStream>;

    /// Ask a question and drive the stream to completion, dispatching each
    /// event to the registered callbacks.
    ///
    /// All failures are delivered through `on_error`; exactly one of
    /// `on_complete` / `on_error` fires, exactly once. Each announced
    /// follow-up-question job gets its own detached poller task whose
    /// result, if any, arrives via `on_followup_questions` at an arbitrary
    /// time relative to stream completion.
    async fn chat_stream_with_callbacks(&self, query: ChatQuery, callbacks: ChatCallbacks);
}

/// Implementation of the chat service
pub struct ChatServiceImpl {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl ChatServiceImpl {
    /// Create a new chat service
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: Url,
        poll_interval: Duration,
        max_poll_attempts: u32,
    ) -> Self {
        Self {
            transport,
            base_url,
            poll_interval,
            max_poll_attempts,
        }
    }

    /// Build headers for a request
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = mime::APPLICATION_JSON.as_ref().parse() {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers
    }

    fn endpoint(&self, path: &str) -> AskForgeResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AskForgeError::Configuration {
                message: format!("Invalid endpoint '{}': {}", path, e),
            })
    }

    fn spawn_poller(&self, callbacks: &ChatCallbacks, job_id: String, poll_url: String) {
        let poller = JobPoller::new(
            self.transport.clone(),
            self.base_url.clone(),
            self.poll_interval,
            self.max_poll_attempts,
        );
        let deliver = callbacks.followup_handler();

        // Fire-and-forget: the main stream loop never blocks on polling,
        // and the task ends on a terminal status or its attempt budget.
        tokio::spawn(async move {
            if let Some(questions) = poller.resolve(&job_id, &poll_url).await {
                match deliver {
                    Some(deliver) => deliver(questions),
                    None => debug!(job_id = %job_id, "follow-up questions resolved with no handler"),
                }
            }
        });
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn chat(&self, query: ChatQuery) -> AskForgeResult<ChatAnswer> {
        let url = self.endpoint("/api/chat")?;
        let body = serde_json::to_vec(&query)?;

        let response = self
            .transport
            .send(Method::POST, url, self.build_headers(), Some(Bytes::from(body)))
            .await?;

        let answer = serde_json::from_slice::<ChatAnswer>(response.body())?;
        Ok(answer)
    }

    async fn chat_stream(&self, query: ChatQuery) -> AskForgeResult<ChatStream> {
        let url = self.endpoint("/api/chat/stream")?;
        let body = serde_json::to_vec(&query)?;

        let byte_stream = self
            .transport
            .send_streaming(Method::POST, url, self.build_headers(), Some(Bytes::from(body)))
            .await?;

        Ok(ChatStream::new(byte_stream))
    }

    async fn chat_stream_with_callbacks(&self, query: ChatQuery, callbacks: ChatCallbacks) {
        let mut callbacks = callbacks;

        let mut stream = match self.chat_stream(query).await {
            Ok(stream) => stream,
            Err(e) => {
                // TransportError: fatal before any frame was produced.
                warn!(error = %e, "chat stream could not be opened");
                callbacks.finish_err(e);
                return;
            }
        };

        while let Some(item) = stream.next().await {
            match item {
                Ok(StreamEvent::Token { content }) => callbacks.emit_token(&content),
                Ok(StreamEvent::Contexts { data }) => callbacks.emit_contexts(data),
                Ok(StreamEvent::QgJob { job_id, poll_url }) => {
                    callbacks.emit_qg_job(&job_id, &poll_url);
                    self.spawn_poller(&callbacks, job_id, poll_url);
                }
                // Error events surface as Err from the stream; Unknown is
                // filtered inside it. Nothing else reaches here.
                Ok(_) => {}
                Err(e) => {
                    callbacks.finish_err(e);
                    return;
                }
            }
        }

        callbacks.finish_ok();
    }
}
