//! Mock implementations for testing.
//!
//! [`MockTransportQueue`] serves queued responses in FIFO order, which is
//! what poll-sequence tests need; the `mockall`-generated
//! [`MockHttpTransport`] covers expectation-style tests.

use crate::errors::{AskForgeError, AskForgeResult};
use crate::transport::{ByteStream, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use http::{HeaderMap, Method, Response, StatusCode};
use mockall::mock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url::Url;

/// Queue-backed mock transport.
///
/// Plain responses and streaming responses are independent FIFO queues;
/// every request is recorded for later assertion.
pub struct MockTransportQueue {
    responses: Arc<Mutex<VecDeque<AskForgeResult<Response<Bytes>>>>>,
    stream_responses: Arc<Mutex<VecDeque<Vec<AskForgeResult<Bytes>>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// One request captured by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: Method,
    /// Full request URL
    pub url: String,
    /// Request body, if any
    pub body: Option<Vec<u8>>,
}

impl MockTransportQueue {
    /// Create an empty mock transport
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            stream_responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a 200 response with the given JSON body
    pub fn push_json(&self, body: &str) {
        let response = Response::builder()
            .status(StatusCode::OK)
            .body(Bytes::from(body.to_string()))
            .expect("static response");
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error for the next plain request
    pub fn push_error(&self, error: AskForgeError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Queue a streaming response delivered as the given byte chunks
    pub fn push_stream_chunks(&self, chunks: Vec<Bytes>) {
        self.stream_responses
            .lock()
            .unwrap()
            .push_back(chunks.into_iter().map(Ok).collect());
    }

    /// Queue a streaming response whose chunks end with an error
    pub fn push_stream_with_error(&self, chunks: Vec<Bytes>, error: AskForgeError) {
        let mut items: Vec<AskForgeResult<Bytes>> = chunks.into_iter().map(Ok).collect();
        items.push(Err(error));
        self.stream_responses.lock().unwrap().push_back(items);
    }

    /// Queue a streaming request failure (stream never opens)
    pub fn push_stream_open_error(&self, error: AskForgeError) {
        // Modeled as a queue entry holding only the error; send_streaming
        // returns it before producing a stream.
        self.stream_responses.lock().unwrap().push_back(vec![Err(error)]);
    }

    /// Every request issued so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests issued so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record(&self, method: Method, url: &Url, body: &Option<Bytes>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.as_ref().map(|b| b.to_vec()),
        });
    }
}

impl Default for MockTransportQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransportQueue {
    async fn send(
        &self,
        method: Method,
        url: Url,
        _headers: HeaderMap,
        body: Option<Bytes>,
    ) -> AskForgeResult<Response<Bytes>> {
        self.record(method, &url, &body);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AskForgeError::Internal {
                    message: format!("No mock response configured for {}", url),
                })
            })
    }

    async fn send_streaming(
        &self,
        method: Method,
        url: Url,
        _headers: HeaderMap,
        body: Option<Bytes>,
    ) -> AskForgeResult<ByteStream> {
        self.record(method, &url, &body);

        let items = self
            .stream_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                vec![Err(AskForgeError::Internal {
                    message: format!("No mock streaming response configured for {}", url),
                })]
            });

        // A lone leading error means the stream failed to open.
        if let [Err(_)] = items.as_slice() {
            if let Some(Err(e)) = items.into_iter().next() {
                return Err(e);
            }
            unreachable!();
        }

        Ok(Box::pin(stream::iter(items)))
    }
}

// Mockall-based mock for expectation-style tests
mock! {
    pub HttpTransport {}

    #[async_trait]
    impl HttpTransport for HttpTransport {
        async fn send(
            &self,
            method: Method,
            url: Url,
            headers: HeaderMap,
            body: Option<Bytes>,
        ) -> AskForgeResult<Response<Bytes>>;

        async fn send_streaming(
            &self,
            method: Method,
            url: Url,
            headers: HeaderMap,
            body: Option<Bytes>,
        ) -> AskForgeResult<ByteStream>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_serves_responses_in_order() {
        let transport = MockTransportQueue::new();
        transport.push_json(r#"{"status":"pending"}"#);
        transport.push_json(r#"{"status":"completed"}"#);

        let url = Url::parse("http://localhost/poll").unwrap();
        let first = transport
            .send(Method::GET, url.clone(), HeaderMap::new(), None)
            .await
            .unwrap();
        assert!(first.body().starts_with(b"{\"status\":\"pending\""));

        let second = transport
            .send(Method::GET, url, HeaderMap::new(), None)
            .await
            .unwrap();
        assert!(second.body().starts_with(b"{\"status\":\"completed\""));

        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_queue_reports_internal_error() {
        let transport = MockTransportQueue::new();
        let url = Url::parse("http://localhost/poll").unwrap();

        let result = transport.send(Method::GET, url, HeaderMap::new(), None).await;
        assert!(matches!(result, Err(AskForgeError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_mockall_transport_expectations() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(1).returning(|_, _, _, _| {
            Ok(Response::builder()
                .status(StatusCode::OK)
                .body(Bytes::from_static(b"{}"))
                .expect("static response"))
        });

        let url = Url::parse("http://localhost/api/chat").unwrap();
        let response = transport
            .send(Method::POST, url, HeaderMap::new(), None)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stream_open_error_fails_before_any_chunk() {
        let transport = MockTransportQueue::new();
        transport.push_stream_open_error(AskForgeError::Transport {
            message: "HTTP 500".to_string(),
            status_code: Some(500),
        });

        let url = Url::parse("http://localhost/api/chat/stream").unwrap();
        let result = transport
            .send_streaming(Method::POST, url, HeaderMap::new(), None)
            .await;
        assert!(matches!(result, Err(AskForgeError::Transport { .. })));
    }
}
