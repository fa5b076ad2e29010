//! HTTP transport implementations.

use crate::errors::{AskForgeError, AskForgeResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::Stream;
use http::{HeaderMap, Method, Response, StatusCode};
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

/// Boxed byte stream returned by streaming requests.
pub type ByteStream = Pin<Box<dyn Stream<Item = AskForgeResult<Bytes>> + Send>>;

/// HTTP transport trait for making requests to the AskForge API.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a regular HTTP request
    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> AskForgeResult<Response<Bytes>>;

    /// Send a streaming HTTP request (returns the raw SSE byte stream).
    ///
    /// A non-success status fails here, before any frame is produced.
    async fn send_streaming(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> AskForgeResult<ByteStream>;
}

/// Reqwest-based HTTP transport implementation
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport
    pub fn new(timeout: Duration) -> AskForgeResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AskForgeError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Convert HTTP method to reqwest method
    fn to_reqwest_method(&self, method: Method) -> reqwest::Method {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
            Method::PATCH => reqwest::Method::PATCH,
            _ => reqwest::Method::GET,
        }
    }

    /// Convert HeaderMap to reqwest HeaderMap
    fn to_reqwest_headers(&self, headers: HeaderMap) -> reqwest::header::HeaderMap {
        let mut reqwest_headers = reqwest::header::HeaderMap::new();
        for (name, value) in headers.iter() {
            if let Ok(header_name) =
                reqwest::header::HeaderName::from_bytes(name.as_str().as_bytes())
            {
                if let Ok(header_value) = reqwest::header::HeaderValue::from_bytes(value.as_bytes())
                {
                    reqwest_headers.insert(header_name, header_value);
                }
            }
        }
        reqwest_headers
    }

    fn map_http_error(&self, status: reqwest::StatusCode, body: &Bytes) -> AskForgeError {
        let body_str = String::from_utf8_lossy(body);

        AskForgeError::Transport {
            message: format!("HTTP {}: {}", status.as_u16(), body_str),
            status_code: Some(status.as_u16()),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> AskForgeResult<Response<Bytes>> {
        let reqwest_method = self.to_reqwest_method(method);
        let reqwest_headers = self.to_reqwest_headers(headers);

        let mut request = self
            .client
            .request(reqwest_method, url.as_str())
            .headers(reqwest_headers);

        if let Some(body_data) = body {
            request = request.body(body_data.to_vec());
        }

        let response = request.send().await?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let body_bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(self.map_http_error(status, &body_bytes));
        }

        let mut http_response = Response::builder().status(
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK),
        );

        for (name, value) in response_headers.iter() {
            http_response = http_response.header(name.as_str(), value.as_bytes());
        }

        let response =
            http_response
                .body(body_bytes)
                .map_err(|e| AskForgeError::Internal {
                    message: format!("Failed to build response: {}", e),
                })?;

        Ok(response)
    }

    async fn send_streaming(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> AskForgeResult<ByteStream> {
        let reqwest_method = self.to_reqwest_method(method);
        let reqwest_headers = self.to_reqwest_headers(headers);

        let mut request = self
            .client
            .request(reqwest_method, url.as_str())
            .headers(reqwest_headers);

        if let Some(body_data) = body {
            request = request.body(body_data.to_vec());
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.bytes().await?;
            return Err(self.map_http_error(status, &body));
        }

        let stream = response.bytes_stream();
        let mapped_stream = Box::pin(futures::stream::unfold(stream, |mut stream| async move {
            use futures::StreamExt;
            match stream.next().await {
                Some(Ok(bytes)) => Some((Ok(bytes), stream)),
                Some(Err(e)) => Some((
                    Err(AskForgeError::Stream {
                        message: format!("Stream error: {}", e),
                    }),
                    stream,
                )),
                None => None,
            }
        }));

        Ok(mapped_stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(30));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_map_http_error_carries_status() {
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let err = transport.map_http_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            &Bytes::from_static(b"boom"),
        );
        assert_eq!(err.status_code(), Some(500));
        assert!(err.is_fatal());
    }
}
