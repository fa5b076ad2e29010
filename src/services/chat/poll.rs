//! Polling for asynchronous follow-up-question jobs.

use super::types::{JobStatus, PollResponse};
use crate::errors::{AskForgeError, AskForgeResult};
use crate::transport::HttpTransport;
use http::{HeaderMap, Method};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

/// Resolves one follow-up-question job to either a question list or
/// nothing.
///
/// Poll failures are never escalated: a transport error, a terminal job
/// failure, or an exhausted attempt budget all end the poll silently and
/// the caller simply never receives follow-up suggestions. Pollers for
/// distinct jobs are fully independent.
pub struct JobPoller {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    interval: Duration,
    max_attempts: u32,
}

impl JobPoller {
    /// Create a poller bound to the API origin used by the main stream
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: Url,
        interval: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            transport,
            base_url,
            interval,
            max_attempts,
        }
    }

    /// Poll until the job reports a terminal status or the attempt budget
    /// runs out. Returns the question list on success, `None` otherwise.
    pub async fn resolve(&self, job_id: &str, poll_url: &str) -> Option<Vec<String>> {
        let url = match self.resolve_url(poll_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(job_id, poll_url, error = %e, "unresolvable poll URL, abandoning job");
                return None;
            }
        };

        for attempt in 0..self.max_attempts {
            let response = match self.poll_once(&url).await {
                Ok(response) => response,
                Err(e) => {
                    // PollTransportError: abandoned silently, no retry.
                    warn!(job_id, attempt, error = %e, "poll request failed, abandoning job");
                    return None;
                }
            };

            match response.status {
                JobStatus::Pending => {
                    debug!(job_id, attempt, "job pending, retrying after delay");
                    sleep(self.interval).await;
                }
                JobStatus::Completed => {
                    return match response.questions {
                        Some(questions) => {
                            debug!(job_id, count = questions.len(), "job completed");
                            Some(questions)
                        }
                        None => {
                            warn!(job_id, "job completed without a question list");
                            None
                        }
                    };
                }
                JobStatus::Error | JobStatus::Unknown => {
                    warn!(
                        job_id,
                        error = response.error.as_deref().unwrap_or("unspecified"),
                        "job reported terminal failure"
                    );
                    return None;
                }
            }
        }

        warn!(job_id, max_attempts = self.max_attempts, "poll attempt budget exhausted");
        None
    }

    /// Issue a single poll request.
    pub async fn poll_once(&self, url: &Url) -> AskForgeResult<PollResponse> {
        let response = self
            .transport
            .send(Method::GET, url.clone(), HeaderMap::new(), None)
            .await
            .map_err(|e| AskForgeError::PollTransport {
                message: e.to_string(),
            })?;

        serde_json::from_slice(response.body()).map_err(|e| AskForgeError::PollTransport {
            message: format!("Malformed poll response: {}", e),
        })
    }

    /// Resolve a possibly-relative poll URL against the API origin.
    fn resolve_url(&self, poll_url: &str) -> AskForgeResult<Url> {
        self.base_url
            .join(poll_url)
            .map_err(|e| AskForgeError::PollTransport {
                message: format!("Invalid poll URL '{}': {}", poll_url, e),
            })
    }
}
