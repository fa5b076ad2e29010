//! Configuration types for the AskForge API client.

use crate::errors::{AskForgeError, AskForgeResult};
use crate::{
    DEFAULT_BASE_URL, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS,
};
use std::time::Duration;
use url::Url;

/// Configuration for the AskForge API client.
///
/// The backend is unauthenticated, so no credentials are carried here.
#[derive(Debug, Clone)]
pub struct AskForgeConfig {
    /// Base URL for the AskForge API
    pub base_url: String,
    /// Request timeout (streams may run for minutes)
    pub timeout: Duration,
    /// Delay between follow-up-question poll attempts
    pub poll_interval: Duration,
    /// Maximum number of poll attempts before a job is abandoned
    pub max_poll_attempts: u32,
}

impl AskForgeConfig {
    /// Creates a new configuration builder
    pub fn builder() -> AskForgeConfigBuilder {
        AskForgeConfigBuilder::default()
    }

    /// Creates a configuration from environment variables
    pub fn from_env() -> AskForgeResult<Self> {
        let base_url =
            std::env::var("ASKFORGE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("ASKFORGE_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let poll_interval_ms = std::env::var("ASKFORGE_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        let max_poll_attempts = std::env::var("ASKFORGE_MAX_POLL_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS);

        AskForgeConfigBuilder::default()
            .base_url(base_url)
            .timeout(Duration::from_secs(timeout_secs))
            .poll_interval(Duration::from_millis(poll_interval_ms))
            .max_poll_attempts(max_poll_attempts)
            .build()
    }

    /// Parses the configured base URL.
    pub fn base_url(&self) -> AskForgeResult<Url> {
        Url::parse(&self.base_url).map_err(|e| AskForgeError::Configuration {
            message: format!("Invalid base URL '{}': {}", self.base_url, e),
        })
    }
}

/// Builder for AskForgeConfig
#[derive(Default)]
pub struct AskForgeConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    max_poll_attempts: Option<u32>,
}

impl AskForgeConfigBuilder {
    /// Sets the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the delay between poll attempts
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = Some(poll_interval);
        self
    }

    /// Sets the maximum number of poll attempts
    pub fn max_poll_attempts(mut self, max_poll_attempts: u32) -> Self {
        self.max_poll_attempts = Some(max_poll_attempts);
        self
    }

    /// Builds the configuration
    pub fn build(self) -> AskForgeResult<AskForgeConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Fail here rather than on first request
        Url::parse(&base_url).map_err(|e| AskForgeError::Configuration {
            message: format!("Invalid base URL '{}': {}", base_url, e),
        })?;

        Ok(AskForgeConfig {
            base_url,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            poll_interval: self
                .poll_interval
                .unwrap_or(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)),
            max_poll_attempts: self.max_poll_attempts.unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS),
        })
    }
}
