//! Client interface and implementation for the AskForge API.

use crate::config::AskForgeConfig;
use crate::errors::AskForgeResult;
use crate::services::chat::{ChatService, ChatServiceImpl};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

/// Trait defining the main AskForge client interface
pub trait AskForgeClient: Send + Sync {
    /// Access the chat service
    fn chat(&self) -> Arc<dyn ChatService>;
}

/// Implementation of the AskForge client
pub struct AskForgeClientImpl {
    config: Arc<AskForgeConfig>,
    transport: Arc<dyn HttpTransport>,
    chat: Arc<ChatServiceImpl>,
}

impl AskForgeClientImpl {
    /// Create a new client from configuration
    pub fn new(config: AskForgeConfig) -> AskForgeResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?) as Arc<dyn HttpTransport>;
        Self::with_transport(config, transport)
    }

    /// Create a new client with an injected transport (for testing)
    pub fn with_transport(
        config: AskForgeConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> AskForgeResult<Self> {
        let base_url = config.base_url()?;

        let chat = Arc::new(ChatServiceImpl::new(
            transport.clone(),
            base_url,
            config.poll_interval,
            config.max_poll_attempts,
        ));

        Ok(Self {
            config: Arc::new(config),
            transport,
            chat,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &AskForgeConfig {
        &self.config
    }

    /// Get the transport
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        self.transport.clone()
    }
}

impl AskForgeClient for AskForgeClientImpl {
    fn chat(&self) -> Arc<dyn ChatService> {
        self.chat.clone()
    }
}

/// Create a new AskForge client from configuration
pub fn create_client(config: AskForgeConfig) -> AskForgeResult<AskForgeClientImpl> {
    AskForgeClientImpl::new(config)
}

/// Create a new AskForge client from environment variables
pub fn create_client_from_env() -> AskForgeResult<AskForgeClientImpl> {
    let config = AskForgeConfig::from_env()?;
    create_client(config)
}
