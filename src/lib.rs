//! # AskForge Chat Client
//!
//! Rust client for the AskForge PDF question-answering API.
//!
//! ## Features
//!
//! - Streaming chat over Server-Sent Events (SSE) with incremental frame
//!   decoding and typed event dispatch
//! - Asynchronous follow-up-question job polling with a bounded retry budget
//! - Non-streaming chat fallback
//! - Structured logging via `tracing`
//! - Type-safe request/response models with defensive parsing across
//!   protocol revisions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use askforge_client::{create_client, AskForgeClient, AskForgeConfig, ChatCallbacks, ChatQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AskForgeConfig::builder()
//!         .base_url("http://127.0.0.1:8000")
//!         .build()?;
//!
//!     let client = create_client(config)?;
//!
//!     let callbacks = ChatCallbacks::new()
//!         .on_token(|t| print!("{t}"))
//!         .on_complete(|| println!())
//!         .on_followup_questions(|qs| println!("follow-ups: {qs:?}"));
//!
//!     client
//!         .chat()
//!         .chat_stream_with_callbacks(
//!             ChatQuery::new("What is chapter 3 about?", "my-index"),
//!             callbacks,
//!         )
//!         .await;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - Main client interface and factory functions
//! - `config` - Configuration types and builder
//! - `transport` - HTTP transport layer and SSE byte streaming
//! - `errors` - Error types and taxonomy
//! - `services::chat` - Streaming chat, event dispatch, and job polling
//! - `observability` - Logging configuration
//! - `mocks` - Mock implementations for testing
//! - `fixtures` - Test fixtures and helper data

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;

// Development/testing modules
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mocks;

// Re-exports for convenience
pub use client::{create_client, create_client_from_env, AskForgeClient, AskForgeClientImpl};
pub use config::{AskForgeConfig, AskForgeConfigBuilder};
pub use errors::{AskForgeError, AskForgeResult};
pub use observability::{LogFormat, LogLevel, LoggingConfig};
pub use transport::{HttpTransport, ReqwestTransport};

// Service re-exports
pub use services::chat::{
    ChatAnswer, ChatCallbacks, ChatQuery, ChatService, ChatServiceImpl, ChatStream, Context,
    FrameDecoder, JobPoller, JobStatus, PollResponse, StreamEvent,
};

/// The default API base URL (local development backend)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// The default request timeout (10 minutes for long-running streams)
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// The default delay between follow-up-question poll attempts
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1500;

/// The default maximum number of poll attempts before a job is abandoned
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 40;
