//! Observability utilities.
//!
//! Logging only: the protocol code emits structured events through
//! `tracing`, and this module configures how they are rendered.

mod logging;

pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
