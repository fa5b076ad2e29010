//! Error types for the AskForge API client.
//!
//! The taxonomy separates fatal failures (transport, producer-reported
//! stream errors) from conditions the client recovers from locally
//! (malformed frames, failed poll attempts).

mod error;

pub use error::{AskForgeError, AskForgeResult};
