//! Streaming chat service.
//!
//! The pipeline is short: network bytes -> SSE frames -> typed events ->
//! caller callbacks. [`FrameDecoder`] owns byte-to-frame reassembly,
//! [`ChatStream`] parses frames into [`StreamEvent`]s, and
//! [`ChatServiceImpl`] drives dispatch and spawns a [`JobPoller`] per
//! announced follow-up-question job.

mod callbacks;
mod poll;
mod service;
mod stream;
mod types;


pub use callbacks::ChatCallbacks;
pub use poll::JobPoller;
pub use service::{ChatService, ChatServiceImpl};
pub use stream::{ChatStream, FrameDecoder};
pub use types::{ChatAnswer, ChatQuery, Context, JobStatus, PollResponse, StreamEvent};
