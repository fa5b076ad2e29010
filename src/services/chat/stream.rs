//! Incremental SSE decoding for the chat stream.

use super::types::StreamEvent;
use crate::errors::{AskForgeError, AskForgeResult};
use crate::transport::ByteStream;
use futures::Stream;
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{debug, warn};

/// The payload that marks normal stream completion.
const DONE_SENTINEL: &str = "[DONE]";

/// Incremental decoder from raw bytes to complete SSE frames.
///
/// Chunks may split a frame, a line, or a multi-byte UTF-8 character at any
/// position; partial state is carried across calls so nothing is dropped.
/// A frame is the text between two `\n\n` delimiters; whatever trails the
/// last delimiter stays buffered until more bytes arrive.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Undecoded byte remainder (at most one partial UTF-8 sequence)
    bytes: Vec<u8>,
    /// Decoded text not yet terminated by a frame delimiter
    text: String,
}

impl FrameDecoder {
    /// Create a new, empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of raw bytes; returns every frame completed by it.
    ///
    /// Whitespace-only frames are discarded. Genuinely invalid UTF-8 is
    /// replaced with U+FFFD rather than aborting the stream.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.bytes.extend_from_slice(chunk);
        self.decode_pending();

        let mut frames = Vec::new();
        while let Some(pos) = self.text.find("\n\n") {
            let frame = self.text[..pos].to_string();
            self.text.drain(..pos + 2);
            if !frame.trim().is_empty() {
                frames.push(frame);
            }
        }
        frames
    }

    /// True if end-of-stream would leave undelivered text behind.
    ///
    /// Such a remainder is necessarily incomplete framing and is discarded
    /// at termination, never parsed.
    pub fn has_residue(&self) -> bool {
        !self.bytes.is_empty() || !self.text.trim().is_empty()
    }

    /// Move as many buffered bytes as possible into decoded text, keeping
    /// a trailing partial UTF-8 sequence for the next chunk.
    fn decode_pending(&mut self) {
        loop {
            match std::str::from_utf8(&self.bytes) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    self.bytes.clear();
                    return;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    self.text
                        .push_str(&String::from_utf8_lossy(&self.bytes[..valid_up_to]));
                    match e.error_len() {
                        // Invalid sequence in the middle: replace it and keep decoding.
                        Some(len) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            self.bytes.drain(..valid_up_to + len);
                        }
                        // Incomplete sequence at the tail: wait for the next chunk.
                        None => {
                            self.bytes.drain(..valid_up_to);
                            return;
                        }
                    }
                }
            }
        }
    }
}

pin_project! {
    /// Stream of typed chat events decoded from a transport byte stream.
    ///
    /// Terminal outcomes are mutually exclusive and fuse the stream:
    /// a `[DONE]` sentinel or natural end-of-data ends it cleanly, an
    /// `error` event or transport failure yields exactly one `Err` first.
    /// Malformed frames are skipped, never fatal.
    pub struct ChatStream {
        inner: ByteStream,
        decoder: FrameDecoder,
        pending: VecDeque<AskForgeResult<StreamEvent>>,
        // Set by [DONE], an error event, or end-of-data; once the pending
        // queue drains nothing further is read or delivered.
        terminated: bool,
    }
}

impl ChatStream {
    /// Wrap a raw byte stream
    pub fn new(inner: ByteStream) -> Self {
        Self {
            inner,
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            terminated: false,
        }
    }

    /// Parse one complete frame into the pending queue.
    ///
    /// Returns `true` when the frame carried a terminal outcome and any
    /// remaining frames must be ignored.
    fn accept_frame(
        frame: &str,
        pending: &mut VecDeque<AskForgeResult<StreamEvent>>,
    ) -> bool {
        // The data line may be preceded by other SSE fields (event:, id:).
        let payload = frame
            .lines()
            .find_map(|line| line.strip_prefix("data:"))
            .map(str::trim);

        let payload = match payload {
            Some(p) => p,
            None => {
                warn!(frame, "SSE frame without data prefix, skipping");
                return false;
            }
        };

        if payload == DONE_SENTINEL {
            debug!("received stream completion sentinel");
            return true;
        }

        match serde_json::from_str::<StreamEvent>(payload) {
            Ok(StreamEvent::Error { content }) => {
                pending.push_back(Err(AskForgeError::Stream { message: content }));
                true
            }
            Ok(StreamEvent::Unknown) => {
                debug!(payload, "unknown event type, skipping");
                false
            }
            Ok(event) => {
                pending.push_back(Ok(event));
                false
            }
            Err(e) => {
                // Recovered locally, never surfaced to the caller.
                let err = AskForgeError::FrameParse {
                    message: e.to_string(),
                };
                warn!(payload, error = %err, "malformed frame payload, skipping");
                false
            }
        }
    }
}

impl Stream for ChatStream {
    type Item = AskForgeResult<StreamEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        loop {
            if let Some(item) = this.pending.pop_front() {
                return Poll::Ready(Some(item));
            }

            if *this.terminated {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    for frame in this.decoder.feed(&bytes) {
                        if *this.terminated {
                            // Everything after a terminal frame is dropped.
                            debug!("ignoring frame after terminal event");
                            continue;
                        }
                        if Self::accept_frame(&frame, this.pending) {
                            *this.terminated = true;
                        }
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    *this.terminated = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    *this.terminated = true;
                    if this.decoder.has_residue() {
                        debug!("discarding incomplete frame at end of stream");
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
