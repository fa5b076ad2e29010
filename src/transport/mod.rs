//! HTTP transport layer for the AskForge API.
//!
//! The [`HttpTransport`] trait is the seam between protocol logic and the
//! network; services are written against it so tests can inject canned
//! responses and byte streams.

mod http_transport;

pub use http_transport::{ByteStream, HttpTransport, ReqwestTransport};
