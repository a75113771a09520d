//! Transport layer for the gateway.
//!
//! The transport owns everything HTTP-specific: binding a listener, the
//! axum router, CORS and trace layers, and the conversion of an incoming
//! HTTP request into the transport-neutral [`crate::domains::protocol::RawRequest`].
//! Everything past that conversion is transport-agnostic.

mod config;
mod error;

pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
