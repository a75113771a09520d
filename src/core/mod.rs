//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the gateway,
//! including error handling, configuration, the authentication gate, the
//! gateway lifecycle, and the transport layer.

pub mod config;
pub mod error;
pub mod gateway;
pub mod security;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use gateway::Gateway;
pub use security::authenticate;
pub use transport::{HttpConfig, HttpTransport};
