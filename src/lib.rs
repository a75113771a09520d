//! REST Gateway Library
//!
//! This crate provides a small HTTP gateway that fronts a set of pluggable
//! resource managers behind a single endpoint. Requests select a resource
//! with `?resource=<name>` and an optional `&id=<n>`; the HTTP verb picks
//! the operation. Every response, success or failure, is rendered as one
//! uniform JSON envelope.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the authentication gate, the gateway itself, and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **protocol**: Request parsing, dispatch, filters, and the response envelope
//!   - **managers**: The resource-manager contract, the registry, the record
//!     store, and the built-in manager definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rest_gateway::core::{Config, Gateway, HttpTransport};
//! use rest_gateway::domains::managers::{MemoryStore, default_registry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(MemoryStore::new());
//!     let transport = HttpTransport::new(config.http.clone());
//!     let gateway = Gateway::new(config, default_registry(store));
//!     transport.run(gateway).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Gateway, Result};
