//! Domains module containing business logic organized by bounded contexts.
//!
//! - **protocol**: the wire contract - request parsing, dispatch, filters,
//!   and the response envelope
//! - **managers**: the resource manager contract, registry, persistence
//!   backend, and the bundled demonstration managers

pub mod managers;
pub mod protocol;
