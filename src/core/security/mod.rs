//! Security: the authentication gate that runs before dispatch.

pub mod auth;

pub use auth::authenticate;
