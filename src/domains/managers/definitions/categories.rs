//! Category manager placeholder.
//!
//! Registered so the alias resolves, but every operation answers 501 until
//! category management lands.

use crate::domains::managers::contract::ResourceManager;

/// Placeholder manager for the `categories` resource.
pub struct CategoryManager;

impl CategoryManager {
    /// Aliases this manager registers under.
    pub const ALIASES: &'static [&'static str] = &["categories", "category"];
}

impl ResourceManager for CategoryManager {}
