//! Manager registry - maps resource names to manager instances.
//!
//! Managers are registered under one or more aliases at startup and
//! resolved by lookup during dispatch, never constructed from untrusted
//! input. Unknown names produce a not-found outcome upstream.

use std::collections::HashMap;
use std::sync::Arc;

use super::contract::ResourceManager;

/// Registry of resource managers, keyed by alias.
#[derive(Default)]
pub struct ManagerRegistry {
    managers: HashMap<String, Arc<dyn ResourceManager>>,
}

impl ManagerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manager under every given alias.
    pub fn register(&mut self, aliases: &[&str], manager: Arc<dyn ResourceManager>) {
        for alias in aliases {
            self.managers
                .insert(alias.to_string(), Arc::clone(&manager));
        }
    }

    /// Resolve a resource name to its manager.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn ResourceManager>> {
        self.managers.get(name).cloned()
    }

    /// All registered aliases, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.managers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    /// Whether no manager has been registered.
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
