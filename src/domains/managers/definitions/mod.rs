//! Manager definitions - one file per resource.
//!
//! When adding a new resource:
//! 1. Create the manager file here
//! 2. Export it below
//! 3. Register it in [`default_registry`]

mod categories;
mod orders;
mod products;

use std::sync::Arc;

pub use categories::CategoryManager;
pub use orders::OrderManager;
pub use products::ProductManager;

use super::registry::ManagerRegistry;
use super::store::Store;

/// Build the registry with every bundled manager, all sharing one store.
///
/// This is the central place where resources are registered. When adding a
/// new resource, add it here.
pub fn default_registry(store: Arc<dyn Store>) -> ManagerRegistry {
    let mut registry = ManagerRegistry::new();
    registry.register(
        ProductManager::ALIASES,
        Arc::new(ProductManager::new(Arc::clone(&store))),
    );
    registry.register(
        OrderManager::ALIASES,
        Arc::new(OrderManager::new(Arc::clone(&store))),
    );
    registry.register(CategoryManager::ALIASES, Arc::new(CategoryManager));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::managers::store::MemoryStore;

    #[test]
    fn test_default_registry_aliases() {
        let registry = default_registry(Arc::new(MemoryStore::new()));
        for name in ["products", "product", "orders", "order", "categories", "category"] {
            assert!(registry.resolve(name).is_some(), "missing alias: {name}");
        }
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_singular_and_plural_share_manager() {
        let registry = default_registry(Arc::new(MemoryStore::new()));
        let a = registry.resolve("products").unwrap();
        let b = registry.resolve("product").unwrap();
        assert!(std::sync::Arc::ptr_eq(&a, &b));
    }
}
