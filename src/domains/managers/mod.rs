//! Resource managers: the CRUD contract, the alias registry, the
//! persistence backend contract, and the bundled demonstration managers.

pub mod contract;
pub mod definitions;
pub mod registry;
pub mod store;

pub use contract::ResourceManager;
pub use definitions::default_registry;
pub use registry::ManagerRegistry;
pub use store::{MemoryStore, Store, StoreError};
