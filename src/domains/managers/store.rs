//! Persistence backend contract and in-memory implementation.
//!
//! Managers reach their data store only through the [`Store`] trait: a
//! row-returning query facility and a count facility, both evaluated against
//! the same structured filter clauses. [`Store::select_page`] performs the
//! count and the page fetch as one logical operation, so pagination metadata
//! stays consistent with the returned items.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domains::protocol::{ApiError, FilterClause};

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named collection does not exist.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// The backend rejected a write.
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// Backend-specific failure.
    #[error("storage failure: {0}")]
    Backend(String),
}

/// A store failure reaching a manager is an internal fault, never a
/// client error.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(anyhow::Error::new(err))
    }
}

/// Opaque persistence backend consumed by resource managers.
///
/// Rows are structured JSON records carrying their own `id` field.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch one page of records matching every clause, newest first.
    async fn select(
        &self,
        collection: &str,
        clauses: &[FilterClause],
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Value>, StoreError>;

    /// Count records matching every clause.
    async fn count(&self, collection: &str, clauses: &[FilterClause]) -> Result<u64, StoreError>;

    /// Count and fetch under the same clause set as one logical operation.
    async fn select_page(
        &self,
        collection: &str,
        clauses: &[FilterClause],
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Value>, u64), StoreError> {
        let total = self.count(collection, clauses).await?;
        let items = self.select(collection, clauses, offset, limit).await?;
        Ok((items, total))
    }

    /// Fetch a single record by id.
    async fn get(&self, collection: &str, id: u64) -> Result<Option<Value>, StoreError>;

    /// Persist a new record, returning its assigned id.
    async fn insert(&self, collection: &str, record: Value) -> Result<u64, StoreError>;

    /// Replace the record stored under `id`. Returns false when absent.
    async fn update(&self, collection: &str, id: u64, record: Value) -> Result<bool, StoreError>;

    /// Remove the record stored under `id`. Returns false when absent.
    async fn remove(&self, collection: &str, id: u64) -> Result<bool, StoreError>;
}

#[derive(Default)]
struct Collection {
    next_id: u64,
    rows: BTreeMap<u64, Value>,
}

impl Collection {
    // Double-ended so callers can walk rows newest first.
    fn matching<'a>(
        &'a self,
        clauses: &'a [FilterClause],
    ) -> impl DoubleEndedIterator<Item = (&'a u64, &'a Value)> {
        self.rows
            .iter()
            .filter(move |(_, row)| clauses.iter().all(|c| c.matches(row)))
    }
}

/// In-memory [`Store`] backed by per-collection ordered maps.
///
/// Collections spring into existence on first insert; reads against a
/// missing collection behave as reads against an empty one.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(
        &self,
        collection: &str,
        clauses: &[FilterClause],
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Value>, StoreError> {
        let guard = self.collections.read().await;
        let Some(coll) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(coll
            .matching(clauses)
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn count(&self, collection: &str, clauses: &[FilterClause]) -> Result<u64, StoreError> {
        let guard = self.collections.read().await;
        let Some(coll) = guard.get(collection) else {
            return Ok(0);
        };
        Ok(coll.matching(clauses).count() as u64)
    }

    async fn select_page(
        &self,
        collection: &str,
        clauses: &[FilterClause],
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Value>, u64), StoreError> {
        // One read guard for count and fetch: the pagination total always
        // reflects the same rows the page was cut from.
        let guard = self.collections.read().await;
        let Some(coll) = guard.get(collection) else {
            return Ok((Vec::new(), 0));
        };
        let total = coll.matching(clauses).count() as u64;
        let items = coll
            .matching(clauses)
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, row)| row.clone())
            .collect();
        Ok((items, total))
    }

    async fn get(&self, collection: &str, id: u64) -> Result<Option<Value>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|coll| coll.rows.get(&id))
            .cloned())
    }

    async fn insert(&self, collection: &str, mut record: Value) -> Result<u64, StoreError> {
        let Some(fields) = record.as_object_mut() else {
            return Err(StoreError::WriteRejected(
                "records must be JSON objects".to_string(),
            ));
        };

        let mut guard = self.collections.write().await;
        let coll = guard.entry(collection.to_string()).or_default();
        coll.next_id += 1;
        let id = coll.next_id;
        fields.insert("id".to_string(), Value::from(id));
        coll.rows.insert(id, record);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: u64, record: Value) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(coll) = guard.get_mut(collection) else {
            return Ok(false);
        };
        match coll.rows.get_mut(&id) {
            Some(slot) => {
                *slot = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, collection: &str, id: u64) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().await;
        Ok(guard
            .get_mut(collection)
            .map(|coll| coll.rows.remove(&id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::block_on;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        block_on(async {
            let store = MemoryStore::new();
            let a = store.insert("products", json!({"name": "A"})).await.unwrap();
            let b = store.insert("products", json!({"name": "B"})).await.unwrap();
            assert_eq!(a, 1);
            assert_eq!(b, 2);

            let record = store.get("products", 1).await.unwrap().unwrap();
            assert_eq!(record["id"], 1);
            assert_eq!(record["name"], "A");
        });
    }

    #[test]
    fn test_insert_rejects_non_objects() {
        block_on(async {
            let store = MemoryStore::new();
            let err = store.insert("products", json!("scalar")).await.unwrap_err();
            assert!(err.to_string().contains("JSON objects"));
        });
    }

    #[test]
    fn test_select_newest_first_with_paging() {
        block_on(async {
            let store = MemoryStore::new();
            for i in 1..=5 {
                store
                    .insert("products", json!({"name": format!("p{i}")}))
                    .await
                    .unwrap();
            }
            let rows = store.select("products", &[], 1, 2).await.unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0]["id"], 4);
            assert_eq!(rows[1]["id"], 3);
        });
    }

    #[test]
    fn test_select_page_count_matches_filter() {
        block_on(async {
            let store = MemoryStore::new();
            for i in 1..=6 {
                store
                    .insert("products", json!({"name": "p", "active": i % 2 == 0}))
                    .await
                    .unwrap();
            }
            let clauses = vec![FilterClause::eq_bool("active", true)];
            let (items, total) = store.select_page("products", &clauses, 0, 2).await.unwrap();
            assert_eq!(total, 3);
            assert_eq!(items.len(), 2);
            assert!(items.iter().all(|r| r["active"] == true));
        });
    }

    #[test]
    fn test_select_page_newest_first() {
        block_on(async {
            let store = MemoryStore::new();
            for i in 1..=4 {
                store
                    .insert("products", json!({"name": format!("p{i}")}))
                    .await
                    .unwrap();
            }
            let (items, total) = store.select_page("products", &[], 0, 2).await.unwrap();
            assert_eq!(total, 4);
            assert_eq!(items[0]["id"], 4);
            assert_eq!(items[1]["id"], 3);
        });
    }

    #[test]
    fn test_missing_collection_reads_as_empty() {
        block_on(async {
            let store = MemoryStore::new();
            assert_eq!(store.count("ghosts", &[]).await.unwrap(), 0);
            assert!(store.select("ghosts", &[], 0, 10).await.unwrap().is_empty());
            assert!(store.get("ghosts", 1).await.unwrap().is_none());
            assert!(!store.remove("ghosts", 1).await.unwrap());
        });
    }

    #[test]
    fn test_update_and_remove_report_presence() {
        block_on(async {
            let store = MemoryStore::new();
            let id = store.insert("orders", json!({"status": 1})).await.unwrap();

            assert!(store.update("orders", id, json!({"id": id, "status": 2})).await.unwrap());
            assert!(!store.update("orders", 999, json!({})).await.unwrap());

            assert!(store.remove("orders", id).await.unwrap());
            assert!(!store.remove("orders", id).await.unwrap());
        });
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        block_on(async {
            let store = MemoryStore::new();
            let a = store.insert("products", json!({"name": "A"})).await.unwrap();
            store.remove("products", a).await.unwrap();
            let b = store.insert("products", json!({"name": "B"})).await.unwrap();
            assert!(b > a);
        });
    }
}
