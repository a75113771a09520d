//! Product manager definition.
//!
//! Demonstration manager implementing the full CRUD contract over the
//! persistence backend. Listing supports `search` (substring on name),
//! `active`, and `category` filters.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::managers::contract::ResourceManager;
use crate::domains::managers::store::Store;
use crate::domains::protocol::{ApiError, FilterClause, QueryFilter, Reply};

/// Fields a client may set on create or update. Anything else in the body
/// is ignored rather than rejected.
const WRITABLE_FIELDS: &[&str] = &[
    "name",
    "description",
    "price",
    "wholesale_price",
    "reference",
    "ean13",
    "active",
    "quantity",
    "category",
];

/// Manager for the `products` resource.
pub struct ProductManager {
    store: Arc<dyn Store>,
}

impl ProductManager {
    /// Collection name in the persistence backend.
    pub const COLLECTION: &'static str = "products";

    /// Aliases this manager registers under.
    pub const ALIASES: &'static [&'static str] = &["products", "product"];

    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Defaults applied to fields omitted from a create body.
    fn defaults(now: &str) -> Value {
        json!({
            "name": "",
            "description": "",
            "price": 0.0,
            "wholesale_price": 0.0,
            "reference": "",
            "ean13": "",
            "active": true,
            "quantity": 0,
            "category": 2,
            "date_add": now,
            "date_upd": now,
        })
    }
}

/// Copy every writable field present in `body` onto `record`.
fn apply_fields(record: &mut Value, body: &Value) {
    let (Some(target), Some(source)) = (record.as_object_mut(), body.as_object()) else {
        return;
    };
    for field in WRITABLE_FIELDS {
        if let Some(value) = source.get(*field) {
            target.insert((*field).to_string(), value.clone());
        }
    }
}

#[async_trait]
impl ResourceManager for ProductManager {
    #[instrument(skip_all, fields(page = filter.page, limit = filter.limit))]
    async fn get_all(&self, mut filter: QueryFilter) -> Result<Reply, ApiError> {
        filter.push_bool_param("active", "active");
        filter.push_int_param("category", "category");
        let search = filter.param("search").map(str::to_string);
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            filter.push(FilterClause::like("name", term));
        }

        let (items, total) = self
            .store
            .select_page(Self::COLLECTION, &filter.clauses, filter.offset(), filter.limit)
            .await?;

        Ok(Reply::paginated(
            items,
            total,
            filter.page,
            filter.limit,
            "products retrieved",
        ))
    }

    async fn get_one(&self, id: u64) -> Result<Reply, ApiError> {
        match self.store.get(Self::COLLECTION, id).await? {
            Some(record) => Ok(Reply::success(record, "product retrieved")),
            None => Err(ApiError::not_found(format!("product {id} not found"))),
        }
    }

    #[instrument(skip_all)]
    async fn create(&self, body: Value) -> Result<Reply, ApiError> {
        let name_present = body
            .get("name")
            .and_then(Value::as_str)
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false);
        if !name_present {
            return Err(ApiError::validation("product name is required"));
        }

        let now = Utc::now().to_rfc3339();
        let mut record = Self::defaults(&now);
        apply_fields(&mut record, &body);

        let id = self.store.insert(Self::COLLECTION, record).await?;
        info!(id, "product created");

        Ok(Reply::created(json!({"id": id}), "product created"))
    }

    #[instrument(skip_all, fields(id))]
    async fn update(&self, id: u64, body: Value) -> Result<Reply, ApiError> {
        let Some(mut record) = self.store.get(Self::COLLECTION, id).await? else {
            return Err(ApiError::not_found(format!("product {id} not found")));
        };

        apply_fields(&mut record, &body);
        if let Some(fields) = record.as_object_mut() {
            fields.insert("date_upd".to_string(), Value::from(Utc::now().to_rfc3339()));
        }

        if !self.store.update(Self::COLLECTION, id, record).await? {
            return Err(ApiError::internal(format!("product {id} could not be updated")));
        }
        info!(id, "product updated");

        Ok(Reply::success(json!({"id": id}), "product updated"))
    }

    #[instrument(skip_all, fields(id))]
    async fn delete(&self, id: u64) -> Result<Reply, ApiError> {
        if self.store.get(Self::COLLECTION, id).await?.is_none() {
            return Err(ApiError::not_found(format!("product {id} not found")));
        }

        if !self.store.remove(Self::COLLECTION, id).await? {
            return Err(ApiError::internal(format!("product {id} could not be removed")));
        }
        info!(id, "product deleted");

        Ok(Reply::success(json!({"id": id}), "product deleted"))
    }
}
