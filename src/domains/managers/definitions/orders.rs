//! Order manager definition.
//!
//! Orders are read-mostly: listing supports `customer`, `status`, and
//! `date_from`/`date_to` range filters on the creation date; updates touch
//! only the status and payment fields. Creation deliberately answers 501 -
//! orders enter the system through the storefront, not through this gateway.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::managers::contract::ResourceManager;
use crate::domains::managers::store::Store;
use crate::domains::protocol::{ApiError, FilterClause, QueryFilter, Reply};

/// Fields a client may change on update. Order totals and line items are
/// owned by the storefront.
const WRITABLE_FIELDS: &[&str] = &["status", "payment"];

/// Manager for the `orders` resource.
pub struct OrderManager {
    store: Arc<dyn Store>,
}

impl OrderManager {
    /// Collection name in the persistence backend.
    pub const COLLECTION: &'static str = "orders";

    /// Aliases this manager registers under.
    pub const ALIASES: &'static [&'static str] = &["orders", "order"];

    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ResourceManager for OrderManager {
    #[instrument(skip_all, fields(page = filter.page, limit = filter.limit))]
    async fn get_all(&self, mut filter: QueryFilter) -> Result<Reply, ApiError> {
        filter.push_int_param("customer", "customer");
        filter.push_int_param("status", "status");
        let date_from = filter.param("date_from").map(str::to_string);
        if let Some(from) = date_from.filter(|d| !d.is_empty()) {
            filter.push(FilterClause::gte_text("date_add", from));
        }
        let date_to = filter.param("date_to").map(str::to_string);
        if let Some(to) = date_to.filter(|d| !d.is_empty()) {
            filter.push(FilterClause::lte_text("date_add", to));
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
            "orders retrieved",
        ))
    }

    async fn get_one(&self, id: u64) -> Result<Reply, ApiError> {
        match self.store.get(Self::COLLECTION, id).await? {
            Some(record) => Ok(Reply::success(record, "order retrieved")),
            None => Err(ApiError::not_found(format!("order {id} not found"))),
        }
    }

    async fn create(&self, _body: Value) -> Result<Reply, ApiError> {
        Err(ApiError::not_implemented(
            "order creation is not exposed through this gateway",
        ))
    }

    #[instrument(skip_all, fields(id))]
    async fn update(&self, id: u64, body: Value) -> Result<Reply, ApiError> {
        let Some(mut record) = self.store.get(Self::COLLECTION, id).await? else {
            return Err(ApiError::not_found(format!("order {id} not found")));
        };

        if let (Some(target), Some(source)) = (record.as_object_mut(), body.as_object()) {
            for field in WRITABLE_FIELDS {
                if let Some(value) = source.get(*field) {
                    target.insert((*field).to_string(), value.clone());
                }
            }
            target.insert("date_upd".to_string(), Value::from(Utc::now().to_rfc3339()));
        }

        if !self.store.update(Self::COLLECTION, id, record).await? {
            return Err(ApiError::internal(format!("order {id} could not be updated")));
        }
        info!(id, "order updated");

        Ok(Reply::success(json!({"id": id}), "order updated"))
    }

    #[instrument(skip_all, fields(id))]
    async fn delete(&self, id: u64) -> Result<Reply, ApiError> {
        if self.store.get(Self::COLLECTION, id).await?.is_none() {
            return Err(ApiError::not_found(format!("order {id} not found")));
        }

        if !self.store.remove(Self::COLLECTION, id).await? {
            return Err(ApiError::internal(format!("order {id} could not be removed")));
        }
        info!(id, "order deleted");

        Ok(Reply::success(json!({"id": id}), "order deleted"))
    }
}
