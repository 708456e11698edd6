//! # Record Store Trait

use async_trait::async_trait;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::expression::{Item, ScanExpression};
use crate::model::Entity;

/// Backend trait for record storage
///
/// Implementations are shared read-only across concurrent requests and do
/// their own synchronisation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Full-table scan returning the projected attributes of every matching item
    async fn scan(&self, expr: &ScanExpression) -> StoreResult<Vec<Item>>;

    /// Append an item to a table
    async fn put(&self, table: &str, item: Item) -> StoreResult<()>;
}

/// Marshal a record into a store item
pub fn to_item<E: Entity>(record: &E) -> StoreResult<Item> {
    match serde_json::to_value(record) {
        Ok(Value::Object(item)) => Ok(item),
        Ok(other) => Err(StoreError::Encode(format!("expected an object, got {}", other))),
        Err(e) => Err(StoreError::Encode(e.to_string())),
    }
}

/// Unmarshal a store item into a record
pub fn from_item<E: Entity>(item: Item) -> StoreResult<E> {
    serde_json::from_value(Value::Object(item)).map_err(|e| StoreError::Decode(e.to_string()))
}
