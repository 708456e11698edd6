//! # In-Memory Record Store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::backend::RecordStore;
use super::errors::{StoreError, StoreResult};
use super::expression::{Item, ScanExpression};

/// Tables held in process memory. Only tables named at construction exist.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Item>>>,
}

impl MemoryStore {
    /// Create a store with the given empty tables
    pub fn with_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: RwLock::new(tables.into_iter().map(|t| (t.into(), Vec::new())).collect()),
        }
    }

    /// Number of items in a table, if it exists
    pub fn item_count(&self, table: &str) -> Option<usize> {
        self.tables.read().ok()?.get(table).map(Vec::len)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn scan(&self, expr: &ScanExpression) -> StoreResult<Vec<Item>> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Scan("Lock poisoned".to_string()))?;

        let items = tables
            .get(&expr.table)
            .ok_or_else(|| StoreError::TableNotFound(expr.table.clone()))?;

        Ok(items
            .iter()
            .filter(|item| expr.matches(item))
            .map(|item| expr.project(item))
            .collect())
    }

    async fn put(&self, table: &str, item: Item) -> StoreResult<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::Put("Lock poisoned".to_string()))?;

        tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?
            .push(item);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FilterExpr;
    use serde_json::{json, Value};

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_put_and_scan() {
        let store = MemoryStore::with_tables(["Plants"]);
        store
            .put("Plants", item(json!({"PlantID": 1, "Common": "Toyon"})))
            .await
            .unwrap();
        store
            .put("Plants", item(json!({"PlantID": 2, "Common": "Manzanita"})))
            .await
            .unwrap();

        let expr = ScanExpression::build(
            "Plants",
            Some(FilterExpr::eq("PlantID", json!(2))),
            &["PlantID", "Common"],
        )
        .unwrap();
        let items = store.scan(&expr).await.unwrap();

        assert_eq!(items, vec![item(json!({"PlantID": 2, "Common": "Manzanita"}))]);
        assert_eq!(store.item_count("Plants"), Some(2));
    }

    #[tokio::test]
    async fn test_scan_applies_projection() {
        let store = MemoryStore::with_tables(["Plants"]);
        store
            .put("Plants", item(json!({"PlantID": 1, "Secret": true})))
            .await
            .unwrap();

        let expr = ScanExpression::build("Plants", None, &["PlantID"]).unwrap();
        let items = store.scan(&expr).await.unwrap();

        assert_eq!(items, vec![item(json!({"PlantID": 1}))]);
    }

    #[tokio::test]
    async fn test_unknown_table() {
        let store = MemoryStore::with_tables(["Plants"]);

        let expr = ScanExpression::build("Trees", None, &["PlantID"]).unwrap();
        assert!(matches!(
            store.scan(&expr).await,
            Err(StoreError::TableNotFound(_))
        ));
        assert!(matches!(
            store.put("Trees", Item::new()).await,
            Err(StoreError::TableNotFound(_))
        ));
    }
}
