//! # Local Filesystem Record Store
//!
//! Each table is a JSON array of items in `<root>/<table>.json`.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use super::backend::RecordStore;
use super::errors::{StoreError, StoreResult};
use super::expression::{Item, ScanExpression};

/// Local filesystem record store
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,

    /// Serialises read-append-rewrite cycles within this process
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Open a store rooted at `root`, creating empty files for missing tables
    pub async fn open<I, S>(root: impl Into<PathBuf>, tables: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let store = Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        };

        fs::create_dir_all(&store.root).await?;
        for table in tables {
            let path = store.table_path(table.as_ref())?;
            if fs::metadata(&path).await.is_err() {
                fs::write(&path, b"[]").await?;
            }
        }

        Ok(store)
    }

    fn table_path(&self, table: &str) -> StoreResult<PathBuf> {
        let valid = !table.is_empty()
            && table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::TableNotFound(table.to_string()));
        }
        Ok(self.root.join(format!("{}.json", table)))
    }

    async fn read_table(&self, table: &str) -> StoreResult<Vec<Item>> {
        let path = self.table_path(table)?;
        let raw = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::TableNotFound(table.to_string())
            } else {
                StoreError::Io(e.to_string())
            }
        })?;

        serde_json::from_slice(&raw)
            .map_err(|e| StoreError::Scan(format!("table {} is corrupt: {}", table, e)))
    }
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn scan(&self, expr: &ScanExpression) -> StoreResult<Vec<Item>> {
        let items = self.read_table(&expr.table).await?;

        Ok(items
            .iter()
            .filter(|item| expr.matches(item))
            .map(|item| expr.project(item))
            .collect())
    }

    async fn put(&self, table: &str, item: Item) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_table(table).await?;
        items.push(item);

        let data = serde_json::to_vec(&items).map_err(|e| StoreError::Put(e.to_string()))?;

        // Write then rename so concurrent scans never see a torn file
        let path = self.table_path(table)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }
}
