//! File-based Order Store Adapter
//!
//! Keeps every placed order in one pretty-printed JSON array. Each append
//! reads the current records, adds the new order, writes the result to a
//! sibling temp file, syncs it and renames it over the store, all under a
//! single writer lock.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::order::Order;
use crate::ports::{OrderStore, StoreError};

/// JSON-file storage for placed orders
#[derive(Debug)]
pub struct FileOrderStore {
    path: PathBuf,
    writer: Mutex<()>,
}

/// Contents of the store file as found on disk.
enum Stored {
    Records(Vec<Order>),
    Missing,
    Corrupt(String),
}

impl FileOrderStore {
    /// Create a store backed by the given file
    ///
    /// # Example
    /// ```ignore
    /// let store = FileOrderStore::new("./data/orders.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a corrupt store is moved before it is replaced
    pub fn quarantine_path(&self) -> PathBuf {
        self.sibling("corrupt")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling("tmp")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    async fn read(&self) -> Result<Stored, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Stored::Missing),
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Stored::Records(Vec::new()));
        }

        Ok(match serde_json::from_slice::<Vec<Order>>(&bytes) {
            Ok(orders) => Stored::Records(orders),
            Err(e) => Stored::Corrupt(e.to_string()),
        })
    }

    async fn quarantine(&self) -> Result<(), StoreError> {
        let target = self.quarantine_path();
        fs::rename(&self.path, &target)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        tracing::warn!("Moved corrupt order store to {}", target.display());
        Ok(())
    }

    async fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::IoError(e.to_string())),
            _ => Ok(()),
        }
    }

    /// Write the full record set to a temp file, sync it, then rename it over
    /// the store so readers never observe a partial file.
    async fn write_atomically(&self, orders: &[Order]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(orders)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        let temp = self.temp_path();
        let mut file = fs::File::create(&temp)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        file.write_all(&json)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        file.sync_all()
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        drop(file);

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::IoError(e.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for FileOrderStore {
    async fn load_all(&self) -> Result<Vec<Order>, StoreError> {
        match self.read().await? {
            Stored::Records(orders) => Ok(orders),
            Stored::Missing => Ok(Vec::new()),
            Stored::Corrupt(reason) => {
                tracing::warn!(
                    "Order store {} is unreadable, treating as empty: {}",
                    self.path.display(),
                    reason
                );
                Ok(Vec::new())
            }
        }
    }

    async fn append(&self, order: &Order) -> Result<usize, StoreError> {
        let _guard = self.writer.lock().await;

        let mut orders = match self.read().await? {
            Stored::Records(orders) => orders,
            Stored::Missing => {
                self.ensure_parent().await?;
                Vec::new()
            }
            Stored::Corrupt(reason) => {
                tracing::warn!(
                    "Order store {} is corrupt ({}), starting a fresh one",
                    self.path.display(),
                    reason
                );
                self.quarantine().await?;
                Vec::new()
            }
        };

        orders.push(order.clone());
        self.write_atomically(&orders).await?;

        tracing::debug!(
            "Appended order {} to {} ({} stored)",
            order.order_id(),
            self.path.display(),
            orders.len()
        );
        Ok(orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogEntry;
    use crate::domain::foundation::{ItemId, Money, OrderId, Timestamp};
    use crate::domain::order::OrderDraft;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn order(seq: u64) -> Order {
        let entry = CatalogEntry::new(
            ItemId::new("milk-1").unwrap(),
            "Milk",
            Money::from_cents(250),
            "Dairy",
            Vec::<String>::new(),
        );
        let now = Timestamp::now();
        Order::place(
            OrderDraft::single_item(&entry, 2).unwrap(),
            OrderId::generate(&now, seq),
            now,
        )
    }

    fn store_in(dir: &TempDir) -> FileOrderStore {
        FileOrderStore::new(dir.path().join("orders.json"))
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_keeps_earlier_orders() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.append(&order(1)).await.unwrap(), 1);
        assert_eq!(store.append(&order(2)).await.unwrap(), 2);

        let stored = store.load_all().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].order_id().sequence(), Some(1));
        assert_eq!(stored[1].order_id().sequence(), Some(2));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn store_survives_a_new_instance() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).append(&order(1)).await.unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.append(&order(2)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn corrupt_file_is_quarantined_on_append() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(store.append(&order(1)).await.unwrap(), 1);

        assert_eq!(store.load_all().await.unwrap().len(), 1);
        let quarantined = std::fs::read_to_string(store.quarantine_path()).unwrap();
        assert_eq!(quarantined, "{ not json");
    }

    #[tokio::test]
    async fn orders_written_without_offsets_or_string_money_still_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let legacy = r#"[
  {
    "order_id": "ORD-1732530930",
    "timestamp": "2024-11-25T10:35:30.123456",
    "status": "received",
    "items": [
      {
        "item_id": "bread-1",
        "name": "Whole Wheat Bread",
        "price": 3.49,
        "quantity": 2,
        "notes": "",
        "subtotal": 6.98
      }
    ],
    "total": 6.98
  }
]"#;
        std::fs::write(store.path(), legacy).unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].timestamp().as_unix_secs(), 1732530930);
        assert_eq!(loaded[0].total(), Money::from_cents(698));
        assert_eq!(loaded[0].order_id().sequence(), None);

        assert_eq!(store.append(&order(2)).await.unwrap(), 2);
        assert!(!store.quarantine_path().exists());
        let reloaded = store.load_all().await.unwrap();
        assert_eq!(reloaded[0].order_id().as_str(), "ORD-1732530930");
    }

    #[tokio::test]
    async fn blank_file_counts_as_empty_not_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "  \n").unwrap();

        assert_eq!(store.append(&order(1)).await.unwrap(), 1);
        assert!(!store.quarantine_path().exists());
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileOrderStore::new(dir.path().join("data").join("ledger").join("orders.json"));

        store.append(&order(1)).await.unwrap();

        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn written_file_is_a_json_array_with_string_money() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.append(&order(1)).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let first = &raw.as_array().unwrap()[0];
        assert_eq!(first["status"], "received");
        assert_eq!(first["total"], "5.00");
        assert_eq!(first["items"][0]["subtotal"], "5.00");
    }

    #[tokio::test]
    async fn concurrent_appends_lose_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let tasks = (1..=16u64).map(|seq| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.append(&order(seq)).await })
        });
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(store.load_all().await.unwrap().len(), 16);
    }
}
