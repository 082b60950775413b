//! Persistent storage area backed by redb

use redb::backends::InMemoryBackend;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};

// Single flat table, like the DOM storage area it stands in for
const TABLE: TableDefinition<&str, &str> = TableDefinition::new("storage");

/// Storage area persisted to a redb database file.
#[derive(Clone)]
pub struct RedbBackend {
    db: Arc<Database>,
    is_memory: bool,
}

impl RedbBackend {
    /// Open or create a storage area
    ///
    /// # Arguments
    /// * `path` - Database path. Use `:memory:` for a database that lives
    ///           only as long as this value, or a file path for persistence
    pub fn open(path: &str) -> StorageResult<Self> {
        let is_memory = path == ":memory:";

        let db = if is_memory {
            Database::builder()
                .create_with_backend(InMemoryBackend::new())
                .map_err(StorageError::backend)?
        } else {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| StorageError::InvalidPath(e.to_string()))?;
                }
            }
            Database::create(path).map_err(StorageError::backend)?
        };

        // Make sure read transactions always find the table
        let write_txn = db.begin_write().map_err(StorageError::backend)?;
        {
            write_txn.open_table(TABLE).map_err(StorageError::backend)?;
        }
        write_txn.commit().map_err(StorageError::backend)?;

        tracing::debug!(path, "opened redb storage area");

        Ok(Self {
            db: Arc::new(db),
            is_memory,
        })
    }

    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    fn write<F>(&self, apply: F) -> StorageResult<()>
    where
        F: FnOnce(&mut redb::Table<'_, &'static str, &'static str>) -> StorageResult<()>,
    {
        let write_txn = self.db.begin_write().map_err(StorageError::backend)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(StorageError::backend)?;
            apply(&mut table)?;
        }
        write_txn.commit().map_err(StorageError::backend)?;
        Ok(())
    }
}

impl StorageBackend for RedbBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read().map_err(StorageError::backend)?;
        let table = read_txn.open_table(TABLE).map_err(StorageError::backend)?;

        let value = table
            .get(key)
            .map_err(StorageError::backend)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.write(|table| {
            table.insert(key, value).map_err(StorageError::backend)?;
            Ok(())
        })
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.write(|table| {
            table.remove(key).map_err(StorageError::backend)?;
            Ok(())
        })
    }

    fn clear(&self) -> StorageResult<()> {
        self.write(|table| {
            // Enumerate and remove within one transaction
            let mut keys = Vec::new();
            for item in table.iter().map_err(StorageError::backend)? {
                let (key, _) = item.map_err(StorageError::backend)?;
                keys.push(key.value().to_string());
            }
            for key in keys {
                table.remove(key.as_str()).map_err(StorageError::backend)?;
            }
            Ok(())
        })
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let read_txn = self.db.begin_read().map_err(StorageError::backend)?;
        let table = read_txn.open_table(TABLE).map_err(StorageError::backend)?;

        let mut keys = Vec::new();
        for item in table.iter().map_err(StorageError::backend)? {
            let (key, _) = item.map_err(StorageError::backend)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}
