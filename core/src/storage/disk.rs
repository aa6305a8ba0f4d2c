//! redb-backed storage for a single process.

use super::error::BackendError;
use super::{Backend, StorageEvent};
use crate::event::Subscription;
use crate::types::Config;
use redb::{ReadableDatabase, TableDefinition};
use std::rc::Rc;

/// Entries table: storage key → stored text.
const ENTRIES_TABLE: TableDefinition<&str, &str> = TableDefinition::new("entries");

/// Durable storage in a redb file under the configured base path.
///
/// redb holds an exclusive lock on the file, so no other context can share
/// it and the native change channel never fires.
#[derive(Clone)]
pub struct DiskBackend {
    db: Rc<redb::Database>,
}

impl DiskBackend {
    /// Creates or opens the database file from the config.
    pub fn open(config: &Config) -> Result<Self, BackendError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ENTRIES_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Rc::new(db) })
    }
}

impl Backend for DiskBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENTRIES_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ENTRIES_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ENTRIES_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn subscribe(&self, _listener: Box<dyn Fn(&StorageEvent)>) -> Subscription {
        Subscription::noop()
    }
}
