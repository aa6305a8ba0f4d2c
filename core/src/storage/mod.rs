//! Durable string key-value backends.
//!
//! A backend stores opaque strings under string keys and exposes a "native"
//! change channel: notifications about writes made by *other* contexts sharing
//! the same storage. Writers are never notified of their own writes through
//! this channel.

use crate::event::Subscription;
use error::BackendError;

mod disk;
mod memory;

pub use disk::DiskBackend;
pub use memory::MemoryBackend;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum BackendError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Storage quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
        QuotaExceeded { needed: usize, quota: usize },
    }
}

/// A change made to shared storage by another context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
}

pub trait Backend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    fn remove(&self, key: &str) -> Result<(), BackendError>;

    /// Registers a listener on the native change channel.
    fn subscribe(&self, listener: Box<dyn Fn(&StorageEvent)>) -> Subscription;
}
