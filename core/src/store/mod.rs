//! Snapshot-cached list store over a single storage key.
//!
//! The store owns the canonical serialized list for one record type. Reads
//! are memoized on the raw stored text: while the text is unchanged every
//! `read` returns the same [`Snapshot`] allocation, so callers can detect
//! changes with `Rc::ptr_eq` instead of deep comparison.
//!
//! Change notifications arrive on two channels that feed the same listener:
//! the store's own synthetic channel, fired after every successful `write` in
//! this context, and the backend's native channel, fired when another context
//! writes the same key. Concurrent writers are not coordinated; the last write
//! to reach storage wins.

use crate::event::{EventHub, Subscription};
use crate::storage::error::BackendError;
use crate::storage::{Backend, StorageEvent};
use chrono::{DateTime, Utc};
use error::StoreError;
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("Backend error: {0}")]
        Backend(#[from] BackendError),

        #[error("Serialization error: {0}")]
        Serialize(#[from] serde_json::Error),
    }
}

/// A record type persisted as a JSON array under one key.
pub trait Record: Serialize + Clone + 'static {
    /// Current storage key. Renaming it is how a schema migration is introduced.
    const KEY: &'static str;

    /// Earlier keys, newest first, consulted once when `KEY` holds nothing.
    const LEGACY_KEYS: &'static [&'static str] = &[];

    /// Converts untrusted JSON of any known shape into records.
    fn normalize(raw: &Value, now: DateTime<Utc>) -> Vec<Self>;
}

/// An immutable view of the list at one point in time.
pub type Snapshot<R> = Rc<Vec<R>>;

struct Cache<R> {
    /// Raw text the snapshot was parsed from; `None` before the first read.
    raw: Option<String>,
    items: Snapshot<R>,
}

pub struct Store<B, R> {
    backend: B,
    cache: RefCell<Cache<R>>,
    /// The one empty list handed out for "nothing stored", "unreadable" and
    /// "not loaded yet".
    empty: Snapshot<R>,
    changed: EventHub<()>,
    hydrated: Cell<bool>,
}

impl<B: Backend, R: Record> Store<B, R> {
    /// Opens the store, folding legacy data into `R::KEY` if needed.
    pub fn open(backend: B, now: DateTime<Utc>) -> Result<Self, StoreError> {
        let store = Self::new(backend);
        store.migrate(now)?;
        Ok(store)
    }

    /// Creates the store without running migration.
    pub fn new(backend: B) -> Self {
        let empty: Snapshot<R> = Rc::new(Vec::new());
        Self {
            backend,
            cache: RefCell::new(Cache {
                raw: None,
                items: Rc::clone(&empty),
            }),
            empty,
            changed: EventHub::new(),
            hydrated: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Key of the marker recording that migration already ran.
    pub fn migration_marker() -> String {
        format!("{}:migrated", R::KEY)
    }

    /// Copies the first non-empty legacy list into `R::KEY`.
    ///
    /// Runs only while `R::KEY` and the marker are both absent, and sets the
    /// marker whether or not anything was found. Legacy keys are left as-is.
    /// Returns `true` if data was migrated.
    pub fn migrate(&self, now: DateTime<Utc>) -> Result<bool, StoreError> {
        if self.backend.get(R::KEY)?.is_some() {
            return Ok(false);
        }

        let marker = Self::migration_marker();
        if self.backend.get(&marker)?.is_some() {
            return Ok(false);
        }

        let mut migrated = false;
        for legacy_key in R::LEGACY_KEYS {
            let Some(raw) = self.backend.get(legacy_key)? else {
                continue;
            };

            let items = match serde_json::from_str::<Value>(&raw) {
                Ok(value) => R::normalize(&value, now),
                Err(e) => {
                    warn!(key = *legacy_key, error = %e, "skipping unreadable legacy data");
                    continue;
                }
            };
            if items.is_empty() {
                continue;
            }

            info!(from = *legacy_key, to = R::KEY, count = items.len(), "migrated legacy data");
            self.backend.set(R::KEY, &serde_json::to_string(&items)?)?;
            migrated = true;
            break;
        }

        self.backend.set(&marker, "1")?;
        Ok(migrated)
    }

    /// Returns the current list.
    ///
    /// Unchanged stored text yields the previous snapshot itself. Missing,
    /// corrupt or unreadable data yields the shared empty snapshot; no error
    /// reaches the caller.
    pub fn read(&self) -> Snapshot<R> {
        self.hydrated.set(true);

        let raw = match self.backend.get(R::KEY) {
            Ok(raw) => raw.unwrap_or_default(),
            Err(e) => {
                warn!(key = R::KEY, error = %e, "storage read failed; treating as empty");
                String::new()
            }
        };

        let mut cache = self.cache.borrow_mut();
        if cache.raw.as_deref() == Some(raw.as_str()) {
            return Rc::clone(&cache.items);
        }

        debug!(key = R::KEY, bytes = raw.len(), "stored list changed; re-parsing");
        cache.items = self.parse(&raw);
        cache.raw = Some(raw);
        Rc::clone(&cache.items)
    }

    fn parse(&self, raw: &str) -> Snapshot<R> {
        if raw.is_empty() {
            return Rc::clone(&self.empty);
        }

        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = R::KEY, error = %e, "stored list is corrupt; treating as empty");
                return Rc::clone(&self.empty);
            }
        };

        let items = R::normalize(&value, Utc::now());
        if items.is_empty() {
            Rc::clone(&self.empty)
        } else {
            Rc::new(items)
        }
    }

    /// Persists `next`, adopts it as the cached snapshot and notifies listeners.
    ///
    /// On failure nothing changes and no one is notified.
    pub fn write(&self, next: Vec<R>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&next)?;
        self.backend.set(R::KEY, &raw)?;

        {
            let mut cache = self.cache.borrow_mut();
            cache.items = if next.is_empty() {
                Rc::clone(&self.empty)
            } else {
                Rc::new(next)
            };
            cache.raw = Some(raw);
        }
        self.hydrated.set(true);

        self.changed.emit(&());
        Ok(())
    }

    /// Reads, applies `f` to the current list, and writes the result.
    pub fn update(&self, f: impl FnOnce(&[R]) -> Vec<R>) -> Result<Snapshot<R>, StoreError> {
        let current = self.read();
        self.write(f(&current))?;
        Ok(self.read())
    }

    /// Calls `on_change` after every write from this context and every native
    /// change of `R::KEY` made by another context.
    pub fn subscribe(&self, on_change: impl Fn() + 'static) -> Subscription {
        let on_change: Rc<dyn Fn()> = Rc::new(on_change);

        let synthetic = {
            let on_change = Rc::clone(&on_change);
            self.changed.subscribe(move |_| on_change())
        };

        let native = self.backend.subscribe(Box::new(move |event: &StorageEvent| {
            if event.key == R::KEY {
                on_change();
            }
        }));

        synthetic.join(native)
    }

    /// The value to show before the first real snapshot is confirmed.
    pub fn placeholder(&self) -> Snapshot<R> {
        Rc::clone(&self.empty)
    }

    /// Whether a read or write has happened yet.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.get()
    }

    /// `read()` once the view is hydrated, the placeholder until then.
    pub fn view_snapshot(&self, hydrated: bool) -> Snapshot<R> {
        if hydrated {
            self.read()
        } else {
            self.placeholder()
        }
    }
}
