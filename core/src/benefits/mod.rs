//! The shareholder-benefit expiry tracker.
//!
//! [`BenefitBook`] ties the list store to the draft, view and transfer
//! helpers. Every mutation goes through [`Store::write`], so subscribers see
//! one notification per user action.

use crate::confirm::{Confirm, Outcome};
use crate::event::Subscription;
use crate::legacy::normalize_benefits;
use crate::storage::Backend;
use crate::store::{Record, Snapshot, Store};
use crate::types::{BenefitItem, ItemId, ViewMode};
use chrono::{DateTime, NaiveDate, Utc};
use error::BookError;
use serde_json::Value;
use tracing::{debug, info, warn};

pub mod collate;
pub mod draft;
pub mod transfer;
pub mod view;

pub use draft::{Committed, Draft, DraftError};
pub use transfer::{ImportError, ImportMode};
pub use view::{DueBadge, SortKey, Tab, TabCounts, Tone, ViewQuery};

pub mod error {
    use super::*;
    use crate::storage::error::BackendError;
    use crate::store::error::StoreError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum BookError {
        #[error("Store error: {0}")]
        Store(#[from] StoreError),

        #[error("{0}")]
        Draft(#[from] DraftError),

        #[error("{0}")]
        Import(#[from] ImportError),

        #[error("Item not found: {0}")]
        NotFound(ItemId),
    }

    impl From<BackendError> for BookError {
        fn from(e: BackendError) -> Self {
            BookError::Store(StoreError::Backend(e))
        }
    }

    impl From<serde_json::Error> for BookError {
        fn from(e: serde_json::Error) -> Self {
            BookError::Store(StoreError::Serialize(e))
        }
    }
}

impl Record for BenefitItem {
    const KEY: &'static str = "mini-tools:benefits:v2";
    const LEGACY_KEYS: &'static [&'static str] = &[
        "benefits-tracker-items-v1",
        "benefits-tracker-items",
        "mini-tools:benefits",
    ];

    fn normalize(raw: &Value, now: DateTime<Utc>) -> Vec<Self> {
        normalize_benefits(raw, now)
    }
}

pub const REMOVE_PROMPT: &str = "削除しますか？（元に戻せません）";
pub const CLEAR_PROMPT: &str = "全データを削除しますか？（元に戻せません）";
pub const REPLACE_PROMPT: &str = "既存データを置き換えます。よろしいですか？";

pub struct BenefitBook<B> {
    store: Store<B, BenefitItem>,
}

impl<B: Backend> BenefitBook<B> {
    pub fn open(backend: B, now: DateTime<Utc>) -> Result<Self, BookError> {
        Ok(Self {
            store: Store::open(backend, now)?,
        })
    }

    pub fn store(&self) -> &Store<B, BenefitItem> {
        &self.store
    }

    pub fn items(&self) -> Snapshot<BenefitItem> {
        self.store.read()
    }

    pub fn get(&self, id: &ItemId) -> Option<BenefitItem> {
        self.items().iter().find(|item| &item.id == id).cloned()
    }

    pub fn subscribe(&self, on_change: impl Fn() + 'static) -> Subscription {
        self.store.subscribe(on_change)
    }

    /// Validates and commits a draft. A rejected draft leaves the list as is.
    pub fn save_draft(&self, draft: &Draft, now: DateTime<Utc>) -> Result<Committed, BookError> {
        let (next, committed) = draft::commit(&self.items(), draft, now)?;
        self.store.write(next)?;
        info!(id = %committed.id(), action = ?committed, "saved benefit");
        Ok(committed)
    }

    /// Flips the used flag. Returns the new value.
    pub fn toggle_used(&self, id: &ItemId, now: DateTime<Utc>) -> Result<bool, BookError> {
        let current = self.items();
        let index = current
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| BookError::NotFound(id.clone()))?;

        let mut next = current.to_vec();
        let item = &mut next[index];
        item.is_used = !item.is_used;
        item.updated_at = now.max(item.created_at);
        let is_used = item.is_used;

        self.store.write(next)?;
        debug!(%id, is_used, "toggled used flag");
        Ok(is_used)
    }

    pub fn remove(&self, id: &ItemId, confirm: &impl Confirm) -> Result<Outcome, BookError> {
        let current = self.items();
        if !current.iter().any(|item| &item.id == id) {
            return Err(BookError::NotFound(id.clone()));
        }
        if !confirm.confirm(REMOVE_PROMPT) {
            return Ok(Outcome::Declined);
        }

        let next = current.iter().filter(|item| &item.id != id).cloned().collect();
        self.store.write(next)?;
        info!(%id, "removed benefit");
        Ok(Outcome::Applied)
    }

    pub fn clear(&self, confirm: &impl Confirm) -> Result<Outcome, BookError> {
        if !confirm.confirm(CLEAR_PROMPT) {
            return Ok(Outcome::Declined);
        }
        self.store.write(Vec::new())?;
        info!("cleared all benefits");
        Ok(Outcome::Applied)
    }

    pub fn export(&self) -> Result<String, BookError> {
        Ok(transfer::export_json(&self.items())?)
    }

    /// Imports pasted JSON. Replace mode asks first; merge does not.
    ///
    /// Unparsable text is rejected before anything is asked or written.
    pub fn import(
        &self,
        text: &str,
        mode: ImportMode,
        confirm: &impl Confirm,
        now: DateTime<Utc>,
    ) -> Result<Outcome, BookError> {
        let imported = transfer::parse_import(text, now)?;
        if mode == ImportMode::Replace && !confirm.confirm(REPLACE_PROMPT) {
            return Ok(Outcome::Declined);
        }

        let count = imported.len();
        let next = transfer::apply_import(&self.items(), imported, mode);
        self.store.write(next)?;
        info!(count, ?mode, "imported benefits");
        Ok(Outcome::Applied)
    }

    /// The filtered, sorted list for display.
    pub fn view(&self, query: &ViewQuery, today: NaiveDate) -> Vec<BenefitItem> {
        view::derive_view(&self.items(), query, today)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn counts(&self, today: NaiveDate) -> TabCounts {
        view::tab_counts(&self.items(), today)
    }

    /// The last chosen layout; unreadable or unknown values mean none.
    pub fn view_mode(&self) -> Option<ViewMode> {
        match self.store.backend().get(ViewMode::KEY) {
            Ok(raw) => raw.as_deref().and_then(ViewMode::from_stored),
            Err(e) => {
                warn!(error = %e, "could not read view mode");
                None
            }
        }
    }

    pub fn set_view_mode(&self, mode: ViewMode) -> Result<(), BookError> {
        self.store.backend().set(ViewMode::KEY, mode.as_str())?;
        Ok(())
    }
}
