//! The benefit memo notebook: per-issue notes tagged from an editable registry.

use crate::benefits::Committed;
use crate::confirm::{Confirm, Outcome};
use crate::event::Subscription;
use crate::legacy::{normalize_memo_items, normalize_tags};
use crate::storage::Backend;
use crate::store::{Record, Snapshot, Store};
use crate::types::{ItemId, MemoItem, Tag, TagId, default_tags};
use chrono::{DateTime, Utc};
use error::MemoError;
use serde_json::Value;
use std::rc::Rc;
use tracing::info;

mod draft;
mod filter;

pub use draft::{MemoDraft, MemoDraftError, commit};
pub use filter::MemoFilter;

pub mod error {
    use super::*;
    use crate::storage::error::BackendError;
    use crate::store::error::StoreError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum MemoError {
        #[error("Store error: {0}")]
        Store(#[from] StoreError),

        #[error("{0}")]
        Draft(#[from] MemoDraftError),

        #[error("Memo not found: {0}")]
        NotFound(ItemId),

        #[error("Tag not found: {0}")]
        TagNotFound(TagId),
    }

    impl From<BackendError> for MemoError {
        fn from(e: BackendError) -> Self {
            MemoError::Store(StoreError::Backend(e))
        }
    }
}

impl Record for MemoItem {
    const KEY: &'static str = "yutai_memo_items_v2";
    const LEGACY_KEYS: &'static [&'static str] = &["yutai_memo_items_v1"];

    fn normalize(raw: &Value, now: DateTime<Utc>) -> Vec<Self> {
        normalize_memo_items(raw, now)
    }
}

impl Record for Tag {
    const KEY: &'static str = "yutai_memo_tags_v1";

    fn normalize(raw: &Value, now: DateTime<Utc>) -> Vec<Self> {
        normalize_tags(raw, now)
    }
}

pub const REMOVE_PROMPT: &str = "削除しますか？";
pub const DELETE_TAG_PROMPT: &str = "このタグを削除しますか？（付与済みメモからは自動で外れます）";

pub struct MemoBook<B> {
    items: Store<B, MemoItem>,
    tags: Store<B, Tag>,
}

impl<B: Backend + Clone> MemoBook<B> {
    /// Opens both stores. A notebook with no tag registry yet gets the
    /// built-in tags; an emptied registry stays empty.
    pub fn open(backend: B, now: DateTime<Utc>) -> Result<Self, MemoError> {
        let seed = backend.get(Tag::KEY)?.is_none();

        let book = Self {
            items: Store::open(backend.clone(), now)?,
            tags: Store::open(backend, now)?,
        };
        if seed {
            book.tags.write(default_tags())?;
            info!("seeded default tags");
        }
        Ok(book)
    }
}

impl<B: Backend> MemoBook<B> {
    pub fn items(&self) -> Snapshot<MemoItem> {
        self.items.read()
    }

    pub fn tags(&self) -> Snapshot<Tag> {
        self.tags.read()
    }

    pub fn get(&self, id: &ItemId) -> Option<MemoItem> {
        self.items().iter().find(|item| &item.id == id).cloned()
    }

    /// Fires on changes to either the notebook or the tag registry.
    pub fn subscribe(&self, on_change: impl Fn() + 'static) -> Subscription {
        let on_change = Rc::new(on_change);
        let for_items = Rc::clone(&on_change);
        self.items
            .subscribe(move || for_items())
            .join(self.tags.subscribe(move || on_change()))
    }

    pub fn save_draft(&self, draft: &MemoDraft, now: DateTime<Utc>) -> Result<Committed, MemoError> {
        let (next, committed) = commit(&self.items(), draft, now)?;
        self.items.write(next)?;
        info!(id = %committed.id(), action = ?committed, "saved memo");
        Ok(committed)
    }

    pub fn remove(&self, id: &ItemId, confirm: &impl Confirm) -> Result<Outcome, MemoError> {
        let current = self.items();
        if !current.iter().any(|item| &item.id == id) {
            return Err(MemoError::NotFound(id.clone()));
        }
        if !confirm.confirm(REMOVE_PROMPT) {
            return Ok(Outcome::Declined);
        }

        let next = current.iter().filter(|item| &item.id != id).cloned().collect();
        self.items.write(next)?;
        Ok(Outcome::Applied)
    }

    /// Adds a tag at the front of the registry. Blank names add nothing.
    pub fn add_tag(&self, name: &str, now: DateTime<Utc>) -> Result<Option<TagId>, MemoError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let tag = Tag {
            id: TagId::generate(),
            name: name.to_string(),
            created_at: now.timestamp_millis(),
        };
        let id = tag.id.clone();

        let current = self.tags();
        let mut next = Vec::with_capacity(current.len() + 1);
        next.push(tag);
        next.extend_from_slice(&current);
        self.tags.write(next)?;
        Ok(Some(id))
    }

    /// Renames a tag. A blank name is ignored and returns `false`.
    pub fn rename_tag(&self, id: &TagId, name: &str) -> Result<bool, MemoError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        let mut next = self.tags().to_vec();
        let tag = next
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| MemoError::TagNotFound(id.clone()))?;
        tag.name = name.to_string();

        self.tags.write(next)?;
        Ok(true)
    }

    /// Removes a tag from the registry and from every item's `tag_ids`.
    /// Items are otherwise untouched, including `updated_at`.
    pub fn delete_tag(&self, id: &TagId, confirm: &impl Confirm) -> Result<Outcome, MemoError> {
        let tags = self.tags();
        if !tags.iter().any(|t| &t.id == id) {
            return Err(MemoError::TagNotFound(id.clone()));
        }
        if !confirm.confirm(DELETE_TAG_PROMPT) {
            return Ok(Outcome::Declined);
        }

        self.tags
            .write(tags.iter().filter(|t| &t.id != id).cloned().collect())?;

        let items = self.items();
        if items.iter().any(|item| item.tag_ids.contains(id)) {
            let next = items
                .iter()
                .cloned()
                .map(|mut item| {
                    item.tag_ids.retain(|t| t != id);
                    item
                })
                .collect();
            self.items.write(next)?;
        }

        info!(%id, "deleted tag");
        Ok(Outcome::Applied)
    }

    /// Name for a tag id, falling back to the id itself.
    pub fn tag_name(&self, id: &TagId) -> String {
        self.tags()
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn filter(&self, filter: &MemoFilter) -> Vec<MemoItem> {
        filter::apply(&self.items(), &self.tags(), filter)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests;
