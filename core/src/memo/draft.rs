//! Edit buffer for a notebook entry.

use crate::benefits::Committed;
use crate::types::{ItemId, MemoItem, Priority, TagId};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoDraftError {
    #[error("銘柄名は必須です")]
    MissingName,

    #[error("権利月は1つ以上選んでください")]
    NoMonths,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoDraft {
    pub id: Option<ItemId>,
    pub name: String,
    pub code: String,
    pub months: Vec<u8>,
    pub tag_ids: Vec<TagId>,
    pub entry_timing: String,
    pub tenure_rule: String,
    pub one_share_hold: bool,
    pub priority: Priority,
    pub memo: String,
}

fn optional(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl MemoDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_item(item: &MemoItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            code: item.code.clone().unwrap_or_default(),
            months: item.months.clone(),
            tag_ids: item.tag_ids.clone(),
            entry_timing: item.entry_timing.clone().unwrap_or_default(),
            tenure_rule: item.tenure_rule.clone().unwrap_or_default(),
            one_share_hold: item.one_share_hold,
            priority: item.priority,
            memo: item.memo.clone(),
        }
    }

    /// Adds or removes a record month, keeping the list sorted.
    /// Months outside 1..=12 are ignored.
    pub fn toggle_month(&mut self, month: u8) {
        if !(1..=12).contains(&month) {
            return;
        }
        match self.months.iter().position(|m| *m == month) {
            Some(i) => {
                self.months.remove(i);
            }
            None => {
                self.months.push(month);
                self.months.sort_unstable();
            }
        }
    }

    pub fn toggle_tag(&mut self, id: &TagId) {
        match self.tag_ids.iter().position(|t| t == id) {
            Some(i) => {
                self.tag_ids.remove(i);
            }
            None => self.tag_ids.push(id.clone()),
        }
    }

    pub fn validate(&self) -> Result<(), MemoDraftError> {
        if self.name.trim().is_empty() {
            return Err(MemoDraftError::MissingName);
        }
        if self.months.is_empty() {
            return Err(MemoDraftError::NoMonths);
        }
        Ok(())
    }

    fn build(&self, id: ItemId, now: DateTime<Utc>) -> MemoItem {
        let mut months = self.months.clone();
        months.sort_unstable();
        months.dedup();

        MemoItem {
            id,
            name: self.name.trim().to_string(),
            code: optional(&self.code),
            months,
            tag_ids: self.tag_ids.clone(),
            entry_timing: optional(&self.entry_timing),
            tenure_rule: optional(&self.tenure_rule),
            one_share_hold: self.one_share_hold,
            priority: self.priority,
            memo: self.memo.trim().to_string(),
            updated_at: now,
        }
    }
}

/// Merges a validated draft: adds go to the front, edits replace in place.
pub fn commit(
    items: &[MemoItem],
    draft: &MemoDraft,
    now: DateTime<Utc>,
) -> Result<(Vec<MemoItem>, Committed), MemoDraftError> {
    draft.validate()?;

    let existing = draft
        .id
        .as_ref()
        .and_then(|id| items.iter().position(|item| &item.id == id));

    match existing {
        Some(index) => {
            let id = items[index].id.clone();
            let mut next = items.to_vec();
            next[index] = draft.build(id.clone(), now);
            Ok((next, Committed::Updated(id)))
        }
        None => {
            let id = draft.id.clone().unwrap_or_else(ItemId::generate);
            let mut next = Vec::with_capacity(items.len() + 1);
            next.push(draft.build(id.clone(), now));
            next.extend_from_slice(items);
            Ok((next, Committed::Added(id)))
        }
    }
}
