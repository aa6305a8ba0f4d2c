//! Edit buffer for the add/edit dialog and its merge into the list.

use crate::types::date::{DATE_FORMAT, parse_strict};
use crate::types::{BenefitItem, ItemId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// `None` when adding.
    pub id: Option<ItemId>,
    pub title: String,
    pub company: String,
    /// Empty means "no expiry".
    pub expires_on: String,
    pub is_used: bool,
    pub quantity: String,
    pub amount_yen: String,
    pub memo: String,
}

/// A user-correctable problem with a draft. `Display` is the message shown
/// next to the offending control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("優待名を入力してください。")]
    MissingTitle,

    #[error("企業名を入力してください。")]
    MissingCompany,

    #[error("期限は YYYY-MM-DD 形式で入力してください（例: 2026-03-31）。")]
    InvalidExpiry,

    #[error("数量は0以上の数値で入力してください。")]
    NegativeQuantity,

    #[error("金額は0以上の数値で入力してください。")]
    NegativeAmount,
}

impl DraftError {
    /// Serialized name of the field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            DraftError::MissingTitle => "title",
            DraftError::MissingCompany => "company",
            DraftError::InvalidExpiry => "expiresOn",
            DraftError::NegativeQuantity => "quantity",
            DraftError::NegativeAmount => "amountYen",
        }
    }
}

/// What a successful commit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    Added(ItemId),
    Updated(ItemId),
}

impl Committed {
    pub fn id(&self) -> &ItemId {
        match self {
            Committed::Added(id) | Committed::Updated(id) => id,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Committed::Added(_) => "追加しました",
            Committed::Updated(_) => "更新しました",
        }
    }
}

/// Empty or unparsable input is "not set".
fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn format_number(n: Option<f64>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

impl Draft {
    /// An empty draft for the add flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft pre-filled from an existing item for the edit flow.
    pub fn from_item(item: &BenefitItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            title: item.title.clone(),
            company: item.company.clone(),
            expires_on: item
                .expires_on
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            is_used: item.is_used,
            quantity: format_number(item.quantity),
            amount_yen: format_number(item.amount_yen),
            memo: item.memo.clone(),
        }
    }

    /// Checks fields in display order and reports the first problem.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.company.trim().is_empty() {
            return Err(DraftError::MissingCompany);
        }

        let expires_on = self.expires_on.trim();
        if !expires_on.is_empty() && parse_strict(expires_on).is_none() {
            return Err(DraftError::InvalidExpiry);
        }

        if parse_number(&self.quantity).is_some_and(|n| n < 0.0) {
            return Err(DraftError::NegativeQuantity);
        }
        if parse_number(&self.amount_yen).is_some_and(|n| n < 0.0) {
            return Err(DraftError::NegativeAmount);
        }

        Ok(())
    }
}

/// Merges a validated draft into `items`.
///
/// Adding prepends a new item with a fresh id. Editing replaces the item in
/// place, keeping its id and `created_at`. No other item is touched. An edit
/// whose id no longer exists is added under that id.
pub fn commit(
    items: &[BenefitItem],
    draft: &Draft,
    now: DateTime<Utc>,
) -> Result<(Vec<BenefitItem>, Committed), DraftError> {
    draft.validate()?;

    let existing = draft
        .id
        .as_ref()
        .and_then(|id| items.iter().position(|item| &item.id == id));

    let build = |id: ItemId, created_at: DateTime<Utc>| BenefitItem {
        id,
        title: draft.title.trim().to_string(),
        company: draft.company.trim().to_string(),
        expires_on: parse_strict(draft.expires_on.trim()),
        is_used: draft.is_used,
        quantity: parse_number(&draft.quantity),
        amount_yen: parse_number(&draft.amount_yen),
        memo: draft.memo.trim().to_string(),
        created_at,
        updated_at: now.max(created_at),
    };

    match existing {
        Some(index) => {
            let previous = &items[index];
            let updated = build(previous.id.clone(), previous.created_at);
            let id = updated.id.clone();

            let mut next = items.to_vec();
            next[index] = updated;
            Ok((next, Committed::Updated(id)))
        }
        None => {
            let id = draft.id.clone().unwrap_or_else(ItemId::generate);
            let added = build(id.clone(), now);

            let mut next = Vec::with_capacity(items.len() + 1);
            next.push(added);
            next.extend_from_slice(items);
            Ok((next, Committed::Added(id)))
        }
    }
}

#[cfg(test)]
mod tests;
