//! JSON export and import of the benefit list.

use crate::legacy::normalize_benefits;
use crate::types::BenefitItem;
use crate::types::date::DATE_FORMAT;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// How imported items combine with the current list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportMode {
    /// Discard the current list and adopt the imported one as-is.
    Replace,
    /// Union by id; imported items win. Result is newest first.
    Merge,
}

/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("JSONの形式が正しくありません。")]
    Malformed,

    #[error("読み込めるデータがありませんでした（配列JSONを貼り付けてください）。")]
    Empty,
}

pub fn export_json(items: &[BenefitItem]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("benefits_{}.json", today.format(DATE_FORMAT))
}

/// Parses pasted text through the legacy normalizer.
pub fn parse_import(text: &str, now: DateTime<Utc>) -> Result<Vec<BenefitItem>, ImportError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|_| ImportError::Malformed)?;

    let items = normalize_benefits(&value, now);
    if items.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(items)
}

pub fn apply_import(
    existing: &[BenefitItem],
    imported: Vec<BenefitItem>,
    mode: ImportMode,
) -> Vec<BenefitItem> {
    match mode {
        ImportMode::Replace => imported,
        ImportMode::Merge => merge(existing, imported),
    }
}

fn merge(existing: &[BenefitItem], imported: Vec<BenefitItem>) -> Vec<BenefitItem> {
    let mut merged = existing.to_vec();
    let mut index: HashMap<_, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id.clone(), i))
        .collect();

    for item in imported {
        match index.get(&item.id) {
            Some(&i) => merged[i] = item,
            None => {
                index.insert(item.id.clone(), merged.len());
                merged.push(item);
            }
        }
    }

    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    merged
}

#[cfg(test)]
mod tests;
