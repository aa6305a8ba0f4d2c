//! Notebook search.

use crate::types::{MemoItem, Tag, TagId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoFilter {
    /// Free text, matched case-insensitively.
    pub query: String,
    pub month: Option<u8>,
    pub tag: Option<TagId>,
}

fn haystack(item: &MemoItem, tag_names: &HashMap<&TagId, &str>) -> String {
    let months = item
        .months
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let tags = item
        .tag_ids
        .iter()
        .map(|id| tag_names.get(id).copied().unwrap_or(id.as_ref()))
        .collect::<Vec<_>>()
        .join(",");

    [
        item.name.as_str(),
        item.code.as_deref().unwrap_or_default(),
        item.memo.as_str(),
        item.entry_timing.as_deref().unwrap_or_default(),
        item.tenure_rule.as_deref().unwrap_or_default(),
        months.as_str(),
        tags.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Items passing `filter`, most recently updated first.
///
/// Tag names are searched through the registry; ids with no registered tag
/// are searched as-is.
pub fn apply<'a>(items: &'a [MemoItem], tags: &[Tag], filter: &MemoFilter) -> Vec<&'a MemoItem> {
    let needle = filter.query.trim().to_lowercase();
    let tag_names: HashMap<&TagId, &str> =
        tags.iter().map(|t| (&t.id, t.name.as_str())).collect();

    let mut found: Vec<&MemoItem> = items
        .iter()
        .filter(|item| filter.month.is_none_or(|m| item.months.contains(&m)))
        .filter(|item| {
            filter
                .tag
                .as_ref()
                .is_none_or(|tag| item.tag_ids.contains(tag))
        })
        .filter(|item| needle.is_empty() || haystack(item, &tag_names).contains(&needle))
        .collect();

    found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    found
}
