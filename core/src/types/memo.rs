//! Memo notebook records: items annotated with tags from a user-editable registry.

use crate::types::{ItemId, TagId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoItem {
    pub id: ItemId,
    /// Issue name.
    pub name: String,
    /// Ticker code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Record months, 1..=12, sorted and unique.
    pub months: Vec<u8>,
    pub tag_ids: Vec<TagId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_timing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_rule: Option<String>,
    pub one_share_hold: bool,
    pub priority: Priority,
    pub memo: String,
    pub updated_at: DateTime<Utc>,
}

/// Star rating shown as ★1..★3. Stored as the bare number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Normal),
            3 => Ok(Priority::High),
            other => Err(format!("priority must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Low => 1,
            Priority::Normal => 2,
            Priority::High => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "★{}", u8::from(*self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Milliseconds since the Unix epoch. Built-in tags use 0.
    pub created_at: i64,
}

const DEFAULT_TAGS: [(&str, &str); 5] = [
    ("early", "早取り"),
    ("one_share", "長期1株"),
    ("tenure", "任期注意"),
    ("failure", "失敗ログ"),
    ("must", "鉄板"),
];

/// The registry a fresh notebook starts with.
pub fn default_tags() -> Vec<Tag> {
    DEFAULT_TAGS
        .iter()
        .map(|(id, name)| Tag {
            // Built-in ids are short non-blank ASCII literals.
            id: unsafe { TagId::new_unchecked((*id).to_string()) },
            name: (*name).to_string(),
            created_at: 0,
        })
        .collect()
}
