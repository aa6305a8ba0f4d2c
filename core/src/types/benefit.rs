use crate::types::ItemId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A shareholder benefit tracked until it is used or expires.
///
/// Serialized with camelCase keys; this is the canonical on-disk shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitItem {
    pub id: ItemId,
    pub title: String,
    pub company: String,
    /// `None` means the benefit does not expire.
    pub expires_on: Option<NaiveDate>,
    pub is_used: bool,
    pub quantity: Option<f64>,
    pub amount_yen: Option<f64>,
    pub memo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
