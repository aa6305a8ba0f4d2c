use super::{Field, coerce, normalize_list};
use crate::types::{BenefitItem, ItemId};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

const ID: Field<ItemId> = Field {
    keys: &["id"],
    coerce: coerce::item_id,
};
const TITLE: Field<String> = Field {
    keys: &["title", "name"],
    coerce: coerce::text,
};
const COMPANY: Field<String> = Field {
    keys: &["company", "issuer"],
    coerce: coerce::text,
};
const EXPIRES_ON: Field<NaiveDate> = Field {
    keys: &["expiresOn", "expiresAt", "expiry"],
    coerce: coerce::date,
};
const IS_USED: Field<bool> = Field {
    keys: &["isUsed", "used"],
    coerce: coerce::flag,
};
const QUANTITY: Field<f64> = Field {
    keys: &["quantity", "qty"],
    coerce: coerce::number,
};
const AMOUNT_YEN: Field<f64> = Field {
    keys: &["amountYen", "amount"],
    coerce: coerce::number,
};
const MEMO: Field<String> = Field {
    keys: &["memo", "note"],
    coerce: coerce::text,
};
const CREATED_AT: Field<DateTime<Utc>> = Field {
    keys: &["createdAt"],
    coerce: coerce::timestamp,
};
const UPDATED_AT: Field<DateTime<Utc>> = Field {
    keys: &["updatedAt"],
    coerce: coerce::timestamp,
};

/// Converts any known benefit list shape into current items.
///
/// Objects without a usable id get a fresh one; missing timestamps become
/// `now`. Normalizing current data returns it unchanged.
pub fn normalize_benefits(raw: &Value, now: DateTime<Utc>) -> Vec<BenefitItem> {
    normalize_list(raw, |obj| {
        let created_at = CREATED_AT.extract(obj).unwrap_or(now);
        let updated_at = UPDATED_AT.extract(obj).unwrap_or(now).max(created_at);

        BenefitItem {
            id: ID.extract(obj).unwrap_or_else(ItemId::generate),
            title: TITLE.extract(obj).unwrap_or_default().trim().to_string(),
            company: COMPANY.extract(obj).unwrap_or_default().trim().to_string(),
            expires_on: EXPIRES_ON.extract(obj),
            is_used: IS_USED.extract(obj).unwrap_or(false),
            quantity: QUANTITY.extract(obj).filter(|n| *n >= 0.0),
            amount_yen: AMOUNT_YEN.extract(obj).filter(|n| *n >= 0.0),
            memo: MEMO.extract(obj).unwrap_or_default(),
            created_at,
            updated_at,
        }
    })
}
