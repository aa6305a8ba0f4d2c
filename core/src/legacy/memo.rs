use super::{Field, coerce, normalize_list};
use crate::types::{ItemId, MemoItem, Priority, Tag, TagId};
use chrono::{DateTime, Utc};
use serde_json::Value;

const ID: Field<ItemId> = Field {
    keys: &["id"],
    coerce: coerce::item_id,
};
const NAME: Field<String> = Field {
    keys: &["name", "title"],
    coerce: coerce::text,
};
const CODE: Field<String> = Field {
    keys: &["code"],
    coerce: coerce::non_blank_text,
};
const MONTHS: Field<Vec<u8>> = Field {
    keys: &["months"],
    coerce: coerce::months,
};
/// `tags` held fixed enum names, which are the ids of the built-in tags.
const TAG_IDS: Field<Vec<TagId>> = Field {
    keys: &["tagIds", "tags"],
    coerce: coerce::tag_ids,
};
const ENTRY_TIMING: Field<String> = Field {
    keys: &["entryTiming"],
    coerce: coerce::non_blank_text,
};
const TENURE_RULE: Field<String> = Field {
    keys: &["tenureRule"],
    coerce: coerce::non_blank_text,
};
const ONE_SHARE_HOLD: Field<bool> = Field {
    keys: &["oneShareHold"],
    coerce: coerce::flag,
};
const PRIORITY: Field<Priority> = Field {
    keys: &["priority"],
    coerce: coerce::priority,
};
const MEMO: Field<String> = Field {
    keys: &["memo", "note"],
    coerce: coerce::text,
};
const UPDATED_AT: Field<DateTime<Utc>> = Field {
    keys: &["updatedAt"],
    coerce: coerce::timestamp,
};

pub fn normalize_memo_items(raw: &Value, now: DateTime<Utc>) -> Vec<MemoItem> {
    normalize_list(raw, |obj| MemoItem {
        id: ID.extract(obj).unwrap_or_else(ItemId::generate),
        name: NAME.extract(obj).unwrap_or_default().trim().to_string(),
        code: CODE.extract(obj),
        months: MONTHS.extract(obj).unwrap_or_default(),
        tag_ids: TAG_IDS.extract(obj).unwrap_or_default(),
        entry_timing: ENTRY_TIMING.extract(obj),
        tenure_rule: TENURE_RULE.extract(obj),
        one_share_hold: ONE_SHARE_HOLD.extract(obj).unwrap_or(false),
        priority: PRIORITY.extract(obj).unwrap_or_default(),
        memo: MEMO.extract(obj).unwrap_or_default(),
        updated_at: UPDATED_AT.extract(obj).unwrap_or(now),
    })
}

const TAG_ID: Field<TagId> = Field {
    keys: &["id"],
    coerce: coerce::tag_id,
};
const TAG_NAME: Field<String> = Field {
    keys: &["name", "label"],
    coerce: coerce::text,
};
const TAG_CREATED_AT: Field<i64> = Field {
    keys: &["createdAt"],
    coerce: coerce::epoch_millis,
};

pub fn normalize_tags(raw: &Value, now: DateTime<Utc>) -> Vec<Tag> {
    normalize_list(raw, |obj| Tag {
        id: TAG_ID.extract(obj).unwrap_or_else(TagId::generate),
        name: TAG_NAME.extract(obj).unwrap_or_default().trim().to_string(),
        created_at: TAG_CREATED_AT
            .extract(obj)
            .unwrap_or_else(|| now.timestamp_millis()),
    })
}
