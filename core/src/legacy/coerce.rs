//! Per-value coercions used by field tables.

use crate::types::date::parse_strict;
use crate::types::{ItemId, Priority, TagId};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub(crate) fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Trimmed text; blank strings count as absent.
pub(crate) fn non_blank_text(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Only real booleans; `"true"` or `1` are not flags.
pub(crate) fn flag(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// A finite number, either a JSON number or a string such as `"¥1,200"`.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_loose_number(s),
        _ => None,
    }
}

/// Strips everything but ASCII digits, `.` and `-`, then parses.
pub(crate) fn parse_loose_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// The date part of `YYYY-MM-DD` or any string starting with it.
pub(crate) fn date(value: &Value) -> Option<chrono::NaiveDate> {
    let s = value.as_str()?.trim();
    parse_strict(s.get(..10)?)
}

/// RFC 3339 text, a bare date (midnight UTC), or epoch milliseconds.
pub(crate) fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|| {
                    parse_strict(s)
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                })
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

pub(crate) fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(_) => timestamp(value).map(|dt| dt.timestamp_millis()),
        _ => None,
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn item_id(value: &Value) -> Option<ItemId> {
    ItemId::try_new(id_text(value)?).ok()
}

pub(crate) fn tag_id(value: &Value) -> Option<TagId> {
    TagId::try_new(id_text(value)?).ok()
}

/// Every element that is a valid tag id, duplicates removed, order kept.
pub(crate) fn tag_ids(value: &Value) -> Option<Vec<TagId>> {
    let mut ids: Vec<TagId> = Vec::new();
    for id in value.as_array()?.iter().filter_map(tag_id) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Some(ids)
}

/// Months 1..=12 from numbers or numeric strings, sorted and unique.
pub(crate) fn months(value: &Value) -> Option<Vec<u8>> {
    let mut months: Vec<u8> = value
        .as_array()?
        .iter()
        .filter_map(|m| match m {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        })
        .filter(|m| (1..=12).contains(m))
        .filter_map(|m| u8::try_from(m).ok())
        .collect();
    months.sort_unstable();
    months.dedup();
    Some(months)
}

pub(crate) fn priority(value: &Value) -> Option<Priority> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    Priority::try_from(u8::try_from(n).ok()?).ok()
}
