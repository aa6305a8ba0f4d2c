//! Schema-tolerant conversion of untyped JSON into current records.
//!
//! Each record type declares a table of [`Field`]s. A field lists the input
//! keys it may be read from, current name first, and a coercion applied to
//! whatever value is found there. Extraction never fails: a field that cannot
//! be coerced is simply absent and the caller substitutes its default.

use serde_json::{Map, Value};

pub(crate) mod coerce;

mod benefit;
mod memo;

pub use benefit::normalize_benefits;
pub use memo::{normalize_memo_items, normalize_tags};

pub(crate) type Object = Map<String, Value>;

/// One output field and the input keys it may come from, newest first.
pub(crate) struct Field<T> {
    pub keys: &'static [&'static str],
    pub coerce: fn(&Value) -> Option<T>,
}

impl<T> Field<T> {
    /// Returns the first value, in key order, that coerces.
    pub fn extract(&self, obj: &Object) -> Option<T> {
        self.keys
            .iter()
            .filter_map(|key| obj.get(*key))
            .find_map(self.coerce)
    }
}

/// Applies `each` to every object element of a JSON array.
///
/// Non-array input yields nothing. Elements that are not objects are dropped;
/// order is preserved.
pub(crate) fn normalize_list<T>(raw: &Value, each: impl FnMut(&Object) -> T) -> Vec<T> {
    let Some(elements) = raw.as_array() else {
        return Vec::new();
    };
    elements.iter().filter_map(Value::as_object).map(each).collect()
}
