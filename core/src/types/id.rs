use nutype::nutype;
use uuid::Uuid;

pub const MAX_ID_LENGTH: usize = 128;

/// Identifier of a benefit or memo item. Assigned once, never changed.
#[nutype(
    new_unchecked,
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_ID_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        // A hyphenated v4 uuid is 36 ASCII characters with no surrounding whitespace.
        unsafe { Self::new_unchecked(Uuid::new_v4().to_string()) }
    }
}

/// Identifier of a tag in the memo notebook's tag registry.
#[nutype(
    new_unchecked,
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_ID_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct TagId(String);

impl TagId {
    pub fn generate() -> Self {
        unsafe { Self::new_unchecked(Uuid::new_v4().to_string()) }
    }
}
