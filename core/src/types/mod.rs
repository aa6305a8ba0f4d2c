pub(crate) mod config;
pub use config::{AppConfig, AppConfigError, CharCountConfig, Config, ExpiryConfig};

pub(crate) mod id;
pub use id::{ItemId, ItemIdError, MAX_ID_LENGTH, TagId, TagIdError};

pub mod date;

pub(crate) mod benefit;
pub use benefit::BenefitItem;

pub(crate) mod memo;
pub use memo::{MemoItem, Priority, Tag, default_tags};

pub(crate) mod preference;
pub use preference::ViewMode;
