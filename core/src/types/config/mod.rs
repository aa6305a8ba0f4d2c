mod app;
mod core;

pub use app::{AppConfig, AppConfigError, CharCountConfig, ExpiryConfig};
pub use self::core::Config;
