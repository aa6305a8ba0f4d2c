use minitools_core::benefits::{SortKey, Tab};
use minitools_core::types::AppConfig;
use tempfile::tempdir;

/// Verify a missing config file yields defaults.
#[test]
fn test_missing_config_is_default() {
    let dir = tempdir().unwrap();
    let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.expiry.due_soon_days, 7);
    assert_eq!(config.charcount.limits, [140, 280]);
}

/// Verify settings round-trip through TOML.
#[test]
fn test_config_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.expiry.default_sort = SortKey::CompanyAsc;
    config.expiry.default_tab = Tab::ThisMonth;
    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), config);
}

/// Verify out-of-range values are reported and replaced.
#[test]
fn test_invalid_values_fall_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[expiry]\ndue_soon_days = 1000\n\n[charcount]\nlimits = []\n").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.validate().len(), 2);

    let fixed = config.with_defaults_for_invalid();
    assert!(fixed.validate().is_empty());
    assert_eq!(fixed.expiry.due_soon_days, 7);
}
