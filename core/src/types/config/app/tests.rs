use super::*;
use tempfile::TempDir;

#[test]
fn test_load_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = AppConfig::load(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.expiry.due_soon_days, 7);
    assert_eq!(config.charcount.limits, vec![140, 280]);
}

#[test]
fn test_save_then_load_preserves_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");

    let mut config = AppConfig::default();
    config.expiry.due_soon_days = 14;
    config.expiry.default_sort = SortKey::CompanyAsc;
    config.expiry.default_tab = Tab::Later;
    config.charcount.limits = vec![500];
    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), config);
}

#[test]
fn test_partial_file_fills_missing_sections() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[expiry]\ndefault_sort = \"created\"\n").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.expiry.default_sort, SortKey::CreatedDesc);
    assert_eq!(config.expiry.due_soon_days, 7);
    assert_eq!(config.charcount.limits, vec![140, 280]);
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[expiry\n").unwrap();

    assert!(matches!(
        AppConfig::load(&path),
        Err(AppConfigError::Parse(_))
    ));
}

#[test]
fn test_invalid_values_are_reported_and_replaced() {
    let mut config = AppConfig::default();
    config.expiry.due_soon_days = 1000;
    config.charcount.limits = vec![140, 0];

    assert_eq!(config.validate().len(), 2);

    let fixed = config.with_defaults_for_invalid();
    assert!(fixed.validate().is_empty());
    assert_eq!(fixed.expiry.due_soon_days, 7);
    assert_eq!(fixed.charcount.limits, vec![140, 280]);
}
