use super::*;
use crate::types::ItemId;
use chrono::TimeZone;

mod common {
    use super::*;

    pub(super) fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, 12, 0, 0).unwrap()
    }

    pub(super) fn item(id: &str, memo: &str, created: u32) -> BenefitItem {
        BenefitItem {
            id: ItemId::try_new(id.to_string()).unwrap(),
            title: "QUOカード".to_string(),
            company: "ビックカメラ".to_string(),
            expires_on: NaiveDate::from_ymd_opt(2026, 3, 31),
            is_used: false,
            quantity: Some(1.0),
            amount_yen: Some(1000.0),
            memo: memo.to_string(),
            created_at: at(created),
            updated_at: at(created),
        }
    }
}

mod export {
    use super::common::*;
    use super::*;

    #[test]
    fn test_file_name_carries_the_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(export_file_name(today), "benefits_2026-10-19.json");
    }

    #[test]
    fn test_pretty_printed_camel_case() {
        let json = export_json(&[item("x", "", 1)]).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"expiresOn\": \"2026-03-31\""));
        assert!(json.contains("\"amountYen\""));
    }

    #[test]
    fn test_replace_round_trip_is_lossless() {
        let items = vec![item("a", "メモ", 3), item("b", "", 1)];
        let json = export_json(&items).unwrap();

        let imported = parse_import(&json, at(19)).unwrap();
        assert_eq!(apply_import(&[], imported, ImportMode::Replace), items);
    }
}

mod import {
    use super::common::*;
    use super::*;

    #[test]
    fn test_malformed_text_is_reported() {
        let err = parse_import("[{", at(19)).unwrap_err();
        assert_eq!(err, ImportError::Malformed);
        assert_eq!(err.to_string(), "JSONの形式が正しくありません。");
    }

    #[test]
    fn test_non_array_is_empty() {
        assert_eq!(parse_import("{\"a\":1}", at(19)), Err(ImportError::Empty));
        assert_eq!(parse_import("[1, 2]", at(19)), Err(ImportError::Empty));
    }

    #[test]
    fn test_legacy_shape_is_accepted() {
        let text = r#"[{"id":"old","name":"カタログ","issuer":"オリックス","expiresAt":"2026-06-30T00:00:00Z","amount":"¥3,000","note":"n"}]"#;
        let items = parse_import(text, at(19)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_ref(), "old");
        assert_eq!(items[0].amount_yen, Some(3000.0));
        assert_eq!(items[0].memo, "n");
        assert_eq!(items[0].expires_on, NaiveDate::from_ymd_opt(2026, 6, 30));
    }

    #[test]
    fn test_merge_overwrites_by_id() {
        let existing = vec![item("x", "before", 1)];
        let imported = vec![item("x", "after", 1)];

        let merged = apply_import(&existing, imported, ImportMode::Merge);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].memo, "after");
    }

    #[test]
    fn test_merge_unions_and_sorts_newest_first() {
        let existing = vec![item("old", "", 1), item("mid", "", 5)];
        let imported = vec![item("new", "", 9), item("old", "updated", 1)];

        let merged = apply_import(&existing, imported, ImportMode::Merge);
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_ref()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
        assert_eq!(merged[2].memo, "updated");
    }

    #[test]
    fn test_replace_discards_existing() {
        let existing = vec![item("keep-me-not", "", 1)];
        let imported = vec![item("y", "", 2)];
        let result = apply_import(&existing, imported.clone(), ImportMode::Replace);
        assert_eq!(result, imported);
    }
}
