use super::*;
use chrono::{NaiveDate, TimeZone};

mod common {
    use super::*;

    pub(super) fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, hour, 0, 0).unwrap()
    }

    pub(super) fn draft(title: &str, company: &str, expires_on: &str) -> Draft {
        Draft {
            title: title.to_string(),
            company: company.to_string(),
            expires_on: expires_on.to_string(),
            ..Draft::new()
        }
    }
}

mod validate {
    use super::common::draft;
    use super::*;

    #[test]
    fn test_accepts_minimal_draft() {
        assert_eq!(draft("QUOカード", "ビックカメラ", "").validate(), Ok(()));
        assert_eq!(
            draft("QUOカード", "ビックカメラ", " 2026-03-31 ").validate(),
            Ok(())
        );
    }

    #[test]
    fn test_blank_title_names_the_title_field() {
        let err = draft("   ", "ビックカメラ", "").validate().unwrap_err();
        assert_eq!(err, DraftError::MissingTitle);
        assert_eq!(err.field(), "title");
        assert_eq!(err.to_string(), "優待名を入力してください。");
    }

    #[test]
    fn test_blank_company_names_the_company_field() {
        let err = draft("QUOカード", "", "").validate().unwrap_err();
        assert_eq!(err, DraftError::MissingCompany);
        assert_eq!(err.field(), "company");
    }

    #[test]
    fn test_title_is_checked_before_company() {
        assert_eq!(draft("", "", "").validate(), Err(DraftError::MissingTitle));
    }

    #[test]
    fn test_malformed_expiry_is_a_format_error() {
        for bad in ["2026/03/31", "2026-3-31", "31-03-2026", "2026-02-30", "明日"] {
            let err = draft("QUOカード", "ビックカメラ", bad).validate().unwrap_err();
            assert_eq!(err, DraftError::InvalidExpiry, "input {bad:?}");
            assert_eq!(err.field(), "expiresOn");
        }
    }

    #[test]
    fn test_negative_numbers_are_rejected() {
        let mut d = draft("QUOカード", "ビックカメラ", "");
        d.quantity = "-1".to_string();
        assert_eq!(d.validate(), Err(DraftError::NegativeQuantity));

        d.quantity = "1".to_string();
        d.amount_yen = "-1000".to_string();
        assert_eq!(d.validate(), Err(DraftError::NegativeAmount));
    }
}

mod commit {
    use super::common::{at, draft};
    use super::*;

    #[test]
    fn test_add_creates_item_with_defaults() {
        let (items, committed) =
            commit(&[], &draft("QUOカード", "ビックカメラ", "2026-03-31"), at(9)).unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert!(matches!(committed, Committed::Added(_)));
        assert_eq!(committed.id(), &item.id);
        assert_eq!(item.title, "QUOカード");
        assert_eq!(item.company, "ビックカメラ");
        assert_eq!(item.expires_on, NaiveDate::from_ymd_opt(2026, 3, 31));
        assert!(!item.is_used);
        assert_eq!(item.quantity, None);
        assert_eq!(item.amount_yen, None);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_add_prepends() {
        let (items, _) = commit(&[], &draft("A", "X", ""), at(9)).unwrap();
        let (items, _) = commit(&items, &draft("B", "X", ""), at(10)).unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[test]
    fn test_add_trims_and_parses_fields() {
        let mut d = draft(" QUOカード ", " ビックカメラ ", "");
        d.quantity = " 2 ".to_string();
        d.amount_yen = "1000".to_string();
        d.memo = "  財布に入れた  ".to_string();

        let (items, _) = commit(&[], &d, at(9)).unwrap();
        let item = &items[0];
        assert_eq!(item.title, "QUOカード");
        assert_eq!(item.company, "ビックカメラ");
        assert_eq!(item.quantity, Some(2.0));
        assert_eq!(item.amount_yen, Some(1000.0));
        assert_eq!(item.memo, "財布に入れた");
        assert_eq!(item.expires_on, None);
    }

    #[test]
    fn test_unparsable_numbers_become_null() {
        let mut d = draft("A", "X", "");
        d.quantity = "たくさん".to_string();
        let (items, _) = commit(&[], &d, at(9)).unwrap();
        assert_eq!(items[0].quantity, None);
    }

    #[test]
    fn test_invalid_draft_leaves_list_alone() {
        let (items, _) = commit(&[], &draft("A", "X", ""), at(9)).unwrap();
        let result = commit(&items, &draft("", "X", ""), at(10));
        assert_eq!(result, Err(DraftError::MissingTitle));
    }

    #[test]
    fn test_edit_preserves_id_and_created_at() {
        let (items, _) = commit(&[], &draft("A", "X", ""), at(9)).unwrap();
        let original = items[0].clone();

        let mut edit = Draft::from_item(&original);
        edit.memo = "使った".to_string();
        let (items, committed) = commit(&items, &edit, at(11)).unwrap();

        assert_eq!(committed, Committed::Updated(original.id.clone()));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, original.id);
        assert_eq!(items[0].created_at, original.created_at);
        assert_eq!(items[0].updated_at, at(11));
        assert_eq!(items[0].memo, "使った");
        assert_eq!(items[0].title, original.title);
    }

    #[test]
    fn test_edit_leaves_other_items_untouched() {
        let (items, _) = commit(&[], &draft("A", "X", ""), at(9)).unwrap();
        let (items, _) = commit(&items, &draft("B", "Y", ""), at(10)).unwrap();
        let untouched = items[1].clone();

        let mut edit = Draft::from_item(&items[0]);
        edit.is_used = true;
        let (after, _) = commit(&items, &edit, at(12)).unwrap();

        assert_eq!(after[1], untouched);
        assert!(after[0].is_used);
    }

    #[test]
    fn test_edit_of_missing_item_re_adds_it() {
        let id = ItemId::try_new("gone".to_string()).unwrap();
        let mut d = draft("A", "X", "");
        d.id = Some(id.clone());

        let (items, committed) = commit(&[], &d, at(9)).unwrap();
        assert_eq!(committed, Committed::Added(id.clone()));
        assert_eq!(items[0].id, id);
    }

    #[test]
    fn test_from_item_round_trips_field_text() {
        let mut d = draft("A", "X", "2026-03-31");
        d.quantity = "2".to_string();
        d.amount_yen = "1500.5".to_string();
        let (items, _) = commit(&[], &d, at(9)).unwrap();

        let back = Draft::from_item(&items[0]);
        assert_eq!(back.expires_on, "2026-03-31");
        assert_eq!(back.quantity, "2");
        assert_eq!(back.amount_yen, "1500.5");
        assert_eq!(back.id, Some(items[0].id.clone()));
    }
}
