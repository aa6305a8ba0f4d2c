use super::*;
use crate::storage::MemoryBackend;
use chrono::{Duration, TimeZone};
use std::cell::Cell;

mod common {
    use super::*;

    pub(super) fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap() + Duration::minutes(minute)
    }

    pub(super) fn book() -> MemoBook<MemoryBackend> {
        MemoBook::open(MemoryBackend::new(), at(0)).unwrap()
    }

    pub(super) fn tag(id: &str) -> TagId {
        TagId::try_new(id.to_string()).unwrap()
    }

    pub(super) fn draft(name: &str, months: &[u8], tags: &[&str]) -> MemoDraft {
        MemoDraft {
            name: name.to_string(),
            months: months.to_vec(),
            tag_ids: tags.iter().map(|t| tag(t)).collect(),
            ..MemoDraft::new()
        }
    }

    pub(super) fn yes(_: &str) -> bool {
        true
    }

    pub(super) fn no(_: &str) -> bool {
        false
    }
}

mod open {
    use super::common::*;
    use super::*;

    #[test]
    fn test_seeds_default_tags_once() {
        let backend = MemoryBackend::new();
        let book = MemoBook::open(backend.clone(), at(0)).unwrap();
        assert_eq!(book.tags().to_vec(), default_tags());

        let early = tag("early");
        book.delete_tag(&early, &yes).unwrap();
        let reopened = MemoBook::open(backend, at(1)).unwrap();
        assert_eq!(reopened.tags().len(), 4);
    }

    #[test]
    fn test_emptied_registry_stays_empty() {
        let backend = MemoryBackend::new();
        backend.set(Tag::KEY, "[]").unwrap();
        let book = MemoBook::open(backend, at(0)).unwrap();
        assert!(book.tags().is_empty());
    }

    #[test]
    fn test_migrates_v1_items_with_enum_tags() {
        let backend = MemoryBackend::new();
        backend
            .set(
                "yutai_memo_items_v1",
                r#"[{"id":"m1","name":"オリックス","months":[3,"9"],"tags":["early","must"],"priority":5,"oneShareHold":true,"memo":"","updatedAt":"2025-01-01T00:00:00Z"}]"#,
            )
            .unwrap();

        let book = MemoBook::open(backend, at(0)).unwrap();
        let items = book.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].months, [3, 9]);
        assert_eq!(items[0].tag_ids, [tag("early"), tag("must")]);
        assert_eq!(items[0].priority, crate::types::Priority::Normal);
        assert_eq!(book.tag_name(&items[0].tag_ids[1]), "鉄板");
    }
}

mod items {
    use super::common::*;
    use super::*;

    #[test]
    fn test_add_prepends_and_edit_replaces() {
        let book = book();
        let first = book.save_draft(&draft("A", &[3], &[]), at(1)).unwrap();
        let second = book.save_draft(&draft("B", &[6], &[]), at(2)).unwrap();
        assert_eq!(&book.items()[0].id, second.id());

        let mut edit = MemoDraft::from_item(&book.get(first.id()).unwrap());
        edit.name = "A2".to_string();
        book.save_draft(&edit, at(3)).unwrap();

        let items = book.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "A2");
        assert_eq!(items[1].updated_at, at(3));
    }

    #[test]
    fn test_invalid_draft_is_rejected() {
        let book = book();
        let err = book.save_draft(&draft("A", &[], &[]), at(1)).unwrap_err();
        assert!(matches!(err, MemoError::Draft(MemoDraftError::NoMonths)));
        assert!(book.items().is_empty());
    }

    #[test]
    fn test_remove_is_confirmed() {
        let book = book();
        let id = book
            .save_draft(&draft("A", &[3], &[]), at(1))
            .unwrap()
            .id()
            .clone();

        assert_eq!(book.remove(&id, &no).unwrap(), Outcome::Declined);
        assert_eq!(book.items().len(), 1);
        assert_eq!(book.remove(&id, &yes).unwrap(), Outcome::Applied);
        assert!(book.items().is_empty());
    }
}

mod tags {
    use super::common::*;
    use super::*;

    #[test]
    fn test_add_and_rename() {
        let book = book();
        assert_eq!(book.add_tag("   ", at(1)).unwrap(), None);

        let id = book.add_tag(" 優待新設 ", at(1)).unwrap().unwrap();
        let tags = book.tags();
        assert_eq!(tags.len(), 6);
        assert_eq!(tags[0].id, id);
        assert_eq!(tags[0].name, "優待新設");
        assert_eq!(tags[0].created_at, at(1).timestamp_millis());

        assert!(!book.rename_tag(&id, "  ").unwrap());
        assert!(book.rename_tag(&id, "新設").unwrap());
        assert_eq!(book.tag_name(&id), "新設");
    }

    #[test]
    fn test_rename_unknown_tag_fails() {
        let book = book();
        assert!(matches!(
            book.rename_tag(&tag("nope"), "x"),
            Err(MemoError::TagNotFound(_))
        ));
    }

    #[test]
    fn test_delete_strips_ids_but_keeps_items() {
        let book = book();
        book.save_draft(&draft("A", &[3], &["early", "must"]), at(1))
            .unwrap();
        book.save_draft(&draft("B", &[6], &["tenure"]), at(2)).unwrap();
        let before = book.items();

        assert_eq!(
            book.delete_tag(&tag("early"), &no).unwrap(),
            Outcome::Declined
        );
        assert!(Rc::ptr_eq(&before, &book.items()));

        assert_eq!(
            book.delete_tag(&tag("early"), &yes).unwrap(),
            Outcome::Applied
        );
        let items = book.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].tag_ids, [tag("must")]);
        assert_eq!(items[1].updated_at, before[1].updated_at);
        assert_eq!(items[0], before[0]);
        assert!(book.tags().iter().all(|t| t.id != tag("early")));
    }

    #[test]
    fn test_subscribers_hear_both_stores() {
        let book = book();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _sub = book.subscribe(move || c.set(c.get() + 1));

        book.add_tag("x", at(1)).unwrap();
        book.save_draft(&draft("A", &[3], &[]), at(2)).unwrap();
        assert_eq!(count.get(), 2);
    }
}

mod search {
    use super::common::*;
    use super::*;

    fn seeded() -> MemoBook<MemoryBackend> {
        let book = book();
        book.save_draft(&draft("オリックス", &[3, 9], &["must"]), at(1))
            .unwrap();
        book.save_draft(&draft("KDDI", &[3], &["early"]), at(3)).unwrap();
        let mut d = draft("イオン", &[2, 8], &[]);
        d.tenure_rule = "半年以上".to_string();
        book.save_draft(&d, at(2)).unwrap();
        book
    }

    fn names(items: &[MemoItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_default_filter_sorts_by_update() {
        let book = seeded();
        let found = book.filter(&MemoFilter::default());
        assert_eq!(names(&found), ["KDDI", "イオン", "オリックス"]);
    }

    #[test]
    fn test_month_and_tag_narrow() {
        let book = seeded();
        let by_month = book.filter(&MemoFilter {
            month: Some(3),
            ..MemoFilter::default()
        });
        assert_eq!(names(&by_month), ["KDDI", "オリックス"]);

        let by_tag = book.filter(&MemoFilter {
            month: Some(3),
            tag: Some(tag("must")),
            ..MemoFilter::default()
        });
        assert_eq!(names(&by_tag), ["オリックス"]);
    }

    #[test]
    fn test_text_matches_tag_names_and_fields() {
        let book = seeded();
        let by_tag_name = book.filter(&MemoFilter {
            query: "鉄板".to_string(),
            ..MemoFilter::default()
        });
        assert_eq!(names(&by_tag_name), ["オリックス"]);

        let by_rule = book.filter(&MemoFilter {
            query: "半年".to_string(),
            ..MemoFilter::default()
        });
        assert_eq!(names(&by_rule), ["イオン"]);

        let by_case = book.filter(&MemoFilter {
            query: "kddi".to_string(),
            ..MemoFilter::default()
        });
        assert_eq!(names(&by_case), ["KDDI"]);
    }
}
