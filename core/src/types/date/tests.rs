use super::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_strict_accepts_canonical_form() {
    assert_eq!(parse_strict("2026-03-31"), Some(ymd(2026, 3, 31)));
}

#[test]
fn test_parse_strict_rejects_other_shapes() {
    for input in [
        "",
        "2026-3-31",
        "2026/03/31",
        "26-03-31",
        "2026-03-31T00:00:00",
        " 2026-03-31",
        "２０２６-03-31",
        "abcd-ef-gh",
    ] {
        assert_eq!(parse_strict(input), None, "input {input:?}");
    }
}

#[test]
fn test_parse_strict_rejects_impossible_dates() {
    assert_eq!(parse_strict("2026-02-30"), None);
    assert_eq!(parse_strict("2026-13-01"), None);
}

#[test]
fn test_month_boundaries() {
    assert_eq!(first_of_month(ymd(2026, 10, 19)), ymd(2026, 10, 1));
    assert_eq!(first_of_next_month(ymd(2026, 10, 19)), ymd(2026, 11, 1));
    assert_eq!(first_of_next_month(ymd(2026, 12, 31)), ymd(2027, 1, 1));
    assert!(same_month(ymd(2026, 10, 1), ymd(2026, 10, 31)));
    assert!(!same_month(ymd(2026, 10, 1), ymd(2025, 10, 1)));
}
