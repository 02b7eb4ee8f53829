use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use clinic_slots_core::{
    format::{date_key, parse_date_key},
    models::booked::BookedSlots,
    TimeFormat,
};

fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test_log::test]
fn test_reads_backend_shape() {
    let booked = BookedSlots::from_wire(&json!({
        "5_6_2025": ["10:00 AM", "10:30 AM"],
        "12_12_2025": ["7:30 PM"]
    }));

    assert_eq!(booked.len(), 3);
    assert_eq!(booked.skipped_entries(), 0);
    assert!(booked.is_booked(date(5, 6, 2025), hm(10, 0)));
    assert!(booked.is_booked(date(5, 6, 2025), hm(10, 30)));
    assert!(booked.is_booked(date(12, 12, 2025), hm(19, 30)));
    assert!(!booked.is_booked(date(5, 6, 2025), hm(11, 0)));
    assert!(!booked.is_booked(date(6, 6, 2025), hm(10, 0)));
}

#[rstest]
#[case::null(Value::Null)]
#[case::empty(json!({}))]
#[case::empty_list(json!({ "5_6_2025": [] }))]
fn test_absent_bookings_are_empty(#[case] value: Value) {
    let booked = BookedSlots::from_wire(&value);

    assert!(booked.is_empty());
    assert_eq!(booked.skipped_entries(), 0);
}

#[rstest]
#[case::top_level_list(json!(["10:00 AM"]), 1)]
#[case::top_level_string(json!("5_6_2025"), 1)]
#[case::value_not_a_list(json!({ "5_6_2025": "10:00 AM" }), 1)]
#[case::value_is_object(json!({ "5_6_2025": { "time": "10:00 AM" } }), 1)]
#[case::bad_date_key(json!({ "2025-06-05": ["10:00 AM"] }), 1)]
#[case::impossible_date(json!({ "31_2_2025": ["10:00 AM"] }), 1)]
#[case::non_string_entries(json!({ "5_6_2025": [1030, null, true] }), 3)]
#[case::unreadable_time(json!({ "5_6_2025": ["ten o'clock"] }), 1)]
fn test_malformed_entries_count_as_free(#[case] value: Value, #[case] skipped: usize) {
    let booked = BookedSlots::from_wire(&value);

    assert!(booked.is_empty());
    assert_eq!(booked.skipped_entries(), skipped);
}

#[test_log::test]
fn test_malformed_entries_do_not_hide_valid_ones() {
    let booked = BookedSlots::from_wire(&json!({
        "5_6_2025": ["10:00 AM", 42, "2:00 PM"],
        "6_6_2025": "everything",
        "bogus": ["11:00 AM"]
    }));

    assert_eq!(booked.len(), 2);
    assert_eq!(booked.skipped_entries(), 3);
    assert!(booked.is_booked(date(5, 6, 2025), hm(10, 0)));
    assert!(booked.is_booked(date(5, 6, 2025), hm(14, 0)));
    assert!(!booked.is_booked(date(6, 6, 2025), hm(10, 0)));
    assert!(!booked.is_booked(date(5, 6, 2025), hm(11, 0)));
}

#[rstest]
#[case(date(5, 6, 2025), "5_6_2025")]
#[case(date(1, 1, 2026), "1_1_2026")]
#[case(date(31, 12, 2025), "31_12_2025")]
fn test_date_keys_are_not_padded(#[case] day: NaiveDate, #[case] key: &str) {
    assert_eq!(date_key(day), key);
    assert_eq!(parse_date_key(key), Some(day));
}

#[rstest]
#[case::padded_day("05_6_2025")]
#[case::padded_month("5_06_2025")]
#[case::padded_both("05_06_2025")]
fn test_zero_padded_date_keys_still_match(#[case] key: &str) {
    assert_eq!(parse_date_key(key), Some(date(5, 6, 2025)));

    let booked = BookedSlots::from_wire(&json!({ key: ["10:00 AM"] }));
    assert_eq!(booked.skipped_entries(), 0);
    assert!(booked.is_booked(date(5, 6, 2025), hm(10, 0)));
}

#[test]
fn test_time_format_names() {
    assert_eq!("12h".parse::<TimeFormat>().unwrap(), TimeFormat::TwelveHour);
    assert_eq!("24H".parse::<TimeFormat>().unwrap(), TimeFormat::TwentyFourHour);
    assert!("locale".parse::<TimeFormat>().is_err());
    assert_eq!(TimeFormat::TwentyFourHour.to_string(), "24h");
}
