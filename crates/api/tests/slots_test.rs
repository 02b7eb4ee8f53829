
use axum::http::StatusCode;
use clinic_slots_api::{
    config::ApiConfig,
    handlers::slots::{CheckSlotResponse, SlotsResponse},
};
use clinic_slots_core::{models::booked::BookedSlots, TimeFormat};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{at, default_calculator, TestContext};

#[tokio::test]
async fn test_list_slots_uses_server_clock() {
    let ctx = TestContext::new(at(14, 10));

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({ "slots_booked": {} }))
        .await;

    response.assert_status_ok();
    let body: SlotsResponse = response.json();
    assert_eq!(body.days.len(), 7);
    assert_eq!(body.days[0].date_key, "5_6_2025");
    assert_eq!(body.days[0].slots[0].time, "3:00 PM");
    assert_eq!(body.days[0].slots[0].date_time, at(15, 0));
    assert_eq!(body.days[1].slots.len(), 22);
}

#[tokio::test]
async fn test_list_slots_matches_calculator() {
    let ctx = TestContext::new(at(8, 0));
    let booked = json!({ "5_6_2025": ["10:00 AM", "10:30 AM"], "9_6_2025": ["4:00 PM"] });

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({ "slots_booked": booked, "now": "2025-06-05T09:00:00" }))
        .await;

    response.assert_status_ok();
    let body: SlotsResponse = response.json();
    let expected = default_calculator()
        .available_slots(at(9, 0), &BookedSlots::from_wire(&booked))
        .unwrap();
    assert_eq!(body.days, expected);
    assert_eq!(body.days[0].slots[0].time, "11:00 AM");
}

#[tokio::test]
async fn test_late_evening_omits_today() {
    let ctx = TestContext::new(at(20, 45));

    let response = ctx.server.post("/api/slots").json(&json!({})).await;

    response.assert_status_ok();
    let body: SlotsResponse = response.json();
    assert_eq!(body.days.len(), 6);
    assert_eq!(body.days[0].date_key, "6_6_2025");
}

#[rstest]
#[case::list(json!(["10:00 AM"]))]
#[case::string_value(json!({ "5_6_2025": "10:00 AM" }))]
#[case::numbers(json!({ "5_6_2025": [10, 1030] }))]
#[case::bad_key(json!({ "June 5": ["10:00 AM"] }))]
#[tokio::test]
async fn test_malformed_bookings_are_treated_as_free(#[case] slots_booked: Value) {
    let ctx = TestContext::new(at(9, 0));

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({ "slots_booked": slots_booked }))
        .await;

    response.assert_status_ok();
    let body: SlotsResponse = response.json();
    assert_eq!(body.days.len(), 7);
    assert!(body.days.iter().all(|day| day.slots.len() == 22));
}

#[tokio::test]
async fn test_twenty_four_hour_configuration() {
    let config = ApiConfig {
        time_format: TimeFormat::TwentyFourHour,
        ..ApiConfig::default()
    };
    let ctx = TestContext::with_config(config, at(9, 0));

    let response = ctx
        .server
        .post("/api/slots")
        .json(&json!({ "slots_booked": { "5_6_2025": ["10:00"] } }))
        .await;

    let body: SlotsResponse = response.json();
    assert_eq!(body.days[0].slots[0].time, "10:30");
    assert_eq!(body.days[0].slots.last().unwrap().time, "20:30");
}

#[rstest]
#[case::free("5_6_2025", "10:30 AM", true)]
#[case::booked("5_6_2025", "10:00 AM", false)]
#[case::off_grid("5_6_2025", "10:45 AM", false)]
#[case::after_closing("5_6_2025", "9:00 PM", false)]
#[case::beyond_horizon("12_6_2025", "10:30 AM", false)]
#[case::later_day("11_6_2025", "8:30 PM", true)]
#[tokio::test]
async fn test_check_slot(#[case] slot_date: &str, #[case] slot_time: &str, #[case] available: bool) {
    let ctx = TestContext::new(at(9, 0));

    let response = ctx
        .server
        .post("/api/slots/check")
        .json(&json!({
            "slots_booked": { "5_6_2025": ["10:00 AM"] },
            "slot_date": slot_date,
            "slot_time": slot_time,
        }))
        .await;

    response.assert_status_ok();
    let body: CheckSlotResponse = response.json();
    assert_eq!(body.available, available);
}

#[tokio::test]
async fn test_check_slot_in_the_past_today() {
    let ctx = TestContext::new(at(14, 45));

    let response = ctx
        .server
        .post("/api/slots/check")
        .json(&json!({ "slot_date": "5_6_2025", "slot_time": "3:00 PM" }))
        .await;

    let body: CheckSlotResponse = response.json();
    assert!(!body.available);
}

#[rstest]
#[case::padded_iso_date("2025-06-05", "10:30 AM")]
#[case::words_for_time("5_6_2025", "half past ten")]
#[tokio::test]
async fn test_check_slot_rejects_malformed_selection(#[case] slot_date: &str, #[case] slot_time: &str) {
    let ctx = TestContext::new(at(9, 0));

    let response = ctx
        .server
        .post("/api/slots/check")
        .json(&json!({ "slot_date": slot_date, "slot_time": slot_time }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
}

#[rstest]
#[case::list("/api/slots")]
#[case::check("/api/slots/check")]
#[tokio::test]
async fn test_now_at_end_of_calendar_is_bad_request(#[case] path: &str) {
    let ctx = TestContext::new(at(9, 0));

    let response = ctx
        .server
        .post(path)
        .json(&json!({
            "slots_booked": {},
            "slot_date": "30_12_262142",
            "slot_time": "10:00 AM",
            "now": "+262142-12-30T09:00:00"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
}

#[tokio::test]
async fn test_health_reports_wire_format() {
    let ctx = TestContext::new(at(9, 0));

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["time_format"], "12h");
    assert_eq!(body["window"]["opens_at"], "10:00:00");
    assert_eq!(body["window"]["closes_at"], "21:00:00");
    assert_eq!(body["window"]["slot_minutes"], 30);
    assert_eq!(body["window"]["today_rule"], "legacy");
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::new(at(9, 0));

    let response = ctx.server.get("/version").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
