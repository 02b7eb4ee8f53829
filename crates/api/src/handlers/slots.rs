//! # Slot Handlers
//!
//! Endpoints that run the slot availability calculation for one doctor. The
//! caller supplies the doctor's `slots_booked` map exactly as the booking
//! backend stores it; the service keeps no state of its own.
//!
//! When the request carries no `now`, the server clock is read once per
//! request so every day in the response is computed against the same instant.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::NaiveDateTime;
use clinic_slots_core::models::{booked::BookedSlots, slot::DaySlotGroup};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{middleware::error_handling::AppError, ApiState};

/// Body of `POST /api/slots`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlotsRequest {
    /// The doctor's booked slots, `{"D_M_YYYY": ["10:00 AM", ...]}`
    #[serde(default)]
    pub slots_booked: Value,

    /// Wall-clock time to compute from; defaults to the server clock
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlotsResponse {
    pub days: Vec<DaySlotGroup>,
}

/// Body of `POST /api/slots/check`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckSlotRequest {
    #[serde(default)]
    pub slots_booked: Value,

    /// Date key of the chosen day, `D_M_YYYY`
    pub slot_date: String,

    /// Chosen time as displayed to the patient
    pub slot_time: String,

    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckSlotResponse {
    pub available: bool,
}

/// Lists the free slots for the booking horizon
///
/// # Endpoint
///
/// ```text
/// POST /api/slots
/// { "slots_booked": { "5_6_2025": ["10:00 AM"] }, "now": "2025-06-05T09:00:00" }
/// ```
///
/// Malformed `slots_booked` entries are ignored (treated as free) and logged.
///
/// # Errors
///
/// * `SlotError::Validation` - `now` is too close to the end of the calendar
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SlotsRequest>,
) -> Result<Json<SlotsResponse>, AppError> {
    let booked = read_booked(&request.slots_booked);
    let now = request.now.unwrap_or_else(|| state.clock.now());

    let days = state.calculator.available_slots(now, &booked)?;
    debug!(%now, days = days.len(), "Listed slots");

    Ok(Json(SlotsResponse { days }))
}

/// Confirms that a chosen date and time are still on offer
///
/// # Endpoint
///
/// ```text
/// POST /api/slots/check
/// { "slots_booked": {...}, "slot_date": "5_6_2025", "slot_time": "10:30 AM" }
/// ```
///
/// # Errors
///
/// * `SlotError::Validation` - `slot_date`, `slot_time` or `now` cannot be used
pub async fn check_slot(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CheckSlotRequest>,
) -> Result<Json<CheckSlotResponse>, AppError> {
    let booked = read_booked(&request.slots_booked);
    let now = request.now.unwrap_or_else(|| state.clock.now());

    let available = state.calculator.is_bookable(
        now,
        &booked,
        &request.slot_date,
        &request.slot_time,
    )?;

    Ok(Json(CheckSlotResponse { available }))
}

fn read_booked(value: &Value) -> BookedSlots {
    let booked = BookedSlots::from_wire(value);
    if booked.skipped_entries() > 0 {
        warn!(
            skipped = booked.skipped_entries(),
            "Request carried malformed booked slots"
        );
    }
    booked
}
