//! # Slot Availability
//!
//! Computes the appointment slots a patient can pick for one doctor over the
//! booking horizon.
//!
//! ## Algorithm
//!
//! For every day offset `0..horizon_days`:
//!
//! 1. Find where the day's walk starts ([`ServiceWindow::day_start`]).
//! 2. Step forward one slot length at a time while the slot starts before
//!    the closing time.
//! 3. Keep the slot unless the doctor already has that date and time booked.
//! 4. Emit the day only if at least one slot survived.
//!
//! The computation is pure. It is recomputed in full on every call and is
//! bounded by `horizon_days × (slots per day)`.

use chrono::{Days, NaiveDateTime};
use tracing::debug;

use crate::{
    clock::Clock,
    errors::{SlotError, SlotResult},
    format::{date_key, parse_date_key, TimeFormat},
    models::{
        booked::BookedSlots,
        slot::{DaySlotGroup, Slot},
        window::ServiceWindow,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotCalculator {
    window: ServiceWindow,
    format: TimeFormat,
}

impl SlotCalculator {
    /// Creates a calculator, rejecting windows that cannot hold a slot
    pub fn new(window: ServiceWindow, format: TimeFormat) -> SlotResult<Self> {
        window.validate()?;
        Ok(Self { window, format })
    }

    pub fn window(&self) -> &ServiceWindow {
        &self.window
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    /// Free slots for every day in the horizon, starting from the day of `now`
    ///
    /// Days without a single free slot are left out, so the result can be
    /// shorter than the horizon (and empty).
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - the horizon starting at `now` runs past the
    ///   last representable date
    pub fn available_slots(
        &self,
        now: NaiveDateTime,
        booked: &BookedSlots,
    ) -> SlotResult<Vec<DaySlotGroup>> {
        let horizon = Days::new(u64::from(self.window.horizon_days) + 1);
        if now.date().checked_add_days(horizon).is_none() {
            return Err(SlotError::Validation(format!(
                "Time {} is out of range for a {} day horizon",
                now, self.window.horizon_days
            )));
        }

        let step = self.window.slot_length();
        let mut days = Vec::new();

        for offset in 0..self.window.horizon_days {
            let (Some(date), Some(mut current)) = (
                now.date().checked_add_days(Days::new(u64::from(offset))),
                self.window.day_start(now, offset),
            ) else {
                break;
            };
            let end = self.window.day_end(date);

            let mut slots = Vec::new();
            while current < end {
                if !booked.is_booked(date, current.time()) {
                    slots.push(Slot {
                        date_time: current,
                        time: self.format.format(current.time()),
                    });
                }
                match current.checked_add_signed(step) {
                    Some(next) => current = next,
                    None => break,
                }
            }

            if !slots.is_empty() {
                days.push(DaySlotGroup {
                    date,
                    date_key: date_key(date),
                    slots,
                });
            }
        }

        debug!(
            %now,
            days = days.len(),
            slots = days.iter().map(DaySlotGroup::len).sum::<usize>(),
            booked = booked.len(),
            "Computed available slots"
        );

        Ok(days)
    }

    /// Same as [`SlotCalculator::available_slots`], reading `clock` exactly once
    pub fn available_slots_at(
        &self,
        clock: &dyn Clock,
        booked: &BookedSlots,
    ) -> SlotResult<Vec<DaySlotGroup>> {
        self.available_slots(clock.now(), booked)
    }

    /// Whether the wire-format `slot_date`/`slot_time` pair is currently offered
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - the date key or the time string cannot be
    ///   read, or `now` is out of range
    pub fn is_bookable(
        &self,
        now: NaiveDateTime,
        booked: &BookedSlots,
        slot_date: &str,
        slot_time: &str,
    ) -> SlotResult<bool> {
        let date = parse_date_key(slot_date).ok_or_else(|| {
            SlotError::Validation(format!("Invalid slot date '{}', expected D_M_YYYY", slot_date))
        })?;
        let time = TimeFormat::parse(slot_time).ok_or_else(|| {
            SlotError::Validation(format!("Invalid slot time '{}'", slot_time))
        })?;

        let offered = self
            .available_slots(now, booked)?
            .iter()
            .filter(|day| day.date == date)
            .flat_map(|day| day.slots.iter())
            .any(|slot| slot.date_time.time() == time);

        Ok(offered)
    }
}
