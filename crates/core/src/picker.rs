//! Selection state the booking page keeps around a calculator result.
//!
//! Results can arrive out of order (new booked data for the doctor and a day
//! rollover both trigger a recompute). Every refresh takes a [`RefreshTicket`]
//! and only the most recently issued ticket may install its result.

use tracing::debug;

use crate::{
    errors::{SlotError, SlotResult},
    models::{booking::BookingRequest, slot::DaySlotGroup},
};

/// Proof that a refresh was started; see [`SlotPicker::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SlotPicker {
    doctor_id: Option<String>,
    days: Vec<DaySlotGroup>,
    selected_day: usize,
    selected_time: Option<String>,
    issued: u64,
}

impl SlotPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a recompute for `doctor_id`
    ///
    /// Switching to another doctor drops the previous doctor's slots and the
    /// current selection right away.
    pub fn begin_refresh(&mut self, doctor_id: &str) -> RefreshTicket {
        if self.doctor_id.as_deref() != Some(doctor_id) {
            self.doctor_id = Some(doctor_id.to_string());
            self.days.clear();
            self.reset_selection();
        }
        self.issued += 1;
        RefreshTicket {
            generation: self.issued,
        }
    }

    /// Installs `days` if `ticket` is the latest refresh, returning whether it did
    pub fn apply(&mut self, ticket: RefreshTicket, days: Vec<DaySlotGroup>) -> bool {
        if ticket.generation != self.issued {
            debug!(
                stale = ticket.generation,
                latest = self.issued,
                "Discarding stale slot refresh"
            );
            return false;
        }
        self.days = days;
        self.reset_selection();
        true
    }

    pub fn days(&self) -> &[DaySlotGroup] {
        &self.days
    }

    pub fn doctor_id(&self) -> Option<&str> {
        self.doctor_id.as_deref()
    }

    pub fn selected_day(&self) -> usize {
        self.selected_day
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    /// Selects the day at `index`; any chosen time is cleared
    pub fn select_day(&mut self, index: usize) -> SlotResult<()> {
        if index >= self.days.len() {
            return Err(SlotError::Validation(format!(
                "Day {} is out of range, {} days are available",
                index,
                self.days.len()
            )));
        }
        self.selected_day = index;
        self.selected_time = None;
        Ok(())
    }

    /// Selects a time offered on the currently selected day
    pub fn select_time(&mut self, time: &str) -> SlotResult<()> {
        let day = self.days.get(self.selected_day).ok_or_else(|| {
            SlotError::Validation("No available days to choose a time from".to_string())
        })?;
        if day.find_time(time).is_none() {
            return Err(SlotError::Validation(format!(
                "{} is not available on {}",
                time, day.date_key
            )));
        }
        self.selected_time = Some(time.to_string());
        Ok(())
    }

    /// Builds the booking payload for the current selection
    pub fn booking_request(&self) -> SlotResult<BookingRequest> {
        let doc_id = self
            .doctor_id
            .clone()
            .ok_or_else(|| SlotError::Validation("No doctor selected".to_string()))?;
        let slot_time = self
            .selected_time
            .clone()
            .ok_or_else(|| SlotError::Validation("Please select a time slot".to_string()))?;
        let day = self.days.get(self.selected_day).ok_or_else(|| {
            SlotError::NotFound(format!("Selected day {} no longer exists", self.selected_day))
        })?;

        Ok(BookingRequest {
            doc_id,
            slot_date: day.date_key.clone(),
            slot_time,
        })
    }

    fn reset_selection(&mut self) {
        self.selected_day = 0;
        self.selected_time = None;
    }
}
