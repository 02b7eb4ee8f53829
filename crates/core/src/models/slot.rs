use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One bookable appointment start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Wall-clock start of the slot in the clinic's local time
    pub date_time: NaiveDateTime,
    /// `date_time` rendered in the configured display format
    pub time: String,
}

/// The free slots of one calendar day, earliest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlotGroup {
    pub date: NaiveDate,
    /// `D_M_YYYY` key the booking backend expects as `slot_date`
    pub date_key: String,
    pub slots: Vec<Slot>,
}

impl DaySlotGroup {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn find_time(&self, time: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.time == time)
    }
}
