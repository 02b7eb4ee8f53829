use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;
use tracing::warn;

use crate::format::{parse_date_key, TimeFormat};

/// Slots a doctor already has booked, keyed by calendar date
///
/// The booking backend sends these as `{"5_6_2025": ["10:00 AM", ...]}`.
/// Internally the strings are parsed once into dates and times so lookups do
/// not depend on how a particular client rendered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedSlots {
    by_date: HashMap<NaiveDate, BTreeSet<NaiveTime>>,
    skipped: usize,
}

impl BookedSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the doctor's `slots_booked` value as sent by the backend
    ///
    /// Anything that does not follow the contract is logged and treated as
    /// "no booking": a non-object top level, a date key that is not a real
    /// `D_M_YYYY` date, a value that is not an array, or an array entry that is
    /// not a parseable time string. `null` and a missing value mean no
    /// bookings at all and are not reported.
    pub fn from_wire(value: &Value) -> Self {
        let mut booked = Self::new();

        let entries = match value {
            Value::Null => return booked,
            Value::Object(entries) => entries,
            other => {
                warn!(kind = json_kind(other), "slots_booked is not an object, ignoring it");
                booked.skipped += 1;
                return booked;
            }
        };

        for (key, times) in entries {
            let Some(date) = parse_date_key(key) else {
                warn!(date_key = %key, "Ignoring booked slots under malformed date key");
                booked.skipped += 1;
                continue;
            };

            let Value::Array(times) = times else {
                warn!(
                    date_key = %key,
                    kind = json_kind(times),
                    "Booked slots for date are not a list, treating date as free"
                );
                booked.skipped += 1;
                continue;
            };

            for time in times {
                match time.as_str().and_then(TimeFormat::parse) {
                    Some(parsed) => booked.insert(date, parsed),
                    None => {
                        warn!(date_key = %key, entry = %time, "Ignoring unreadable booked time");
                        booked.skipped += 1;
                    }
                }
            }
        }

        booked
    }

    pub fn insert(&mut self, date: NaiveDate, time: NaiveTime) {
        self.by_date.entry(date).or_default().insert(time);
    }

    pub fn is_booked(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.by_date
            .get(&date)
            .is_some_and(|times| times.contains(&time))
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.values().all(BTreeSet::is_empty)
    }

    /// Number of booked slots across all dates
    pub fn len(&self) -> usize {
        self.by_date.values().map(BTreeSet::len).sum()
    }

    /// Entries dropped by [`BookedSlots::from_wire`] for breaking the contract
    pub fn skipped_entries(&self) -> usize {
        self.skipped
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
