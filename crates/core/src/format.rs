//! # Wire Formats
//!
//! Date keys and display times are the contract between the slot calculator
//! and the booking-submission backend. A booked slot is only excluded when
//! both sides agree on these formats, so every conversion between strings and
//! structured dates or times goes through this module.
//!
//! - Date keys look like `5_6_2025` (day, month, year; no zero padding).
//! - Display times are either `2:30 PM` ([`TimeFormat::TwelveHour`]) or
//!   `14:30` ([`TimeFormat::TwentyFourHour`]).

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::SlotError;

/// Display format used for slot times on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `2:30 PM`, the short time format of an en-US browser
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// `14:30`
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    /// Formats a time of day for display and for the booking backend
    pub fn format(&self, time: NaiveTime) -> String {
        match self {
            TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        }
    }

    /// Parses a display time back into a time of day
    ///
    /// Both 12-hour and 24-hour strings are accepted, since booked entries may
    /// have been written by a client with a different locale. Browsers emit a
    /// narrow no-break space before the AM/PM marker; it is treated like an
    /// ordinary space.
    pub fn parse(value: &str) -> Option<NaiveTime> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|c| match c {
                '\u{202f}' | '\u{a0}' => ' ',
                other => other,
            })
            .collect();

        let upper = normalized.to_ascii_uppercase();
        if upper.ends_with("AM") || upper.ends_with("PM") {
            let (clock, marker) = upper.split_at(upper.len() - 2);
            let candidate = format!("{} {}", clock.trim_end(), marker);
            NaiveTime::parse_from_str(&candidate, "%I:%M %p").ok()
        } else {
            NaiveTime::parse_from_str(&normalized, "%H:%M").ok()
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::TwelveHour => write!(f, "12h"),
            TimeFormat::TwentyFourHour => write!(f, "24h"),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "12h" | "12" | "12-hour" => Ok(TimeFormat::TwelveHour),
            "24h" | "24" | "24-hour" => Ok(TimeFormat::TwentyFourHour),
            other => Err(SlotError::Configuration(format!(
                "Unknown time format '{}', expected '12h' or '24h'",
                other
            ))),
        }
    }
}

/// Builds the `D_M_YYYY` key the booking backend files booked slots under
pub fn date_key(date: NaiveDate) -> String {
    format!("{}_{}_{}", date.day(), date.month(), date.year())
}

/// Parses a `D_M_YYYY` key, returning `None` for anything that is not a real date
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let mut parts = key.trim().split('_');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
