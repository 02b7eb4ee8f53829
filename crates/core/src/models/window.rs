use std::{fmt, str::FromStr};

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};

/// How the first slot of the current day is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TodayRule {
    /// Hour becomes `now.hour + 1` once past the opening hour, minute snaps
    /// to `:30` when `now.minute > 30` and to `:00` otherwise.
    ///
    /// This is what the booking page has always shown. It is not a ceiling:
    /// at 10:05 the first slot is 10:00, and at 09:45 it is 10:30. The start
    /// never precedes the opening time.
    #[default]
    Legacy,
    /// First slot boundary (aligned to the opening time) at or after `now`
    NextSlot,
}

impl fmt::Display for TodayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodayRule::Legacy => write!(f, "legacy"),
            TodayRule::NextSlot => write!(f, "next-slot"),
        }
    }
}

impl FromStr for TodayRule {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(TodayRule::Legacy),
            "next-slot" | "next_slot" => Ok(TodayRule::NextSlot),
            other => Err(SlotError::Configuration(format!(
                "Unknown today start rule '{}', expected 'legacy' or 'next-slot'",
                other
            ))),
        }
    }
}

/// Daily clinic hours and the booking grid laid over them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWindow {
    /// First bookable time on every day after today
    pub opens_at: NaiveTime,
    /// Slots must start strictly before this time
    pub closes_at: NaiveTime,
    /// Length of one slot and the step between slots
    pub slot_minutes: u32,
    /// Number of calendar days offered, today included
    pub horizon_days: u32,
    #[serde(default)]
    pub today_rule: TodayRule,
}

impl Default for ServiceWindow {
    fn default() -> Self {
        Self {
            opens_at: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            closes_at: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_minutes: 30,
            horizon_days: 7,
            today_rule: TodayRule::Legacy,
        }
    }
}

impl ServiceWindow {
    /// Longest horizon accepted; one year of days
    pub const MAX_HORIZON_DAYS: u32 = 366;

    /// Checks that the window describes at least one possible slot
    pub fn validate(&self) -> SlotResult<()> {
        if self.closes_at <= self.opens_at {
            return Err(SlotError::Configuration(format!(
                "Closing time {} must be after opening time {}",
                self.closes_at, self.opens_at
            )));
        }
        if self.slot_minutes == 0 || self.slot_minutes > 24 * 60 {
            return Err(SlotError::Configuration(format!(
                "Slot length must be between 1 and 1440 minutes, got {}",
                self.slot_minutes
            )));
        }
        if self.horizon_days == 0 || self.horizon_days > Self::MAX_HORIZON_DAYS {
            return Err(SlotError::Configuration(format!(
                "Booking horizon must be between 1 and {} days, got {}",
                Self::MAX_HORIZON_DAYS,
                self.horizon_days
            )));
        }
        Ok(())
    }

    pub fn slot_length(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_minutes))
    }

    /// End of the bookable period on `date`; slots start strictly before it
    pub fn day_end(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.closes_at)
    }

    /// Where the slot walk for the day `day_offset` days after `now` begins
    ///
    /// `day_offset` 0 is the day of `now` and uses [`TodayRule`]; every later
    /// day starts at the opening time. The result may land at or after
    /// [`ServiceWindow::day_end`], or even on the next calendar day, in which
    /// case the day has no slots. Returns `None` when the start falls outside
    /// the range of representable dates.
    pub fn day_start(&self, now: NaiveDateTime, day_offset: u32) -> Option<NaiveDateTime> {
        let date = now.date().checked_add_days(Days::new(u64::from(day_offset)))?;
        if day_offset > 0 {
            return Some(date.and_time(self.opens_at));
        }

        match self.today_rule {
            TodayRule::Legacy => {
                let hour = if now.hour() > self.opens_at.hour() {
                    now.hour() + 1
                } else {
                    self.opens_at.hour()
                };
                let minute = if now.minute() > 30 { 30 } else { 0 };
                let start = date
                    .and_time(NaiveTime::MIN)
                    .checked_add_signed(Duration::hours(i64::from(hour)) + Duration::minutes(minute))?;
                // Only reachable when opening is not on the hour, e.g. 08:30
                Some(start.max(date.and_time(self.opens_at)))
            }
            TodayRule::NextSlot => {
                let open = date.and_time(self.opens_at);
                if now <= open {
                    return Some(open);
                }
                let step = self.slot_length();
                let elapsed = now - open;
                let mut steps = elapsed.num_seconds() / step.num_seconds();
                if open.checked_add_signed(step * (steps as i32))? < now {
                    steps += 1;
                }
                open.checked_add_signed(step * (steps as i32))
            }
        }
    }
}
