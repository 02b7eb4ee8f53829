//! # Clinic Slots Core
//!
//! Domain types and the slot availability calculation for the appointment
//! booking page. Everything here is synchronous and free of I/O; the HTTP
//! service in `clinic-slots-api` is a thin layer over it.
//!
//! - [`calculator`]: free slots for a doctor over the booking horizon
//! - [`picker`]: day/time selection around a calculator result
//! - [`format`]: date keys and display times shared with the booking backend
//! - [`models`]: booked slots, produced slots, clinic hours, booking payload

pub mod calculator;
pub mod clock;
pub mod errors;
pub mod format;
pub mod models;
pub mod picker;

pub use calculator::SlotCalculator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{SlotError, SlotResult};
pub use format::TimeFormat;
