// Shared test support for the integration and contract targets.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;

#![allow(dead_code)]

pub mod fake_row_source;

pub use fake_row_source::*;

use chrono::{DateTime, TimeZone, Utc};

/// Fixed evaluation instant used across the report tests
pub fn june_15_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}
