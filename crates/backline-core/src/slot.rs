//! # Slot Module
//!
//! Wall-clock times and bookable time slots.
//!
//! ## Why Not `chrono::NaiveTime`?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  A rehearsal slot may run up to midnight: 22:00–24:00.              │
//! │                                                                     │
//! │  NaiveTime cannot represent 24:00, and encoding midnight-end as     │
//! │  00:00 breaks every ordering comparison (00:00 < 22:00). The        │
//! │  system this replaces stored "00:00" and patched it to 24 at each   │
//! │  comparison site.                                                   │
//! │                                                                     │
//! │  WallTime is a plain count of minutes since midnight, 0..=1440,     │
//! │  so 24:00 is an ordinary, ordered value.                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlap Rule
//! Slots are half-open intervals `[start, end)`. Two slots on the same
//! date overlap iff `a.start < b.end && b.start < a.end`; back-to-back
//! slots (one ending exactly when the next starts) do NOT overlap.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes in a full day; the highest valid `WallTime`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

// =============================================================================
// WallTime
// =============================================================================

/// A day-local wall-clock time with no timezone, as minutes since midnight.
///
/// Parses from and serializes to `"HH:MM"`. `"24:00"` is valid and denotes
/// end-of-day, so it can only meaningfully appear as a slot's end.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct WallTime(u16);

impl WallTime {
    /// End-of-day, one past the last bookable minute.
    pub const END_OF_DAY: WallTime = WallTime(MINUTES_PER_DAY);

    /// Creates a wall time from hours and minutes.
    ///
    /// `24:00` is accepted; `24:01` and beyond are not.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self, ValidationError> {
        if minutes >= 60 || hours > 24 || (hours == 24 && minutes != 0) {
            return Err(ValidationError::InvalidFormat {
                field: "time".to_string(),
                reason: format!("{hours:02}:{minutes:02} is not a valid wall-clock time"),
            });
        }
        Ok(WallTime(hours * 60 + minutes))
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(&self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn hour(&self) -> u16 {
        self.0 / 60
    }

    #[inline]
    pub const fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for WallTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "time".to_string(),
            reason: format!("'{s}' is not an HH:MM time"),
        };

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours: u16 = h.parse().map_err(|_| invalid())?;
        let minutes: u16 = m.parse().map_err(|_| invalid())?;
        WallTime::from_hm(hours, minutes)
    }
}

impl TryFrom<String> for WallTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WallTime> for String {
    fn from(value: WallTime) -> Self {
        value.to_string()
    }
}

// =============================================================================
// TimeSlot
// =============================================================================

/// A half-open `[start, end)` interval on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: WallTime,
    pub end: WallTime,
}

impl TimeSlot {
    /// Creates a slot, rejecting empty or inverted ranges.
    pub fn new(date: NaiveDate, start: WallTime, end: WallTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(TimeSlot { date, start, end })
    }

    /// Half-open overlap test. Slots on different dates never overlap;
    /// back-to-back slots on the same date do not either.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.date, self.start, self.end)
    }
}

// =============================================================================
// Recurring Expansion
// =============================================================================

/// Expands a starting date into its weekly recurrence within the same
/// calendar month: the date itself, then +7 days repeatedly while the
/// stepped date stays in the starting year-month.
///
/// ```rust
/// use backline_core::slot::weekly_dates_in_month;
/// use chrono::NaiveDate;
///
/// let first_monday = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// assert_eq!(weekly_dates_in_month(first_monday).len(), 5); // July 2024 has 5 Mondays
///
/// let last_week = NaiveDate::from_ymd_opt(2024, 7, 29).unwrap();
/// assert_eq!(weekly_dates_in_month(last_week), vec![last_week]);
/// ```
pub fn weekly_dates_in_month(start: NaiveDate) -> Vec<NaiveDate> {
    use chrono::Datelike;

    let mut dates = vec![start];
    let mut current = start;
    while let Some(next) = current.checked_add_days(Days::new(7)) {
        if next.year() != start.year() || next.month() != start.month() {
            break;
        }
        dates.push(next);
        current = next;
    }
    dates
}

// =============================================================================
// Unit Tests
// =============================================================================
