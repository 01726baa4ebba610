//! Value types shared by the engine, the repository seam and the adapters.
//!
//! Everything here is an immutable value with no identity beyond field
//! equality. Times are wall-clock [`NaiveTime`]s interpreted against the
//! calendar date the caller is asking about.

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub type ProviderId = u64;
pub type ServiceId = u64;

/// A provider's recurring availability for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    #[serde(deserialize_with = "crate::wire::deserialize_weekday")]
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkWindow {
    /// Build a window, rejecting `start >= end`.
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidArgument(
                "Start time must be before end time".to_string(),
            ));
        }
        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    /// True when `[start, end)` lies entirely inside this window.
    pub fn contains(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.start && end <= self.end
    }
}

/// An existing, confirmed occupancy on a given date.
///
/// No `start < end` check is made on construction: callers hand over whatever
/// their storage holds and the engine treats degenerate entries as blocking
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BookedInterval {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { date, start, end }
    }

    /// A booking with `start >= end` covers no time at all.
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    /// Half-open overlap with `[start, end)`: touching endpoints do not count.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        !self.is_degenerate() && start < self.end && end > self.start
    }
}

/// A computed, bookable interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl CandidateSlot {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A bookable service as resolved by a [`ScheduleRepository`](crate::repository::ScheduleRepository).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: ServiceId,
    pub name: String,
    pub duration_minutes: i64,
    /// Flat price of one service; the cleaning adapter reports it per slot.
    #[serde(default)]
    pub price: f64,
}

impl ServiceOffering {
    pub fn duration(&self) -> Result<Duration> {
        minutes(self.duration_minutes)
    }
}

/// Convert a minute count from external data into a [`Duration`].
///
/// Counts too large for `Duration` are an `InvalidArgument`, not a panic.
pub fn minutes(count: i64) -> Result<Duration> {
    Duration::try_minutes(count)
        .ok_or_else(|| SlotError::InvalidArgument(format!("{} minutes is out of range", count)))
}
