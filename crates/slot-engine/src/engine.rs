//! Grid-stepped slot computation.
//!
//! Candidate start times are probed at fixed `grid_step` offsets from the
//! window start. A candidate survives when it fits inside the window and does
//! not overlap any booking under half-open semantics.

use chrono::{Duration, NaiveTime};
use tracing::{debug, trace};

use crate::error::{Result, SlotError};
use crate::types::{BookedInterval, CandidateSlot, WorkWindow};

/// Compute the bookable slots for one work window.
///
/// # Arguments
///
/// * `window`: The provider's window for the requested weekday, or `None` when
///   the provider does not work that day.
/// * `service_duration`: Length every slot must span. Must be positive.
/// * `booked`: Existing bookings on the same date. May be unsorted, may overlap
///   each other, and may contain degenerate entries (`start >= end`), which
///   block nothing.
/// * `grid_step`: Distance between probed start times. Must be positive.
///
/// # Errors
///
/// Returns `SlotError::InvalidArgument` if `service_duration` or `grid_step`
/// is zero or negative. Every other input yields `Ok`, possibly empty.
pub fn compute_available_slots(
    window: Option<&WorkWindow>,
    service_duration: Duration,
    booked: &[BookedInterval],
    grid_step: Duration,
) -> Result<Vec<CandidateSlot>> {
    if service_duration <= Duration::zero() {
        return Err(SlotError::InvalidArgument(
            "Service duration must be greater than 0".to_string(),
        ));
    }
    if grid_step <= Duration::zero() {
        return Err(SlotError::InvalidArgument(
            "Grid step must be greater than 0".to_string(),
        ));
    }

    let Some(window) = window else {
        debug!("no work window for the requested day");
        return Ok(Vec::new());
    };

    let mut slots = Vec::new();
    let mut cursor = window.start;

    while let Some(candidate_end) = add_within_day(cursor, service_duration) {
        if candidate_end > window.end {
            break;
        }

        match booked.iter().find(|b| b.overlaps(cursor, candidate_end)) {
            Some(blocking) => trace!(
                start = %cursor,
                end = %candidate_end,
                booked_start = %blocking.start,
                booked_end = %blocking.end,
                "candidate overlaps booking"
            ),
            None => slots.push(CandidateSlot {
                start: cursor,
                end: candidate_end,
            }),
        }

        match add_within_day(cursor, grid_step) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    debug!(
        window_start = %window.start,
        window_end = %window.end,
        bookings = booked.len(),
        slots = slots.len(),
        "computed available slots"
    );

    Ok(slots)
}

/// `time + delta`, or `None` if the sum runs past midnight.
fn add_within_day(time: NaiveTime, delta: Duration) -> Option<NaiveTime> {
    let (sum, wrapped_secs) = time.overflowing_add_signed(delta);
    (wrapped_secs == 0).then_some(sum)
}
