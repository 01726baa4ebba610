//! Detect bookings that collide with a proposed one.
//!
//! Adjacent bookings (one ends exactly when the other starts) are NOT conflicts.

use serde::Serialize;

use crate::types::BookedInterval;

/// An existing booking that a proposed booking would overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub existing: BookedInterval,
    pub overlap_minutes: i64,
}

/// Find every existing booking the proposed interval overlaps.
///
/// Two bookings overlap when they share a date and
/// `proposed.start < existing.end && existing.start < proposed.end`.
/// The overlap duration is `min(ends) - max(starts)`.
///
/// Degenerate intervals on either side never conflict.
pub fn find_conflicts(proposed: &BookedInterval, existing: &[BookedInterval]) -> Vec<Conflict> {
    if proposed.is_degenerate() {
        return Vec::new();
    }

    existing
        .iter()
        .filter(|b| b.date == proposed.date && b.overlaps(proposed.start, proposed.end))
        .map(|b| {
            let overlap_start = proposed.start.max(b.start);
            let overlap_end = proposed.end.min(b.end);
            Conflict {
                existing: b.clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}
