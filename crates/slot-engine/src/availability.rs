//! Availability queries over a schedule repository.
//!
//! [`AvailabilityService`] resolves a `(provider, date, service)` query through
//! an injected [`ScheduleRepository`], runs the engine once per work window of
//! that weekday, and merges the per-window results. It also validates proposed
//! bookings against the same data before a caller writes them.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conflict::find_conflicts;
use crate::engine::compute_available_slots;
use crate::error::{Result, SlotError};
use crate::repository::ScheduleRepository;
use crate::types::{BookedInterval, CandidateSlot, ProviderId, ServiceId, ServiceOffering};

/// Which provider, which day, which service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub provider_id: ProviderId,
    pub date: NaiveDate,
    pub service_id: ServiceId,
}

/// Result of an availability query, before any domain-specific rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityReport {
    pub provider_id: ProviderId,
    pub date: NaiveDate,
    pub service: ServiceOffering,
    /// Sorted by start, no duplicates.
    pub slots: Vec<CandidateSlot>,
}

/// A booking a caller intends to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub provider_id: ProviderId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

pub struct AvailabilityService<R> {
    repository: R,
    grid_step: Duration,
}

impl<R: ScheduleRepository> AvailabilityService<R> {
    pub fn new(repository: R, grid_step: Duration) -> Self {
        Self {
            repository,
            grid_step,
        }
    }

    /// Open slots for `query.service_id` with `query.provider_id` on `query.date`.
    ///
    /// A provider with no window that weekday gets an empty report, not an
    /// error.
    ///
    /// # Errors
    /// `NotFound` for an unknown provider or service, `InvalidArgument` for a
    /// non-positive service duration or grid step, plus whatever the
    /// repository reports.
    pub fn available_slots(&self, query: &AvailabilityQuery) -> Result<AvailabilityReport> {
        let service = self.repository.service(query.service_id)?;
        let duration = service.duration()?;
        let weekday = query.date.weekday();
        let windows = self.repository.work_windows(query.provider_id, weekday)?;
        let booked = self.repository.bookings(query.provider_id, query.date)?;

        let slots = if windows.is_empty() {
            compute_available_slots(None, duration, &booked, self.grid_step)?
        } else {
            let per_window = windows
                .iter()
                .map(|w| compute_available_slots(Some(w), duration, &booked, self.grid_step))
                .collect::<Result<Vec<_>>>()?;
            merge_window_slots(per_window)
        };

        info!(
            provider_id = query.provider_id,
            service_id = query.service_id,
            date = %query.date,
            %weekday,
            windows = windows.len(),
            slots = slots.len(),
            "availability computed"
        );

        Ok(AvailabilityReport {
            provider_id: query.provider_id,
            date: query.date,
            service,
            slots,
        })
    }

    /// Validate a proposed booking against the provider's schedule.
    ///
    /// # Errors
    /// * `InvalidArgument`: `start >= end`, the length differs from the
    ///   service duration, or the interval is outside every work window.
    /// * `Conflict`: the interval overlaps an existing booking.
    /// * `NotFound`: unknown provider or service.
    pub fn check_booking(&self, request: &BookingRequest) -> Result<()> {
        check_booking(&self.repository, request)
    }
}

/// Validate a proposed booking against a repository without building a full
/// [`AvailabilityService`]. No grid step is involved.
///
/// # Errors
/// Same as [`AvailabilityService::check_booking`].
pub fn check_booking<R>(repository: &R, request: &BookingRequest) -> Result<()>
where
    R: ScheduleRepository + ?Sized,
{
    if request.start >= request.end {
        return Err(SlotError::InvalidArgument(
            "Start time must be before end time".to_string(),
        ));
    }

    let service = repository.service(request.service_id)?;
    let requested = request.end - request.start;
    if requested != service.duration()? {
        return Err(SlotError::InvalidArgument(format!(
            "Booking lasts {} minutes but {} takes {} minutes",
            requested.num_minutes(),
            service.name,
            service.duration_minutes
        )));
    }

    let windows = repository.work_windows(request.provider_id, request.date.weekday())?;
    if !windows.iter().any(|w| w.contains(request.start, request.end)) {
        return Err(SlotError::InvalidArgument(format!(
            "{}-{} is outside the provider's working hours on {}",
            request.start,
            request.end,
            request.date.weekday()
        )));
    }

    let proposed = BookedInterval::new(request.date, request.start, request.end);
    let existing = repository.bookings(request.provider_id, request.date)?;
    let conflicts = find_conflicts(&proposed, &existing);
    if let Some(first) = conflicts.first() {
        debug!(count = conflicts.len(), "proposed booking conflicts");
        return Err(SlotError::Conflict(format!(
            "{}-{} overlaps an existing booking {}-{} by {} minutes",
            request.start,
            request.end,
            first.existing.start,
            first.existing.end,
            first.overlap_minutes
        )));
    }

    Ok(())
}

/// Merge slot lists computed for separate windows of the same day.
///
/// The result is sorted by start time with exact duplicates removed.
pub fn merge_window_slots<I>(per_window: I) -> Vec<CandidateSlot>
where
    I: IntoIterator<Item = Vec<CandidateSlot>>,
{
    let mut merged: Vec<CandidateSlot> = per_window.into_iter().flatten().collect();
    merged.sort();
    merged.dedup();
    merged
}
