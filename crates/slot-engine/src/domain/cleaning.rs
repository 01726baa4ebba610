//! Cleaning-booking vocabulary: cleaners, service types, `HH:MM:SS` slot
//! times and a per-slot price estimate.
//!
//! The estimate is the service type's flat base price. It is attached after
//! the engine has run and plays no part in which slots are offered.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::AvailabilityReport;
use crate::types::{ProviderId, ServiceId};
use crate::wire::format_time_of_day;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningSlot {
    pub start_time: String,
    pub end_time: String,
    pub estimated_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningAvailability {
    pub cleaner_id: ProviderId,
    pub date: NaiveDate,
    pub service_type_id: ServiceId,
    pub service_name: String,
    pub duration_hours: f64,
    pub available_slots: Vec<CleaningSlot>,
}

impl From<&AvailabilityReport> for CleaningAvailability {
    fn from(report: &AvailabilityReport) -> Self {
        let estimated_price = report.service.price;
        let available_slots = report
            .slots
            .iter()
            .map(|slot| CleaningSlot {
                start_time: format_time_of_day(slot.start),
                end_time: format_time_of_day(slot.end),
                estimated_price,
            })
            .collect();

        Self {
            cleaner_id: report.provider_id,
            date: report.date,
            service_type_id: report.service.id,
            service_name: report.service.name.clone(),
            duration_hours: report.service.duration_minutes as f64 / 60.0,
            available_slots,
        }
    }
}
