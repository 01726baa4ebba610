//! Appointment vocabulary: staff members, services, ISO-8601 slot times.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::AvailabilityReport;
use crate::types::{ProviderId, ServiceId};
use crate::wire::format_utc_datetime;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentSlot {
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentAvailability {
    pub staff_id: ProviderId,
    pub date: NaiveDate,
    pub service_id: ServiceId,
    pub service_name: String,
    pub service_duration: i64,
    pub available_slots: Vec<AppointmentSlot>,
}

impl From<&AvailabilityReport> for AppointmentAvailability {
    fn from(report: &AvailabilityReport) -> Self {
        let available_slots = report
            .slots
            .iter()
            .map(|slot| AppointmentSlot {
                start_time: format_utc_datetime(report.date, slot.start),
                end_time: format_utc_datetime(report.date, slot.end),
                duration_minutes: slot.duration().num_minutes(),
            })
            .collect();

        Self {
            staff_id: report.provider_id,
            date: report.date,
            service_id: report.service.id,
            service_name: report.service.name.clone(),
            service_duration: report.service.duration_minutes,
            available_slots,
        }
    }
}
