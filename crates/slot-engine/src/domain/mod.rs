//! Domain adapters: the same engine rendered in two vocabularies.
//!
//! - [`healthcare`]: appointments with staff, 30-minute grid by default
//! - [`cleaning`]: cleaning bookings with cleaners, 60-minute grid by default,
//!   flat per-slot price estimate
//!
//! Adapters only rename and reformat an [`AvailabilityReport`]; they never
//! change which slots are available.

pub mod cleaning;
pub mod healthcare;

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityReport;
use crate::error::{Result, SlotError};
use crate::types::minutes;

pub use cleaning::{CleaningAvailability, CleaningSlot};
pub use healthcare::{AppointmentAvailability, AppointmentSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Healthcare,
    Cleaning,
}

impl Domain {
    /// Render a report in this domain's wire shape.
    pub fn render(self, report: &AvailabilityReport) -> DomainResponse {
        match self {
            Domain::Healthcare => DomainResponse::Healthcare(AppointmentAvailability::from(report)),
            Domain::Cleaning => DomainResponse::Cleaning(CleaningAvailability::from(report)),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Healthcare => f.write_str("healthcare"),
            Domain::Cleaning => f.write_str("cleaning"),
        }
    }
}

impl FromStr for Domain {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "healthcare" => Ok(Domain::Healthcare),
            "cleaning" => Ok(Domain::Cleaning),
            other => Err(SlotError::InvalidArgument(format!(
                "Unknown domain '{}'. Must be one of: healthcare, cleaning",
                other
            ))),
        }
    }
}

/// Grid step per domain, in minutes.
///
/// The step is deployment policy, so it lives in configuration rather than in
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPolicy {
    pub healthcare_minutes: i64,
    pub cleaning_minutes: i64,
}

impl Default for GridPolicy {
    fn default() -> Self {
        Self {
            healthcare_minutes: 30,
            cleaning_minutes: 60,
        }
    }
}

impl GridPolicy {
    /// The grid step to use for `domain`.
    pub fn step(&self, domain: Domain) -> Result<Duration> {
        match domain {
            Domain::Healthcare => minutes(self.healthcare_minutes),
            Domain::Cleaning => minutes(self.cleaning_minutes),
        }
    }
}

/// Either adapter's response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainResponse {
    Healthcare(AppointmentAvailability),
    Cleaning(CleaningAvailability),
}
