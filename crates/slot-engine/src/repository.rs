//! The storage seam: where provider windows, services and bookings come from.
//!
//! The engine never reaches into storage. Callers resolve everything through a
//! [`ScheduleRepository`] first and hand the engine plain values. The
//! [`InMemoryRepository`] serves a [`ScheduleSnapshot`] loaded from JSON and is
//! what the CLI and the tests run against.

use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::types::{BookedInterval, ProviderId, ServiceId, ServiceOffering, WorkWindow};

/// Lookups the availability service needs from persistent storage.
pub trait ScheduleRepository: Send + Sync {
    /// Windows a provider works on `weekday`.
    ///
    /// Unknown providers are `SlotError::NotFound`; a known provider who does
    /// not work that day yields an empty list.
    fn work_windows(&self, provider_id: ProviderId, weekday: Weekday) -> Result<Vec<WorkWindow>>;

    /// Resolve a service to its duration, name and price.
    fn service(&self, service_id: ServiceId) -> Result<ServiceOffering>;

    /// Confirmed bookings for a provider on `date`.
    fn bookings(&self, provider_id: ProviderId, date: NaiveDate) -> Result<Vec<BookedInterval>>;
}

impl<R: ScheduleRepository + ?Sized> ScheduleRepository for &R {
    fn work_windows(&self, provider_id: ProviderId, weekday: Weekday) -> Result<Vec<WorkWindow>> {
        (**self).work_windows(provider_id, weekday)
    }

    fn service(&self, service_id: ServiceId) -> Result<ServiceOffering> {
        (**self).service(service_id)
    }

    fn bookings(&self, provider_id: ProviderId, date: NaiveDate) -> Result<Vec<BookedInterval>> {
        (**self).bookings(provider_id, date)
    }
}

/// A provider and their weekly windows, as stored in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: ProviderId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub windows: Vec<WorkWindow>,
}

/// A booking row: which provider it occupies, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub provider_id: ProviderId,
    #[serde(flatten)]
    pub interval: BookedInterval,
}

/// Serializable dump of everything an [`InMemoryRepository`] holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    #[serde(default)]
    pub providers: Vec<ProviderRecord>,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

/// Read-only repository over an in-memory snapshot.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    providers: HashMap<ProviderId, ProviderRecord>,
    services: HashMap<ServiceId, ServiceOffering>,
    bookings: Vec<BookingRecord>,
}

impl InMemoryRepository {
    /// Index a snapshot.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidArgument` if a window has `start >= end`,
    /// or if a provider or service id appears twice.
    pub fn from_snapshot(snapshot: ScheduleSnapshot) -> Result<Self> {
        let mut providers = HashMap::with_capacity(snapshot.providers.len());
        for provider in snapshot.providers {
            for w in &provider.windows {
                WorkWindow::new(w.weekday, w.start, w.end).map_err(|_| {
                    SlotError::InvalidArgument(format!(
                        "provider {} has a {} window that does not start before it ends",
                        provider.id, w.weekday
                    ))
                })?;
            }
            let id = provider.id;
            if providers.insert(id, provider).is_some() {
                return Err(SlotError::InvalidArgument(format!(
                    "duplicate provider id {}",
                    id
                )));
            }
        }

        let mut services = HashMap::with_capacity(snapshot.services.len());
        for service in snapshot.services {
            let id = service.id;
            if services.insert(id, service).is_some() {
                return Err(SlotError::InvalidArgument(format!(
                    "duplicate service id {}",
                    id
                )));
            }
        }

        debug!(
            providers = providers.len(),
            services = services.len(),
            bookings = snapshot.bookings.len(),
            "loaded schedule snapshot"
        );

        Ok(Self {
            providers,
            services,
            bookings: snapshot.bookings,
        })
    }

    /// Parse a JSON snapshot and index it.
    ///
    /// A snapshot that does not parse is a broken data source, reported as
    /// `SlotError::Repository` rather than a malformed request.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: ScheduleSnapshot = serde_json::from_str(json)
            .map_err(|e| SlotError::Repository(format!("corrupt schedule snapshot: {}", e)))?;
        Self::from_snapshot(snapshot)
    }

    fn provider(&self, provider_id: ProviderId) -> Result<&ProviderRecord> {
        self.providers.get(&provider_id).ok_or(SlotError::NotFound {
            kind: "provider",
            id: provider_id,
        })
    }
}

impl ScheduleRepository for InMemoryRepository {
    fn work_windows(&self, provider_id: ProviderId, weekday: Weekday) -> Result<Vec<WorkWindow>> {
        let provider = self.provider(provider_id)?;
        Ok(provider
            .windows
            .iter()
            .filter(|w| w.weekday == weekday)
            .cloned()
            .collect())
    }

    fn service(&self, service_id: ServiceId) -> Result<ServiceOffering> {
        self.services
            .get(&service_id)
            .cloned()
            .ok_or(SlotError::NotFound {
                kind: "service",
                id: service_id,
            })
    }

    fn bookings(&self, provider_id: ProviderId, date: NaiveDate) -> Result<Vec<BookedInterval>> {
        self.provider(provider_id)?;
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.provider_id == provider_id && b.interval.date == date)
            .map(|b| b.interval.clone())
            .collect())
    }
}
