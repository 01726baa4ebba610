//! # slot-engine
//!
//! Deterministic computation of bookable time slots for appointment and
//! booking systems.
//!
//! Given a provider's working window for a weekday, the length of the service
//! being booked, and the bookings that already exist on the date, the engine
//! probes start times on a fixed grid and returns every slot that fits inside
//! the window without overlapping a booking. Overlap is half-open: a slot that
//! ends exactly when a booking starts is bookable.
//!
//! ## Modules
//!
//! - [`engine`]: The pure slot computation
//! - [`conflict`]: Overlap detection for a proposed booking
//! - [`repository`]: `ScheduleRepository` seam and an in-memory implementation
//! - [`availability`]: Query service tying repository lookups to the engine
//! - [`domain`]: Healthcare and cleaning adapters, per-domain grid policy
//! - [`wire`]: Field parsing, slot formatting, JSON entry points
//! - [`boundary`]: Error → HTTP status mapping
//! - [`error`]: Error types

pub mod availability;
pub mod boundary;
pub mod conflict;
pub mod domain;
pub mod engine;
pub mod error;
pub mod repository;
pub mod types;
pub mod wire;

pub use availability::{AvailabilityQuery, AvailabilityReport, AvailabilityService, BookingRequest};
pub use boundary::ErrorResponse;
pub use conflict::{find_conflicts, Conflict};
pub use domain::{Domain, DomainResponse, GridPolicy};
pub use engine::compute_available_slots;
pub use error::SlotError;
pub use repository::{InMemoryRepository, ScheduleRepository, ScheduleSnapshot};
pub use types::{BookedInterval, CandidateSlot, ServiceOffering, WorkWindow};
