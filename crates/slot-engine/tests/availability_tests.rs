//! Tests for the availability service over an in-memory repository.

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use slot_engine::availability::{check_booking, merge_window_slots};
use slot_engine::repository::{BookingRecord, ProviderRecord};
use slot_engine::{
    AvailabilityQuery, AvailabilityService, BookedInterval, BookingRequest, CandidateSlot,
    InMemoryRepository, ScheduleSnapshot, ServiceOffering, SlotError, WorkWindow,
};

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn window(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> WorkWindow {
    WorkWindow::new(weekday, start, end).unwrap()
}

/// Staff 1 works Mon 09-17, staff 2 works Mon 09-12 and 13-17 and never on
/// Sunday. Service 1 is 30 min, service 2 is 45 min.
fn snapshot() -> ScheduleSnapshot {
    ScheduleSnapshot {
        providers: vec![
            ProviderRecord {
                id: 1,
                name: "Dr. Adams".to_string(),
                windows: vec![
                    window(Weekday::Mon, t(9, 0), t(17, 0)),
                    window(Weekday::Tue, t(9, 0), t(17, 0)),
                ],
            },
            ProviderRecord {
                id: 2,
                name: "Dr. Baker".to_string(),
                windows: vec![
                    window(Weekday::Mon, t(13, 0), t(17, 0)),
                    window(Weekday::Mon, t(9, 0), t(12, 0)),
                ],
            },
        ],
        services: vec![
            ServiceOffering {
                id: 1,
                name: "Cardiology Consultation".to_string(),
                duration_minutes: 30,
                price: 150.0,
            },
            ServiceOffering {
                id: 2,
                name: "Neurology Consultation".to_string(),
                duration_minutes: 45,
                price: 200.0,
            },
            ServiceOffering {
                id: 9,
                name: "Broken".to_string(),
                duration_minutes: 0,
                price: 0.0,
            },
        ],
        bookings: vec![
            BookingRecord {
                provider_id: 1,
                interval: BookedInterval::new(monday(), t(10, 0), t(10, 30)),
            },
            BookingRecord {
                provider_id: 1,
                interval: BookedInterval::new(monday(), t(14, 0), t(14, 45)),
            },
            // Same provider, next week: must not affect the 15th.
            BookingRecord {
                provider_id: 1,
                interval: BookedInterval::new(
                    NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
                    t(9, 0),
                    t(17, 0),
                ),
            },
        ],
    }
}

fn service() -> AvailabilityService<InMemoryRepository> {
    let repo = InMemoryRepository::from_snapshot(snapshot()).unwrap();
    AvailabilityService::new(repo, Duration::minutes(30))
}

fn query(provider_id: u64, date: NaiveDate, service_id: u64) -> AvailabilityQuery {
    AvailabilityQuery {
        provider_id,
        date,
        service_id,
    }
}

#[test]
fn bookings_remove_overlapping_slots() {
    let report = service().available_slots(&query(1, monday(), 1)).unwrap();

    assert_eq!(report.service.name, "Cardiology Consultation");
    // 16 grid slots minus 10:00 and minus 14:00, 14:30 (booking 14:00-14:45).
    assert_eq!(report.slots.len(), 13);
    assert!(!report.slots.iter().any(|s| s.start == t(10, 0)));
    assert!(!report.slots.iter().any(|s| s.start == t(14, 30)));
    assert!(report.slots.iter().any(|s| s.start == t(15, 0)));
}

#[test]
fn longer_service_uses_same_grid() {
    // 45 min service on a 30 min grid: starts 09:00, 09:30, ... 16:00.
    let report = service().available_slots(&query(1, monday(), 2)).unwrap();

    let starts: Vec<NaiveTime> = report.slots.iter().map(|s| s.start).collect();
    assert_eq!(starts.first(), Some(&t(9, 0)));
    assert_eq!(starts.last(), Some(&t(16, 0)));
    // 09:30-10:15 and 10:00-10:45 hit the 10:00 booking.
    assert!(!starts.contains(&t(9, 30)));
    assert!(!starts.contains(&t(10, 0)));
    assert!(starts.contains(&t(10, 30)));
    for slot in &report.slots {
        assert_eq!(slot.end - slot.start, Duration::minutes(45));
    }
}

#[test]
fn day_without_window_is_empty_report() {
    let sunday = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();

    let report = service().available_slots(&query(1, sunday, 1)).unwrap();

    assert!(report.slots.is_empty());
    assert_eq!(report.date, sunday);
}

#[test]
fn multiple_windows_are_merged_in_order() {
    let report = service().available_slots(&query(2, monday(), 1)).unwrap();

    // 6 slots in 09-12 and 8 in 13-17, sorted although windows are stored
    // afternoon first.
    assert_eq!(report.slots.len(), 14);
    assert_eq!(report.slots[0].start, t(9, 0));
    assert_eq!(report.slots[5].start, t(11, 30));
    assert_eq!(report.slots[6].start, t(13, 0));
    for pair in report.slots.windows(2) {
        assert!(pair[0].start < pair[1].start);
    }
}

#[test]
fn unknown_provider_is_not_found() {
    let err = service().available_slots(&query(99, monday(), 1)).unwrap_err();

    assert!(matches!(
        err,
        SlotError::NotFound {
            kind: "provider",
            id: 99
        }
    ));
}

#[test]
fn unknown_service_is_not_found() {
    let err = service().available_slots(&query(1, monday(), 42)).unwrap_err();

    assert!(matches!(err, SlotError::NotFound { kind: "service", .. }));
}

#[test]
fn zero_length_service_is_invalid_argument() {
    let err = service().available_slots(&query(1, monday(), 9)).unwrap_err();

    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn zero_grid_is_invalid_even_on_a_day_off() {
    let repo = InMemoryRepository::from_snapshot(snapshot()).unwrap();
    let svc = AvailabilityService::new(&repo, Duration::zero());
    let sunday = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();

    let err = svc.available_slots(&query(1, sunday, 1)).unwrap_err();

    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn merge_sorts_and_dedups() {
    let a = CandidateSlot {
        start: t(9, 0),
        end: t(9, 30),
    };
    let b = CandidateSlot {
        start: t(10, 0),
        end: t(10, 30),
    };

    let merged = merge_window_slots(vec![vec![b, a], vec![a]]);

    assert_eq!(merged, vec![a, b]);
}

// ---------------------------------------------------------------------------
// Booking checks
// ---------------------------------------------------------------------------

fn request(provider_id: u64, service_id: u64, start: NaiveTime, end: NaiveTime) -> BookingRequest {
    BookingRequest {
        provider_id,
        service_id,
        date: monday(),
        start,
        end,
    }
}

#[test]
fn free_booking_passes() {
    service()
        .check_booking(&request(1, 1, t(11, 0), t(11, 30)))
        .unwrap();
}

#[test]
fn back_to_back_booking_passes() {
    // Existing 10:00-10:30; new one starts exactly at 10:30.
    service()
        .check_booking(&request(1, 1, t(10, 30), t(11, 0)))
        .unwrap();
}

#[test]
fn overlapping_booking_is_conflict() {
    let err = service()
        .check_booking(&request(1, 1, t(10, 15), t(10, 45)))
        .unwrap_err();

    match err {
        SlotError::Conflict(msg) => assert!(msg.contains("15 minutes"), "got: {}", msg),
        other => panic!("expected Conflict, got {:?}", other),
    }
}

#[test]
fn wrong_length_booking_is_invalid() {
    let err = service()
        .check_booking(&request(1, 1, t(11, 0), t(12, 0)))
        .unwrap_err();

    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn booking_outside_hours_is_invalid() {
    let err = service()
        .check_booking(&request(1, 1, t(16, 45), t(17, 15)))
        .unwrap_err();
    assert!(matches!(err, SlotError::InvalidArgument(_)));

    // Staff 2 has a lunch gap 12-13.
    let err = service()
        .check_booking(&request(2, 1, t(12, 0), t(12, 30)))
        .unwrap_err();
    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn reversed_booking_is_invalid() {
    let err = service()
        .check_booking(&request(1, 1, t(11, 30), t(11, 0)))
        .unwrap_err();

    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn booking_check_needs_no_grid_step() {
    let repo = InMemoryRepository::from_snapshot(snapshot()).unwrap();

    check_booking(&repo, &request(1, 1, t(11, 0), t(11, 30))).unwrap();
    let err = check_booking(&repo, &request(1, 1, t(10, 15), t(10, 45))).unwrap_err();
    assert!(matches!(err, SlotError::Conflict(_)));
}

// ---------------------------------------------------------------------------
// Snapshot loading
// ---------------------------------------------------------------------------

#[test]
fn snapshot_loads_from_json() {
    let json = r#"{
        "providers": [
            { "id": 1, "name": "Maria Garcia",
              "windows": [{ "weekday": "Mon", "start": "08:00:00", "end": "18:00:00" }] }
        ],
        "services": [
            { "id": 1, "name": "Regular Cleaning", "duration_minutes": 120, "price": 80.0 }
        ],
        "bookings": [
            { "provider_id": 1, "date": "2024-01-15", "start": "10:00:00", "end": "12:00:00" },
            { "provider_id": 1, "date": "2024-01-15", "start": "14:00:00", "end": "18:00:00" }
        ]
    }"#;

    let repo = InMemoryRepository::from_json(json).unwrap();
    let svc = AvailabilityService::new(repo, Duration::minutes(60));
    let report = svc.available_slots(&query(1, monday(), 1)).unwrap();

    assert_eq!(
        report.slots,
        vec![
            CandidateSlot {
                start: t(8, 0),
                end: t(10, 0)
            },
            CandidateSlot {
                start: t(12, 0),
                end: t(14, 0)
            },
        ]
    );
}

#[test]
fn snapshot_with_reversed_window_rejected() {
    let json = r#"{
        "providers": [
            { "id": 1, "windows": [{ "weekday": "Mon", "start": "17:00:00", "end": "09:00:00" }] }
        ]
    }"#;

    let err = InMemoryRepository::from_json(json).unwrap_err();
    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn snapshot_with_duplicate_ids_rejected() {
    let json = r#"{
        "services": [
            { "id": 1, "name": "A", "duration_minutes": 30 },
            { "id": 1, "name": "B", "duration_minutes": 45 }
        ]
    }"#;

    let err = InMemoryRepository::from_json(json).unwrap_err();
    assert!(matches!(err, SlotError::InvalidArgument(_)));
}

#[test]
fn malformed_snapshot_is_repository_error() {
    let err = InMemoryRepository::from_json("{ not json").unwrap_err();
    assert!(matches!(err, SlotError::Repository(_)));
}

#[test]
fn snapshot_window_days_must_be_three_letter_names() {
    for day in ["monday", "mon", "MON", "Mo"] {
        let json = format!(
            r#"{{ "providers": [
                {{ "id": 1, "windows": [{{ "weekday": "{}", "start": "09:00:00", "end": "17:00:00" }}] }}
            ] }}"#,
            day
        );

        let err = InMemoryRepository::from_json(&json).unwrap_err();
        assert!(
            err.to_string().contains("Invalid day"),
            "{:?} should be rejected, got: {}",
            day,
            err
        );
    }
}
