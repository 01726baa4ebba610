//! String formats at the edges: request field parsing, slot time rendering,
//! and a JSON-in/JSON-out entry point for the raw engine.

use chrono::{Datelike, NaiveDate, NaiveTime, SecondsFormat, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::conflict::find_conflicts;
use crate::engine::compute_available_slots;
use crate::error::{Result, SlotError};
use crate::types::{minutes, BookedInterval, CandidateSlot, WorkWindow};

const DAY_NAMES: [(&str, Weekday); 7] = [
    ("Mon", Weekday::Mon),
    ("Tue", Weekday::Tue),
    ("Wed", Weekday::Wed),
    ("Thu", Weekday::Thu),
    ("Fri", Weekday::Fri),
    ("Sat", Weekday::Sat),
    ("Sun", Weekday::Sun),
];

/// Parse a 24h `HH:MM:SS` time. The hour may have one digit; minutes and
/// seconds must have two.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let invalid = || SlotError::InvalidArgument("Invalid time format. Use HH:MM:SS".to_string());

    let mut parts = s.split(':');
    let (Some(h), Some(m), Some(sec), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let digits = |p: &str, widths: &[usize]| {
        widths.contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(h, &[1, 2]) || !digits(m, &[2]) || !digits(sec, &[2]) {
        return Err(invalid());
    }

    let (h, m, sec) = (
        h.parse::<u32>().map_err(|_| invalid())?,
        m.parse::<u32>().map_err(|_| invalid())?,
        sec.parse::<u32>().map_err(|_| invalid())?,
    );
    NaiveTime::from_hms_opt(h, m, sec).ok_or_else(invalid)
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| SlotError::InvalidArgument("Invalid date format".to_string()))
}

/// Parse a three-letter day name (`Mon` to `Sun`).
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    DAY_NAMES
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, day)| *day)
        .ok_or_else(|| {
            SlotError::InvalidArgument(
                "Invalid day. Must be one of: Mon, Tue, Wed, Thu, Fri, Sat, Sun".to_string(),
            )
        })
}

/// Serde hook so stored windows go through [`parse_weekday`] too.
pub(crate) fn deserialize_weekday<'de, D>(
    deserializer: D,
) -> std::result::Result<Weekday, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    parse_weekday(&name).map_err(serde::de::Error::custom)
}

pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// `2024-01-15T09:00:00Z`. Wall time is passed through as UTC unchanged.
pub fn format_utc_datetime(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A start/end pair on the request's date.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeRangeInput {
    pub start: String,
    pub end: String,
}

/// Everything the engine needs, as JSON.
///
/// ```json
/// {
///   "date": "2024-01-15",
///   "window": { "start": "09:00:00", "end": "17:00:00" },
///   "duration_minutes": 30,
///   "grid_minutes": 30,
///   "bookings": [{ "start": "10:00:00", "end": "10:30:00" }]
/// }
/// ```
///
/// A `null` or missing `window` means the provider does not work that day.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineRequest {
    pub date: String,
    #[serde(default)]
    pub window: Option<TimeRangeInput>,
    pub duration_minutes: i64,
    pub grid_minutes: i64,
    #[serde(default)]
    pub bookings: Vec<TimeRangeInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotDto {
    pub start_time: String,
    pub end_time: String,
}

impl From<&CandidateSlot> for SlotDto {
    fn from(slot: &CandidateSlot) -> Self {
        Self {
            start_time: format_time_of_day(slot.start),
            end_time: format_time_of_day(slot.end),
        }
    }
}

impl EngineRequest {
    /// Validate field formats and run the engine.
    pub fn compute(&self) -> Result<Vec<CandidateSlot>> {
        let date = parse_date(&self.date)?;
        let window = self
            .window
            .as_ref()
            .map(|w| {
                WorkWindow::new(
                    date.weekday(),
                    parse_time_of_day(&w.start)?,
                    parse_time_of_day(&w.end)?,
                )
            })
            .transpose()?;
        let booked = self
            .bookings
            .iter()
            .map(|b| {
                Ok(BookedInterval::new(
                    date,
                    parse_time_of_day(&b.start)?,
                    parse_time_of_day(&b.end)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        compute_available_slots(
            window.as_ref(),
            minutes(self.duration_minutes)?,
            &booked,
            minutes(self.grid_minutes)?,
        )
    }
}

/// Run the engine on an [`EngineRequest`] JSON document and return the slots
/// as a JSON array of `{start_time, end_time}` objects.
pub fn compute_json(request_json: &str) -> Result<String> {
    let request: EngineRequest = serde_json::from_str(request_json)?;
    let slots = request.compute()?;
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    Ok(serde_json::to_string(&dtos)?)
}

/// Conflicts between one proposed booking and a list of existing ones, all as
/// JSON `{date, start, end}` objects.
pub fn conflicts_json(proposed_json: &str, existing_json: &str) -> Result<String> {
    let proposed: BookedInterval = serde_json::from_str(proposed_json)?;
    let existing: Vec<BookedInterval> = serde_json::from_str(existing_json)?;
    Ok(serde_json::to_string(&find_conflicts(&proposed, &existing))?)
}
