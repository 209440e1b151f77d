//! Calendar day bucketing.
//!
//! Event times are local wall-clock values. Nothing here converts between
//! time zones: an event starting at 23:30 belongs to the day it says.

use std::collections::BTreeSet;

use businessos_shared::types::EventId;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::not_blank;

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Meeting.
    Meeting,
    /// Deadline.
    Deadline,
    /// Reminder.
    Reminder,
    /// Anything else.
    #[default]
    Other,
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event ID.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Start, local time.
    pub start: NaiveDateTime,
    /// End, local time.
    pub end: NaiveDateTime,
    /// Whole-day event; the time part of `start` is ignored for display.
    #[serde(default)]
    pub all_day: bool,
    /// Location.
    #[serde(default)]
    pub location: Option<String>,
    /// Kind.
    #[serde(default)]
    pub kind: EventKind,
}

/// Input for creating or updating an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_event_range"))]
pub struct CalendarEventInput {
    /// Title.
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    /// Start.
    pub start: NaiveDateTime,
    /// End.
    pub end: NaiveDateTime,
    /// Whole-day event.
    pub all_day: bool,
    /// Location.
    pub location: Option<String>,
    /// Kind.
    pub kind: EventKind,
}

fn validate_event_range(input: &CalendarEventInput) -> Result<(), ValidationError> {
    if input.end < input.start {
        return Err(ValidationError::new("event_range")
            .with_message("End must not be before start".into()));
    }
    Ok(())
}

/// Events starting on `date`, matched on year, month and day only.
/// Input order is kept.
#[must_use]
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.start.date() == date).collect()
}

/// Days of the given month that have at least one event.
///
/// An invalid month yields an empty set.
#[must_use]
pub fn month_markers(events: &[CalendarEvent], year: i32, month: u32) -> BTreeSet<u32> {
    events
        .iter()
        .map(|e| e.start.date())
        .filter(|d| d.year() == year && d.month() == month)
        .map(|d| d.day())
        .collect()
}

/// Events that have not ended by `now`, soonest start first, at most `limit`.
#[must_use]
pub fn upcoming(events: &[CalendarEvent], now: NaiveDateTime, limit: usize) -> Vec<&CalendarEvent> {
    let mut out: Vec<&CalendarEvent> = events.iter().filter(|e| e.end >= now).collect();
    out.sort_by_key(|e| e.start);
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_input;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn event(title: &str, start: NaiveDateTime) -> CalendarEvent {
        CalendarEvent {
            id: EventId::new(),
            title: title.into(),
            start,
            end: start + chrono::Duration::hours(1),
            all_day: false,
            location: None,
            kind: EventKind::Meeting,
        }
    }

    #[test]
    fn test_events_on_ignores_time_of_day() {
        let events = vec![
            event("midnight", at(4, 0, 0)),
            event("late", at(4, 23, 59)),
            event("next", at(5, 0, 0)),
            event("prev", at(3, 23, 59)),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let titles: Vec<_> = events_on(&events, day)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["midnight", "late"]);
    }

    #[test]
    fn test_events_on_other_month_same_day() {
        let mut june = event("june", at(4, 9, 0));
        june.start = NaiveDate::from_ymd_opt(2026, 6, 4)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        assert!(events_on(&[june], day).is_empty());
    }

    #[test]
    fn test_month_markers() {
        let events = vec![
            event("a", at(4, 9, 0)),
            event("b", at(4, 15, 0)),
            event("c", at(20, 9, 0)),
        ];
        let markers = month_markers(&events, 2026, 5);
        assert_eq!(markers.into_iter().collect::<Vec<_>>(), vec![4, 20]);
        assert!(month_markers(&events, 2026, 6).is_empty());
        assert!(month_markers(&events, 2026, 13).is_empty());
    }

    #[test]
    fn test_upcoming() {
        let events = vec![
            event("later", at(10, 9, 0)),
            event("past", at(1, 9, 0)),
            event("soon", at(6, 9, 0)),
            event("ongoing", at(5, 8, 30)),
        ];
        let now = at(5, 9, 0);
        let titles: Vec<_> = upcoming(&events, now, 2)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["ongoing", "soon"]);
    }

    #[test]
    fn test_event_range_validation() {
        let input = CalendarEventInput {
            title: "Standup".into(),
            start: at(5, 10, 0),
            end: at(5, 9, 0),
            all_day: false,
            location: None,
            kind: EventKind::Meeting,
        };
        let err = validate_input(&input).unwrap_err();
        assert!(err.to_string().contains("End must not be before start"));
    }
}
