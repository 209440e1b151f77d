//! Calendar page.
//!
//! Day cells are matched on the event's local start date; times and time
//! zones play no part.

use std::collections::BTreeSet;
use std::sync::Arc;

use businessos_core::calendar::{
    CalendarEvent, CalendarEventInput, events_on, month_markers, upcoming,
};
use businessos_core::ports::CalendarApi;
use businessos_core::validate_input;
use businessos_shared::types::EventId;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the calendar page.
pub struct CalendarView {
    api: Arc<dyn CalendarApi>,
    scope: ViewScope,
    events: Vec<CalendarEvent>,
    selected: NaiveDate,
}

impl CalendarView {
    /// Empty calendar with `today` selected.
    pub fn new(api: Arc<dyn CalendarApi>, today: NaiveDate, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            events: Vec::new(),
            selected: today,
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Events as last fetched.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Selected day.
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Selects a day.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    /// Events on the selected day.
    pub fn day_events(&self) -> Vec<&CalendarEvent> {
        events_on(&self.events, self.selected)
    }

    /// Days with events in the selected month.
    pub fn markers(&self) -> BTreeSet<u32> {
        month_markers(&self.events, self.selected.year(), self.selected.month())
    }

    /// Next `limit` events not yet over at `now`.
    pub fn upcoming(&self, now: NaiveDateTime, limit: usize) -> Vec<&CalendarEvent> {
        upcoming(&self.events, now, limit)
    }

    /// Fetches the events.
    pub async fn load(&mut self) -> bool {
        match self
            .scope
            .run("Failed to load events", self.api.list_events())
            .await
        {
            Some(events) => {
                self.events = events;
                true
            }
            None => false,
        }
    }

    /// Creates an event, selects its day and re-fetches.
    pub async fn create(&mut self, input: CalendarEventInput) -> bool {
        const TITLE: &str = "Failed to create event";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(event) = self.scope.run(TITLE, self.api.create_event(&input)).await else {
            return false;
        };
        self.selected = event.start.date();
        self.scope.notifier().success("Event created", event.title);
        self.load().await
    }

    /// Saves an event and re-fetches.
    pub async fn update(&mut self, id: EventId, input: CalendarEventInput) -> bool {
        const TITLE: &str = "Failed to update event";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        if self
            .scope
            .run(TITLE, self.api.update_event(id, &input))
            .await
            .is_none()
        {
            return false;
        }
        self.scope.notifier().success("Event updated", input.title);
        self.load().await
    }

    /// Deletes an event and re-fetches.
    pub async fn delete(&mut self, id: EventId) -> bool {
        if self
            .scope
            .run("Failed to delete event", self.api.delete_event(id))
            .await
            .is_none()
        {
            return false;
        }
        self.scope.notifier().success("Event deleted", "The event was removed");
        self.load().await
    }

    /// Closes the page.
    pub fn close(&self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCalendar;
    use businessos_core::calendar::EventKind;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
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

    fn may() -> Vec<CalendarEvent> {
        vec![
            event("Standup", at(4, 9)),
            event("Late review", at(4, 23)),
            event("Board meeting", at(12, 0)),
        ]
    }

    #[tokio::test]
    async fn test_day_cell_ignores_time_of_day() {
        let mut mock = MockCalendar::new();
        mock.expect_list_events().returning(|| Ok(may()));
        let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();

        let mut view = CalendarView::new(Arc::new(mock), day, Notifier::new());
        view.load().await;

        let titles: Vec<_> = view.day_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Standup", "Late review"]);
        assert_eq!(view.markers().into_iter().collect::<Vec<_>>(), [4, 12]);

        view.select(NaiveDate::from_ymd_opt(2026, 5, 5).unwrap());
        assert!(view.day_events().is_empty());
    }

    #[tokio::test]
    async fn test_end_before_start_is_rejected_locally() {
        let mut mock = MockCalendar::new();
        mock.expect_create_event().never();

        let notifier = Notifier::new();
        let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let mut view = CalendarView::new(Arc::new(mock), day, notifier.clone());
        let input = CalendarEventInput {
            title: "Retro".into(),
            start: at(6, 15),
            end: at(6, 14),
            all_day: false,
            location: None,
            kind: EventKind::Meeting,
        };
        assert!(!view.create(input).await);

        let toasts = notifier.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "End must not be before start");
    }

    #[tokio::test]
    async fn test_create_selects_new_day() {
        let created = event("Retro", at(20, 15));
        let mut mock = MockCalendar::new();
        let c = created.clone();
        mock.expect_create_event().returning(move |_| Ok(c.clone()));
        let listed = vec![created.clone()];
        mock.expect_list_events().returning(move || Ok(listed.clone()));

        let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let mut view = CalendarView::new(Arc::new(mock), day, Notifier::new());
        let input = CalendarEventInput {
            title: "Retro".into(),
            start: created.start,
            end: created.end,
            all_day: false,
            location: None,
            kind: EventKind::Meeting,
        };
        assert!(view.create(input).await);
        assert_eq!(view.selected(), NaiveDate::from_ymd_opt(2026, 5, 20).unwrap());
        assert_eq!(view.day_events().len(), 1);
    }
}
