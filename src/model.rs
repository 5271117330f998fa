use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Event {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub description: String,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EventError {
    #[error("no matching event found")]
    NotFound,
    #[error("event description cannot be empty")]
    EmptyDescription,
}

impl Event {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        description: impl Into<String>,
    ) -> Result<Self, EventError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(EventError::EmptyDescription);
        }
        Ok(Event {
            date,
            time,
            description,
        })
    }

    pub fn time_string(&self) -> String {
        crate::calendar::format_time(self.time)
    }

    pub fn date_string(&self) -> String {
        crate::calendar::format_date(self.date)
    }
}

/// Unordered collection of events. Identity is the full value tuple;
/// identical events may coexist and mutation hits the first match.
#[derive(Debug, Default, Clone)]
pub struct EventIndex {
    events: Vec<Event>,
}

impl EventIndex {
    pub fn new(events: Vec<Event>) -> Self {
        EventIndex { events }
    }

    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events on the given day, ascending by time. The sort is stable, so
    /// equal times keep insertion order.
    pub fn events_for_date(&self, date: NaiveDate) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.time);
        events
    }

    pub fn has_events_for_date(&self, date: NaiveDate) -> bool {
        self.events.iter().any(|e| e.date == date)
    }

    pub fn events_for_month(&self, year: i32, month: u32) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.time));
        events
    }

    pub fn events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.time));
        events
    }

    /// Case-insensitive substring match on descriptions, ordered by date
    /// then time.
    pub fn search(&self, query: &str) -> Vec<Event> {
        let needle = query.to_lowercase();
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.description.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.time));
        events
    }

    pub fn remove(&mut self, target: &Event) -> Result<(), EventError> {
        let pos = self
            .events
            .iter()
            .position(|e| e == target)
            .ok_or(EventError::NotFound)?;
        self.events.remove(pos);
        Ok(())
    }

    /// Substitute the first event equal to `old` with `new`. The new value
    /// is validated first; on any failure the index is left untouched.
    pub fn replace(&mut self, old: &Event, new: Event) -> Result<(), EventError> {
        if new.description.trim().is_empty() {
            return Err(EventError::EmptyDescription);
        }
        let pos = self
            .events
            .iter()
            .position(|e| e == old)
            .ok_or(EventError::NotFound)?;
        self.events[pos] = new;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn event(y: i32, mo: u32, d: u32, h: u32, mi: u32, desc: &str) -> Event {
        Event::new(date(y, mo, d), time(h, mi), desc).unwrap()
    }

    #[test]
    fn new_event_rejects_blank_description() {
        assert_eq!(
            Event::new(date(2025, 8, 15), time(9, 0), "  "),
            Err(EventError::EmptyDescription)
        );
    }

    #[test]
    fn events_for_date_filters_and_sorts_by_time() {
        let mut index = EventIndex::default();
        index.add(event(2025, 8, 15, 17, 0, "dinner"));
        index.add(event(2025, 8, 16, 8, 0, "other day"));
        index.add(event(2025, 8, 15, 9, 30, "standup"));

        let events = index.events_for_date(date(2025, 8, 15));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].description, "standup");
        assert_eq!(events[1].description, "dinner");
        // Idempotent: asking again yields the same view.
        assert_eq!(index.events_for_date(date(2025, 8, 15)), events);
    }

    #[test]
    fn equal_times_preserve_insertion_order() {
        let mut index = EventIndex::default();
        index.add(event(2025, 8, 15, 12, 0, "first"));
        index.add(event(2025, 8, 15, 12, 0, "second"));

        let events = index.events_for_date(date(2025, 8, 15));
        assert_eq!(events[0].description, "first");
        assert_eq!(events[1].description, "second");
    }

    #[test]
    fn has_events_for_date_matches_exact_day() {
        let mut index = EventIndex::default();
        index.add(event(2025, 8, 15, 9, 0, "meeting"));
        assert!(index.has_events_for_date(date(2025, 8, 15)));
        assert!(!index.has_events_for_date(date(2025, 8, 14)));
    }

    #[test]
    fn month_and_range_views_sort_by_date_then_time() {
        let mut index = EventIndex::default();
        index.add(event(2025, 8, 20, 9, 0, "late in month"));
        index.add(event(2025, 8, 5, 18, 0, "early evening"));
        index.add(event(2025, 8, 5, 7, 0, "early morning"));
        index.add(event(2025, 9, 1, 9, 0, "next month"));

        let august = index.events_for_month(2025, 8);
        assert_eq!(august.len(), 3);
        assert_eq!(august[0].description, "early morning");
        assert_eq!(august[1].description, "early evening");
        assert_eq!(august[2].description, "late in month");

        let range = index.events_in_range(date(2025, 8, 5), date(2025, 9, 1));
        assert_eq!(range.len(), 4);
        assert_eq!(range[3].description, "next month");
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut index = EventIndex::default();
        index.add(event(2025, 8, 15, 9, 0, "Team Standup"));
        index.add(event(2025, 8, 10, 9, 0, "dentist"));

        let hits = index.search("standup");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "Team Standup");
        assert!(index.search("lunch").is_empty());
    }

    #[test]
    fn remove_deletes_first_match_only() {
        let mut index = EventIndex::default();
        let twin = event(2025, 8, 15, 12, 0, "twin");
        index.add(twin.clone());
        index.add(twin.clone());

        index.remove(&twin).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remove_missing_event_is_not_found_and_leaves_index_intact() {
        let mut index = EventIndex::default();
        index.add(event(2025, 8, 15, 9, 0, "keep me"));
        let absent = event(2025, 8, 15, 9, 0, "never added");

        assert_eq!(index.remove(&absent), Err(EventError::NotFound));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn replace_substitutes_in_place() {
        let mut index = EventIndex::default();
        let old = event(2025, 8, 15, 9, 0, "draft");
        index.add(event(2025, 8, 15, 8, 0, "before"));
        index.add(old.clone());

        let new = event(2025, 8, 15, 10, 0, "final");
        index.replace(&old, new.clone()).unwrap();
        assert_eq!(index.all()[1], new);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn replace_rejects_invalid_new_value_before_matching() {
        let mut index = EventIndex::default();
        let old = event(2025, 8, 15, 9, 0, "keep");
        index.add(old.clone());

        let bad = Event {
            date: date(2025, 8, 15),
            time: time(10, 0),
            description: "   ".into(),
        };
        assert_eq!(index.replace(&old, bad), Err(EventError::EmptyDescription));
        assert_eq!(index.all()[0], old);
    }

    #[test]
    fn replace_missing_event_is_not_found() {
        let mut index = EventIndex::default();
        let absent = event(2025, 8, 15, 9, 0, "ghost");
        let new = event(2025, 8, 15, 10, 0, "real");
        assert_eq!(index.replace(&absent, new), Err(EventError::NotFound));
        assert!(index.is_empty());
    }
}
