//! Month-grid calendar: day cells with bucketed events.
//!
//! The grid is a pure function of the reference month, the today/
//! selected markers, and the event list; it owns no state beyond its
//! own output and is rebuilt whenever any input changes. Event instants
//! are UTC and bucket by UTC calendar day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::CalendarEvent;

/// Maximum events shown inline per day cell; the rest collapse behind
/// a "+N more" indicator. Display truncation only: the cell keeps the
/// full list.
pub const EVENT_DISPLAY_CAP: usize = 3;

/// Sunday-first weekday header labels.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One cell of the rendered month grid: either leading padding or a
/// day of the month with its events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    /// Day of month (1-based); `None` for padding cells.
    pub day: Option<u32>,
    pub is_today: bool,
    pub is_selected: bool,
    /// Events on this day, ascending by start time.
    pub events: Vec<CalendarEvent>,
}

impl DayCell {
    /// Events to show inline, plus the count collapsed behind the
    /// "+N more" indicator.
    pub fn preview(&self) -> (&[CalendarEvent], usize) {
        let shown = self.events.len().min(EVENT_DISPLAY_CAP);
        (&self.events[..shown], self.events.len() - shown)
    }
}

/// A built month view: leading padding cells followed by one cell per
/// day of the month, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Build the grid for the month containing `reference`, using the
    /// real current date for the today marker.
    pub fn build(
        reference: NaiveDate,
        selected_day: Option<u32>,
        events: &[CalendarEvent],
    ) -> Self {
        let today = chrono::Utc::now().date_naive();
        Self::build_with_today(reference, today, selected_day, events)
    }

    /// Build with an explicit `today`, for deterministic callers and
    /// tests.
    pub fn build_with_today(
        reference: NaiveDate,
        today: NaiveDate,
        selected_day: Option<u32>,
        events: &[CalendarEvent],
    ) -> Self {
        let year = reference.year();
        let month = reference.month();
        let days = days_in_month(year, month);
        let offset = first_weekday_offset(year, month);

        let mut cells = Vec::with_capacity(offset + days as usize);
        for _ in 0..offset {
            cells.push(DayCell::default());
        }
        for day in 1..=days {
            cells.push(DayCell {
                day: Some(day),
                is_today: today.year() == year && today.month() == month && today.day() == day,
                is_selected: selected_day == Some(day),
                events: Vec::new(),
            });
        }

        let mut grid = Self { year, month, cells };
        grid.bucket_events(offset, events);
        grid
    }

    fn bucket_events(&mut self, offset: usize, events: &[CalendarEvent]) {
        for event in events {
            if !event.is_well_formed() {
                tracing::warn!("Skipping event ending before it starts: {}", event.subject);
                continue;
            }
            let date = event.start.date_naive();
            // An event outside the viewed month belongs to no cell here.
            if date.year() != self.year || date.month() != self.month {
                continue;
            }
            let index = offset + date.day() as usize - 1;
            if let Some(cell) = self.cells.get_mut(index) {
                cell.events.push(event.clone());
            }
        }
        for cell in &mut self.cells {
            cell.events.sort_by_key(|e| e.start);
        }
    }

    /// Events bucketed on the given day of this grid's month, in start
    /// order. Unknown days yield an empty slice.
    pub fn events_for_day(&self, day: u32) -> &[CalendarEvent] {
        self.cells
            .iter()
            .find(|c| c.day == Some(day))
            .map(|c| c.events.as_slice())
            .unwrap_or(&[])
    }

    /// Count of real (non-padding) day cells.
    pub fn day_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.day.is_some()).count() as u32
    }

    /// Count of leading padding cells.
    pub fn leading_offset(&self) -> usize {
        self.cells.iter().take_while(|c| c.day.is_none()).count()
    }
}

/// Number of days in the given month, leap years included. Invalid
/// month numbers yield 0 rather than panicking.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    next_month(first).signed_duration_since(first).num_days() as u32
}

/// Weekday index (Sunday = 0) of day 1 of the given month.
pub fn first_weekday_offset(year: i32, month: u32) -> usize {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0)
}

/// Day 1 of the following month, wrapping December into January.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Day 1 of the preceding month, wrapping January into December.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// English month name for the grid header.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(year: i32, month: u32, day: u32, hour: u32, subject: &str) -> CalendarEvent {
        let start = Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap();
        CalendarEvent {
            start,
            end: start + chrono::Duration::hours(1),
            subject: subject.to_string(),
            location: None,
            preview: None,
        }
    }

    #[test]
    fn leap_year_february_has_29_cells() {
        let grid = MonthGrid::build_with_today(date(2024, 2, 1), date(2024, 2, 10), None, &[]);
        assert_eq!(grid.day_count(), 29);
        // Feb 1 2024 is a Thursday: four leading padding cells.
        assert_eq!(grid.leading_offset(), 4);
        assert_eq!(grid.cells.len(), 4 + 29);
    }

    #[test]
    fn common_year_february_has_28_cells() {
        let grid = MonthGrid::build_with_today(date(2023, 2, 1), date(2023, 2, 10), None, &[]);
        assert_eq!(grid.day_count(), 28);
        // Feb 1 2023 is a Wednesday.
        assert_eq!(grid.leading_offset(), 3);
    }

    #[test]
    fn today_and_selected_markers() {
        let grid =
            MonthGrid::build_with_today(date(2024, 3, 15), date(2024, 3, 7), Some(12), &[]);
        let today_cell = grid.cells.iter().find(|c| c.is_today).unwrap();
        assert_eq!(today_cell.day, Some(7));
        let selected_cell = grid.cells.iter().find(|c| c.is_selected).unwrap();
        assert_eq!(selected_cell.day, Some(12));
    }

    #[test]
    fn today_marker_requires_same_month_and_year() {
        let grid =
            MonthGrid::build_with_today(date(2024, 3, 15), date(2024, 4, 15), None, &[]);
        assert!(grid.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn events_bucket_to_their_day_sorted_by_start() {
        let events = vec![
            event(2024, 3, 5, 15, "late"),
            event(2024, 3, 5, 9, "early"),
            event(2024, 3, 20, 12, "other day"),
        ];
        let grid = MonthGrid::build_with_today(date(2024, 3, 1), date(2024, 3, 1), None, &events);

        let day5 = grid.events_for_day(5);
        assert_eq!(day5.len(), 2);
        assert_eq!(day5[0].subject, "early");
        assert_eq!(day5[1].subject, "late");
        assert_eq!(grid.events_for_day(20).len(), 1);
        assert_eq!(grid.events_for_day(6).len(), 0);
    }

    #[test]
    fn events_outside_viewed_month_never_leak() {
        // Viewing April (30 days); a May 31 event must not clip onto
        // any April cell, and neither may adjacent-month events.
        let events = vec![
            event(2024, 5, 31, 10, "day 31 of next month"),
            event(2024, 3, 30, 10, "previous month"),
            event(2023, 4, 15, 10, "same month, previous year"),
        ];
        let grid = MonthGrid::build_with_today(date(2024, 4, 1), date(2024, 4, 1), None, &events);
        assert!(grid.cells.iter().all(|c| c.events.is_empty()));
    }

    #[test]
    fn malformed_events_are_skipped() {
        let start = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let backwards = CalendarEvent {
            start,
            end: start - chrono::Duration::hours(2),
            subject: "time travel".to_string(),
            location: None,
            preview: None,
        };
        let grid =
            MonthGrid::build_with_today(date(2024, 3, 1), date(2024, 3, 1), None, &[backwards]);
        assert_eq!(grid.events_for_day(5).len(), 0);
    }

    #[test]
    fn preview_caps_display_without_losing_data() {
        let events: Vec<CalendarEvent> = (8..13)
            .map(|hour| event(2024, 3, 5, hour, "standup"))
            .collect();
        let grid = MonthGrid::build_with_today(date(2024, 3, 1), date(2024, 3, 1), None, &events);
        let cell = grid
            .cells
            .iter()
            .find(|c| c.day == Some(5))
            .unwrap();
        let (shown, overflow) = cell.preview();
        assert_eq!(shown.len(), EVENT_DISPLAY_CAP);
        assert_eq!(overflow, 2);
        assert_eq!(cell.events.len(), 5);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28); // century, not a leap year
        assert_eq!(days_in_month(2000, 2), 29); // quadricentennial is
    }

    #[test]
    fn month_navigation_wraps_year_boundaries() {
        assert_eq!(next_month(date(2024, 12, 25)), date(2025, 1, 1));
        assert_eq!(previous_month(date(2025, 1, 3)), date(2024, 12, 1));

        // Round-trip lands back in the same month at day 1.
        for month in 1..=12 {
            let start = date(2024, month, 17);
            let round_trip = previous_month(next_month(start));
            assert_eq!(round_trip.month(), start.month());
            assert_eq!(round_trip.year(), start.year());
            assert_eq!(round_trip.day(), 1);
        }
    }

    #[test]
    fn month_names_and_labels() {
        assert_eq!(month_name(date(2024, 1, 5)), "January");
        assert_eq!(month_name(date(2024, 12, 5)), "December");
        assert_eq!(WEEKDAY_LABELS[0], "Sun");
    }
}
