use chrono::{Datelike, Local, NaiveDate};

use crate::calendar;

/// Three-month view window. `center` is always the first day of a month;
/// the previous and next months are derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    center: NaiveDate,
}

impl CalendarWindow {
    pub fn containing(date: NaiveDate) -> Self {
        CalendarWindow {
            center: calendar::first_day_of(date.year(), date.month()),
        }
    }

    pub fn center(&self) -> NaiveDate {
        self.center
    }

    pub fn previous_month(&self) -> NaiveDate {
        calendar::add_months(self.center, -1)
    }

    pub fn next_month(&self) -> NaiveDate {
        calendar::add_months(self.center, 1)
    }

    pub fn shift_backward(&mut self) {
        self.center = calendar::add_months(self.center, -1);
    }

    pub fn shift_forward(&mut self) {
        self.center = calendar::add_months(self.center, 1);
    }

    /// Inclusive span from the first day of the previous month to the last
    /// day of the next month.
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        let prev = self.previous_month();
        let next = self.next_month();
        (
            prev,
            calendar::last_day_of(next.year(), next.month()),
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (start, end) = self.visible_range();
        date >= start && date <= end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    date: NaiveDate,
}

impl Selection {
    pub fn new(date: NaiveDate) -> Self {
        Selection { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_within(&self, window: &CalendarWindow) -> bool {
        window.contains(self.date)
    }

    /// After a window shift, pull an out-of-range selection into the center
    /// month: keep the desired day number, else clamp to the month's last
    /// day. A selection still inside the window is left alone.
    pub fn adjust_for_window_change(&mut self, window: &CalendarWindow, desired_day: u32) {
        if self.is_within(window) {
            return;
        }
        let center = window.center();
        let day = desired_day.min(calendar::days_in_month(center.year(), center.month()));
        self.date = NaiveDate::from_ymd_opt(center.year(), center.month(), day)
            .expect("valid calendar date");
    }
}

/// The one authoritative view of window + selection. All navigation goes
/// through these methods; rejected moves leave both untouched and report
/// nothing.
#[derive(Debug, Clone, Copy)]
pub struct NavigationController {
    window: CalendarWindow,
    selection: Selection,
}

impl NavigationController {
    pub fn new(today: NaiveDate) -> Self {
        NavigationController {
            window: CalendarWindow::containing(today),
            selection: Selection::new(today),
        }
    }

    pub fn window(&self) -> &CalendarWindow {
        &self.window
    }

    pub fn selection(&self) -> NaiveDate {
        self.selection.date()
    }

    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        self.window.visible_range()
    }

    pub fn is_selection_in_center_month(&self) -> bool {
        let selected = self.selection.date();
        let center = self.window.center();
        selected.year() == center.year() && selected.month() == center.month()
    }

    pub fn move_left(&mut self) {
        let current = self.selection.date();
        if let Some(candidate) = current.pred_opt() {
            if self.window.contains(candidate) {
                self.selection = Selection::new(candidate);
                return;
            }
        }
        // From the first of a month the step may still land on the previous
        // month's last day, if that day is visible.
        if current.day() == 1 {
            let prev = calendar::add_months(
                calendar::first_day_of(current.year(), current.month()),
                -1,
            );
            let landing = calendar::last_day_of(prev.year(), prev.month());
            if self.window.contains(landing) {
                self.selection = Selection::new(landing);
            }
        }
    }

    pub fn move_right(&mut self) {
        let current = self.selection.date();
        if let Some(candidate) = current.succ_opt() {
            if self.window.contains(candidate) {
                self.selection = Selection::new(candidate);
                return;
            }
        }
        // From the last day of a month the step may still land on the next
        // month's first day, if that day is visible.
        if current.day() == calendar::days_in_month(current.year(), current.month()) {
            let landing = calendar::add_months(
                calendar::first_day_of(current.year(), current.month()),
                1,
            );
            if self.window.contains(landing) {
                self.selection = Selection::new(landing);
            }
        }
    }

    /// Week steps never spill past the window edge: out of range is a no-op.
    pub fn move_up(&mut self) {
        self.step_days(-7);
    }

    pub fn move_down(&mut self) {
        self.step_days(7);
    }

    fn step_days(&mut self, days: i64) {
        if let Some(candidate) = self
            .selection
            .date()
            .checked_add_signed(chrono::Duration::days(days))
        {
            if self.window.contains(candidate) {
                self.selection = Selection::new(candidate);
            }
        }
    }

    pub fn shift_month_backward(&mut self) {
        let desired_day = self.selection.date().day();
        self.window.shift_backward();
        self.selection
            .adjust_for_window_change(&self.window, desired_day);
    }

    pub fn shift_month_forward(&mut self) {
        let desired_day = self.selection.date().day();
        self.window.shift_forward();
        self.selection
            .adjust_for_window_change(&self.window, desired_day);
    }

    /// Recenter the window on today's month and select today.
    pub fn reset_to(&mut self, today: NaiveDate) {
        self.window = CalendarWindow::containing(today);
        self.selection = Selection::new(today);
    }

    pub fn reset_to_current(&mut self) {
        self.reset_to(Local::now().date_naive());
    }

    /// Commit the date only if it is already visible.
    pub fn set_selection(&mut self, date: NaiveDate) -> bool {
        if self.window.contains(date) {
            self.selection = Selection::new(date);
            return true;
        }
        false
    }

    /// Recenter on the date's month and select it, wherever it is. Used when
    /// following a search result.
    pub fn jump_to(&mut self, date: NaiveDate) {
        self.window = CalendarWindow::containing(date);
        self.selection = Selection::new(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller_at(y: i32, m: u32, d: u32) -> NavigationController {
        NavigationController::new(date(y, m, d))
    }

    #[test]
    fn window_center_is_day_normalized() {
        let nav = controller_at(2025, 8, 23);
        assert_eq!(nav.window().center(), date(2025, 8, 1));
        assert_eq!(nav.selection(), date(2025, 8, 23));
    }

    #[test]
    fn visible_range_spans_three_months() {
        let nav = controller_at(2025, 8, 15);
        assert_eq!(nav.visible_range(), (date(2025, 7, 1), date(2025, 9, 30)));
    }

    #[test]
    fn visible_range_spans_year_boundary() {
        let nav = controller_at(2026, 1, 10);
        assert_eq!(nav.visible_range(), (date(2025, 12, 1), date(2026, 2, 28)));
    }

    #[test]
    fn left_then_right_returns_to_start() {
        let mut nav = controller_at(2025, 8, 15);
        nav.move_left();
        assert_eq!(nav.selection(), date(2025, 8, 14));
        nav.move_right();
        assert_eq!(nav.selection(), date(2025, 8, 15));
    }

    #[test]
    fn left_is_refused_at_range_start() {
        let mut nav = controller_at(2025, 8, 15);
        assert!(nav.set_selection(date(2025, 7, 1)));
        nav.move_left();
        assert_eq!(nav.selection(), date(2025, 7, 1));
    }

    #[test]
    fn right_is_refused_at_range_end() {
        let mut nav = controller_at(2025, 8, 15);
        assert!(nav.set_selection(date(2025, 9, 30)));
        nav.move_right();
        assert_eq!(nav.selection(), date(2025, 9, 30));
    }

    #[test]
    fn right_crosses_into_next_month() {
        let mut nav = controller_at(2025, 8, 31);
        nav.move_right();
        assert_eq!(nav.selection(), date(2025, 9, 1));
    }

    #[test]
    fn left_crosses_into_previous_month() {
        let mut nav = controller_at(2025, 8, 1);
        nav.move_left();
        assert_eq!(nav.selection(), date(2025, 7, 31));
    }

    #[test]
    fn week_steps_commit_inside_the_window() {
        let mut nav = controller_at(2025, 8, 15);
        nav.move_up();
        assert_eq!(nav.selection(), date(2025, 8, 8));
        nav.move_down();
        assert_eq!(nav.selection(), date(2025, 8, 15));
    }

    #[test]
    fn week_step_refuses_to_leave_the_window() {
        let mut nav = controller_at(2025, 8, 15);
        assert!(nav.set_selection(date(2025, 7, 3)));
        nav.move_up();
        assert_eq!(nav.selection(), date(2025, 7, 3));

        assert!(nav.set_selection(date(2025, 9, 28)));
        nav.move_down();
        assert_eq!(nav.selection(), date(2025, 9, 28));
    }

    #[test]
    fn month_shift_round_trip_restores_center() {
        let mut nav = controller_at(2025, 12, 10);
        nav.shift_month_forward();
        assert_eq!(nav.window().center(), date(2026, 1, 1));
        nav.shift_month_backward();
        assert_eq!(nav.window().center(), date(2025, 12, 1));
    }

    #[test]
    fn shift_leaves_visible_selection_alone() {
        let mut nav = controller_at(2025, 8, 15);
        nav.shift_month_backward();
        assert_eq!(nav.window().center(), date(2025, 7, 1));
        assert_eq!(nav.selection(), date(2025, 8, 15));
    }

    #[test]
    fn repeated_shifts_preserve_the_day_number() {
        let mut nav = controller_at(2025, 8, 15);
        nav.shift_month_backward();
        nav.shift_month_backward();
        // Center June, window May..July; August 15 fell out and lands on
        // the same day of the center month.
        assert_eq!(nav.window().center(), date(2025, 6, 1));
        assert_eq!(nav.selection(), date(2025, 6, 15));
    }

    #[test]
    fn shift_clamps_to_last_day_of_shorter_center_month() {
        let mut nav = controller_at(2025, 7, 31);
        nav.shift_month_forward();
        nav.shift_month_forward();
        // Center September (30 days), July 31 no longer visible.
        assert_eq!(nav.window().center(), date(2025, 9, 1));
        assert_eq!(nav.selection(), date(2025, 9, 30));
    }

    #[test]
    fn shift_preserves_day_29_into_leap_february() {
        let mut nav = controller_at(2024, 4, 29);
        nav.shift_month_backward();
        nav.shift_month_backward();
        // Center February 2024; April 29 fell out of the January..March
        // window and day 29 exists in a leap February.
        assert_eq!(nav.window().center(), date(2024, 2, 1));
        assert_eq!(nav.selection(), date(2024, 2, 29));
    }

    #[test]
    fn shift_clamps_into_plain_february() {
        let mut nav = controller_at(2023, 4, 30);
        nav.shift_month_backward();
        nav.shift_month_backward();
        assert_eq!(nav.window().center(), date(2023, 2, 1));
        assert_eq!(nav.selection(), date(2023, 2, 28));
    }

    #[test]
    fn august_walkthrough_scenario() {
        let mut nav = controller_at(2025, 8, 31);
        nav.move_right();
        assert_eq!(nav.selection(), date(2025, 9, 1));
        nav.shift_month_forward();
        // September 1 is still inside the August..October window, so the
        // day-preservation path is bypassed.
        assert_eq!(nav.window().center(), date(2025, 9, 1));
        assert_eq!(nav.selection(), date(2025, 9, 1));
    }

    #[test]
    fn set_selection_rejects_dates_outside_the_window() {
        let mut nav = controller_at(2025, 8, 15);
        assert!(!nav.set_selection(date(2025, 11, 1)));
        assert_eq!(nav.selection(), date(2025, 8, 15));
        assert!(nav.set_selection(date(2025, 9, 30)));
        assert_eq!(nav.selection(), date(2025, 9, 30));
    }

    #[test]
    fn reset_recenters_on_today() {
        let mut nav = controller_at(2025, 8, 15);
        nav.shift_month_forward();
        nav.shift_month_forward();
        nav.reset_to(date(2025, 8, 6));
        assert_eq!(nav.window().center(), date(2025, 8, 1));
        assert_eq!(nav.selection(), date(2025, 8, 6));
    }

    #[test]
    fn jump_to_recenters_anywhere() {
        let mut nav = controller_at(2025, 8, 15);
        nav.jump_to(date(2026, 3, 9));
        assert_eq!(nav.window().center(), date(2026, 3, 1));
        assert_eq!(nav.selection(), date(2026, 3, 9));
        assert!(nav.is_selection_in_center_month());
    }

    #[test]
    fn selection_in_center_month_check() {
        let mut nav = controller_at(2025, 8, 15);
        assert!(nav.is_selection_in_center_month());
        assert!(nav.set_selection(date(2025, 9, 2)));
        assert!(!nav.is_selection_in_center_month());
    }
}
