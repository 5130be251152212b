//! Per-run assignment state.
//!
//! One `RunState` is created per scheduling run and discarded when the run
//! returns; nothing is shared across runs. It is consulted by the
//! eligibility filter (overlap checks) and by condition evaluation
//! (weekly counts, rest gaps), and records both pre-existing bookings found
//! on input slots and the commitments made during the run.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::fairness::FairnessLedger;
use crate::timewindow::TimeWindow;

/// One booking held by an employee: a shift's date and time window.
#[derive(Debug, Clone)]
pub struct Commitment {
    pub shift_id: String,
    pub date: NaiveDate,
    pub window: TimeWindow,
}

/// Mutable bookkeeping for a single scheduling run.
#[derive(Debug)]
pub struct RunState {
    week_start: Weekday,
    pub ledger: FairnessLedger,
    bookings: HashMap<String, Vec<Commitment>>,
}

impl RunState {
    pub fn new(week_start: Weekday, ledger: FairnessLedger) -> Self {
        Self {
            week_start,
            ledger,
            bookings: HashMap::new(),
        }
    }

    /// Records a booking without charging the fairness ledger.
    ///
    /// Used for uids already present on input slots: they occupy time and
    /// count toward weekly limits, but the run's balancing starts from zero.
    pub fn book(&mut self, uid: &str, shift_id: &str, date: NaiveDate, window: TimeWindow) {
        self.bookings
            .entry(uid.to_string())
            .or_default()
            .push(Commitment {
                shift_id: shift_id.to_string(),
                date,
                window,
            });
    }

    /// Records a booking made by the solver and charges its duration.
    pub fn commit(&mut self, uid: &str, shift_id: &str, date: NaiveDate, window: TimeWindow) {
        self.ledger.charge(uid, window.duration_minutes());
        self.book(uid, shift_id, date, window);
    }

    pub fn bookings_for(&self, uid: &str) -> &[Commitment] {
        self.bookings.get(uid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the employee already holds a booking on `date` overlapping
    /// `window`.
    pub fn has_overlap(&self, uid: &str, date: NaiveDate, window: &TimeWindow) -> bool {
        self.bookings_for(uid)
            .iter()
            .any(|booking| booking.date == date && booking.window.overlaps(window))
    }

    /// Number of bookings the employee holds in the week containing `date`.
    pub fn shifts_in_week(&self, uid: &str, date: NaiveDate) -> usize {
        let anchor = week_anchor(date, self.week_start);
        self.bookings_for(uid)
            .iter()
            .filter(|booking| week_anchor(booking.date, self.week_start) == anchor)
            .count()
    }

    /// Minutes of rest between a candidate window on `date` and the nearest
    /// existing booking. `None` when the employee holds no bookings.
    /// An overlapping booking counts as zero rest.
    pub fn shortest_rest_minutes(
        &self,
        uid: &str,
        date: NaiveDate,
        window: &TimeWindow,
    ) -> Option<i64> {
        let start = date.and_time(window.start());
        let end = date.and_time(window.end());
        self.bookings_for(uid)
            .iter()
            .map(|booking| {
                let booked_start = booking.date.and_time(booking.window.start());
                let booked_end = booking.date.and_time(booking.window.end());
                if start < booked_end && booked_start < end {
                    0
                } else if start >= booked_end {
                    (start - booked_end).num_minutes()
                } else {
                    (booked_start - end).num_minutes()
                }
            })
            .min()
    }
}

/// First day of the week containing `date`.
fn week_anchor(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(start, end, "test").unwrap()
    }

    fn state() -> RunState {
        RunState::new(Weekday::Mon, FairnessLedger::default())
    }

    #[test]
    fn test_overlap_only_on_same_date() {
        let mut state = state();
        state.book("u1", "s1", date("2025-01-06"), window("08:00", "12:00"));

        assert!(state.has_overlap("u1", date("2025-01-06"), &window("11:00", "15:00")));
        assert!(!state.has_overlap("u1", date("2025-01-07"), &window("11:00", "15:00")));
        assert!(!state.has_overlap("u1", date("2025-01-06"), &window("12:00", "15:00")));
    }

    #[test]
    fn test_weekly_count_buckets_by_week_start() {
        let mut state = state();
        // 2025-01-06 is a Monday.
        state.book("u1", "s1", date("2025-01-06"), window("08:00", "12:00"));
        state.book("u1", "s2", date("2025-01-12"), window("08:00", "12:00")); // Sunday
        state.book("u1", "s3", date("2025-01-13"), window("08:00", "12:00")); // next Monday

        assert_eq!(state.shifts_in_week("u1", date("2025-01-08")), 2);
        assert_eq!(state.shifts_in_week("u1", date("2025-01-13")), 1);
    }

    #[test]
    fn test_weekly_count_with_sunday_week_start() {
        let mut state = RunState::new(Weekday::Sun, FairnessLedger::default());
        state.book("u1", "s1", date("2025-01-11"), window("08:00", "12:00")); // Saturday
        state.book("u1", "s2", date("2025-01-12"), window("08:00", "12:00")); // Sunday

        // Sunday opens a new week.
        assert_eq!(state.shifts_in_week("u1", date("2025-01-11")), 1);
        assert_eq!(state.shifts_in_week("u1", date("2025-01-12")), 1);
    }

    #[test]
    fn test_shortest_rest_spans_dates() {
        let mut state = state();
        state.book("u1", "s1", date("2025-01-06"), window("18:00", "22:00"));

        // 22:00 to 06:00 next day is 8 hours.
        let rest = state.shortest_rest_minutes("u1", date("2025-01-07"), &window("06:00", "10:00"));
        assert_eq!(rest, Some(8 * 60));

        // Candidate before the booking: 14:00-16:00 ends 2h before 18:00.
        let rest = state.shortest_rest_minutes("u1", date("2025-01-06"), &window("14:00", "16:00"));
        assert_eq!(rest, Some(2 * 60));
    }

    #[test]
    fn test_shortest_rest_zero_on_overlap() {
        let mut state = state();
        state.book("u1", "s1", date("2025-01-06"), window("08:00", "12:00"));
        let rest = state.shortest_rest_minutes("u1", date("2025-01-06"), &window("11:00", "13:00"));
        assert_eq!(rest, Some(0));
    }

    #[test]
    fn test_no_bookings_means_no_rest_bound() {
        let state = state();
        assert_eq!(
            state.shortest_rest_minutes("u1", date("2025-01-06"), &window("08:00", "12:00")),
            None
        );
    }

    #[test]
    fn test_commit_charges_ledger() {
        let mut state = state();
        state.commit("u1", "s1", date("2025-01-06"), window("08:00", "12:00"));
        assert_eq!(state.ledger.minutes_for("u1"), 240);
        assert_eq!(state.bookings_for("u1").len(), 1);
    }
}
