//! Candidate pool construction for one shift.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{Employee, ShiftSlot};
use crate::state::RunState;
use crate::timewindow::TimeWindow;

/// Parsed availability for the run: employee uid and date to the windows
/// the employee declared willingness to work.
#[derive(Debug, Default)]
pub struct AvailabilityIndex {
    by_employee: HashMap<String, HashMap<NaiveDate, Vec<TimeWindow>>>,
}

impl AvailabilityIndex {
    pub fn add(&mut self, uid: &str, date: NaiveDate, window: TimeWindow) {
        self.by_employee
            .entry(uid.to_string())
            .or_default()
            .entry(date)
            .or_default()
            .push(window);
    }

    pub fn windows_for(&self, uid: &str, date: NaiveDate) -> &[TimeWindow] {
        self.by_employee
            .get(uid)
            .and_then(|days| days.get(&date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Employees who may be considered for `shift` at all.
///
/// Role match, availability containment, and the no-double-booking rule.
/// An employee with several declared windows on the date qualifies when any
/// one of them fully contains the shift. Output order follows the roster;
/// preference ordering is the fairness ledger's job.
pub fn eligible_candidates<'a>(
    shift: &ShiftSlot,
    window: &TimeWindow,
    employees: &'a [Employee],
    availability: &AvailabilityIndex,
    state: &RunState,
) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|employee| employee.has_role(&shift.role))
        .filter(|employee| {
            availability
                .windows_for(&employee.uid, shift.date)
                .iter()
                .any(|declared| declared.contains(window))
        })
        .filter(|employee| !state.has_overlap(&employee.uid, shift.date, window))
        .collect()
}
