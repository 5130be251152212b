//! Greedy shift-assignment solver.
//!
//! Shifts are processed in priority order (earlier first, harder-to-fill
//! first within a tie) and filled one commitment at a time, always giving
//! the next seat to the least-loaded permitted candidate. Commitments are
//! never revisited: a later shortfall does not undo an earlier assignment.
//! The trade is simplicity and determinism over global optimality.

use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::conditions::{ScheduleCondition, Verdict};
use crate::domain::{AvailabilityWindow, Employee, ShiftSlot};
use crate::eligibility::{AvailabilityIndex, eligible_candidates};
use crate::error::ValidationError;
use crate::fairness::FairnessLedger;
use crate::state::RunState;
use crate::timewindow::TimeWindow;

/// Tunables for a scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    /// First day of the week used by weekly condition windows.
    pub week_start: Weekday,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
        }
    }
}

/// A committed employee-shift pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub shift_id: String,
    pub employee_id: String,
    pub employee_name: String,
}

/// A shift that ended the run below its minimum headcount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfilledEntry {
    pub shift_id: String,
    pub remaining: u32,
}

/// Best-effort result of a scheduling run.
///
/// A run "succeeds" whenever its input validates; understaffing shows up
/// here as `unfilled` entries and `warnings`, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub assignments: Vec<Assignment>,
    pub unfilled: Vec<UnfilledEntry>,
    pub warnings: Vec<String>,
}

/// Assigns employees to shift slots with default options.
///
/// Commits are appended to each slot's `assigned_users`, so the caller can
/// persist the slots directly. Identical inputs produce identical output,
/// including warning order.
pub fn schedule(
    shifts: &mut [ShiftSlot],
    employees: &[Employee],
    availability: &[AvailabilityWindow],
    conditions: &[ScheduleCondition],
) -> Result<ScheduleOutcome, ValidationError> {
    schedule_with_options(
        shifts,
        employees,
        availability,
        conditions,
        &ScheduleOptions::default(),
    )
}

pub fn schedule_with_options(
    shifts: &mut [ShiftSlot],
    employees: &[Employee],
    availability: &[AvailabilityWindow],
    conditions: &[ScheduleCondition],
    options: &ScheduleOptions,
) -> Result<ScheduleOutcome, ValidationError> {
    let windows = validate_shifts(shifts)?;
    validate_employees(employees)?;
    let index = build_availability_index(availability)?;

    let mut state = RunState::new(options.week_start, FairnessLedger::seed(employees));
    for (shift, window) in shifts.iter().zip(&windows) {
        for uid in &shift.assigned_users {
            state.book(uid, &shift.id, shift.date, *window);
        }
    }

    let mut warnings: Vec<String> = Vec::new();
    let mut unknown_kinds: HashSet<String> = HashSet::new();
    for condition in conditions {
        if let Some(kind) = condition.unsupported_kind() {
            if unknown_kinds.insert(kind.clone()) {
                tracing::warn!(%kind, "ignoring unsupported schedule condition kind");
                warnings.push(format!(
                    "ignoring unsupported schedule condition kind \"{kind}\""
                ));
            }
        }
    }

    // Earlier shifts first (their availability constraints are the
    // tightest), then harder-to-fill shifts, then id as the final
    // deterministic key.
    let mut order: Vec<usize> = (0..shifts.len()).collect();
    order.sort_by(|&a, &b| {
        shifts[a]
            .date
            .cmp(&shifts[b].date)
            .then_with(|| windows[a].start().cmp(&windows[b].start()))
            .then_with(|| shifts[b].min_users.cmp(&shifts[a].min_users))
            .then_with(|| shifts[a].id.cmp(&shifts[b].id))
    });

    let mut assignments: Vec<Assignment> = Vec::new();
    let mut unfilled: Vec<UnfilledEntry> = Vec::new();

    for &idx in &order {
        let window = windows[idx];
        let mut blocked: Vec<String> = Vec::new();

        while (shifts[idx].assigned_users.len() as u32) < shifts[idx].min_users {
            let shift = &shifts[idx];
            let mut pool: Vec<&Employee> =
                eligible_candidates(shift, &window, employees, &index, &state)
                    .into_iter()
                    .filter(|employee| !shift.assigned_users.contains(&employee.uid))
                    .collect();

            // Conditions veto per shift only; a blocked candidate stays in
            // play for every other shift.
            blocked.clear();
            pool.retain(
                |employee| match first_denial(conditions, employee, shift, &window, &state) {
                    None => true,
                    Some(reason) => {
                        blocked.push(format!("{} blocked: {reason}", employee.name));
                        false
                    }
                },
            );

            if pool.is_empty() {
                break;
            }

            state.ledger.rank(&mut pool);
            let chosen = pool[0];
            state.commit(&chosen.uid, &shift.id, shift.date, window);
            tracing::debug!(shift = %shift.id, employee = %chosen.uid, "committed assignment");
            assignments.push(Assignment {
                shift_id: shift.id.clone(),
                employee_id: chosen.uid.clone(),
                employee_name: chosen.name.clone(),
            });
            let uid = chosen.uid.clone();
            shifts[idx].assigned_users.push(uid);
        }

        let shift = &shifts[idx];
        let remaining = (shift.min_users as usize).saturating_sub(shift.assigned_users.len());
        if remaining > 0 {
            let mut message = format!(
                "shift {} on {} ({} {}-{}) still needs {} of {}: ",
                shift.id, shift.date, shift.role, shift.start, shift.end, remaining, shift.min_users
            );
            if blocked.is_empty() {
                message.push_str(
                    "no eligible candidates (role, availability, or an overlapping booking)",
                );
            } else {
                message.push_str(&blocked.join("; "));
            }
            tracing::warn!(shift = %shift.id, remaining, "understaffed shift");
            warnings.push(message);
            unfilled.push(UnfilledEntry {
                shift_id: shift.id.clone(),
                remaining: remaining as u32,
            });
        }
    }

    Ok(ScheduleOutcome {
        assignments,
        unfilled,
        warnings,
    })
}

fn first_denial(
    conditions: &[ScheduleCondition],
    employee: &Employee,
    shift: &ShiftSlot,
    window: &TimeWindow,
    state: &RunState,
) -> Option<String> {
    conditions
        .iter()
        .find_map(
            |condition| match condition.evaluate(employee, shift, window, state) {
                Verdict::Permit => None,
                Verdict::Deny { reason } => Some(reason),
            },
        )
}

fn validate_shifts(shifts: &[ShiftSlot]) -> Result<Vec<TimeWindow>, ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut windows = Vec::with_capacity(shifts.len());
    for shift in shifts {
        if !seen.insert(shift.id.as_str()) {
            return Err(ValidationError::DuplicateShiftId(shift.id.clone()));
        }
        if shift.min_users == 0 {
            return Err(ValidationError::ZeroHeadcount {
                shift_id: shift.id.clone(),
            });
        }
        let context = format!("shift {}", shift.id);
        windows.push(TimeWindow::parse(&shift.start, &shift.end, &context)?);
    }
    Ok(windows)
}

fn validate_employees(employees: &[Employee]) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for employee in employees {
        if !seen.insert(employee.uid.as_str()) {
            return Err(ValidationError::DuplicateEmployee(employee.uid.clone()));
        }
    }
    Ok(())
}

fn build_availability_index(
    availability: &[AvailabilityWindow],
) -> Result<AvailabilityIndex, ValidationError> {
    let mut index = AvailabilityIndex::default();
    for declared in availability {
        for range in &declared.ranges {
            let context = format!(
                "availability for {} on {}",
                declared.employee_id, declared.date
            );
            let window = TimeWindow::parse(&range.start, &range.end, &context)?;
            index.add(&declared.employee_id, declared.date, window);
        }
    }
    Ok(index)
}
