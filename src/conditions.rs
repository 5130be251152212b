//! Schedule conditions: named rules that can veto an employee-shift pairing.
//!
//! Conditions are evaluated against the tentative assignment state built up
//! during a run. A pairing is permitted only when every condition permits
//! it. Unrecognized condition kinds deserialize into the catch-all variant
//! and always permit, so a newer schema never aborts a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Employee, ShiftSlot};
use crate::state::RunState;
use crate::timewindow::TimeWindow;

/// Outcome of evaluating one condition against a candidate pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Permit,
    Deny { reason: String },
}

impl Verdict {
    pub fn is_permit(&self) -> bool {
        matches!(self, Verdict::Permit)
    }
}

fn deny(reason: String) -> Verdict {
    Verdict::Deny { reason }
}

/// A named constraint, tagged by `kind` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScheduleCondition {
    /// Caps how many shifts an employee may hold within one week.
    /// Applies to one employee when `employee_id` is set, otherwise to all.
    MaxShiftsPerWeek {
        #[serde(
            rename = "employeeId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        employee_id: Option<String>,
        limit: u32,
    },

    /// Requires a minimum gap between any two shifts of the same employee.
    MinRestHours { hours: u32 },

    /// Blocks assignment on one date, for one employee or for everyone.
    BlackoutDate {
        #[serde(
            rename = "employeeId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        employee_id: Option<String>,
        date: NaiveDate,
    },

    /// Restricts the named employee to shifts requiring one role.
    RoleExclusivity {
        #[serde(rename = "employeeId")]
        employee_id: String,
        role: String,
    },

    /// Any condition kind this crate does not recognize, kept as raw JSON.
    /// Always permits.
    #[serde(untagged)]
    Unsupported(serde_json::Value),
}

impl ScheduleCondition {
    /// Evaluates this condition for a candidate pairing.
    ///
    /// `window` is the shift's parsed time window; `state` holds the
    /// bookings committed so far in the run.
    pub fn evaluate(
        &self,
        employee: &Employee,
        shift: &ShiftSlot,
        window: &TimeWindow,
        state: &RunState,
    ) -> Verdict {
        match self {
            Self::MaxShiftsPerWeek { employee_id, limit } => {
                if employee_id.as_deref().is_some_and(|id| id != employee.uid) {
                    return Verdict::Permit;
                }
                let held = state.shifts_in_week(&employee.uid, shift.date);
                if held >= *limit as usize {
                    deny(format!("max {limit} shifts per week reached"))
                } else {
                    Verdict::Permit
                }
            }
            Self::MinRestHours { hours } => {
                match state.shortest_rest_minutes(&employee.uid, shift.date, window) {
                    Some(rest) if rest < i64::from(*hours) * 60 => {
                        deny(format!("under {hours}h rest from an existing shift"))
                    }
                    _ => Verdict::Permit,
                }
            }
            Self::BlackoutDate { employee_id, date } => {
                let applies = employee_id
                    .as_deref()
                    .is_none_or(|id| id == employee.uid);
                if applies && shift.date == *date {
                    deny(format!("blackout on {date}"))
                } else {
                    Verdict::Permit
                }
            }
            Self::RoleExclusivity { employee_id, role } => {
                if *employee_id == employee.uid && shift.role != *role {
                    deny(format!("restricted to {role} shifts"))
                } else {
                    Verdict::Permit
                }
            }
            Self::Unsupported(_) => Verdict::Permit,
        }
    }

    /// Kind tag of an unrecognized condition, when this is one.
    pub fn unsupported_kind(&self) -> Option<String> {
        match self {
            Self::Unsupported(raw) => Some(
                raw.get("kind")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
            ),
            _ => None,
        }
    }
}
