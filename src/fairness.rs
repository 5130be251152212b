//! Workload balancing across a scheduling run.

use std::collections::HashMap;

use crate::domain::Employee;

/// Cumulative assigned minutes per employee within one run.
///
/// Candidates are ranked ascending by total minutes so the least-loaded
/// employee is preferred. Ties fall back to display name, then uid, so the
/// order is total and a run is reproducible.
#[derive(Debug, Default)]
pub struct FairnessLedger {
    minutes: HashMap<String, i64>,
}

impl FairnessLedger {
    /// Seeds every roster member at zero minutes.
    pub fn seed(employees: &[Employee]) -> Self {
        Self {
            minutes: employees
                .iter()
                .map(|employee| (employee.uid.clone(), 0))
                .collect(),
        }
    }

    pub fn minutes_for(&self, uid: &str) -> i64 {
        self.minutes.get(uid).copied().unwrap_or(0)
    }

    /// Adds a committed shift's duration to an employee's total.
    pub fn charge(&mut self, uid: &str, minutes: i64) {
        *self.minutes.entry(uid.to_string()).or_insert(0) += minutes;
    }

    /// Orders candidates: fewest assigned minutes first, then name, then uid.
    pub fn rank(&self, candidates: &mut [&Employee]) {
        candidates.sort_by(|a, b| {
            self.minutes_for(&a.uid)
                .cmp(&self.minutes_for(&b.uid))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.uid.cmp(&b.uid))
        });
    }
}
