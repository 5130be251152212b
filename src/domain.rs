//! Input model for a scheduling run.
//!
//! These records arrive wholesale from the surrounding application (roster
//! management, shift-template expansion, availability capture) and are
//! treated as read-only snapshots, except that the solver appends to
//! `ShiftSlot::assigned_users` as it commits assignments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A staff member on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub uid: String,
    pub name: String,
    /// Primary role.
    pub role: String,
    #[serde(default)]
    pub secondary_roles: Vec<String>,
}

impl Employee {
    pub fn new(uid: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            role: role.into(),
            secondary_roles: Vec::new(),
        }
    }

    pub fn with_secondary_roles(
        mut self,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        for role in roles {
            self.secondary_roles.push(role.into());
        }
        self
    }

    /// Whether the employee can cover `role`, as primary or secondary.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role || self.secondary_roles.iter().any(|r| r == role)
    }
}

/// A dated staffing need produced by shift-template expansion.
///
/// `start`/`end` are "HH:mm" strings interpreted on `date`; they are
/// validated when a run begins. `assigned_users` holds employee uids and
/// may be non-empty on input; existing entries are honored, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSlot {
    pub id: String,
    #[serde(default)]
    pub template_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub label: String,
    /// Required role.
    pub role: String,
    pub start: String,
    pub end: String,
    pub min_users: u32,
    #[serde(default)]
    pub assigned_users: Vec<String>,
}

impl ShiftSlot {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        role: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        min_users: u32,
    ) -> Self {
        Self {
            id: id.into(),
            template_id: String::new(),
            date,
            label: String::new(),
            role: role.into(),
            start: start.into(),
            end: end.into(),
            min_users,
            assigned_users: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }
}

/// One employee's declared willingness to work on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub ranges: Vec<HmRange>,
}

impl AvailabilityWindow {
    pub fn new(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            date,
            ranges: Vec::new(),
        }
    }

    pub fn with_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.ranges.push(HmRange {
            start: start.into(),
            end: end.into(),
        });
        self
    }
}

/// An "HH:mm" pair as captured from the UI; validated at run start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmRange {
    pub start: String,
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role_primary_and_secondary() {
        let employee = Employee::new("u1", "Anh", "Phục vụ").with_secondary_roles(["Pha chế"]);
        assert!(employee.has_role("Phục vụ"));
        assert!(employee.has_role("Pha chế"));
        assert!(!employee.has_role("Bếp"));
    }

    #[test]
    fn test_shift_slot_wire_names() {
        let shift = ShiftSlot::new(
            "s1",
            "2025-01-06".parse().unwrap(),
            "server",
            "08:00",
            "12:00",
            2,
        )
        .with_label("Morning")
        .with_template("t1");

        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(json["minUsers"], 2);
        assert_eq!(json["templateId"], "t1");
        assert_eq!(json["assignedUsers"], serde_json::json!([]));
        assert_eq!(json["date"], "2025-01-06");
    }

    #[test]
    fn test_optional_shift_fields_default_on_deserialize() {
        let shift: ShiftSlot = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "date": "2025-01-06",
            "role": "server",
            "start": "08:00",
            "end": "12:00",
            "minUsers": 1
        }))
        .unwrap();
        assert!(shift.assigned_users.is_empty());
        assert!(shift.label.is_empty());
    }
}
