//! Clock-time windows and their interval arithmetic.
//!
//! A window is a half-open interval `[start, end)` of wall-clock times
//! within a single day. Two back-to-back windows (one ending at 12:00,
//! one starting at 12:00) do not overlap.

use chrono::NaiveTime;

use crate::error::ValidationError;

const HM_FORMAT: &str = "%H:%M";

/// A half-open `[start, end)` time range within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Parses a window from two "HH:mm" strings.
    ///
    /// `context` names the owning record for error messages
    /// (e.g. "shift s1").
    pub fn parse(start: &str, end: &str, context: &str) -> Result<Self, ValidationError> {
        let parsed_start = parse_hm(start, context)?;
        let parsed_end = parse_hm(end, context)?;
        if parsed_start >= parsed_end {
            return Err(ValidationError::EmptyWindow {
                context: context.to_string(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: parsed_start,
            end: parsed_end,
        })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether this window fully contains `other`.
    pub fn contains(&self, other: &TimeWindow) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether this window overlaps `other` at all (half-open semantics).
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

fn parse_hm(value: &str, context: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, HM_FORMAT).map_err(|_| ValidationError::MalformedTime {
        context: context.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(start, end, "test").unwrap()
    }

    #[test]
    fn test_parse_valid() {
        let w = window("08:00", "12:30");
        assert_eq!(w.duration_minutes(), 270);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = TimeWindow::parse("8h00", "12:00", "shift s1").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedTime { .. }));
        assert!(err.to_string().contains("shift s1"));
    }

    #[test]
    fn test_parse_rejects_inverted() {
        let err = TimeWindow::parse("14:00", "12:00", "test").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyWindow { .. }));
    }

    #[test]
    fn test_parse_rejects_zero_length() {
        let err = TimeWindow::parse("12:00", "12:00", "test").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyWindow { .. }));
    }

    #[test]
    fn test_containment() {
        let outer = window("07:00", "13:00");
        let inner = window("08:00", "12:00");
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        // Containment is inclusive at both edges.
        assert!(inner.contains(&inner));
    }

    #[test]
    fn test_partial_overlap_is_not_containment() {
        let a = window("08:00", "12:00");
        let b = window("10:00", "14:00");
        assert!(!a.contains(&b));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_back_to_back_windows_do_not_overlap() {
        let morning = window("08:00", "12:00");
        let afternoon = window("12:00", "16:00");
        assert!(!morning.overlaps(&afternoon));
        assert!(!afternoon.overlaps(&morning));
    }

    #[test]
    fn test_disjoint_windows_do_not_overlap() {
        let a = window("08:00", "10:00");
        let b = window("11:00", "12:00");
        assert!(!a.overlaps(&b));
    }
}
