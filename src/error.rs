//! Input validation errors.
//!
//! Raised before any assignment is attempted; a run either validates
//! completely or does not start.

use thiserror::Error;

/// Malformed scheduler input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed time {value:?} in {context}: expected HH:mm")]
    MalformedTime { context: String, value: String },

    /// Window with `start >= end`. Windows do not cross midnight.
    #[error("empty time window {start}-{end} in {context}")]
    EmptyWindow {
        context: String,
        start: String,
        end: String,
    },

    #[error("shift {shift_id} requires a minimum headcount of at least 1")]
    ZeroHeadcount { shift_id: String },

    #[error("duplicate shift id {0}")]
    DuplicateShiftId(String),

    #[error("duplicate employee uid {0}")]
    DuplicateEmployee(String),
}
