//! Errors raised while reading schedules.

use thiserror::Error;

/// Why a meeting (and so its whole schedule line) was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The text doesn't follow `<day><campus><start>,<end>=<name>`
    #[error("malformed meeting `{text}`")]
    Malformed { text: String },

    /// The generator marked this meeting as deliberately absent
    #[error("meeting `{text}` is marked as absent")]
    SentinelAbsent { text: String },

    /// Day character outside of the week
    #[error("unknown day `{day}`")]
    InvalidDay { day: char },

    /// Time range out of the day, or ending before it starts
    #[error("invalid time range {start}..{end}")]
    InvalidRange { start: i32, end: i32 },

    /// Nothing to build a schedule from
    #[error("empty schedule")]
    Empty,
}

impl DecodeError {
    /// Returns true if the upstream generator skipped the meeting on purpose.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, DecodeError::SentinelAbsent { .. })
    }
}
