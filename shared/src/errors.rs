//! Shared error types for the timetable system

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid {kind} id: {value} (ids start at 1)")]
    InvalidId { kind: &'static str, value: u32 },

    #[error("Invalid weekday: {value} (expected 1..=5)")]
    InvalidWeekday { value: u8 },

    #[error("Invalid period: {value} (expected 1..=6)")]
    InvalidPeriod { value: u8 },
}

pub type SharedResult<T> = Result<T, SharedError>;
