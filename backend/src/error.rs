//! Error types for the date picker backend.

use shared::{ParseDateError, SelectionMode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error(transparent)]
    Parse(#[from] ParseDateError),

    #[error("'{value}' is not a valid value for selection mode {mode}")]
    InvalidValue { mode: SelectionMode, value: String },

    #[error("selection mode {mode} accepts at most {max} keys, got {got}")]
    TooManyKeys {
        mode: SelectionMode,
        max: usize,
        got: usize,
    },

    #[error("unknown event subject '{0}'")]
    UnknownSubject(String),

    #[error("{field} value '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} value {value} is out of range")]
    TimeOutOfRange { field: &'static str, value: u32 },

    #[error("no node at patch path {0:?}")]
    InvalidPatchPath(Vec<usize>),

    #[error("date picker has been destroyed")]
    Destroyed,
}

pub type PickerResult<T> = Result<T, PickerError>;
