//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to expand a range specification such as `"1-3,5"`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("range specification is empty")]
    Empty,
    #[error("range token '{token}' does not start with a number")]
    MissingStart { token: String },
    #[error("range token '{token}' is malformed")]
    MalformedToken { token: String },
    #[error("range {start}-{end} runs backwards")]
    ReversedRange { start: usize, end: usize },
    #[error("field index {value} exceeds the supported maximum of {max}")]
    IndexTooLarge { value: String, max: usize },
}

/// Failure while selecting fields out of a text blob.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CutError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("fields are numbered from 1")]
    ZeroField,
    #[error("field separator must not be empty")]
    EmptySeparator,
    #[error("field {requested} requested but line {line} only has {available} field(s)")]
    RangeOutOfBounds {
        requested: usize,
        available: usize,
        line: usize,
    },
}

/// A file needed by the difference operation could not be read.
#[derive(Debug, Error)]
#[error("cannot compare {} against {}: failed to read {}", .left.display(), .right.display(), .failed.display())]
pub struct FileAccessError {
    pub left: PathBuf,
    pub right: PathBuf,
    pub failed: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Errors raised by the headless notebook model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no tab at index {0}")]
    InvalidTab(usize),
    #[error("tab {index} is not a {expected} tab")]
    WrongTabKind { index: usize, expected: &'static str },
    #[error("tab has no file path to save to")]
    MissingPath,
    #[error("tab has unsaved changes and no file path")]
    UnsavedChanges,
}
