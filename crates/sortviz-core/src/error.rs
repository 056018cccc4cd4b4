#![forbid(unsafe_code)]

//! Error types for trace generation and custom input parsing.

use std::fmt;

use crate::algorithm::Algorithm;

/// Trace generation failure. Raised before any trace is built or cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The algorithm cannot process this value (radix sort on a negative).
    InvalidInput {
        algorithm: Algorithm,
        index: usize,
        value: i64,
    },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                algorithm,
                index,
                value,
            } => write!(
                f,
                "{} requires non-negative integers, found {value} at position {index}",
                algorithm.name()
            ),
        }
    }
}

impl std::error::Error for TraceError {}

/// Rejection of user-entered array text at the input boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No numbers were supplied.
    Empty,
    /// A token is not an integer.
    NotANumber { token: String },
    /// A token is an integer too large to represent.
    OutOfRange { token: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "enter at least one number, separated by commas"),
            Self::NotANumber { token } => {
                write!(f, "`{token}` is not a whole number; use values like 5, 2, 8")
            }
            Self::OutOfRange { token } => write!(f, "`{token}` is too large"),
        }
    }
}

impl std::error::Error for InputError {}
