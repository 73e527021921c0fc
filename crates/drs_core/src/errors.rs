//! Core error taxonomy: structural misconfiguration and bounds violations.
//!
//! Per the error-handling design, these kinds are always fatal at the
//! boundary of the offending operation. `Uncomparable` is deliberately not a
//! variant here — it is a [`crate::value::TriLogic`] value, not an error.

use core::fmt;

/// Minimal error set for core-domain validation & parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoreError {
    /// A row's field could not be parsed into the attribute's declared value type.
    InvalidValue { attribute: alloc::string::String, reason: alloc::string::String },
    /// Attribute metadata is missing, malformed, or self-contradictory.
    InvalidAttribute(alloc::string::String),
    /// More than one attribute was marked as the active decision attribute.
    DuplicateActiveDecision,
    /// More than one attribute was marked as the active identification attribute.
    DuplicateActiveIdentification,
    /// A row did not have the same number of fields as there are attributes.
    RowWidthMismatch { expected: usize, actual: usize },
    /// An object/attribute/condition index was out of bounds.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidValue { attribute, reason } => {
                write!(f, "invalid value for attribute `{attribute}`: {reason}")
            }
            CoreError::InvalidAttribute(s) => write!(f, "invalid attribute metadata: {s}"),
            CoreError::DuplicateActiveDecision => {
                write!(f, "more than one active decision attribute declared")
            }
            CoreError::DuplicateActiveIdentification => {
                write!(f, "more than one active identification attribute declared")
            }
            CoreError::RowWidthMismatch { expected, actual } => {
                write!(f, "row width mismatch: expected {expected} fields, got {actual}")
            }
            CoreError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range (len = {len})")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
