//! Structured descriptions of data failures.
//!
//! The core never builds a domain error itself. It describes what went wrong
//! with a [`Failure`] and hands it to the error builder registered for the
//! failure's [`ErrorKind`].

use std::fmt::{self, Display};

use crate::node::NodeKind;

/// Registry key for error builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidType,
    RequiredFieldMissing,
    PropertyCountOutOfBounds,
    ItemCountOutOfBounds,
    AdditionalProperties,
    AdditionalItems,
    ValidationFailed,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::InvalidType,
        ErrorKind::RequiredFieldMissing,
        ErrorKind::PropertyCountOutOfBounds,
        ErrorKind::ItemCountOutOfBounds,
        ErrorKind::AdditionalProperties,
        ErrorKind::AdditionalItems,
        ErrorKind::ValidationFailed,
    ];

    /// Kinds emitted by the primitive readers on their own; an environment
    /// cannot be built without builders for these.
    pub const REQUIRED: [ErrorKind; 2] = [ErrorKind::InvalidType, ErrorKind::RequiredFieldMissing];

    /// Machine-readable code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidType => "invalid_type",
            ErrorKind::RequiredFieldMissing => "required",
            ErrorKind::PropertyCountOutOfBounds => "property_count",
            ErrorKind::ItemCountOutOfBounds => "item_count",
            ErrorKind::AdditionalProperties => "additional_properties",
            ErrorKind::AdditionalItems => "additional_items",
            ErrorKind::ValidationFailed => "validation_failed",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parameters of a single data failure, passed to an error builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The node has a different kind than the reader expects.
    InvalidType { expected: NodeKind, actual: NodeKind },
    /// A required node is absent.
    RequiredFieldMissing,
    /// An object has too few or too many properties.
    PropertyCountOutOfBounds {
        min: Option<usize>,
        max: Option<usize>,
        actual: usize,
    },
    /// An array has too few or too many items.
    ItemCountOutOfBounds {
        min: Option<usize>,
        max: Option<usize>,
        actual: usize,
    },
    /// An object carries properties that were not declared.
    AdditionalProperties { names: Vec<String> },
    /// An array is longer than its positional item declarations allow.
    AdditionalItems { max: usize, actual: usize },
    /// A value-level rule rejected the value.
    ValidationFailed {
        rule: &'static str,
        expected: String,
        actual: String,
    },
}

impl Failure {
    /// Returns the registry key for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Failure::InvalidType { .. } => ErrorKind::InvalidType,
            Failure::RequiredFieldMissing => ErrorKind::RequiredFieldMissing,
            Failure::PropertyCountOutOfBounds { .. } => ErrorKind::PropertyCountOutOfBounds,
            Failure::ItemCountOutOfBounds { .. } => ErrorKind::ItemCountOutOfBounds,
            Failure::AdditionalProperties { .. } => ErrorKind::AdditionalProperties,
            Failure::AdditionalItems { .. } => ErrorKind::AdditionalItems,
            Failure::ValidationFailed { .. } => ErrorKind::ValidationFailed,
        }
    }
}

fn describe_bounds(min: Option<usize>, max: Option<usize>, unit: &str) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("between {} and {} {}", min, max, unit),
        (Some(min), None) => format!("at least {} {}", min, unit),
        (None, Some(max)) => format!("at most {} {}", max, unit),
        (None, None) => format!("any number of {}", unit),
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::InvalidType { expected, actual } => {
                write!(f, "expected {}, got {}", expected, actual)
            }
            Failure::RequiredFieldMissing => write!(f, "required value is missing"),
            Failure::PropertyCountOutOfBounds { min, max, actual } => write!(
                f,
                "object must have {}, got {}",
                describe_bounds(*min, *max, "properties"),
                actual
            ),
            Failure::ItemCountOutOfBounds { min, max, actual } => write!(
                f,
                "array must have {}, got {}",
                describe_bounds(*min, *max, "items"),
                actual
            ),
            Failure::AdditionalProperties { names } => {
                write!(f, "unknown properties: {}", names.join(", "))
            }
            Failure::AdditionalItems { max, actual } => {
                write!(f, "array must have at most {} items, got {}", max, actual)
            }
            Failure::ValidationFailed {
                rule,
                expected,
                actual,
            } => write!(f, "{}: expected {}, got {}", rule, expected, actual),
        }
    }
}
