//! A ready-made domain error type.
//!
//! Callers with their own error type register builders for it instead; this
//! one is used by [`EnvironmentBuilder::standard`](crate::EnvironmentBuilder::standard).

use std::fmt::{self, Display};

use crate::error::Failure;

/// A domain error with a machine-readable code and human-readable context.
///
/// # Example
///
/// ```rust
/// use bindery::BindingError;
///
/// let error = BindingError::new("must be positive")
///     .with_code("minimum")
///     .with_got("-5")
///     .with_expected("value >= 0");
///
/// assert_eq!(error.code, "minimum");
/// assert_eq!(error.to_string(), "must be positive (expected: value >= 0) (got: -5)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BindingError {
    /// Machine-readable error code (e.g. `invalid_type`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// The actual value that was received.
    pub got: Option<String>,
}

impl BindingError {
    /// Creates a new error with the code `validation_error`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: "validation_error".to_string(),
            message: message.into(),
            expected: None,
            got: None,
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Builds an error from a structured failure.
    pub fn from_failure(failure: &Failure) -> Self {
        let error = Self::new(failure.to_string()).with_code(failure.kind().code());
        match failure {
            Failure::InvalidType { expected, actual } => error
                .with_expected(expected.name())
                .with_got(actual.name()),
            Failure::RequiredFieldMissing => error.with_expected("value"),
            Failure::PropertyCountOutOfBounds { actual, .. } => {
                error.with_got(format!("{} properties", actual))
            }
            Failure::ItemCountOutOfBounds { actual, .. } => {
                error.with_got(format!("{} items", actual))
            }
            Failure::AdditionalProperties { names } => error.with_got(names.join(", ")),
            Failure::AdditionalItems { max, actual } => error
                .with_expected(format!("at most {} items", max))
                .with_got(format!("{} items", actual)),
            Failure::ValidationFailed {
                rule,
                expected,
                actual,
            } => error
                .with_code(*rule)
                .with_expected(expected.clone())
                .with_got(actual.clone()),
        }
    }
}

impl Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for BindingError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<BindingError>();
    assert_sync::<BindingError>();
};
