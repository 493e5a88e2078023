//! The result algebra for reads.
//!
//! A [`ReadResult`] is either a located value or a non-empty list of located
//! causes. Combinators never run their transform on a failure, so a malformed
//! intermediate value cannot cascade into further errors.

use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{Causes, ReadError};
use crate::path::Location;

/// Outcome of a reader invocation.
///
/// The outer `Err` is the fatal channel (misconfiguration or an unhandled
/// decoding error); data errors live inside the [`ReadResult`].
pub type ReadOutcome<T, E> = Result<ReadResult<T, E>, ReadError>;

/// A located value or a non-empty list of located causes.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult<T, E> {
    Success { location: Location, value: T },
    Failure(Causes<E>),
}

impl<T, E> ReadResult<T, E> {
    /// Creates a success at `location`.
    pub fn success(location: Location, value: T) -> Self {
        ReadResult::Success { location, value }
    }

    /// Creates a failure with a single cause at `location`.
    pub fn failure(location: Location, error: E) -> Self {
        ReadResult::Failure(Causes::single(location, error))
    }

    /// Creates a failure from already collected causes.
    pub fn from_causes(causes: Causes<E>) -> Self {
        ReadResult::Failure(causes)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReadResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReadResult::Failure(_))
    }

    /// Returns the location of a success.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ReadResult::Success { location, .. } => Some(location),
            ReadResult::Failure(_) => None,
        }
    }

    /// Returns the value of a success.
    pub fn value(&self) -> Option<&T> {
        match self {
            ReadResult::Success { value, .. } => Some(value),
            ReadResult::Failure(_) => None,
        }
    }

    /// Returns the causes of a failure.
    pub fn causes(&self) -> Option<&Causes<E>> {
        match self {
            ReadResult::Success { .. } => None,
            ReadResult::Failure(causes) => Some(causes),
        }
    }

    /// Transforms the value of a success; failures pass through.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadResult<U, E> {
        match self {
            ReadResult::Success { location, value } => ReadResult::Success {
                location,
                value: f(value),
            },
            ReadResult::Failure(causes) => ReadResult::Failure(causes),
        }
    }

    /// Monadic bind: feeds a success into `f`; failures short-circuit.
    pub fn and_then<U>(self, f: impl FnOnce(Location, T) -> ReadResult<U, E>) -> ReadResult<U, E> {
        match self {
            ReadResult::Success { location, value } => f(location, value),
            ReadResult::Failure(causes) => ReadResult::Failure(causes),
        }
    }

    /// Collapses the result into a single value.
    pub fn fold<R>(
        self,
        on_success: impl FnOnce(Location, T) -> R,
        on_failure: impl FnOnce(Causes<E>) -> R,
    ) -> R {
        match self {
            ReadResult::Success { location, value } => on_success(location, value),
            ReadResult::Failure(causes) => on_failure(causes),
        }
    }

    /// Combines two independent results.
    ///
    /// Two successes are merged with `merge` at this result's location. If
    /// either side failed, the causes of both sides are concatenated, this
    /// side first.
    pub fn combine<U, V>(
        self,
        other: ReadResult<U, E>,
        merge: impl FnOnce(T, U) -> V,
    ) -> ReadResult<V, E> {
        match (self, other) {
            (
                ReadResult::Success { location, value: a },
                ReadResult::Success { value: b, .. },
            ) => ReadResult::Success {
                location,
                value: merge(a, b),
            },
            (ReadResult::Failure(left), ReadResult::Failure(right)) => {
                ReadResult::Failure(left.combine(right))
            }
            (ReadResult::Failure(causes), _) | (_, ReadResult::Failure(causes)) => {
                ReadResult::Failure(causes)
            }
        }
    }

    /// Turns a failure into a success at `location` when `f` yields a value.
    pub fn recover(self, location: &Location, f: impl FnOnce(&Causes<E>) -> Option<T>) -> Self {
        match self {
            ReadResult::Failure(causes) => match f(&causes) {
                Some(value) => ReadResult::success(location.clone(), value),
                None => ReadResult::Failure(causes),
            },
            success => success,
        }
    }

    /// Drops the location, keeping value or causes.
    pub fn into_result(self) -> Result<T, Causes<E>> {
        match self {
            ReadResult::Success { value, .. } => Ok(value),
            ReadResult::Failure(causes) => Err(causes),
        }
    }

    /// Converts to a stillwater `Validation`.
    pub fn into_validation(self) -> Validation<T, Causes<E>> {
        match self {
            ReadResult::Success { value, .. } => Validation::Success(value),
            ReadResult::Failure(causes) => Validation::Failure(causes),
        }
    }
}

/// Accumulates the causes of several independent reads.
///
/// Used by struct, array and map readers in accumulating mode.
pub(crate) struct Accumulator<E> {
    causes: Option<Causes<E>>,
}

impl<E> Accumulator<E> {
    pub(crate) fn new() -> Self {
        Self { causes: None }
    }

    pub(crate) fn push(&mut self, causes: Causes<E>) {
        self.causes = Some(match self.causes.take() {
            Some(existing) => existing.combine(causes),
            None => causes,
        });
    }

    pub(crate) fn into_causes(self) -> Option<Causes<E>> {
        self.causes
    }
}
