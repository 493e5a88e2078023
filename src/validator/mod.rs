//! Validators attached to readers and struct/array builders.
//!
//! A validator is a pure check over an already converted value. A failed
//! check is a returned error, never a panic; the `Err` side of
//! [`ValidationOutcome`] is reserved for configuration errors such as a
//! missing error builder.
//!
//! # Example
//!
//! ```rust
//! use bindery::{readers, validators, Context, EnvironmentBuilder};
//! use serde_json::json;
//!
//! let env = EnvironmentBuilder::standard().build().unwrap();
//! let reader = readers::string().validation(validators::min_length(3));
//!
//! let result = reader
//!     .read_document(&env, &Context::empty(), &json!("ab"))
//!     .unwrap();
//! assert_eq!(result.causes().unwrap().first().error.code, "min_length");
//! ```

mod array;
mod numeric;
mod object;
mod string;

use std::sync::Arc;

use crate::context::Context;
use crate::env::Environment;
use crate::error::{Failure, ReadError};
use crate::path::Location;

pub use array::{max_items, min_items, unique_items};
pub use numeric::{exclusive_maximum, exclusive_minimum, maximum, minimum};
pub use object::{max_properties, min_properties};
pub use string::{max_length, min_length, not_blank, pattern};

/// Result of running a validator: `Ok(None)` passes, `Ok(Some(error))` fails.
pub type ValidationOutcome<E> = Result<Option<E>, ReadError>;

type ValidateFn<T, E> =
    dyn Fn(&Environment<E>, &Context, &Location, &T) -> ValidationOutcome<E> + Send + Sync;

/// Builds the error for `failure` and reports it as a failed check.
pub fn reject<E>(env: &Environment<E>, failure: Failure) -> ValidationOutcome<E> {
    Ok(Some(env.build_error(failure)?))
}

/// A check over values of type `T`.
pub struct Validator<T, E> {
    check: Arc<ValidateFn<T, E>>,
}

impl<T: 'static, E: 'static> Validator<T, E> {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Environment<E>, &Context, &Location, &T) -> ValidationOutcome<E>
            + Send
            + Sync
            + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Runs the check.
    pub fn validate(
        &self,
        env: &Environment<E>,
        context: &Context,
        location: &Location,
        value: &T,
    ) -> ValidationOutcome<E> {
        (self.check)(env, context, location, value)
    }

    /// Runs `self`, then `other` only if `self` passed.
    pub fn and(self, other: Validator<T, E>) -> Self {
        Self::new(move |env, ctx, location, value| {
            match self.validate(env, ctx, location, value)? {
                Some(error) => Ok(Some(error)),
                None => other.validate(env, ctx, location, value),
            }
        })
    }

    /// Passes if either check passes; `other` runs only if `self` failed.
    /// When both fail, the error of `other` is reported.
    pub fn or(self, other: Validator<T, E>) -> Self {
        Self::new(move |env, ctx, location, value| {
            match self.validate(env, ctx, location, value)? {
                None => Ok(None),
                Some(_) => other.validate(env, ctx, location, value),
            }
        })
    }

    /// Skips the check when `predicate` returns false.
    pub fn apply_if<P>(self, predicate: P) -> Self
    where
        P: Fn(&Environment<E>, &Context, &T) -> bool + Send + Sync + 'static,
    {
        Self::new(move |env, ctx, location, value| {
            if predicate(env, ctx, value) {
                self.validate(env, ctx, location, value)
            } else {
                Ok(None)
            }
        })
    }

    /// Lifts the check to optional values; `None` always passes.
    pub fn apply_if_not_null(self) -> Validator<Option<T>, E> {
        Validator::new(move |env, ctx, location, value: &Option<T>| match value {
            Some(value) => self.validate(env, ctx, location, value),
            None => Ok(None),
        })
    }
}

impl<T, E> Clone for Validator<T, E> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}
