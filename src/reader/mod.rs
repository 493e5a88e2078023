//! Readers: typed conversion from value tree nodes.
//!
//! A [`Reader`] is invoked with the environment, the context, the current
//! location and the node found there (`None` when the node is absent). It
//! returns a [`ReadOutcome`]: fatal errors on the outer `Err`, located data
//! errors inside the [`ReadResult`].
//!
//! Readers are cheap to clone and share their definition, so the same
//! primitive reader can appear in any number of composite schemas.
//!
//! # Example
//!
//! ```rust
//! use bindery::{readers, Context, EnvironmentBuilder};
//! use serde_json::json;
//!
//! let env = EnvironmentBuilder::standard().build().unwrap();
//! let id = readers::string().or(readers::integer::<i64, _>().map(|n| n.to_string()));
//!
//! let result = id.read_document(&env, &Context::empty(), &json!(42)).unwrap();
//! assert_eq!(result.value().map(String::as_str), Some("42"));
//! ```

mod array;
mod object;
pub mod primitives;

use std::sync::Arc;

use serde_json::Value;
use stillwater::prelude::*;

use crate::context::Context;
use crate::env::Environment;
use crate::error::{BoxError, Failure, ReadError};
use crate::node::NodeKind;
use crate::path::Location;
use crate::result::{ReadOutcome, ReadResult};
use crate::validator::Validator;

pub use array::ArrayReader;
pub use object::{
    build_struct_reader, fail_validation, PropertyMode, PropertyRef, PropertyValues,
    StructProperties, StructReader,
};

pub(crate) type ReadFn<T, E> =
    dyn Fn(&Environment<E>, &Context, &Location, Option<&Value>) -> ReadOutcome<T, E> + Send + Sync;

/// A composable conversion from a node to a `T`.
pub struct Reader<T, E> {
    read: Arc<ReadFn<T, E>>,
}

impl<T: 'static, E: 'static> Reader<T, E> {
    pub fn new<F>(read: F) -> Self
    where
        F: Fn(&Environment<E>, &Context, &Location, Option<&Value>) -> ReadOutcome<T, E>
            + Send
            + Sync
            + 'static,
    {
        Self {
            read: Arc::new(read),
        }
    }

    pub(crate) fn as_arc(&self) -> &Arc<ReadFn<T, E>> {
        &self.read
    }

    /// Reads the node at `location`; `node` is `None` when it is absent.
    pub fn read(
        &self,
        env: &Environment<E>,
        context: &Context,
        location: &Location,
        node: Option<&Value>,
    ) -> ReadOutcome<T, E> {
        (self.read)(env, context, location, node)
    }

    /// Reads a whole document from its root.
    pub fn read_document(
        &self,
        env: &Environment<E>,
        context: &Context,
        root: &Value,
    ) -> ReadOutcome<T, E> {
        self.read(env, context, &Location::root(), Some(root))
    }

    /// Transforms successfully read values.
    pub fn map<U, F>(self, f: F) -> Reader<U, E>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Reader::new(move |env, ctx, location, node| {
            Ok(self.read(env, ctx, location, node)?.map(&f))
        })
    }

    /// Feeds successfully read values into a further read step.
    pub fn and_then<U, F>(self, f: F) -> Reader<U, E>
    where
        U: 'static,
        F: Fn(&Environment<E>, &Context, &Location, T) -> ReadOutcome<U, E>
            + Send
            + Sync
            + 'static,
    {
        Reader::new(move |env, ctx, location, node| {
            match self.read(env, ctx, location, node)? {
                ReadResult::Success { value, .. } => f(env, ctx, location, value),
                ReadResult::Failure(causes) => Ok(ReadResult::Failure(causes)),
            }
        })
    }

    /// Decodes successfully read values with a fallible conversion.
    ///
    /// Conversion errors go through the environment's exception handlers;
    /// an error no handler accepts aborts the read.
    pub fn try_map<U, F>(self, f: F) -> Reader<U, E>
    where
        U: 'static,
        F: Fn(T) -> Result<U, BoxError> + Send + Sync + 'static,
    {
        self.and_then(move |env, ctx, location, value| decoded(env, ctx, location, f(value)))
    }

    /// Runs `validator` on successfully read values.
    pub fn validation(self, validator: Validator<T, E>) -> Self {
        Reader::new(move |env, ctx, location, node| {
            let result = self.read(env, ctx, location, node)?;
            if let ReadResult::Success { ref value, .. } = result {
                if let Some(error) = validator.validate(env, ctx, location, value)? {
                    return Ok(ReadResult::failure(location.clone(), error));
                }
            }
            Ok(result)
        })
    }

    /// Tries `self`, then `other`. If both fail, the causes of both are
    /// reported, `self`'s first.
    pub fn or(self, other: Reader<T, E>) -> Self {
        Reader::new(move |env, ctx, location, node| {
            match self.read(env, ctx, location, node)? {
                ReadResult::Failure(first) => match other.read(env, ctx, location, node)? {
                    ReadResult::Failure(second) => Ok(ReadResult::Failure(first.combine(second))),
                    success => Ok(success),
                },
                success => Ok(success),
            }
        })
    }

    /// An absent node reads as `None` without invoking `self`.
    pub fn optional(self) -> Reader<Option<T>, E> {
        Reader::new(move |env, ctx, location, node| match node {
            None => Ok(ReadResult::success(location.clone(), None)),
            Some(_) => Ok(self.read(env, ctx, location, node)?.map(Some)),
        })
    }

    /// A null node reads as `None`; an absent node is still missing.
    pub fn nullable(self) -> Reader<Option<T>, E> {
        Reader::new(move |env, ctx, location, node| match node {
            Some(Value::Null) => Ok(ReadResult::success(location.clone(), None)),
            _ => Ok(self.read(env, ctx, location, node)?.map(Some)),
        })
    }

    /// Absent and null nodes both read as `None`.
    pub fn optional_nullable(self) -> Reader<Option<T>, E> {
        Reader::new(move |env, ctx, location, node| match node {
            None | Some(Value::Null) => Ok(ReadResult::success(location.clone(), None)),
            Some(_) => Ok(self.read(env, ctx, location, node)?.map(Some)),
        })
    }

    /// An absent node reads as `default`.
    pub fn with_default(self, default: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Reader::new(move |env, ctx, location, node| match node {
            None => Ok(ReadResult::success(location.clone(), default.clone())),
            Some(_) => self.read(env, ctx, location, node),
        })
    }

    /// Reads with a context derived from the caller's; the override is
    /// visible to this reader and its children only.
    pub fn with_context<F>(self, f: F) -> Self
    where
        F: Fn(&Context) -> Context + Send + Sync + 'static,
    {
        Reader::new(move |env, ctx, location, node| self.read(env, &f(ctx), location, node))
    }
}

impl<T, E> Clone for Reader<T, E> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
        }
    }
}

/// Builds the error for `failure` and fails at `location`.
pub fn fail<T, E>(
    env: &Environment<E>,
    location: &Location,
    failure: Failure,
) -> ReadOutcome<T, E> {
    Ok(ReadResult::failure(location.clone(), env.build_error(failure)?))
}

/// Fails with `RequiredFieldMissing` at `location`.
pub fn missing<T, E>(env: &Environment<E>, location: &Location) -> ReadOutcome<T, E> {
    fail(env, location, Failure::RequiredFieldMissing)
}

/// Fails with `InvalidType` for `node` at `location`.
pub fn invalid_type<T, E>(
    env: &Environment<E>,
    location: &Location,
    expected: NodeKind,
    node: &Value,
) -> ReadOutcome<T, E> {
    fail(
        env,
        location,
        Failure::InvalidType {
            expected,
            actual: NodeKind::of(node),
        },
    )
}

/// Routes the result of a decoding primitive through the exception handlers.
pub fn decoded<T, E>(
    env: &Environment<E>,
    context: &Context,
    location: &Location,
    result: Result<T, BoxError>,
) -> ReadOutcome<T, E> {
    match result {
        Ok(value) => Ok(ReadResult::success(location.clone(), value)),
        Err(source) => match env.handle_exception(context, location, &*source) {
            Some(error) => Ok(ReadResult::failure(location.clone(), error)),
            None => {
                tracing::debug!(%location, error = %source, "no exception handler matched");
                Err(ReadError::Unhandled {
                    location: location.clone(),
                    source,
                })
            }
        },
    }
}
