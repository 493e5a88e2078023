//! Writers: typed conversion into value tree nodes.
//!
//! A [`Writer`] returns `Some(node)` or `None`. `None` means "absent": a
//! struct writer omits the property entirely, which is distinct from writing
//! an explicit `null`. Writers have no error channel; validity is a read-time
//! concern.

mod object;
pub mod primitives;

use std::sync::Arc;

use serde_json::Value;

use crate::context::Context;
use crate::env::{OptionKey, Options};
use crate::path::Location;

pub use object::{build_struct_writer, StructWriter};

/// Omit struct properties whose written value is an empty array.
pub const OMIT_EMPTY_ARRAYS: OptionKey<bool> = OptionKey::new("omit_empty_arrays", false);

/// Immutable per-session configuration for writers.
#[derive(Debug, Clone, Default)]
pub struct WriterEnv {
    options: Options,
}

impl WriterEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `key` set to `value`.
    pub fn with_option<T: std::any::Any + Send + Sync>(
        mut self,
        key: &OptionKey<T>,
        value: T,
    ) -> Self {
        self.options.set(key, value);
        self
    }

    /// Returns the configured value of `key`, or its default.
    pub fn option<T: std::any::Any + Clone>(&self, key: &OptionKey<T>) -> T {
        self.options.get(key)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

pub(crate) type WriteFn<T> =
    dyn Fn(&WriterEnv, &Context, &Location, &T) -> Option<Value> + Send + Sync;

/// A composable conversion from a `T` to a node.
pub struct Writer<T> {
    write: Arc<WriteFn<T>>,
}

impl<T: 'static> Writer<T> {
    pub fn new<F>(write: F) -> Self
    where
        F: Fn(&WriterEnv, &Context, &Location, &T) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            write: Arc::new(write),
        }
    }

    pub(crate) fn as_arc(&self) -> &Arc<WriteFn<T>> {
        &self.write
    }

    /// Writes `value` at `location`; `None` means the node is absent.
    pub fn write(
        &self,
        env: &WriterEnv,
        context: &Context,
        location: &Location,
        value: &T,
    ) -> Option<Value> {
        (self.write)(env, context, location, value)
    }

    /// Writes a whole document. An absent root is written as `null`.
    pub fn write_document(&self, env: &WriterEnv, context: &Context, value: &T) -> Value {
        self.write(env, context, &Location::root(), value)
            .unwrap_or(Value::Null)
    }

    /// Adapts the writer to another input type.
    pub fn contramap<U, F>(self, f: F) -> Writer<U>
    where
        U: 'static,
        F: Fn(&U) -> T + Send + Sync + 'static,
    {
        Writer::new(move |env, ctx, location, value: &U| self.write(env, ctx, location, &f(value)))
    }

    /// Writes absent when `predicate` rejects the value.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&WriterEnv, &Context, &Location, &T) -> bool + Send + Sync + 'static,
    {
        Writer::new(move |env, ctx, location, value| {
            if predicate(env, ctx, location, value) {
                self.write(env, ctx, location, value)
            } else {
                None
            }
        })
    }

    /// `None` is written as absent.
    pub fn optional(self) -> Writer<Option<T>> {
        Writer::new(move |env, ctx, location, value: &Option<T>| {
            value
                .as_ref()
                .and_then(|value| self.write(env, ctx, location, value))
        })
    }

    /// `None` is written as an explicit `null`.
    pub fn nullable(self) -> Writer<Option<T>> {
        Writer::new(move |env, ctx, location, value: &Option<T>| match value {
            Some(value) => self.write(env, ctx, location, value),
            None => Some(Value::Null),
        })
    }

    /// Writes with a context derived from the caller's.
    pub fn with_context<F>(self, f: F) -> Self
    where
        F: Fn(&Context) -> Context + Send + Sync + 'static,
    {
        Writer::new(move |env, ctx, location, value| self.write(env, &f(ctx), location, value))
    }
}

impl<T> Clone for Writer<T> {
    fn clone(&self) -> Self {
        Self {
            write: Arc::clone(&self.write),
        }
    }
}
