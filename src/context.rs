//! Caller-supplied context threaded through reads and writes.
//!
//! This module provides the [`Context`] type: a typed, immutable map of
//! values keyed by their type. Composite readers and writers may override it
//! for a single subtree with `with_context`; the override never leaks to
//! siblings or parents.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Typed per-call parameters, one value per type.
///
/// Cloning is cheap; [`Context::with`] copies the map and leaves the original
/// untouched.
///
/// # Example
///
/// ```rust
/// use bindery::Context;
///
/// #[derive(Debug, PartialEq)]
/// struct Locale(&'static str);
///
/// let base = Context::empty();
/// let scoped = base.with(Locale("de"));
///
/// assert_eq!(scoped.get::<Locale>(), Some(&Locale("de")));
/// assert!(base.get::<Locale>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    entries: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Context {
    /// Creates an empty context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new context with `value` stored, replacing any previous
    /// value of the same type.
    pub fn with<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut entries = (*self.entries).clone();
        entries.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns a new context without a value of type `T`.
    pub fn without<T: Any>(&self) -> Self {
        let mut entries = (*self.entries).clone();
        entries.remove(&TypeId::of::<T>());
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns the value of type `T`, if present.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|value| (**value).downcast_ref::<T>())
    }

    /// Returns true if a value of type `T` is present.
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("entries", &self.entries.len())
            .finish()
    }
}
