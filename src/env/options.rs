//! Typed runtime options.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A typed option key with a default value.
///
/// Keys are identified by name; looking up a key whose stored value has a
/// different type yields the key's default.
///
/// # Example
///
/// ```rust
/// use bindery::{OptionKey, Options};
///
/// const MAX_DEPTH: OptionKey<usize> = OptionKey::new("max_depth", 64);
///
/// let options = Options::new();
/// assert_eq!(options.get(&MAX_DEPTH), 64);
///
/// let options = options.with(&MAX_DEPTH, 8);
/// assert_eq!(options.get(&MAX_DEPTH), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionKey<T> {
    name: &'static str,
    default: T,
}

impl<T> OptionKey<T> {
    pub const fn new(name: &'static str, default: T) -> Self {
        Self { name, default }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }
}

/// Stop struct and array reads at the first failing property or item.
///
/// Defaults to `true`; accumulating every error is opt-in.
pub const FAIL_FAST: OptionKey<bool> = OptionKey::new("fail_fast", true);

/// An immutable map of option values.
#[derive(Clone, Default)]
pub struct Options {
    values: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of these options with `key` set to `value`.
    pub fn with<T: Any + Send + Sync>(mut self, key: &OptionKey<T>, value: T) -> Self {
        self.set(key, value);
        self
    }

    pub(crate) fn set<T: Any + Send + Sync>(&mut self, key: &OptionKey<T>, value: T) {
        self.values.insert(key.name, Arc::new(value));
    }

    /// Returns the configured value, or the key's default.
    pub fn get<T: Any + Clone>(&self, key: &OptionKey<T>) -> T {
        self.values
            .get(key.name)
            .and_then(|value| (**value).downcast_ref::<T>())
            .unwrap_or(&key.default)
            .clone()
    }

    /// Returns true if `key` was set explicitly.
    pub fn contains<T>(&self, key: &OptionKey<T>) -> bool {
        self.values.contains_key(key.name)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
