//! The read environment.
//!
//! An [`Environment`] is built once per read session and shared, read-only,
//! by every nested reader. It carries the error-builder registry, the ordered
//! exception-handler table, and the runtime [`Options`].
//!
//! # Example
//!
//! ```rust
//! use bindery::{Environment, ErrorKind, Failure};
//!
//! let env = Environment::<String>::builder()
//!     .error_builders(|failure: &Failure| failure.to_string())
//!     .fail_fast(false)
//!     .build()
//!     .unwrap();
//!
//! assert!(!env.is_fail_fast());
//! assert!(env.error_builder(ErrorKind::InvalidType).is_ok());
//! ```

mod exceptions;
mod options;

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::sync::Arc;

use crate::context::Context;
use crate::error::{BindingError, ConfigError, DecodeError, ErrorKind, Failure};
use crate::path::Location;

pub use exceptions::{is_caused_by, ExceptionHandler};
pub use options::{OptionKey, Options, FAIL_FAST};

/// A registered error builder.
pub type ErrorBuilderFn<E> = dyn Fn(&Failure) -> E + Send + Sync;

/// Immutable per-session configuration for readers.
pub struct Environment<E> {
    error_builders: Arc<HashMap<ErrorKind, Arc<ErrorBuilderFn<E>>>>,
    exception_handlers: Arc<Vec<ExceptionHandler<E>>>,
    options: Options,
}

impl<E> Environment<E> {
    /// Starts building an environment.
    pub fn builder() -> EnvironmentBuilder<E> {
        EnvironmentBuilder::new()
    }

    /// Looks up the builder registered for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingErrorBuilder` if none is registered.
    pub fn error_builder(&self, kind: ErrorKind) -> Result<&ErrorBuilderFn<E>, ConfigError> {
        self.error_builders
            .get(&kind)
            .map(|builder| builder.as_ref())
            .ok_or(ConfigError::MissingErrorBuilder(kind))
    }

    /// Builds the domain error for `failure`.
    pub fn build_error(&self, failure: Failure) -> Result<E, ConfigError> {
        let builder = self.error_builder(failure.kind())?;
        Ok(builder(&failure))
    }

    /// Returns the first handler whose matcher accepts `error`.
    pub fn exception_handler(&self, error: &(dyn Error + 'static)) -> Option<&ExceptionHandler<E>> {
        self.exception_handlers.iter().find(|h| h.matches(error))
    }

    /// Translates `error` with the first matching handler, if any.
    pub fn handle_exception(
        &self,
        context: &Context,
        location: &Location,
        error: &(dyn Error + 'static),
    ) -> Option<E> {
        let handler = self.exception_handler(error)?;
        tracing::trace!(%location, %error, "translating decoding error");
        Some(handler.handle(self, context, location, error))
    }

    /// Returns the configured value of `key`, or its default.
    pub fn option<T: std::any::Any + Clone>(&self, key: &OptionKey<T>) -> T {
        self.options.get(key)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the value of [`FAIL_FAST`].
    pub fn is_fail_fast(&self) -> bool {
        self.options.get(&FAIL_FAST)
    }
}

impl<E> Clone for Environment<E> {
    fn clone(&self) -> Self {
        Self {
            error_builders: Arc::clone(&self.error_builders),
            exception_handlers: Arc::clone(&self.exception_handlers),
            options: self.options.clone(),
        }
    }
}

impl<E> fmt::Debug for Environment<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("error_builders", &self.error_builders.keys().collect::<Vec<_>>())
            .field("exception_handlers", &self.exception_handlers.len())
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for [`Environment`].
pub struct EnvironmentBuilder<E> {
    error_builders: HashMap<ErrorKind, Arc<ErrorBuilderFn<E>>>,
    exception_handlers: Vec<ExceptionHandler<E>>,
    options: Options,
}

impl<E> EnvironmentBuilder<E> {
    pub fn new() -> Self {
        Self {
            error_builders: HashMap::new(),
            exception_handlers: Vec::new(),
            options: Options::new(),
        }
    }

    /// Registers the builder for one error kind, replacing any previous one.
    pub fn error_builder<F>(mut self, kind: ErrorKind, builder: F) -> Self
    where
        F: Fn(&Failure) -> E + Send + Sync + 'static,
    {
        self.error_builders.insert(kind, Arc::new(builder));
        self
    }

    /// Registers one builder for every error kind.
    pub fn error_builders<F>(mut self, builder: F) -> Self
    where
        F: Fn(&Failure) -> E + Send + Sync + 'static,
    {
        let builder: Arc<ErrorBuilderFn<E>> = Arc::new(builder);
        for kind in ErrorKind::ALL {
            self.error_builders.insert(kind, Arc::clone(&builder));
        }
        self
    }

    /// Appends an exception handler. Handlers are consulted in registration
    /// order; the first match wins.
    pub fn exception_handler<M, H>(mut self, matcher: M, handler: H) -> Self
    where
        M: Fn(&(dyn Error + 'static)) -> bool + Send + Sync + 'static,
        H: Fn(&Environment<E>, &Context, &Location, &(dyn Error + 'static)) -> E
            + Send
            + Sync
            + 'static,
    {
        self.exception_handlers
            .push(ExceptionHandler::new(matcher, handler));
        self
    }

    /// Appends a handler for errors of type `X`, or caused by one.
    pub fn handle<X, H>(self, handler: H) -> Self
    where
        X: Error + 'static,
        H: Fn(&Environment<E>, &Context, &Location, &(dyn Error + 'static)) -> E
            + Send
            + Sync
            + 'static,
    {
        self.exception_handler(is_caused_by::<X>, handler)
    }

    /// Sets an option value.
    pub fn option<T: std::any::Any + Send + Sync>(mut self, key: &OptionKey<T>, value: T) -> Self {
        self.options.set(key, value);
        self
    }

    /// Sets [`FAIL_FAST`].
    pub fn fail_fast(self, fail_fast: bool) -> Self {
        self.option(&FAIL_FAST, fail_fast)
    }

    /// Finishes the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingErrorBuilder` if a kind in
    /// [`ErrorKind::REQUIRED`] has no builder.
    pub fn build(self) -> Result<Environment<E>, ConfigError> {
        if let Some(kind) = ErrorKind::REQUIRED
            .into_iter()
            .find(|kind| !self.error_builders.contains_key(kind))
        {
            tracing::debug!(%kind, "environment is missing a required error builder");
            return Err(ConfigError::MissingErrorBuilder(kind));
        }

        Ok(Environment {
            error_builders: Arc::new(self.error_builders),
            exception_handlers: Arc::new(self.exception_handlers),
            options: self.options,
        })
    }
}

impl<E> Default for EnvironmentBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentBuilder<BindingError> {
    /// A builder preloaded with [`BindingError`] builders for every kind and
    /// handlers for malformed or out-of-range numeric literals.
    pub fn standard() -> Self {
        Self::new()
            .error_builders(BindingError::from_failure)
            .handle::<DecodeError, _>(|_, _, _, error| {
                BindingError::new(error.to_string()).with_code("value_cast")
            })
            .handle::<ParseIntError, _>(|_, _, _, error| {
                BindingError::new(format!("invalid integer: {}", error)).with_code("value_cast")
            })
            .handle::<ParseFloatError, _>(|_, _, _, error| {
                BindingError::new(format!("invalid number: {}", error)).with_code("value_cast")
            })
    }
}
