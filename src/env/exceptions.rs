//! Translation of decoding errors into domain errors.

use std::error::Error;
use std::sync::Arc;

use crate::context::Context;
use crate::env::Environment;
use crate::path::Location;

type MatcherFn = dyn Fn(&(dyn Error + 'static)) -> bool + Send + Sync;
type HandlerFn<E> =
    dyn Fn(&Environment<E>, &Context, &Location, &(dyn Error + 'static)) -> E + Send + Sync;

/// A (matcher, handler) pair consulted when a decoding primitive fails.
pub struct ExceptionHandler<E> {
    matcher: Arc<MatcherFn>,
    handler: Arc<HandlerFn<E>>,
}

impl<E> ExceptionHandler<E> {
    pub fn new<M, H>(matcher: M, handler: H) -> Self
    where
        M: Fn(&(dyn Error + 'static)) -> bool + Send + Sync + 'static,
        H: Fn(&Environment<E>, &Context, &Location, &(dyn Error + 'static)) -> E
            + Send
            + Sync
            + 'static,
    {
        Self {
            matcher: Arc::new(matcher),
            handler: Arc::new(handler),
        }
    }

    /// Returns true if this handler accepts `error`.
    pub fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        (self.matcher)(error)
    }

    /// Converts `error` into a domain error.
    pub fn handle(
        &self,
        env: &Environment<E>,
        context: &Context,
        location: &Location,
        error: &(dyn Error + 'static),
    ) -> E {
        (self.handler)(env, context, location, error)
    }
}

impl<E> Clone for ExceptionHandler<E> {
    fn clone(&self) -> Self {
        Self {
            matcher: Arc::clone(&self.matcher),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Returns true if `error`, or any error in its source chain, is an `X`.
pub fn is_caused_by<X: Error + 'static>(error: &(dyn Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(e) = current {
        if e.is::<X>() {
            return true;
        }
        current = e.source();
    }
    false
}
