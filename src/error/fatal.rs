//! Errors that abort a read instead of being accumulated.

use crate::error::ErrorKind;
use crate::path::Location;

/// A boxed error raised by a decoding primitive.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Static misconfiguration of an environment or schema graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A failure of this kind was produced but no builder is registered for it.
    #[error("no error builder registered for '{0}'")]
    MissingErrorBuilder(ErrorKind),

    /// A deferred reader or writer was invoked before it was resolved.
    #[error("deferred reference '{0}' was used before it was resolved")]
    UnresolvedReference(String),
}

/// A fatal error that aborts the whole read.
///
/// Data errors never appear here; they are values inside a failed
/// [`ReadResult`](crate::ReadResult).
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A decoding primitive raised an error no exception handler accepts.
    #[error("unhandled error at {location}: {source}")]
    Unhandled {
        location: Location,
        source: BoxError,
    },
}

impl ReadError {
    /// Returns the configuration error, if this is one.
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            ReadError::Config(e) => Some(e),
            ReadError::Unhandled { .. } => None,
        }
    }
}
