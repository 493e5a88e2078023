//! Error types for reading.
//!
//! Data errors are values: a failed read carries [`Causes`], each a domain
//! error tagged with its [`Location`](crate::Location). Fatal conditions
//! (misconfiguration, unhandled decoding errors) are [`ReadError`]s.

mod binding_error;
mod causes;
mod decode;
mod failure;
mod fatal;

pub use binding_error::BindingError;
pub use causes::{Cause, Causes};
pub use decode::DecodeError;
pub use failure::{ErrorKind, Failure};
pub use fatal::{BoxError, ConfigError, ReadError};
