//! Errors raised by the numeric decoding primitives.

/// A number literal that does not fit the requested integer type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{value} is not a whole number")]
    Fractional { value: String },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
}
