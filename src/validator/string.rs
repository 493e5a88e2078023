//! String validators.

use regex::Regex;

use crate::error::Failure;
use crate::validator::{reject, Validator};

/// Rejects strings that are empty or contain only whitespace.
pub fn not_blank<E: 'static>() -> Validator<String, E> {
    Validator::new(|env, _, _, value: &String| {
        if value.trim().is_empty() {
            reject(
                env,
                Failure::ValidationFailed {
                    rule: "not_blank",
                    expected: "non-blank string".to_string(),
                    actual: format!("{:?}", value),
                },
            )
        } else {
            Ok(None)
        }
    })
}

/// Requires at least `min` characters (Unicode scalar values).
pub fn min_length<E: 'static>(min: usize) -> Validator<String, E> {
    Validator::new(move |env, _, _, value: &String| {
        let len = value.chars().count();
        if len < min {
            reject(
                env,
                Failure::ValidationFailed {
                    rule: "min_length",
                    expected: format!("at least {} characters", min),
                    actual: format!("{} characters", len),
                },
            )
        } else {
            Ok(None)
        }
    })
}

/// Allows at most `max` characters (Unicode scalar values).
pub fn max_length<E: 'static>(max: usize) -> Validator<String, E> {
    Validator::new(move |env, _, _, value: &String| {
        let len = value.chars().count();
        if len > max {
            reject(
                env,
                Failure::ValidationFailed {
                    rule: "max_length",
                    expected: format!("at most {} characters", max),
                    actual: format!("{} characters", len),
                },
            )
        } else {
            Ok(None)
        }
    })
}

/// Requires the string to match `pattern`.
///
/// # Errors
///
/// Returns the regex error if `pattern` does not compile.
pub fn pattern<E: 'static>(pattern: &str) -> Result<Validator<String, E>, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Validator::new(move |env, _, _, value: &String| {
        if regex.is_match(value) {
            Ok(None)
        } else {
            reject(
                env,
                Failure::ValidationFailed {
                    rule: "pattern",
                    expected: format!("match for /{}/", regex.as_str()),
                    actual: value.clone(),
                },
            )
        }
    }))
}
