//! Bounds for ordered values.

use std::fmt::Display;

use crate::error::Failure;
use crate::validator::{reject, Validator};

fn bound<T, E>(
    rule: &'static str,
    relation: &'static str,
    limit: T,
    accepts: fn(&T, &T) -> bool,
) -> Validator<T, E>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    E: 'static,
{
    Validator::new(move |env, _, _, value: &T| {
        if accepts(value, &limit) {
            Ok(None)
        } else {
            reject(
                env,
                Failure::ValidationFailed {
                    rule,
                    expected: format!("value {} {}", relation, limit),
                    actual: value.to_string(),
                },
            )
        }
    })
}

/// Requires `value >= min`.
pub fn minimum<T, E>(min: T) -> Validator<T, E>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    E: 'static,
{
    bound("minimum", ">=", min, |v, l| v >= l)
}

/// Requires `value <= max`.
pub fn maximum<T, E>(max: T) -> Validator<T, E>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    E: 'static,
{
    bound("maximum", "<=", max, |v, l| v <= l)
}

/// Requires `value > min`.
pub fn exclusive_minimum<T, E>(min: T) -> Validator<T, E>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    E: 'static,
{
    bound("exclusive_minimum", ">", min, |v, l| v > l)
}

/// Requires `value < max`.
pub fn exclusive_maximum<T, E>(max: T) -> Validator<T, E>
where
    T: PartialOrd + Display + Send + Sync + 'static,
    E: 'static,
{
    bound("exclusive_maximum", "<", max, |v, l| v < l)
}
