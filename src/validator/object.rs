//! Property-count validators for raw objects.
//!
//! These see the object node itself, so they are meant for struct readers'
//! `before` hook.

use serde_json::{Map, Value};

use crate::error::Failure;
use crate::validator::{reject, Validator};

/// Requires at least `min` properties.
pub fn min_properties<E: 'static>(min: usize) -> Validator<Map<String, Value>, E> {
    Validator::new(move |env, _, _, object: &Map<String, Value>| {
        if object.len() < min {
            reject(
                env,
                Failure::PropertyCountOutOfBounds {
                    min: Some(min),
                    max: None,
                    actual: object.len(),
                },
            )
        } else {
            Ok(None)
        }
    })
}

/// Allows at most `max` properties.
pub fn max_properties<E: 'static>(max: usize) -> Validator<Map<String, Value>, E> {
    Validator::new(move |env, _, _, object: &Map<String, Value>| {
        if object.len() > max {
            reject(
                env,
                Failure::PropertyCountOutOfBounds {
                    min: None,
                    max: Some(max),
                    actual: object.len(),
                },
            )
        } else {
            Ok(None)
        }
    })
}
