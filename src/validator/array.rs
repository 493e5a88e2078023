//! Item-count and uniqueness validators.

use crate::error::Failure;
use crate::validator::{reject, Validator};

/// Requires at least `min` items.
pub fn min_items<T: 'static, E: 'static>(min: usize) -> Validator<Vec<T>, E> {
    Validator::new(move |env, _, _, items: &Vec<T>| {
        if items.len() < min {
            reject(
                env,
                Failure::ItemCountOutOfBounds {
                    min: Some(min),
                    max: None,
                    actual: items.len(),
                },
            )
        } else {
            Ok(None)
        }
    })
}

/// Allows at most `max` items.
pub fn max_items<T: 'static, E: 'static>(max: usize) -> Validator<Vec<T>, E> {
    Validator::new(move |env, _, _, items: &Vec<T>| {
        if items.len() > max {
            reject(
                env,
                Failure::ItemCountOutOfBounds {
                    min: None,
                    max: Some(max),
                    actual: items.len(),
                },
            )
        } else {
            Ok(None)
        }
    })
}

/// Requires all items to be distinct.
pub fn unique_items<T: PartialEq + 'static, E: 'static>() -> Validator<Vec<T>, E> {
    Validator::new(|env, _, _, items: &Vec<T>| {
        let duplicates: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(i, item)| items[..*i].contains(*item))
            .map(|(i, _)| i.to_string())
            .collect();

        if duplicates.is_empty() {
            Ok(None)
        } else {
            reject(
                env,
                Failure::ValidationFailed {
                    rule: "unique_items",
                    expected: "distinct items".to_string(),
                    actual: format!("duplicates at indices {}", duplicates.join(", ")),
                },
            )
        }
    })
}
