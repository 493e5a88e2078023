//! Array readers.
//!
//! This module provides [`ArrayReader`] for homogeneous arrays and for arrays
//! with positional (prefix) items. Every item is read at its own indexed
//! location; `FAIL_FAST` decides whether reading stops at the first failing
//! item. The `before` and `after` validators run only once every item has
//! been read successfully.

use serde_json::Value;

use crate::error::{Causes, Failure};
use crate::node::NodeKind;
use crate::reader::{invalid_type, missing, Reader};
use crate::result::{Accumulator, ReadResult};
use crate::validator::Validator;

enum Rest<T, E> {
    Items(Reader<T, E>),
    Forbidden,
}

/// Builder for array readers.
///
/// # Example
///
/// ```rust
/// use bindery::{readers, validators, ArrayReader, Context, EnvironmentBuilder};
/// use serde_json::json;
///
/// let tags = ArrayReader::items(readers::string())
///     .before(validators::min_items(1))
///     .build();
///
/// let env = EnvironmentBuilder::standard().build().unwrap();
/// let result = tags.read_document(&env, &Context::empty(), &json!([])).unwrap();
/// assert_eq!(result.causes().unwrap().first().error.code, "item_count");
/// ```
pub struct ArrayReader<T, E> {
    prefix: Vec<Reader<T, E>>,
    rest: Rest<T, E>,
    before: Option<Validator<Vec<Value>, E>>,
    after: Option<Validator<Vec<T>, E>>,
}

impl<T: 'static, E: 'static> ArrayReader<T, E> {
    /// An array whose items are all read with `item`.
    pub fn items(item: Reader<T, E>) -> Self {
        Self {
            prefix: Vec::new(),
            rest: Rest::Items(item),
            before: None,
            after: None,
        }
    }

    /// An array whose leading items are read positionally. Items beyond the
    /// prefix are rejected unless [`ArrayReader::rest`] is set.
    pub fn prefix_items(prefix: Vec<Reader<T, E>>) -> Self {
        Self {
            prefix,
            rest: Rest::Forbidden,
            before: None,
            after: None,
        }
    }

    /// Reads items beyond the prefix with `item`.
    pub fn rest(mut self, item: Reader<T, E>) -> Self {
        self.rest = Rest::Items(item);
        self
    }

    /// Rejects items beyond the prefix.
    pub fn forbid_additional_items(mut self) -> Self {
        self.rest = Rest::Forbidden;
        self
    }

    /// Adds a validator over the raw items. Repeated calls chain with `and`.
    pub fn before(mut self, validator: Validator<Vec<Value>, E>) -> Self {
        self.before = Some(match self.before.take() {
            Some(existing) => existing.and(validator),
            None => validator,
        });
        self
    }

    /// Adds a validator over the read items. Repeated calls chain with `and`.
    pub fn after(mut self, validator: Validator<Vec<T>, E>) -> Self {
        self.after = Some(match self.after.take() {
            Some(existing) => existing.and(validator),
            None => validator,
        });
        self
    }

    pub fn build(self) -> Reader<Vec<T>, E> {
        let ArrayReader {
            prefix,
            rest,
            before,
            after,
        } = self;

        Reader::new(move |env, ctx, location, node| {
            let items = match node {
                None => return missing(env, location),
                Some(Value::Array(items)) => items,
                Some(other) => return invalid_type(env, location, NodeKind::Array, other),
            };

            let fail_fast = env.is_fail_fast();
            let mut failures = Accumulator::new();

            if matches!(rest, Rest::Forbidden) && items.len() > prefix.len() {
                let error = env.build_error(Failure::AdditionalItems {
                    max: prefix.len(),
                    actual: items.len(),
                })?;
                if fail_fast {
                    return Ok(ReadResult::failure(location.clone(), error));
                }
                failures.push(Causes::single(location.clone(), error));
            }

            let mut values = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let reader = match (prefix.get(index), &rest) {
                    (Some(reader), _) => reader,
                    (None, Rest::Items(reader)) => reader,
                    (None, Rest::Forbidden) => break,
                };
                let item_location = location.push_index(index);
                match reader.read(env, ctx, &item_location, Some(item))? {
                    ReadResult::Success { value, .. } => values.push(value),
                    ReadResult::Failure(causes) if fail_fast => {
                        tracing::debug!(
                            location = %item_location,
                            "fail-fast: stopping array read"
                        );
                        return Ok(ReadResult::Failure(causes));
                    }
                    ReadResult::Failure(causes) => failures.push(causes),
                }
            }

            if let Some(causes) = failures.into_causes() {
                return Ok(ReadResult::Failure(causes));
            }

            if let Some(before) = &before {
                if let Some(error) = before.validate(env, ctx, location, items)? {
                    return Ok(ReadResult::failure(location.clone(), error));
                }
            }
            if let Some(after) = &after {
                if let Some(error) = after.validate(env, ctx, location, &values)? {
                    return Ok(ReadResult::failure(location.clone(), error));
                }
            }
            Ok(ReadResult::success(location.clone(), values))
        })
    }
}
