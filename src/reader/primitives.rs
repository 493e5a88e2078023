//! Primitive readers for scalar and collection nodes.
//!
//! Every primitive reports `RequiredFieldMissing` for an absent node and
//! `InvalidType` for a node of the wrong kind. Decoding errors (out-of-range
//! or fractional integers, unparsable strings) go through the environment's
//! exception handlers.

use std::error::Error;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::error::{BoxError, DecodeError};
use crate::node::NodeKind;
use crate::reader::{decoded, invalid_type, missing, ArrayReader, Reader};
use crate::result::{Accumulator, ReadResult};

/// Reads a boolean node.
pub fn boolean<E: 'static>() -> Reader<bool, E> {
    Reader::new(|env, _, location, node| match node {
        None => missing(env, location),
        Some(Value::Bool(b)) => Ok(ReadResult::success(location.clone(), *b)),
        Some(other) => invalid_type(env, location, NodeKind::Boolean, other),
    })
}

/// Reads a string node.
pub fn string<E: 'static>() -> Reader<String, E> {
    Reader::new(|env, _, location, node| match node {
        None => missing(env, location),
        Some(Value::String(s)) => Ok(ReadResult::success(location.clone(), s.clone())),
        Some(other) => invalid_type(env, location, NodeKind::String, other),
    })
}

/// Reads a number node as an integer of type `T`.
///
/// Integer literals are narrowed with `TryFrom`. A float literal is accepted
/// when it holds a whole value, so `1e2` reads as `100`. Fractional or
/// out-of-range numbers raise a [`DecodeError`] through the exception
/// handlers.
pub fn integer<T, E>() -> Reader<T, E>
where
    T: TryFrom<i64> + TryFrom<u64> + 'static,
    E: 'static,
{
    Reader::new(|env, ctx, location, node| match node {
        None => missing(env, location),
        Some(Value::Number(n)) => {
            decoded(env, ctx, location, narrow::<T>(n).map_err(BoxError::from))
        }
        Some(other) => invalid_type(env, location, NodeKind::Number, other),
    })
}

fn narrow<T>(n: &Number) -> Result<T, DecodeError>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    let out_of_range = || DecodeError::OutOfRange {
        value: n.to_string(),
        target: std::any::type_name::<T>(),
    };

    if let Some(i) = n.as_i64() {
        return <T as TryFrom<i64>>::try_from(i).map_err(|_| out_of_range());
    }
    if let Some(u) = n.as_u64() {
        return <T as TryFrom<u64>>::try_from(u).map_err(|_| out_of_range());
    }

    let f = match n.as_f64() {
        Some(f) if f.is_finite() => f,
        _ => return Err(out_of_range()),
    };
    if f.fract() != 0.0 {
        return Err(DecodeError::Fractional {
            value: n.to_string(),
        });
    }

    // Both bounds are powers of two, so the comparisons are exact.
    if (I64_LOWER..I64_UPPER).contains(&f) {
        <T as TryFrom<i64>>::try_from(f as i64).map_err(|_| out_of_range())
    } else if (0.0..U64_UPPER).contains(&f) {
        <T as TryFrom<u64>>::try_from(f as u64).map_err(|_| out_of_range())
    } else {
        Err(out_of_range())
    }
}

const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

/// Reads a number node as `f64`.
///
/// The conversion is lossy: the integer literal `12` and the float literal
/// `12.0` both read as `12.0`, and `writers::number` writes them back as
/// `12.0`. Use [`json_number`] when a read and write must reproduce the
/// document.
pub fn number<E: 'static>() -> Reader<f64, E> {
    Reader::new(|env, ctx, location, node| match node {
        None => missing(env, location),
        Some(Value::Number(n)) => decoded(
            env,
            ctx,
            location,
            n.as_f64()
                .ok_or_else(|| BoxError::from(format!("{} is not representable as f64", n))),
        ),
        Some(other) => invalid_type(env, location, NodeKind::Number, other),
    })
}

/// Reads a number node as-is, keeping the integer or float literal.
pub fn json_number<E: 'static>() -> Reader<Number, E> {
    Reader::new(|env, _, location, node| match node {
        None => missing(env, location),
        Some(Value::Number(n)) => Ok(ReadResult::success(location.clone(), n.clone())),
        Some(other) => invalid_type(env, location, NodeKind::Number, other),
    })
}

/// Reads a string node and decodes it with `T::from_str`.
pub fn parsed<T, E>() -> Reader<T, E>
where
    T: FromStr + 'static,
    T::Err: Error + Send + Sync + 'static,
    E: 'static,
{
    string().try_map(|s| s.parse::<T>().map_err(BoxError::from))
}

/// Reads any present node as-is.
pub fn value<E: 'static>() -> Reader<Value, E> {
    Reader::new(|env, _, location, node| match node {
        None => missing(env, location),
        Some(v) => Ok(ReadResult::success(location.clone(), v.clone())),
    })
}

/// Reads an array node, every item with `item`.
pub fn array<T: 'static, E: 'static>(item: Reader<T, E>) -> Reader<Vec<T>, E> {
    ArrayReader::items(item).build()
}

/// Reads an object node as a map, every property value with `item`.
///
/// Keys keep document order. Each value is located at its key.
pub fn map<T: 'static, E: 'static>(item: Reader<T, E>) -> Reader<IndexMap<String, T>, E> {
    Reader::new(move |env, ctx, location, node| {
        let object = match node {
            None => return missing(env, location),
            Some(Value::Object(object)) => object,
            Some(other) => return invalid_type(env, location, NodeKind::Object, other),
        };

        let fail_fast = env.is_fail_fast();
        let mut failures = Accumulator::new();
        let mut values = IndexMap::with_capacity(object.len());

        for (key, value) in object {
            let value_location = location.push_key(key);
            match item.read(env, ctx, &value_location, Some(value))? {
                ReadResult::Success { value, .. } => {
                    values.insert(key.clone(), value);
                }
                ReadResult::Failure(causes) if fail_fast => {
                    return Ok(ReadResult::Failure(causes));
                }
                ReadResult::Failure(causes) => failures.push(causes),
            }
        }

        Ok(match failures.into_causes() {
            Some(causes) => ReadResult::Failure(causes),
            None => ReadResult::success(location.clone(), values),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::env::{Environment, EnvironmentBuilder};
    use crate::error::{BindingError, ReadError};
    use crate::path::Location;
    use crate::result::ReadOutcome;
    use serde_json::json;

    fn env() -> Environment<BindingError> {
        EnvironmentBuilder::standard().build().unwrap()
    }

    fn read<T: 'static>(
        reader: &Reader<T, BindingError>,
        node: &Value,
    ) -> ReadOutcome<T, BindingError> {
        reader.read_document(&env(), &Context::empty(), node)
    }

    #[test]
    fn test_boolean_and_string() {
        assert_eq!(read(&boolean(), &json!(true)).unwrap().value(), Some(&true));
        assert_eq!(
            read(&string(), &json!("hi")).unwrap().value().map(String::as_str),
            Some("hi")
        );
    }

    #[test]
    fn test_invalid_type() {
        let result = read(&string(), &json!(1)).unwrap();
        let cause = result.causes().unwrap().first();
        assert_eq!(cause.error.code, "invalid_type");
        assert_eq!(cause.error.expected.as_deref(), Some("string"));
        assert_eq!(cause.error.got.as_deref(), Some("number"));
        assert!(cause.location.is_root());
    }

    #[test]
    fn test_absent_node_is_missing() {
        let result = string::<BindingError>()
            .read(&env(), &Context::empty(), &Location::root().push_key("x"), None)
            .unwrap();
        let cause = result.causes().unwrap().first();
        assert_eq!(cause.error.code, "required");
        assert_eq!(cause.location.to_string(), "#/x");
    }

    #[test]
    fn test_integer_ranges() {
        assert_eq!(read(&integer::<u8, _>(), &json!(255)).unwrap().value(), Some(&255));

        let overflow = read(&integer::<u8, _>(), &json!(256)).unwrap();
        assert_eq!(overflow.causes().unwrap().first().error.code, "value_cast");

        let fractional = read(&integer::<i64, _>(), &json!(1.5)).unwrap();
        assert_eq!(fractional.causes().unwrap().first().error.code, "value_cast");
    }

    #[test]
    fn test_integer_accepts_whole_float_literals() {
        assert_eq!(read(&integer::<i64, _>(), &json!(1e2)).unwrap().value(), Some(&100));
        assert_eq!(read(&integer::<u8, _>(), &json!(255.0)).unwrap().value(), Some(&255));
        assert_eq!(read(&integer::<i32, _>(), &json!(-4.0)).unwrap().value(), Some(&-4));
        assert_eq!(
            read(&integer::<u64, _>(), &json!(u64::MAX)).unwrap().value(),
            Some(&u64::MAX)
        );
    }

    #[test]
    fn test_integer_rejects_large_or_fractional_floats() {
        let huge = read(&integer::<i64, _>(), &json!(1e300)).unwrap();
        let cause = huge.causes().unwrap().first();
        assert_eq!(cause.error.code, "value_cast");
        assert!(cause.error.message.contains("out of range"));

        let negative = read(&integer::<u32, _>(), &json!(-1.0)).unwrap();
        assert_eq!(negative.causes().unwrap().first().error.code, "value_cast");

        let fractional = read(&integer::<u32, _>(), &json!(2.5)).unwrap();
        let cause = fractional.causes().unwrap().first();
        assert!(cause.error.message.contains("not a whole number"));
    }

    #[test]
    fn test_json_number_keeps_literal() {
        let int = read(&json_number(), &json!(12)).unwrap();
        assert_eq!(int.value().map(Number::to_string).as_deref(), Some("12"));

        let float = read(&json_number(), &json!(12.0)).unwrap();
        assert_eq!(float.value().map(Number::to_string).as_deref(), Some("12.0"));

        let bad = read(&json_number(), &json!("12")).unwrap();
        assert_eq!(bad.causes().unwrap().first().error.code, "invalid_type");
    }

    #[test]
    fn test_unhandled_decoding_error_is_fatal() {
        let env = Environment::<String>::builder()
            .error_builders(|f: &crate::error::Failure| f.to_string())
            .build()
            .unwrap();
        let outcome = integer::<i32, _>().read_document(&env, &Context::empty(), &json!(1.5));
        assert!(matches!(outcome, Err(ReadError::Unhandled { .. })));
    }

    #[test]
    fn test_number_and_parsed() {
        assert_eq!(read(&number(), &json!(12.5)).unwrap().value(), Some(&12.5));
        assert_eq!(read(&parsed::<u16, _>(), &json!("443")).unwrap().value(), Some(&443));
        let bad = read(&parsed::<u16, _>(), &json!("https")).unwrap();
        assert_eq!(bad.causes().unwrap().first().error.code, "value_cast");
    }

    #[test]
    fn test_map_keeps_document_order() {
        let result = read(&map(integer::<i32, _>()), &json!({"b": 2, "a": 1})).unwrap();
        let keys: Vec<_> = result.value().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_map_locates_value_errors() {
        let result = read(&map(integer::<i32, _>()), &json!({"a": 1, "b": "x"})).unwrap();
        assert_eq!(result.causes().unwrap().first().location.to_string(), "#/b");
    }
}
