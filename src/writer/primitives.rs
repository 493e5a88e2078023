//! Primitive writers.

use std::fmt::Display;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::writer::Writer;

/// Writes a boolean node.
pub fn boolean() -> Writer<bool> {
    Writer::new(|_, _, _, value: &bool| Some(Value::Bool(*value)))
}

/// Writes a string node.
pub fn string() -> Writer<String> {
    Writer::new(|_, _, _, value: &String| Some(Value::String(value.clone())))
}

/// Writes an integer node.
pub fn integer<T>() -> Writer<T>
where
    T: Copy + Into<Number> + 'static,
{
    Writer::new(|_, _, _, value: &T| Some(Value::Number((*value).into())))
}

/// Writes a number node. Non-finite values have no node representation and
/// are written as absent.
///
/// Whole values are written as float literals (`12.0`), so a document read
/// with `readers::number` does not always write back unchanged. Pair
/// [`json_number`] with `readers::json_number` for that.
pub fn number() -> Writer<f64> {
    Writer::new(|_, _, location, value: &f64| match Number::from_f64(*value) {
        Some(n) => Some(Value::Number(n)),
        None => {
            tracing::warn!(%location, value = %value, "non-finite number written as absent");
            None
        }
    })
}

/// Writes a number node as-is.
pub fn json_number() -> Writer<Number> {
    Writer::new(|_, _, _, value: &Number| Some(Value::Number(value.clone())))
}

/// Writes any `Display` value as a string node.
pub fn display<T: Display + 'static>() -> Writer<T> {
    Writer::new(|_, _, _, value: &T| Some(Value::String(value.to_string())))
}

/// Writes a node as-is.
pub fn value() -> Writer<Value> {
    Writer::new(|_, _, _, value: &Value| Some(value.clone()))
}

/// Writes an array node, every item with `item`.
///
/// An item written as absent becomes `null` so indices are preserved.
pub fn array<T: 'static>(item: Writer<T>) -> Writer<Vec<T>> {
    Writer::new(move |env, ctx, location, items: &Vec<T>| {
        let nodes = items
            .iter()
            .enumerate()
            .map(|(index, value)| {
                item.write(env, ctx, &location.push_index(index), value)
                    .unwrap_or(Value::Null)
            })
            .collect();
        Some(Value::Array(nodes))
    })
}

/// Writes a map as an object node, in map order. Entries written as absent
/// are omitted.
pub fn map<T: 'static>(item: Writer<T>) -> Writer<IndexMap<String, T>> {
    Writer::new(move |env, ctx, location, entries: &IndexMap<String, T>| {
        let object = entries
            .iter()
            .filter_map(|(key, value)| {
                item.write(env, ctx, &location.push_key(key), value)
                    .map(|node| (key.clone(), node))
            })
            .collect();
        Some(Value::Object(object))
    })
}
