//! Struct writers.
//!
//! # Example
//!
//! ```rust
//! use bindery::{writers, Context, StructWriter, WriterEnv};
//!
//! struct Money {
//!     currency: String,
//!     amount: f64,
//! }
//!
//! let money = StructWriter::new()
//!     .property("amount", |m: &Money| &m.amount, writers::number())
//!     .property("currency", |m: &Money| &m.currency, writers::string())
//!     .build();
//!
//! let value = Money { currency: "USD".into(), amount: 12.5 };
//! let doc = money.write_document(&WriterEnv::new(), &Context::empty(), &value);
//! assert_eq!(doc.to_string(), r#"{"amount":12.5,"currency":"USD"}"#);
//! ```

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::writer::{Writer, OMIT_EMPTY_ARRAYS};

/// Builder for struct writers. Properties are written in declaration order.
pub struct StructWriter<T> {
    properties: IndexMap<String, Writer<T>>,
}

impl<T: 'static> StructWriter<T> {
    pub fn new() -> Self {
        Self {
            properties: IndexMap::new(),
        }
    }

    /// Declares a property. Redeclaring a name replaces the earlier writer
    /// but keeps its position.
    pub fn property<P, G>(mut self, name: impl Into<String>, getter: G, writer: Writer<P>) -> Self
    where
        P: 'static,
        G: for<'a> Fn(&'a T) -> &'a P + Send + Sync + 'static,
    {
        let property = Writer::new(move |env, ctx, location, value: &T| {
            writer.write(env, ctx, location, getter(value))
        });
        self.properties.insert(name.into(), property);
        self
    }

    /// Declares a property omitted from the output when `None`.
    pub fn optional<P, G>(self, name: impl Into<String>, getter: G, writer: Writer<P>) -> Self
    where
        P: 'static,
        G: for<'a> Fn(&'a T) -> &'a Option<P> + Send + Sync + 'static,
    {
        self.property(name, getter, writer.optional())
    }

    /// Declares a property written as `null` when `None`.
    pub fn nullable<P, G>(self, name: impl Into<String>, getter: G, writer: Writer<P>) -> Self
    where
        P: 'static,
        G: for<'a> Fn(&'a T) -> &'a Option<P> + Send + Sync + 'static,
    {
        self.property(name, getter, writer.nullable())
    }

    pub fn build(self) -> Writer<T> {
        build_struct_writer(self.properties)
    }
}

impl<T: 'static> Default for StructWriter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a struct writer from `(name, writer)` pairs, each writer already
/// taking the whole struct.
///
/// Absent properties are omitted. With [`OMIT_EMPTY_ARRAYS`] set, so are
/// properties written as empty arrays.
pub fn build_struct_writer<T, I>(properties: I) -> Writer<T>
where
    T: 'static,
    I: IntoIterator<Item = (String, Writer<T>)>,
{
    let properties: Vec<(String, Writer<T>)> = properties.into_iter().collect();

    Writer::new(move |env, ctx, location, value: &T| {
        let omit_empty_arrays = env.option(&OMIT_EMPTY_ARRAYS);
        let mut object = Map::new();
        for (name, writer) in &properties {
            let node = match writer.write(env, ctx, &location.push_key(name), value) {
                Some(Value::Array(items)) if omit_empty_arrays && items.is_empty() => continue,
                Some(node) => node,
                None => continue,
            };
            object.insert(name.clone(), node);
        }
        Some(Value::Object(object))
    })
}
