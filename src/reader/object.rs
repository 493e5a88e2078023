//! Struct readers.
//!
//! Properties are declared on a [`StructProperties`], which hands out a typed
//! [`PropertyRef`] per property. After every property has been read, the
//! build function receives a [`PropertyValues`] and pulls each value out by
//! its ref.
//!
//! # Example
//!
//! ```rust
//! use bindery::{readers, validators, Context, EnvironmentBuilder, StructProperties, StructReader};
//! use serde_json::json;
//!
//! struct Task {
//!     id: String,
//!     title: Option<String>,
//! }
//!
//! let mut props = StructProperties::new();
//! let id = props.required("id", readers::string().validation(validators::not_blank()));
//! let title = props.optional("title", readers::string().validation(validators::not_blank()));
//!
//! let task = StructReader::new(props).build(move |values| Task {
//!     id: values.get(&id).clone(),
//!     title: values.get(&title).clone(),
//! });
//!
//! let env = EnvironmentBuilder::standard().fail_fast(false).build().unwrap();
//! let result = task
//!     .read_document(&env, &Context::empty(), &json!({"id": "T1", "title": "  "}))
//!     .unwrap();
//!
//! let causes = result.causes().unwrap();
//! assert_eq!(causes.len(), 1);
//! assert_eq!(causes.first().location.to_string(), "#/title");
//! ```

use std::any::Any;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::env::Environment;
use crate::error::{Causes, Failure};
use crate::node::NodeKind;
use crate::path::Location;
use crate::reader::{fail, invalid_type, missing, Reader};
use crate::result::{Accumulator, ReadOutcome, ReadResult};
use crate::validator::Validator;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// How a property treats absent and null nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyMode {
    /// Absent is `RequiredFieldMissing`; null goes to the child reader.
    Required,
    /// Absent reads as `None`; null goes to the child reader.
    Optional,
    /// Absent is `RequiredFieldMissing`; null reads as `None`.
    Nullable,
    /// Absent and null read as `None`.
    OptionalNullable,
    /// Absent reads as the declared default.
    Defaulted,
}

struct Declared<E> {
    mode: PropertyMode,
    reader: Reader<Box<dyn Any>, E>,
}

/// A typed handle to a declared property.
pub struct PropertyRef<T> {
    owner: u64,
    index: usize,
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PropertyRef<T> {
    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for PropertyRef<T> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            index: self.index,
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

/// The ordered property declarations of a struct.
///
/// Declaring a name twice replaces the earlier declaration in place; refs
/// handed out for the earlier declaration must not be used afterwards.
pub struct StructProperties<E> {
    owner: u64,
    declared: IndexMap<String, Declared<E>>,
}

impl<E: 'static> StructProperties<E> {
    pub fn new() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            declared: IndexMap::new(),
        }
    }

    fn declare<T: 'static>(
        &mut self,
        name: impl Into<String>,
        mode: PropertyMode,
        reader: Reader<T, E>,
    ) -> PropertyRef<T> {
        let name = name.into();
        let reader = reader.map(|value| Box::new(value) as Box<dyn Any>);
        let (index, _) = self
            .declared
            .insert_full(name.clone(), Declared { mode, reader });
        PropertyRef {
            owner: self.owner,
            index,
            name,
            _marker: PhantomData,
        }
    }

    /// Declares a property that must be present.
    pub fn required<T: 'static>(
        &mut self,
        name: impl Into<String>,
        reader: Reader<T, E>,
    ) -> PropertyRef<T> {
        let reader = Reader::new(move |env, ctx, location, node| match node {
            None => missing(env, location),
            Some(_) => reader.read(env, ctx, location, node),
        });
        self.declare(name, PropertyMode::Required, reader)
    }

    /// Declares a property that may be absent.
    pub fn optional<T: 'static>(
        &mut self,
        name: impl Into<String>,
        reader: Reader<T, E>,
    ) -> PropertyRef<Option<T>> {
        self.declare(name, PropertyMode::Optional, reader.optional())
    }

    /// Declares a property that must be present but may be null.
    pub fn nullable<T: 'static>(
        &mut self,
        name: impl Into<String>,
        reader: Reader<T, E>,
    ) -> PropertyRef<Option<T>> {
        let reader = reader.nullable();
        let reader = Reader::new(move |env, ctx, location, node| match node {
            None => missing(env, location),
            Some(_) => reader.read(env, ctx, location, node),
        });
        self.declare(name, PropertyMode::Nullable, reader)
    }

    /// Declares a property that may be absent or null.
    pub fn optional_nullable<T: 'static>(
        &mut self,
        name: impl Into<String>,
        reader: Reader<T, E>,
    ) -> PropertyRef<Option<T>> {
        self.declare(name, PropertyMode::OptionalNullable, reader.optional_nullable())
    }

    /// Declares a property that reads as `default` when absent.
    pub fn defaulted<T>(
        &mut self,
        name: impl Into<String>,
        reader: Reader<T, E>,
        default: T,
    ) -> PropertyRef<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.declare(name, PropertyMode::Defaulted, reader.with_default(default))
    }

    /// Returns the declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declared.keys().map(String::as_str)
    }

    /// Returns the mode of a declared property.
    pub fn mode(&self, name: &str) -> Option<PropertyMode> {
        self.declared.get(name).map(|decl| decl.mode)
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

impl<E: 'static> Default for StructProperties<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// The materialized property values of one struct read.
pub struct PropertyValues {
    owner: u64,
    values: Vec<Box<dyn Any>>,
}

impl PropertyValues {
    /// Returns the value read for `property`.
    ///
    /// # Panics
    ///
    /// Panics if `property` was declared on a different [`StructProperties`],
    /// or was replaced by a later declaration of the same name with another
    /// type.
    pub fn get<T: 'static>(&self, property: &PropertyRef<T>) -> &T {
        assert_eq!(
            property.owner, self.owner,
            "property '{}' belongs to a different struct",
            property.name
        );
        self.values
            .get(property.index)
            .and_then(|value| value.downcast_ref::<T>())
            .unwrap_or_else(|| {
                panic!(
                    "property '{}' was redeclared with another type",
                    property.name
                )
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder for struct readers.
///
/// Reading proceeds as follows:
/// 1. The node must be an object.
/// 2. With [`forbid_additional_properties`](Self::forbid_additional_properties),
///    undeclared keys are reported at the struct location.
/// 3. Properties are read in declaration order, each at its own location.
/// 4. If steps 2 and 3 passed, the `before` validator sees the raw object,
///    then the `after` validator sees the materialized values, then the
///    build function runs.
///
/// With `FAIL_FAST` set, the first failure from steps 2 or 3 is returned;
/// otherwise every failure from steps 2 and 3 is accumulated in order.
pub struct StructReader<E> {
    properties: StructProperties<E>,
    before: Option<Validator<Map<String, Value>, E>>,
    after: Option<Validator<PropertyValues, E>>,
    forbid_additional: bool,
}

impl<E: 'static> StructReader<E> {
    pub fn new(properties: StructProperties<E>) -> Self {
        Self {
            properties,
            before: None,
            after: None,
            forbid_additional: false,
        }
    }

    /// Adds a validator over the raw object. Repeated calls chain with `and`.
    pub fn before(mut self, validator: Validator<Map<String, Value>, E>) -> Self {
        self.before = Some(match self.before.take() {
            Some(existing) => existing.and(validator),
            None => validator,
        });
        self
    }

    /// Adds a validator over the materialized values. Repeated calls chain
    /// with `and`.
    pub fn after(mut self, validator: Validator<PropertyValues, E>) -> Self {
        self.after = Some(match self.after.take() {
            Some(existing) => existing.and(validator),
            None => validator,
        });
        self
    }

    /// Rejects objects carrying undeclared properties.
    pub fn forbid_additional_properties(mut self) -> Self {
        self.forbid_additional = true;
        self
    }

    /// Finishes the reader with a function assembling `T` from the values.
    pub fn build<T, F>(self, build: F) -> Reader<T, E>
    where
        T: 'static,
        F: Fn(&PropertyValues) -> T + Send + Sync + 'static,
    {
        let allowed: Option<Vec<String>> = self
            .forbid_additional
            .then(|| self.properties.names().map(str::to_string).collect());
        let owner = self.properties.owner;
        let readers: Vec<(String, Reader<Box<dyn Any>, E>)> = self
            .properties
            .declared
            .into_iter()
            .map(|(name, decl)| (name, decl.reader))
            .collect();
        let before = self.before;
        let after = self.after;

        Reader::new(move |env, ctx, location, node| {
            let object = match node {
                None => return missing(env, location),
                Some(Value::Object(object)) => object,
                Some(other) => return invalid_type(env, location, NodeKind::Object, other),
            };

            let fail_fast = env.is_fail_fast();
            let mut failures = Accumulator::new();

            if let Some(allowed) = &allowed {
                let names: Vec<String> = object
                    .keys()
                    .filter(|key| !allowed.contains(*key))
                    .cloned()
                    .collect();
                if !names.is_empty() {
                    let error = env.build_error(Failure::AdditionalProperties { names })?;
                    if fail_fast {
                        tracing::debug!(%location, "fail-fast: undeclared properties");
                        return Ok(ReadResult::failure(location.clone(), error));
                    }
                    failures.push(Causes::single(location.clone(), error));
                }
            }

            let mut values = Vec::with_capacity(readers.len());
            for (name, reader) in &readers {
                let property_location = location.push_key(name.as_str());
                match reader.read(env, ctx, &property_location, object.get(name))? {
                    ReadResult::Success { value, .. } => values.push(value),
                    ReadResult::Failure(causes) if fail_fast => {
                        tracing::debug!(
                            location = %property_location,
                            "fail-fast: stopping struct read"
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
                if let Some(error) = before.validate(env, ctx, location, object)? {
                    return Ok(ReadResult::failure(location.clone(), error));
                }
            }

            let values = PropertyValues { owner, values };
            if let Some(after) = &after {
                if let Some(error) = after.validate(env, ctx, location, &values)? {
                    return Ok(ReadResult::failure(location.clone(), error));
                }
            }
            Ok(ReadResult::success(location.clone(), build(&values)))
        })
    }
}

/// Builds a struct reader from its properties and optional validators.
pub fn build_struct_reader<T, E, F>(
    properties: StructProperties<E>,
    before: Option<Validator<Map<String, Value>, E>>,
    after: Option<Validator<PropertyValues, E>>,
    build: F,
) -> Reader<T, E>
where
    T: 'static,
    E: 'static,
    F: Fn(&PropertyValues) -> T + Send + Sync + 'static,
{
    let mut reader = StructReader::new(properties);
    if let Some(before) = before {
        reader = reader.before(before);
    }
    if let Some(after) = after {
        reader = reader.after(after);
    }
    reader.build(build)
}

/// Fails with a `ValidationFailed` error at `location`; a shorthand for
/// cross-field checks inside custom readers.
pub fn fail_validation<T, E>(
    env: &Environment<E>,
    location: &Location,
    rule: &'static str,
    expected: impl Into<String>,
    actual: impl Into<String>,
) -> ReadOutcome<T, E> {
    fail(
        env,
        location,
        Failure::ValidationFailed {
            rule,
            expected: expected.into(),
            actual: actual.into(),
        },
    )
}
