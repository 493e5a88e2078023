//! # Bindery
//!
//! Composable readers and writers between a JSON value tree and typed domain
//! values, with path-aware error accumulation.
//!
//! ## Overview
//!
//! A [`Reader`] converts the node at a [`Location`] into a `T`. Small readers
//! compose into struct and array readers; a failed read reports every
//! problem it found, each tagged with the exact location it occurred at.
//! Whether reading stops at the first failing property or collects all of
//! them is controlled by the [`FAIL_FAST`] option.
//!
//! The library never constructs a domain error on its own. It describes a
//! failure as a [`Failure`] and hands it to the error builder registered in
//! the [`Environment`] for that failure's [`ErrorKind`]. Decoding errors
//! (an integer out of range, an unparsable string) are routed through the
//! environment's exception handlers; one that no handler accepts aborts the
//! read as a [`ReadError`].
//!
//! A [`Writer`] is the reverse direction. It has no error channel and may
//! return "absent", which struct writers turn into an omitted property.
//!
//! ## Core Types
//!
//! - [`Location`]: the position of a node in the tree (e.g. `#/items/0/name`)
//! - [`ReadResult`]: success with value and location, or a non-empty list of [`Causes`]
//! - [`Environment`]: error builders, exception handlers and [`Options`]
//! - [`Context`]: typed per-call values, overridable per subtree
//! - [`Reader`], [`Writer`], [`Validator`]: the composable units
//!
//! ## Example
//!
//! ```rust
//! use bindery::{readers, validators, Context, EnvironmentBuilder, StructProperties, StructReader};
//! use serde_json::json;
//!
//! struct Account {
//!     name: String,
//!     email: String,
//!     age: u8,
//! }
//!
//! let mut props = StructProperties::new();
//! let name = props.required("name", readers::string().validation(validators::not_blank()));
//! let email = props.required("email", readers::string().validation(validators::min_length(3)));
//! let age = props.required("age", readers::integer::<u8, _>());
//! let account = StructReader::new(props).build(move |values| Account {
//!     name: values.get(&name).clone(),
//!     email: values.get(&email).clone(),
//!     age: *values.get(&age),
//! });
//!
//! let env = EnvironmentBuilder::standard().fail_fast(false).build().unwrap();
//! let doc = json!({"name": "", "email": "x", "age": 300});
//! let result = account.read_document(&env, &Context::empty(), &doc).unwrap();
//!
//! let locations: Vec<String> = result
//!     .causes()
//!     .unwrap()
//!     .iter()
//!     .map(|cause| cause.location.to_string())
//!     .collect();
//! assert_eq!(locations, vec!["#/name", "#/email", "#/age"]);
//! ```

pub mod context;
pub mod deferred;
pub mod env;
pub mod error;
pub mod node;
pub mod path;
pub mod reader;
pub mod result;
pub mod validator;
pub mod writer;

pub use context::Context;
pub use deferred::{DeferredReader, DeferredWriter};
pub use env::{
    is_caused_by, Environment, EnvironmentBuilder, ExceptionHandler, OptionKey, Options, FAIL_FAST,
};
pub use error::{
    BindingError, BoxError, Cause, Causes, ConfigError, DecodeError, ErrorKind, Failure, ReadError,
};
pub use node::NodeKind;
pub use path::{Location, PathElement};
pub use reader::{
    build_struct_reader, fail_validation, ArrayReader, PropertyMode, PropertyRef, PropertyValues,
    Reader, StructProperties, StructReader,
};
pub use result::{ReadOutcome, ReadResult};
pub use validator::{ValidationOutcome, Validator};
pub use writer::{build_struct_writer, StructWriter, Writer, WriterEnv, OMIT_EMPTY_ARRAYS};

/// Primitive readers.
pub mod readers {
    pub use crate::reader::primitives::*;
}

/// Primitive writers.
pub mod writers {
    pub use crate::writer::primitives::*;
}

/// Standard validators.
pub mod validators {
    pub use crate::validator::{
        exclusive_maximum, exclusive_minimum, max_items, max_length, max_properties, maximum,
        min_items, min_length, min_properties, minimum, not_blank, pattern, unique_items,
    };
}
