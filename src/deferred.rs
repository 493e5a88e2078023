//! Deferred references for recursive schemas.
//!
//! A recursive type needs its reader before that reader exists. A
//! [`DeferredReader`] hands out a placeholder that forwards to the real
//! reader once [`DeferredReader::resolve`] has been called. The placeholder
//! only holds a weak reference, so a reader that contains itself does not
//! keep itself alive.
//!
//! # Example
//!
//! ```rust
//! use bindery::{
//!     readers, Context, DeferredReader, EnvironmentBuilder, StructProperties, StructReader,
//! };
//! use serde_json::json;
//!
//! #[derive(Clone)]
//! struct Category {
//!     name: String,
//!     children: Vec<Category>,
//! }
//!
//! let deferred = DeferredReader::new("Category");
//! let mut props = StructProperties::new();
//! let name = props.required("name", readers::string());
//! let children = props.defaulted("children", readers::array(deferred.reader()), Vec::new());
//!
//! let category = StructReader::new(props).build(move |values| Category {
//!     name: values.get(&name).clone(),
//!     children: values.get(&children).clone(),
//! });
//! deferred.resolve(&category);
//!
//! let env = EnvironmentBuilder::standard().build().unwrap();
//! let doc = json!({"name": "root", "children": [{"name": "leaf"}]});
//! let result = category.read_document(&env, &Context::empty(), &doc).unwrap();
//! let root = result.value().unwrap();
//! assert_eq!(root.name, "root");
//! assert_eq!(root.children[0].name, "leaf");
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::{ConfigError, ReadError};
use crate::reader::{ReadFn, Reader};
use crate::writer::{WriteFn, Writer};

/// A named placeholder for a reader that is constructed later.
pub struct DeferredReader<T, E> {
    name: String,
    slot: Arc<RwLock<Option<Weak<ReadFn<T, E>>>>>,
}

impl<T: 'static, E: 'static> DeferredReader<T, E> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reader that forwards to the resolved target.
    ///
    /// Reading through it before [`resolve`](Self::resolve), or after the
    /// target has been dropped, fails with
    /// [`ConfigError::UnresolvedReference`].
    pub fn reader(&self) -> Reader<T, E> {
        let name = self.name.clone();
        let slot = Arc::clone(&self.slot);
        Reader::new(move |env, ctx, location, node| {
            let target = slot.read().as_ref().and_then(Weak::upgrade);
            match target {
                Some(read) => read(env, ctx, location, node),
                None => Err(ReadError::Config(ConfigError::UnresolvedReference(
                    name.clone(),
                ))),
            }
        })
    }

    /// Points every placeholder handed out so far at `target`.
    pub fn resolve(&self, target: &Reader<T, E>) {
        tracing::debug!(name = %self.name, "resolving deferred reader");
        *self.slot.write() = Some(Arc::downgrade(target.as_arc()));
    }

    pub fn is_resolved(&self) -> bool {
        self.slot
            .read()
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }
}

impl<T, E> fmt::Debug for DeferredReader<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredReader")
            .field("name", &self.name)
            .field("resolved", &self.slot.read().is_some())
            .finish()
    }
}

/// A named placeholder for a writer that is constructed later.
///
/// Writers have no error channel: writing through an unresolved placeholder
/// logs a warning and writes absent.
pub struct DeferredWriter<T> {
    name: String,
    slot: Arc<RwLock<Option<Weak<WriteFn<T>>>>>,
}

impl<T: 'static> DeferredWriter<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a writer that forwards to the resolved target.
    pub fn writer(&self) -> Writer<T> {
        let name = self.name.clone();
        let slot = Arc::clone(&self.slot);
        Writer::new(move |env, ctx, location, value| {
            let target = slot.read().as_ref().and_then(Weak::upgrade);
            match target {
                Some(write) => write(env, ctx, location, value),
                None => {
                    tracing::warn!(%name, %location, "write through unresolved deferred writer");
                    None
                }
            }
        })
    }

    /// Points every placeholder handed out so far at `target`.
    pub fn resolve(&self, target: &Writer<T>) {
        tracing::debug!(name = %self.name, "resolving deferred writer");
        *self.slot.write() = Some(Arc::downgrade(target.as_arc()));
    }

    pub fn is_resolved(&self) -> bool {
        self.slot
            .read()
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }
}

impl<T> fmt::Debug for DeferredWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredWriter")
            .field("name", &self.name)
            .field("resolved", &self.slot.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::env::EnvironmentBuilder;
    use crate::error::BindingError;
    use crate::path::Location;
    use crate::reader::primitives::string;
    use crate::writer::WriterEnv;
    use serde_json::json;

    #[test]
    fn test_unresolved_reader_is_config_error() {
        let deferred = DeferredReader::<String, BindingError>::new("Node");
        let env = EnvironmentBuilder::standard().build().unwrap();
        let outcome = deferred
            .reader()
            .read_document(&env, &Context::empty(), &json!("x"));
        match outcome {
            Err(ReadError::Config(ConfigError::UnresolvedReference(name))) => {
                assert_eq!(name, "Node")
            }
            other => panic!("unexpected outcome: {:?}", other.map(|r| r.is_success())),
        }
    }

    #[test]
    fn test_resolved_reader_forwards() {
        let deferred = DeferredReader::new("Name");
        let placeholder = deferred.reader();
        let target = string::<BindingError>();
        deferred.resolve(&target);
        assert!(deferred.is_resolved());

        let env = EnvironmentBuilder::standard().build().unwrap();
        let result = placeholder
            .read_document(&env, &Context::empty(), &json!("x"))
            .unwrap();
        assert_eq!(result.value().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_dropped_target_is_unresolved() {
        let deferred = DeferredReader::new("Gone");
        {
            let target = string::<BindingError>();
            deferred.resolve(&target);
        }
        assert!(!deferred.is_resolved());
    }

    #[test]
    fn test_unresolved_writer_writes_absent() {
        let deferred = DeferredWriter::<String>::new("Node");
        let written = deferred.writer().write(
            &WriterEnv::new(),
            &Context::empty(),
            &Location::root(),
            &"x".to_string(),
        );
        assert_eq!(written, None);
    }

    #[test]
    fn test_writer_resolution_follows_target_lifetime() {
        let deferred = DeferredWriter::<String>::new("Node");
        assert!(!deferred.is_resolved());

        let target = crate::writer::primitives::string();
        deferred.resolve(&target);
        assert!(deferred.is_resolved());

        drop(target);
        assert!(!deferred.is_resolved());
    }
}
