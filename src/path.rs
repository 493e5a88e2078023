//! Locations of nodes inside a value tree.
//!
//! This module provides [`Location`] and [`PathElement`] for addressing a node
//! by the route taken from the document root. Every error cause carries the
//! location that was active when it was produced.

use std::fmt::{self, Display};

/// A single step of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// An object property access (e.g. `title`).
    Key(String),
    /// An array index access (e.g. `0`).
    Index(usize),
}

impl PathElement {
    /// Creates a new key element.
    pub fn key(name: impl Into<String>) -> Self {
        PathElement::Key(name.into())
    }

    /// Creates a new index element.
    pub fn index(idx: usize) -> Self {
        PathElement::Index(idx)
    }
}

/// The route from the document root to a node.
///
/// Locations are immutable: descending into a child produces a new location
/// and leaves the parent untouched, so each nested read owns its own path.
///
/// # Example
///
/// ```rust
/// use bindery::Location;
///
/// let location = Location::root()
///     .push_key("users")
///     .push_index(0)
///     .push_key("email");
///
/// assert_eq!(location.to_string(), "#/users/0/email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    elements: Vec<PathElement>,
}

impl Location {
    /// Creates the empty location of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a location from an ordered sequence of elements.
    pub fn from_elements(elements: impl IntoIterator<Item = PathElement>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// Returns a new location with a key element appended.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathElement::Key(name.into()));
        Self { elements }
    }

    /// Returns a new location with an index element appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathElement::Index(index));
        Self { elements }
    }

    /// Returns true if this is the root location.
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements in this location.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if this location has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the elements, root first.
    pub fn elements(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// Returns the enclosing location, or None at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.elements.is_empty() {
            None
        } else {
            Some(Self {
                elements: self.elements[..self.elements.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last element, or None at the root.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        for element in &self.elements {
            match element {
                PathElement::Key(name) => {
                    write!(f, "/{}", name.replace('~', "~0").replace('/', "~1"))?
                }
                PathElement::Index(idx) => write!(f, "/{}", idx)?,
            }
        }
        Ok(())
    }
}
