//! Located error causes.
//!
//! This module provides [`Cause`] for a single error tagged with its location
//! and [`Causes`] for the non-empty, ordered list carried by a failed read.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::Location;

/// A domain error tagged with the location at which it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Cause<E> {
    /// Where in the value tree the error occurred.
    pub location: Location,
    /// The error built by the environment's error builder.
    pub error: E,
}

impl<E> Cause<E> {
    /// Creates a new cause.
    pub fn new(location: Location, error: E) -> Self {
        Self { location, error }
    }
}

impl<E: Display> Display for Cause<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.error)
    }
}

/// A non-empty collection of located causes, in encounter order.
///
/// `Causes` wraps a `NonEmptyVec<Cause<E>>`, so a failed read can never be
/// constructed without at least one cause.
///
/// # Combining Causes
///
/// `Causes` implements `Semigroup`; combining concatenates left then right.
///
/// ```rust
/// use bindery::{Causes, Location};
/// use stillwater::prelude::*;
///
/// let name = Causes::single(Location::root().push_key("name"), "required");
/// let email = Causes::single(Location::root().push_key("email"), "invalid");
///
/// let combined = name.combine(email);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().location.to_string(), "#/name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Causes<E>(NonEmptyVec<Cause<E>>);

impl<E> Causes<E> {
    /// Creates a collection holding one cause.
    pub fn single(location: Location, error: E) -> Self {
        Self(NonEmptyVec::singleton(Cause::new(location, error)))
    }

    /// Creates a collection from a `NonEmptyVec` of causes.
    pub fn from_non_empty(causes: NonEmptyVec<Cause<E>>) -> Self {
        Self(causes)
    }

    /// Creates a collection from a vec, or None if the vec is empty.
    pub fn from_vec(causes: Vec<Cause<E>>) -> Option<Self> {
        NonEmptyVec::from_vec(causes).map(Self)
    }

    /// Returns the number of causes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API consistency.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the first cause encountered.
    pub fn first(&self) -> &Cause<E> {
        self.0.head()
    }

    /// Returns an iterator over the causes in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &Cause<E>> {
        self.0.iter()
    }

    /// Returns all causes located exactly at `location`.
    pub fn at_location(&self, location: &Location) -> Vec<&Cause<E>> {
        self.0.iter().filter(|c| &c.location == location).collect()
    }

    /// Returns the locations of all causes, in encounter order.
    pub fn locations(&self) -> Vec<&Location> {
        self.0.iter().map(|c| &c.location).collect()
    }

    /// Converts this collection into a `Vec<Cause<E>>`.
    pub fn into_vec(self) -> Vec<Cause<E>> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Cause<E>> {
        &self.0
    }
}

impl<E> Semigroup for Causes<E> {
    fn combine(self, other: Self) -> Self {
        Causes(self.0.combine(other.0))
    }
}

impl<E: Display> Display for Causes<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reading failed with {} error(s):", self.len())?;
        for (i, cause) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, cause)?;
        }
        Ok(())
    }
}

impl<E: Display + fmt::Debug> std::error::Error for Causes<E> {}

impl<E> IntoIterator for Causes<E> {
    type Item = Cause<E>;
    type IntoIter = std::vec::IntoIter<Cause<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
