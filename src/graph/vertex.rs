//! Vertex implementation
//!
//! A vertex is identified by its value alone: two vertices holding equal
//! values are the same vertex as far as the store is concerned.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An immutable graph vertex wrapping a caller-supplied value
///
/// The value lives behind an `Arc`, so cloning a vertex is cheap and every
/// handle the store returns for a given value shares one allocation.
pub struct Vertex<T> {
    value: Arc<T>,
}

impl<T> Vertex<T> {
    /// Create a new vertex holding `value`
    pub fn new(value: T) -> Self {
        Vertex {
            value: Arc::new(value),
        }
    }

    /// Get the wrapped value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// True if both handles point at the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<T> Clone for Vertex<T> {
    fn clone(&self) -> Self {
        Vertex {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> From<T> for Vertex<T> {
    fn from(value: T) -> Self {
        Vertex::new(value)
    }
}

impl<T> From<&Vertex<T>> for Vertex<T> {
    fn from(vertex: &Vertex<T>) -> Self {
        vertex.clone()
    }
}

impl<T> AsRef<T> for Vertex<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value) || *self.value == *other.value
    }
}

impl<T: Eq> Eq for Vertex<T> {}

impl<T: Hash> Hash for Vertex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vertex").field(&*self.value).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
