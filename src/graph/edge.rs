//! Edge implementation
//!
//! Edges are directed and carry a weight. Undirected graphs are modelled by
//! the store inserting a mirror edge next to every edge it receives.

use super::types::DEFAULT_WEIGHT;
use super::vertex::Vertex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A directed, weighted edge between two vertices
///
/// Endpoints are optional only because the builder does not validate; the
/// store refuses edges with an unset endpoint, so every stored edge has both.
pub struct Edge<T> {
    source: Option<Vertex<T>>,
    destination: Option<Vertex<T>>,
    weight: f64,
}

impl<T> Edge<T> {
    /// Create a complete edge
    pub fn new(
        source: impl Into<Vertex<T>>,
        destination: impl Into<Vertex<T>>,
        weight: f64,
    ) -> Self {
        Edge {
            source: Some(source.into()),
            destination: Some(destination.into()),
            weight,
        }
    }

    /// Start building an edge (weight defaults to 1.0)
    pub fn builder() -> EdgeBuilder<T> {
        EdgeBuilder::new()
    }

    /// Source vertex (edge goes FROM this vertex)
    pub fn source(&self) -> Option<&Vertex<T>> {
        self.source.as_ref()
    }

    /// Destination vertex (edge goes TO this vertex)
    pub fn destination(&self) -> Option<&Vertex<T>> {
        self.destination.as_ref()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Both endpoints, if set
    pub fn endpoints(&self) -> Option<(&Vertex<T>, &Vertex<T>)> {
        Some((self.source.as_ref()?, self.destination.as_ref()?))
    }

    /// The mirror edge: endpoints swapped, same weight
    pub fn reversed(&self) -> Self {
        Edge {
            source: self.destination.clone(),
            destination: self.source.clone(),
            weight: self.weight,
        }
    }

    /// Same weight, endpoints replaced
    pub(crate) fn rebind(&self, source: Vertex<T>, destination: Vertex<T>) -> Self {
        Edge {
            source: Some(source),
            destination: Some(destination),
            weight: self.weight,
        }
    }
}

impl<T> Clone for Edge<T> {
    fn clone(&self) -> Self {
        Edge {
            source: self.source.clone(),
            destination: self.destination.clone(),
            weight: self.weight,
        }
    }
}

// Weights compare by bit pattern so that equality stays reflexive for NaN.
impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.destination == other.destination
            && self.weight.to_bits() == other.weight.to_bits()
    }
}

impl<T: Eq> Eq for Edge<T> {}

impl<T: Hash> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.destination.hash(state);
        self.weight.to_bits().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Builder for [`Edge`]
pub struct EdgeBuilder<T> {
    source: Option<Vertex<T>>,
    destination: Option<Vertex<T>>,
    weight: f64,
}

impl<T> EdgeBuilder<T> {
    fn new() -> Self {
        EdgeBuilder {
            source: None,
            destination: None,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Set the source from a bare value or a vertex handle
    pub fn source(mut self, source: impl Into<Vertex<T>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the destination from a bare value or a vertex handle
    pub fn destination(mut self, destination: impl Into<Vertex<T>>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Build the edge. Nothing is validated here; the store checks the
    /// endpoints on insertion.
    pub fn build(self) -> Edge<T> {
        Edge {
            source: self.source,
            destination: self.destination,
            weight: self.weight,
        }
    }
}

impl<T> Default for EdgeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
