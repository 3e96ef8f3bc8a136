//! Public graph surface
//!
//! [`Graph`] pairs a [`GraphStore`] with a [`PathFinder`] and accepts either
//! bare values or vertex handles wherever a vertex is expected.

use super::edge::Edge;
use super::store::{GraphResult, GraphStore, VertexSet};
use super::types::{GraphConfig, GraphKind};
use super::vertex::Vertex;
use crate::algo::{Bfs, PathFinder};
use std::hash::Hash;

/// A thread-safe graph
///
/// All methods take `&self`; share a graph between threads with `Arc`.
#[derive(Debug)]
pub struct Graph<T, P = Bfs> {
    store: GraphStore<T>,
    finder: P,
}

impl<T: Eq + Hash> Graph<T> {
    /// Create an empty graph using breadth-first path search
    pub fn new(config: GraphConfig) -> Self {
        Self::with_path_finder(config, Bfs)
    }

    pub fn from_kind(kind: GraphKind) -> Self {
        Self::new(kind.into())
    }

    /// Undirected, unweighted graph
    pub fn simple() -> Self {
        Self::from_kind(GraphKind::Simple)
    }

    /// Undirected, weighted graph
    pub fn weighted() -> Self {
        Self::from_kind(GraphKind::Weighted)
    }

    /// Directed, unweighted graph
    pub fn directed() -> Self {
        Self::from_kind(GraphKind::Directed)
    }

    /// Directed, weighted graph
    pub fn directed_weighted() -> Self {
        Self::from_kind(GraphKind::DirectedWeighted)
    }
}

impl<T: Eq + Hash, P: PathFinder<T>> Graph<T, P> {
    pub fn with_path_finder(config: GraphConfig, finder: P) -> Self {
        Graph {
            store: GraphStore::new(config),
            finder,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.store.is_directed()
    }

    pub fn is_weighted(&self) -> bool {
        self.store.is_weighted()
    }

    pub fn kind(&self) -> GraphKind {
        self.store.kind()
    }

    pub fn add_vertex(&self, value: T) -> GraphResult<Vertex<T>> {
        self.store.add_vertex(value)
    }

    pub fn add_edge(&self, edge: Edge<T>) -> GraphResult<()> {
        self.store.add_edge(edge)
    }

    /// Shorthand for adding an edge with the default weight
    pub fn connect(
        &self,
        source: impl Into<Vertex<T>>,
        destination: impl Into<Vertex<T>>,
    ) -> GraphResult<()> {
        self.add_edge(Edge::builder().source(source).destination(destination).build())
    }

    pub fn vertexes(&self) -> Vec<Vertex<T>> {
        self.store.vertexes()
    }

    pub fn adjacent_vertexes(&self, vertex: impl Into<Vertex<T>>) -> GraphResult<VertexSet<T>> {
        self.store.adjacent_vertexes(vertex)
    }

    pub fn outgoing_edges(&self, vertex: impl Into<Vertex<T>>) -> GraphResult<Vec<Edge<T>>> {
        self.store.outgoing_edges(vertex)
    }

    pub fn contains_vertex(&self, vertex: impl Into<Vertex<T>>) -> bool {
        self.store.contains_vertex(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Fewest-hop path from `source` to `destination`, inclusive
    ///
    /// Returns `[source]` when both are the same vertex and an empty vector
    /// when no path exists. Fails with `EndpointNotFound` if either vertex
    /// is not in the graph.
    pub fn get_path(
        &self,
        source: impl Into<Vertex<T>>,
        destination: impl Into<Vertex<T>>,
    ) -> GraphResult<Vec<Vertex<T>>> {
        self.store.get_path(&self.finder, source, destination)
    }

    /// Apply `visitor` to every vertex; see [`GraphStore::traverse`]
    pub fn traverse<F>(&self, visitor: F)
    where
        F: FnMut(&Vertex<T>),
    {
        self.store.traverse(visitor)
    }

    pub fn store(&self) -> &GraphStore<T> {
        &self.store
    }

    pub fn path_finder(&self) -> &P {
        &self.finder
    }
}

impl<T: Eq + Hash> Default for Graph<T> {
    fn default() -> Self {
        Self::simple()
    }
}
