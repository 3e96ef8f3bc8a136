//! Concurrent adjacency storage
//!
//! The store maps every vertex to the set of its outgoing edges and guards
//! the map with a single read-write lock. Each public operation takes the
//! lock exactly once; anything that needs more than one lookup (the path
//! query in particular) runs against the unlocked [`Adjacency`] borrowed
//! from that one guard.

use super::edge::Edge;
use super::types::{GraphConfig, GraphKind};
use super::vertex::Vertex;
use crate::algo::PathFinder;
use crate::messages::{self, MessageCatalog};
use indexmap::{IndexMap, IndexSet};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, warn};

/// Insertion-ordered set of vertices
pub type VertexSet<T> = IndexSet<Vertex<T>, FxBuildHasher>;

/// Insertion-ordered set of edges
pub type EdgeSet<T> = IndexSet<Edge<T>, FxBuildHasher>;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("{}", messages::get_string("VertexAlreadyExists"))]
    VertexAlreadyExists,

    #[error("{}", messages::get_string("SourceDestinationCannotBeNull"))]
    MissingEndpoint,

    #[error("{}", messages::get_string("SourceDestinationNotExist"))]
    EndpointNotFound,

    #[error("{}", messages::get_string("VertexNotFound"))]
    VertexNotFound,

    #[error("{}", messages::get_string("ReentrantMutation"))]
    ReentrantMutation,
}

/// Broad classification of a [`GraphError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed something the graph cannot accept
    InvalidArgument,
    /// The call is not allowed in the current state of the graph
    IllegalState,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::ReentrantMutation => ErrorKind::IllegalState,
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Key of this error's text in the message bundles
    pub fn message_key(&self) -> &'static str {
        match self {
            GraphError::VertexAlreadyExists => "VertexAlreadyExists",
            GraphError::MissingEndpoint => "SourceDestinationCannotBeNull",
            GraphError::EndpointNotFound => "SourceDestinationNotExist",
            GraphError::VertexNotFound => "VertexNotFound",
            GraphError::ReentrantMutation => "ReentrantMutation",
        }
    }

    /// Error text from a specific catalog
    pub fn localized(&self, catalog: &MessageCatalog) -> String {
        catalog.get(self.message_key())
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    /// Ids of the stores whose read guard the current thread is lending out
    static ACTIVE_READS: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Marks a store as read-locked by a caller callback on the current thread
/// until dropped
struct ReadScope {
    store_id: u64,
}

impl ReadScope {
    fn enter(store_id: u64) -> Self {
        ACTIVE_READS.with(|active| active.borrow_mut().push(store_id));
        ReadScope { store_id }
    }

    fn is_active(store_id: u64) -> bool {
        ACTIVE_READS.with(|active| active.borrow().contains(&store_id))
    }
}

impl Drop for ReadScope {
    fn drop(&mut self) {
        ACTIVE_READS.with(|active| {
            let mut active = active.borrow_mut();
            if let Some(pos) = active.iter().rposition(|id| *id == self.store_id) {
                active.remove(pos);
            }
        });
    }
}

/// Unlocked view of the adjacency map
///
/// Only reachable through a guard held by [`GraphStore`], so holding a
/// `&Adjacency` means the read lock is held.
#[derive(Debug)]
pub struct Adjacency<T> {
    /// Vertex -> outgoing edges
    outgoing: IndexMap<Vertex<T>, EdgeSet<T>, FxBuildHasher>,

    /// Number of stored edges, mirrors included
    edge_count: usize,
}

impl<T: Eq + Hash> Adjacency<T> {
    fn new() -> Self {
        Adjacency {
            outgoing: IndexMap::default(),
            edge_count: 0,
        }
    }

    pub fn contains(&self, vertex: &Vertex<T>) -> bool {
        self.outgoing.contains_key(vertex)
    }

    /// The store's own handle for a vertex with this value
    pub fn vertex(&self, vertex: &Vertex<T>) -> Option<&Vertex<T>> {
        self.outgoing.get_key_value(vertex).map(|(key, _)| key)
    }

    /// All vertices in insertion order
    pub fn vertexes(&self) -> impl Iterator<Item = &Vertex<T>> {
        self.outgoing.keys()
    }

    /// Outgoing edges of a vertex, `None` if the vertex is unknown
    pub fn outgoing(&self, vertex: &Vertex<T>) -> Option<&EdgeSet<T>> {
        self.outgoing.get(vertex)
    }

    /// Destinations of the outgoing edges of a vertex
    ///
    /// A destination reached by several edges (different weights) is
    /// yielded once per edge; use [`Adjacency::adjacent_vertexes`] for a set.
    pub fn successors<'a>(
        &'a self,
        vertex: &Vertex<T>,
    ) -> Option<impl Iterator<Item = &'a Vertex<T>> + 'a> {
        self.outgoing
            .get(vertex)
            .map(|edges| edges.iter().filter_map(Edge::destination))
    }

    pub fn adjacent_vertexes(&self, vertex: &Vertex<T>) -> GraphResult<VertexSet<T>> {
        let successors = self.successors(vertex).ok_or(GraphError::VertexNotFound)?;
        Ok(successors.cloned().collect())
    }

    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn insert_vertex(&mut self, value: T) -> GraphResult<Vertex<T>> {
        let vertex = Vertex::new(value);
        if self.outgoing.contains_key(&vertex) {
            return Err(GraphError::VertexAlreadyExists);
        }
        self.outgoing.insert(vertex.clone(), EdgeSet::default());
        Ok(vertex)
    }

    /// Insert an edge and, unless `directed`, its mirror. Both endpoints are
    /// checked before anything is written.
    fn insert_edge(&mut self, edge: &Edge<T>, directed: bool) -> GraphResult<()> {
        let (source, destination) = edge.endpoints().ok_or(GraphError::MissingEndpoint)?;
        let source = self.vertex(source).cloned().ok_or(GraphError::EndpointNotFound)?;
        let destination = self
            .vertex(destination)
            .cloned()
            .ok_or(GraphError::EndpointNotFound)?;

        let forward = edge.rebind(source.clone(), destination.clone());
        if !directed {
            self.insert_outgoing(&destination, forward.reversed());
        }
        self.insert_outgoing(&source, forward);
        Ok(())
    }

    fn insert_outgoing(&mut self, from: &Vertex<T>, edge: Edge<T>) {
        if let Some(edges) = self.outgoing.get_mut(from) {
            if edges.insert(edge) {
                self.edge_count += 1;
            }
        }
    }
}

/// Thread-safe graph storage
///
/// Mutations take the write lock; reads take the read lock once. Callbacks
/// run under the read lock ([`GraphStore::traverse`], [`GraphStore::read`],
/// path finders) may read the same store but any mutation from them fails
/// with [`GraphError::ReentrantMutation`].
#[derive(Debug)]
pub struct GraphStore<T> {
    /// Identifies this store in the per-thread read-scope registry
    id: u64,

    config: GraphConfig,

    adjacency: RwLock<Adjacency<T>>,
}

impl<T: Eq + Hash> GraphStore<T> {
    /// Create a new empty graph store
    pub fn new(config: GraphConfig) -> Self {
        let id = NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed);
        debug!(store = id, kind = %config.kind(), "graph store created");

        GraphStore {
            id,
            config,
            adjacency: RwLock::new(Adjacency::new()),
        }
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn kind(&self) -> GraphKind {
        self.config.kind()
    }

    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.config.weighted
    }

    /// Insert a vertex with no outgoing edges
    pub fn add_vertex(&self, value: T) -> GraphResult<Vertex<T>> {
        let mut adjacency = self.write_guard()?;
        let vertex = adjacency.insert_vertex(value)?;
        debug!(store = self.id, vertices = adjacency.vertex_count(), "vertex added");
        Ok(vertex)
    }

    /// Insert an edge between two existing vertices
    ///
    /// On undirected stores the mirror edge is inserted under the same write
    /// lock, so readers see both or neither. A failed call changes nothing.
    pub fn add_edge(&self, edge: Edge<T>) -> GraphResult<()> {
        if edge.endpoints().is_none() {
            return Err(GraphError::MissingEndpoint);
        }
        let mut adjacency = self.write_guard()?;
        adjacency.insert_edge(&edge, self.config.directed)?;
        debug!(
            store = self.id,
            edges = adjacency.edge_count(),
            weight = edge.weight(),
            "edge added"
        );
        Ok(())
    }

    /// Snapshot of all vertices
    pub fn vertexes(&self) -> Vec<Vertex<T>> {
        self.read_guard().vertexes().cloned().collect()
    }

    /// Vertices reachable through one outgoing edge
    pub fn adjacent_vertexes(&self, vertex: impl Into<Vertex<T>>) -> GraphResult<VertexSet<T>> {
        self.read_guard().adjacent_vertexes(&vertex.into())
    }

    /// Snapshot of the outgoing edges of a vertex
    pub fn outgoing_edges(&self, vertex: impl Into<Vertex<T>>) -> GraphResult<Vec<Edge<T>>> {
        let adjacency = self.read_guard();
        let edges = adjacency
            .outgoing(&vertex.into())
            .ok_or(GraphError::VertexNotFound)?;
        Ok(edges.iter().cloned().collect())
    }

    pub fn contains_vertex(&self, vertex: impl Into<Vertex<T>>) -> bool {
        self.read_guard().contains(&vertex.into())
    }

    pub fn vertex_count(&self) -> usize {
        self.read_guard().vertex_count()
    }

    /// Number of stored edges; on undirected stores each mirror counts
    pub fn edge_count(&self) -> usize {
        self.read_guard().edge_count()
    }

    /// Apply `visitor` to every vertex once, holding the read lock throughout
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Vertex<T>),
    {
        let adjacency = self.read_guard();
        let _scope = ReadScope::enter(self.id);
        adjacency.vertexes().for_each(|vertex| visitor(vertex));
    }

    /// Run `finder` between two vertices under a single read lock
    pub fn get_path<P>(
        &self,
        finder: &P,
        source: impl Into<Vertex<T>>,
        destination: impl Into<Vertex<T>>,
    ) -> GraphResult<Vec<Vertex<T>>>
    where
        P: PathFinder<T> + ?Sized,
    {
        let (source, destination) = (source.into(), destination.into());
        let adjacency = self.read_guard();
        let _scope = ReadScope::enter(self.id);
        finder.find_path(&adjacency, &source, &destination)
    }

    /// Run `f` against the adjacency map under a single read lock
    ///
    /// Like a traversal visitor, `f` may read the store again but any
    /// mutation from it fails with [`GraphError::ReentrantMutation`].
    pub fn read<R>(&self, f: impl FnOnce(&Adjacency<T>) -> R) -> R {
        let adjacency = self.read_guard();
        let _scope = ReadScope::enter(self.id);
        f(&adjacency)
    }

    // Inside a read scope this thread already holds a read guard; a plain
    // read() could queue behind a waiting writer and never return.
    fn read_guard(&self) -> RwLockReadGuard<'_, Adjacency<T>> {
        if ReadScope::is_active(self.id) {
            self.adjacency.read_recursive()
        } else {
            self.adjacency.read()
        }
    }

    fn write_guard(&self) -> GraphResult<RwLockWriteGuard<'_, Adjacency<T>>> {
        if ReadScope::is_active(self.id) {
            warn!(store = self.id, "mutation attempted while holding a read scope");
            return Err(GraphError::ReentrantMutation);
        }
        Ok(self.adjacency.write())
    }
}

impl<T: Eq + Hash> Default for GraphStore<T> {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::Bfs;

    fn simple() -> GraphStore<i32> {
        GraphStore::new(GraphKind::Simple.into())
    }

    fn directed() -> GraphStore<i32> {
        GraphStore::new(GraphKind::Directed.into())
    }

    #[test]
    fn test_add_vertex() {
        let store = simple();
        let v0 = store.add_vertex(0).unwrap();
        assert_eq!(*v0.value(), 0);

        assert_eq!(store.add_vertex(0), Err(GraphError::VertexAlreadyExists));

        store.add_vertex(1).unwrap();
        store.add_vertex(2).unwrap();
        assert_eq!(store.vertex_count(), 3);
        assert!(store.contains_vertex(2));
        assert!(!store.contains_vertex(3));
    }

    #[test]
    fn test_vertex_handles_are_shared() {
        let store = simple();
        let added = store.add_vertex(5).unwrap();
        store.add_vertex(6).unwrap();
        store.add_edge(Edge::new(5, 6, 1.0)).unwrap();

        // Edges are rebound to the store's own handles
        let edges = store.outgoing_edges(5).unwrap();
        assert!(edges[0].source().unwrap().ptr_eq(&added));
        assert!(store.vertexes()[0].ptr_eq(&added));
    }

    #[test]
    fn test_edge_validation() {
        let store = simple();
        store.add_vertex(0).unwrap();
        store.add_vertex(1).unwrap();

        let missing = Edge::builder().source(0).build();
        assert_eq!(store.add_edge(missing), Err(GraphError::MissingEndpoint));

        let unknown = Edge::new(10, 11, 1.0);
        assert_eq!(store.add_edge(unknown), Err(GraphError::EndpointNotFound));

        let half_known = Edge::new(0, 11, 1.0);
        assert_eq!(store.add_edge(half_known), Err(GraphError::EndpointNotFound));

        // Nothing was written by the failed calls
        assert_eq!(store.edge_count(), 0);
        assert!(store.adjacent_vertexes(0).unwrap().is_empty());
    }

    #[test]
    fn test_undirected_mirror() {
        let store = simple();
        store.add_vertex(0).unwrap();
        store.add_vertex(1).unwrap();
        store.add_edge(Edge::new(0, 1, 2.5)).unwrap();

        assert_eq!(store.adjacent_vertexes(0).unwrap().len(), 1);
        assert_eq!(store.adjacent_vertexes(1).unwrap().len(), 1);
        assert_eq!(store.edge_count(), 2);

        let mirror = &store.outgoing_edges(1).unwrap()[0];
        assert_eq!(mirror, &Edge::new(1, 0, 2.5));
    }

    #[test]
    fn test_directed_no_mirror() {
        let store = directed();
        store.add_vertex(0).unwrap();
        store.add_vertex(1).unwrap();
        store.add_edge(Edge::new(0, 1, 1.0)).unwrap();

        assert_eq!(store.adjacent_vertexes(0).unwrap().len(), 1);
        assert!(store.adjacent_vertexes(1).unwrap().is_empty());
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edges_and_weights() {
        let store = directed();
        store.add_vertex(0).unwrap();
        store.add_vertex(1).unwrap();

        store.add_edge(Edge::new(0, 1, 1.0)).unwrap();
        store.add_edge(Edge::new(0, 1, 1.0)).unwrap();
        store.add_edge(Edge::new(0, 1, 7.0)).unwrap();

        // Same endpoints with a different weight is a different edge
        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.outgoing_edges(0).unwrap().len(), 2);
        // But only one adjacent vertex
        assert_eq!(store.adjacent_vertexes(0).unwrap().len(), 1);
    }

    #[test]
    fn test_self_loop_undirected() {
        let store = simple();
        store.add_vertex(0).unwrap();
        store.add_edge(Edge::new(0, 0, 1.0)).unwrap();

        assert_eq!(store.edge_count(), 1);
        let adjacent = store.adjacent_vertexes(0).unwrap();
        assert!(adjacent.contains(&Vertex::new(0)));
    }

    #[test]
    fn test_adjacent_unknown_vertex() {
        let store = simple();
        assert_eq!(store.adjacent_vertexes(3), Err(GraphError::VertexNotFound));
        assert_eq!(
            store.outgoing_edges(Vertex::new(3)).unwrap_err(),
            GraphError::VertexNotFound
        );
    }

    #[test]
    fn test_traverse_visits_each_once() {
        let store = simple();
        for i in 1..=3 {
            store.add_vertex(i).unwrap();
        }

        let mut sum = 0;
        let mut visits = 0;
        store.traverse(|v| {
            sum += *v.value();
            visits += 1;
        });
        assert_eq!(sum, 6);
        assert_eq!(visits, 3);
    }

    #[test]
    fn test_mutation_inside_traversal_fails_fast() {
        let store = simple();
        store.add_vertex(1).unwrap();
        store.add_vertex(2).unwrap();

        let mut results = Vec::new();
        store.traverse(|v| {
            results.push(store.add_vertex(*v.value() + 10));
            results.push(store.add_edge(Edge::new(1, 2, 1.0)).map(|_| v.clone()));
        });

        assert_eq!(results.len(), 4);
        assert!(results
            .iter()
            .all(|r| *r == Err(GraphError::ReentrantMutation)));

        // The scope ends with the traversal
        store.add_vertex(3).unwrap();
        assert_eq!(store.vertex_count(), 3);
    }

    #[test]
    fn test_mutation_inside_read_fails_fast() {
        let store = simple();
        store.add_vertex(1).unwrap();

        let vertex = store.read(|_| store.add_vertex(2));
        assert_eq!(vertex, Err(GraphError::ReentrantMutation));

        let edge = store.read(|_| store.add_edge(Edge::new(1, 1, 1.0)));
        assert_eq!(edge, Err(GraphError::ReentrantMutation));

        // Nested reads are fine
        assert!(store.read(|adjacency| {
            adjacency.contains(&Vertex::new(1)) && store.contains_vertex(1)
        }));

        // Scope ends with the callback
        store.add_vertex(2).unwrap();
        assert_eq!(store.vertex_count(), 2);
    }

    /// Path finder that tries to grow the graph it is searching
    struct Grower<'a> {
        store: &'a GraphStore<i32>,
    }

    impl PathFinder<i32> for Grower<'_> {
        fn find_path(
            &self,
            _adjacency: &Adjacency<i32>,
            _source: &Vertex<i32>,
            _destination: &Vertex<i32>,
        ) -> GraphResult<Vec<Vertex<i32>>> {
            self.store.add_vertex(99)?;
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_mutation_inside_path_finder_fails_fast() {
        let store = simple();
        store.add_vertex(1).unwrap();

        let finder = Grower { store: &store };
        assert_eq!(
            store.get_path(&finder, 1, 1),
            Err(GraphError::ReentrantMutation)
        );
        assert!(!store.contains_vertex(99));
    }

    #[test]
    fn test_reads_inside_traversal() {
        let store = simple();
        store.add_vertex(1).unwrap();
        store.add_vertex(2).unwrap();
        store.add_edge(Edge::new(1, 2, 1.0)).unwrap();

        let mut degrees = Vec::new();
        store.traverse(|v| {
            degrees.push(store.adjacent_vertexes(v).unwrap().len());
            assert_eq!(store.get_path(&Bfs, 1, 2).unwrap().len(), 2);
        });
        assert_eq!(degrees, vec![1, 1]);
    }

    #[test]
    fn test_traversal_scope_is_per_store() {
        let outer = simple();
        let inner = simple();
        outer.add_vertex(1).unwrap();

        outer.traverse(|v| {
            inner.add_vertex(*v.value()).unwrap();
        });
        assert_eq!(inner.vertex_count(), 1);
    }

    #[test]
    fn test_read_accessor() {
        let store = simple();
        store.add_vertex(1).unwrap();
        store.add_vertex(2).unwrap();
        store.add_edge(Edge::new(1, 2, 1.0)).unwrap();

        let successors: Vec<i32> = store.read(|adjacency| {
            adjacency
                .successors(&Vertex::new(1))
                .unwrap()
                .map(|v| *v.value())
                .collect()
        });
        assert_eq!(successors, vec![2]);
        assert!(store.read(|adjacency| adjacency.successors(&Vertex::new(9)).is_none()));
    }

    #[test]
    fn test_error_kinds_and_messages() {
        assert_eq!(GraphError::VertexNotFound.kind(), ErrorKind::InvalidArgument);
        assert_eq!(GraphError::MissingEndpoint.kind(), ErrorKind::InvalidArgument);
        assert_eq!(GraphError::ReentrantMutation.kind(), ErrorKind::IllegalState);

        assert_eq!(
            GraphError::VertexNotFound.to_string(),
            "Vertex does not exist in the graph"
        );
        let german = MessageCatalog::for_locale("de");
        assert_eq!(
            GraphError::VertexNotFound.localized(&german),
            "Der Knoten existiert nicht im Graphen"
        );
    }

    #[test]
    fn test_flags() {
        let store: GraphStore<i32> = GraphStore::new(GraphKind::DirectedWeighted.into());
        assert!(store.is_directed());
        assert!(store.is_weighted());
        assert_eq!(store.kind(), GraphKind::DirectedWeighted);

        let store: GraphStore<i32> = GraphStore::default();
        assert!(!store.is_directed());
        assert!(!store.is_weighted());
    }
}
