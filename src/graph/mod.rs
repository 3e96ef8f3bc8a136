//! Core graph implementation
//!
//! This module implements the graph data model with:
//! - Vertices identified by value
//! - Directed, weighted edges built through a builder
//! - A lock-guarded adjacency store that mirrors edges on undirected graphs
//! - The [`Graph`] surface combining the store with a path finder

pub mod edge;
pub mod facade;
pub mod store;
pub mod types;
pub mod vertex;

// Re-export main types
pub use edge::{Edge, EdgeBuilder};
pub use facade::Graph;
pub use store::{Adjacency, EdgeSet, ErrorKind, GraphError, GraphResult, GraphStore, VertexSet};
pub use types::{GraphConfig, GraphKind, UnknownGraphKind, DEFAULT_WEIGHT};
pub use vertex::Vertex;
