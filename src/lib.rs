//! vertexgraph
//!
//! A generic, thread-safe graph container with directed/undirected and
//! weighted/unweighted variants, vertex and edge insertion, and fewest-hop
//! path queries.
//!
//! # Architecture
//!
//! - `graph`: the vertex/edge value model, the lock-guarded adjacency store
//!   and the [`Graph`] surface
//! - `algo`: path finders that run over a read-locked store
//! - `messages`: locale-aware error message text
//!
//! Mutations take the store's write lock. Every read takes the read lock
//! once at the public boundary and hands the unlocked adjacency map to the
//! code underneath, so no call path ever re-acquires the lock.
//!
//! ## Example Usage
//!
//! ```rust
//! use vertexgraph::{Edge, Graph};
//!
//! // Undirected, unweighted
//! let graph = Graph::simple();
//! for v in 0..4 {
//!     graph.add_vertex(v).unwrap();
//! }
//!
//! graph.add_edge(Edge::builder().source(0).destination(1).build()).unwrap();
//! graph.add_edge(Edge::builder().source(0).destination(2).build()).unwrap();
//! graph.add_edge(Edge::builder().source(0).destination(3).build()).unwrap();
//! graph.add_edge(Edge::builder().source(2).destination(3).build()).unwrap();
//!
//! let path: Vec<i32> = graph
//!     .get_path(1, 3)
//!     .unwrap()
//!     .iter()
//!     .map(|v| *v.value())
//!     .collect();
//! assert_eq!(path, vec![1, 0, 3]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod messages;

// Re-export main types for convenience
pub use algo::{Bfs, PathFinder};
pub use graph::{
    Adjacency, Edge, EdgeBuilder, ErrorKind, Graph, GraphConfig, GraphError, GraphKind,
    GraphResult, GraphStore, Vertex, VertexSet,
};
pub use messages::MessageCatalog;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
