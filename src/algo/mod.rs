//! Graph algorithms module
//!
//! Algorithms run against the unlocked [`Adjacency`] of a store whose read
//! lock is already held by the caller, so they never touch the lock
//! themselves.

pub mod pathfinding;

use crate::graph::{Adjacency, GraphResult, Vertex};

pub use pathfinding::Bfs;

/// Computes a path between two vertices
///
/// Implementations are stateless: everything they need comes in through
/// the arguments and the returned path is owned by the caller.
pub trait PathFinder<T> {
    /// Vertices from `source` to `destination` inclusive, or an empty vector
    /// if `destination` is unreachable
    fn find_path(
        &self,
        adjacency: &Adjacency<T>,
        source: &Vertex<T>,
        destination: &Vertex<T>,
    ) -> GraphResult<Vec<Vertex<T>>>;
}
