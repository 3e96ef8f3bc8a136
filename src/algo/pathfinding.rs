//! Pathfinding algorithms
//!
//! Breadth-first search for the path with the fewest hops. Edge weights are
//! stored by the graph but ignored here.

use super::PathFinder;
use crate::graph::{Adjacency, GraphError, GraphResult, Vertex};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::hash::Hash;
use tracing::trace;

/// Breadth-First Search (Unweighted Shortest Path)
///
/// When several shortest paths exist, the one returned follows the first
/// vertex that discovered each step, which makes the result depend on edge
/// insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl<T: Eq + Hash> PathFinder<T> for Bfs {
    fn find_path(
        &self,
        adjacency: &Adjacency<T>,
        source: &Vertex<T>,
        destination: &Vertex<T>,
    ) -> GraphResult<Vec<Vertex<T>>> {
        let source = adjacency.vertex(source).ok_or(GraphError::EndpointNotFound)?;
        let destination = adjacency
            .vertex(destination)
            .ok_or(GraphError::EndpointNotFound)?;

        if source == destination {
            return Ok(vec![source.clone()]);
        }

        let mut visited: FxHashSet<&Vertex<T>> = FxHashSet::default();
        visited.insert(source);

        let mut queue = VecDeque::new();
        queue.push_back(source);

        // child -> every vertex that enqueued it, in discovery order
        let mut parents: FxHashMap<&Vertex<T>, Vec<&Vertex<T>>> = FxHashMap::default();

        let mut found = false;
        while let Some(current) = queue.pop_front() {
            if current == destination {
                found = true;
                break;
            }
            // A child reached from several frontier vertices is queued once
            // per discovery; only its first dequeue expands it.
            if !visited.insert(current) && current != source {
                continue;
            }

            let Some(successors) = adjacency.successors(current) else {
                continue;
            };
            for child in successors {
                if visited.contains(child) {
                    continue;
                }
                queue.push_back(child);
                parents.entry(child).or_default().push(current);
            }
        }

        if !found {
            trace!(visited = visited.len(), "no path");
            return Ok(Vec::new());
        }

        // Reconstruct path
        let mut path = vec![destination.clone()];
        let mut current = destination;
        while current != source {
            let Some(&parent) = parents.get(current).and_then(|p| p.first()) else {
                break;
            };
            path.push(parent.clone());
            current = parent;
        }
        path.reverse();

        trace!(visited = visited.len(), hops = path.len() - 1, "path found");
        Ok(path)
    }
}
