//! Graph Vertices
//!
//! This module defines the vertex type that lives in the topology graph.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::edge::EdgeKey;
use crate::board::GridPoint;

/// Incident edge list. Most grid vertices have a handful of neighbours.
pub type IncidentEdges = SmallVec<[EdgeKey; 4]>;

/// Unique identifier for a vertex.
///
/// Ids come from a process-wide counter and are never reused, so a removed
/// vertex can never be confused with one created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(u64);

impl VertexId {
    /// Generate a new unique vertex ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for VertexId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Per-call traversal state.
///
/// Never stored on the vertex itself; each traversal keeps its own map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// Not yet reached.
    Unvisited,

    /// Dequeued and currently being expanded.
    Active,

    /// Fully processed.
    Visited,
}

/// A vertex in the topology graph.
///
/// Equality is by identity: two vertices with the same position and edges
/// are still different vertices.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Unique identifier for this vertex.
    id: VertexId,

    /// Edges that end at this vertex, in insertion order.
    incoming: IncidentEdges,

    /// Edges that start at this vertex, in insertion order.
    /// Traversal follows these.
    outgoing: IncidentEdges,

    /// Where the vertex sits on a board, if anywhere.
    position: Option<GridPoint>,
}

impl Vertex {
    /// Create a new isolated vertex with no position.
    pub fn new() -> Self {
        Self {
            id: VertexId::new(),
            incoming: IncidentEdges::new(),
            outgoing: IncidentEdges::new(),
            position: None,
        }
    }

    /// Create a new isolated vertex placed at `point`.
    pub fn at(point: GridPoint) -> Self {
        Self {
            position: Some(point),
            ..Self::new()
        }
    }

    /// Get the vertex's ID.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Get the vertex's grid position.
    pub fn position(&self) -> Option<GridPoint> {
        self.position
    }

    /// Edges ending here.
    pub fn incoming(&self) -> &[EdgeKey] {
        &self.incoming
    }

    /// Edges starting here.
    pub fn outgoing(&self) -> &[EdgeKey] {
        &self.outgoing
    }

    /// Check if any edge touches this vertex.
    pub fn is_isolated(&self) -> bool {
        self.incoming.is_empty() && self.outgoing.is_empty()
    }

    /// Total number of incident edges.
    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }

    /// Every incident edge key, incoming first.
    pub fn incident(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.incoming.iter().chain(self.outgoing.iter()).copied()
    }

    pub(crate) fn push_incoming(&mut self, key: EdgeKey) {
        self.incoming.push(key);
    }

    pub(crate) fn push_outgoing(&mut self, key: EdgeKey) {
        self.outgoing.push(key);
    }

    /// Drop `key` from the incoming list. Returns false if it was not there.
    pub(crate) fn remove_incoming(&mut self, key: EdgeKey) -> bool {
        remove_key(&mut self.incoming, key)
    }

    /// Drop `key` from the outgoing list. Returns false if it was not there.
    pub(crate) fn remove_outgoing(&mut self, key: EdgeKey) -> bool {
        remove_key(&mut self.outgoing, key)
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, point: GridPoint) {
        self.position = Some(point);
    }

    /// Forget all incident edges.
    pub(crate) fn clear_edges(&mut self) {
        self.incoming.clear();
        self.outgoing.clear();
    }
}

fn remove_key(list: &mut IncidentEdges, key: EdgeKey) -> bool {
    match list.iter().position(|k| *k == key) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_ids_are_unique() {
        let id1 = VertexId::new();
        let id2 = VertexId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn new_vertex_is_isolated() {
        let vertex = Vertex::new();
        assert!(vertex.is_isolated());
        assert_eq!(vertex.degree(), 0);
        assert!(vertex.position().is_none());
    }

    #[test]
    fn equality_is_by_identity() {
        let a = Vertex::at(GridPoint::new(1, 1));
        let b = Vertex::at(GridPoint::new(1, 1));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn incident_list_management() {
        let mut vertex = Vertex::new();
        let other = VertexId::new();
        let out = EdgeKey::new(vertex.id(), other);
        let inc = EdgeKey::new(other, vertex.id());

        vertex.push_outgoing(out);
        vertex.push_incoming(inc);
        assert_eq!(vertex.degree(), 2);
        assert_eq!(vertex.incident().collect::<Vec<_>>(), vec![inc, out]);

        assert!(vertex.remove_outgoing(out));
        assert!(!vertex.remove_outgoing(out));
        assert_eq!(vertex.outgoing().len(), 0);
        assert_eq!(vertex.incoming(), &[inc]);
    }
}
