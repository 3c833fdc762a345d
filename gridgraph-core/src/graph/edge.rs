//! Graph Edges
//!
//! An edge is a directed connection between two vertices. Edges compare and
//! hash by their endpoints only: two edges with the same origin and target are
//! the same edge regardless of weight or visibility. The graph keys its edge
//! map by [`EdgeKey`] so duplicate detection is a map lookup.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::vertex::VertexId;

/// The `(origin, target)` pair that identifies an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub origin: VertexId,
    pub target: VertexId,
}

impl EdgeKey {
    pub fn new(origin: VertexId, target: VertexId) -> Self {
        Self { origin, target }
    }

    /// The key of the edge running the other way.
    pub fn reversed(self) -> Self {
        Self {
            origin: self.target,
            target: self.origin,
        }
    }

    pub fn is_loop(&self) -> bool {
        self.origin == self.target
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.target)
    }
}

/// A directed, weighted edge.
///
/// `visible` is false for the hidden reverse twin an undirected board
/// creates alongside every drawn edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    key: EdgeKey,
    weight: i32,
    visible: bool,
}

impl Edge {
    /// Default weight for edges created without one.
    pub const DEFAULT_WEIGHT: i32 = 1;

    /// Create a visible edge with the default weight.
    pub fn new(origin: VertexId, target: VertexId) -> Self {
        Self::weighted(origin, target, Self::DEFAULT_WEIGHT)
    }

    /// Create a visible edge with an explicit weight.
    pub fn weighted(origin: VertexId, target: VertexId, weight: i32) -> Self {
        Self {
            key: EdgeKey::new(origin, target),
            weight,
            visible: true,
        }
    }

    /// Mark the edge as a hidden twin.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// The hidden twin of this edge: same weight, reversed endpoints.
    pub fn twin(&self) -> Self {
        Self {
            key: self.key.reversed(),
            weight: self.weight,
            visible: false,
        }
    }

    pub fn key(&self) -> EdgeKey {
        self.key
    }

    pub fn origin(&self) -> VertexId {
        self.key.origin
    }

    pub fn target(&self) -> VertexId {
        self.key.target
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_ignores_weight_and_visibility() {
        let a = VertexId::new();
        let b = VertexId::new();

        let drawn = Edge::weighted(a, b, 3);
        let other = Edge::new(a, b).hidden();
        assert_eq!(drawn, other);

        let mut set = HashSet::new();
        assert!(set.insert(drawn));
        assert!(!set.insert(other));
    }

    #[test]
    fn direction_matters() {
        let a = VertexId::new();
        let b = VertexId::new();
        assert_ne!(Edge::new(a, b), Edge::new(b, a));
    }

    #[test]
    fn twin_is_hidden_reverse() {
        let a = VertexId::new();
        let b = VertexId::new();
        let edge = Edge::weighted(a, b, 5);
        let twin = edge.twin();

        assert_eq!(twin.key(), EdgeKey::new(b, a));
        assert_eq!(twin.weight(), 5);
        assert!(edge.is_visible());
        assert!(!twin.is_visible());
    }
}
