//! Topology Graph
//!
//! The graph owns every vertex and edge. Both are kept in insertion order,
//! which traversal relies on for deterministic results.
//!
//! # Invariants
//!
//! 1. Every edge's endpoints are members of the graph.
//! 2. No edge starts and ends at the same vertex.
//! 3. No two edges share the same `(origin, target)` key.
//! 4. Vertices enter the graph isolated.
//! 5. Removing a vertex removes every edge touching it.
//!
//! Every edge key also appears in its origin's outgoing list and its target's
//! incoming list. When a removal finds that bookkeeping out of step it reports
//! a [`GraphError::ConsistencyFault`] instead of silently carrying on.

use indexmap::IndexMap;
use tracing::{debug, error};

use super::edge::{Edge, EdgeKey};
use super::vertex::{Vertex, VertexId};
use crate::board::GridPoint;
use crate::error::GraphError;

/// A directed graph with identity-keyed vertices and value-keyed edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All vertices, in insertion order.
    vertices: IndexMap<VertexId, Vertex>,

    /// All edges, in insertion order, keyed by endpoints.
    edges: IndexMap<EdgeKey, Edge>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated vertex.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId, GraphError> {
        let id = vertex.id();
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        if !vertex.is_isolated() {
            return Err(GraphError::VertexNotIsolated(id));
        }

        self.vertices.insert(id, vertex);
        debug!(vertex = %id, "vertex added");
        Ok(id)
    }

    /// Add an edge between two member vertices.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeKey, GraphError> {
        let key = edge.key();
        if key.is_loop() {
            return Err(GraphError::SelfLoop(key.origin));
        }
        for endpoint in [key.origin, key.target] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(GraphError::UnknownVertex(endpoint));
            }
        }
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(key));
        }

        if let Some(origin) = self.vertices.get_mut(&key.origin) {
            origin.push_outgoing(key);
        }
        if let Some(target) = self.vertices.get_mut(&key.target) {
            target.push_incoming(key);
        }
        self.edges.insert(key, edge);
        debug!(edge = %key, visible = edge.is_visible(), "edge added");
        Ok(key)
    }

    /// Remove a vertex and every edge touching it.
    ///
    /// The returned vertex has its incident lists cleared. If the cascade
    /// finds an edge that its incident lists mention but the edge set does
    /// not hold, the removal still completes and the first such fault is
    /// returned.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex, GraphError> {
        let incident: Vec<EdgeKey> = self
            .vertices
            .get(&id)
            .ok_or(GraphError::UnknownVertex(id))?
            .incident()
            .collect();

        let mut fault = None;
        for key in incident {
            if self.edges.shift_remove(&key).is_none() {
                error!(vertex = %id, edge = %key, "incident edge missing from edge set");
                fault.get_or_insert(GraphError::ConsistencyFault { vertex: id, edge: key });
            }

            let (other, detached) = if key.origin == id {
                let detached = self
                    .vertices
                    .get_mut(&key.target)
                    .map(|v| v.remove_incoming(key));
                (key.target, detached)
            } else {
                let detached = self
                    .vertices
                    .get_mut(&key.origin)
                    .map(|v| v.remove_outgoing(key));
                (key.origin, detached)
            };
            if detached != Some(true) {
                error!(vertex = %id, neighbor = %other, edge = %key, "edge missing from neighbor's incident list");
                fault.get_or_insert(GraphError::ConsistencyFault { vertex: other, edge: key });
            }
        }

        let mut vertex = self
            .vertices
            .shift_remove(&id)
            .ok_or(GraphError::UnknownVertex(id))?;
        vertex.clear_edges();
        debug!(vertex = %id, "vertex removed");

        match fault {
            Some(fault) => Err(fault),
            None => Ok(vertex),
        }
    }

    /// Remove the edge from `origin` to `target`.
    pub fn remove_edge(&mut self, origin: VertexId, target: VertexId) -> Result<Edge, GraphError> {
        let key = EdgeKey::new(origin, target);
        let edge = self
            .edges
            .shift_remove(&key)
            .ok_or(GraphError::UnknownEdge(key))?;

        let mut fault = None;
        let detached_origin = self
            .vertices
            .get_mut(&origin)
            .map(|v| v.remove_outgoing(key));
        if detached_origin != Some(true) {
            error!(vertex = %origin, edge = %key, "edge missing from origin's outgoing list");
            fault.get_or_insert(GraphError::ConsistencyFault { vertex: origin, edge: key });
        }
        let detached_target = self
            .vertices
            .get_mut(&target)
            .map(|v| v.remove_incoming(key));
        if detached_target != Some(true) {
            error!(vertex = %target, edge = %key, "edge missing from target's incoming list");
            fault.get_or_insert(GraphError::ConsistencyFault { vertex: target, edge: key });
        }

        debug!(edge = %key, "edge removed");
        match fault {
            Some(fault) => Err(fault),
            None => Ok(edge),
        }
    }

    /// Get a vertex by ID.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Get the edge from `origin` to `target`.
    pub fn edge(&self, origin: VertexId, target: VertexId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(origin, target))
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn contains_edge(&self, origin: VertexId, target: VertexId) -> bool {
        self.edges.contains_key(&EdgeKey::new(origin, target))
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// All edges in insertion order, hidden twins included.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Targets of `id`'s outgoing edges, in edge insertion order.
    pub fn successors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .get(&id)
            .into_iter()
            .flat_map(|v| v.outgoing().iter().map(|key| key.target))
    }

    /// Origins of `id`'s incoming edges, in edge insertion order.
    pub fn predecessors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .get(&id)
            .into_iter()
            .flat_map(|v| v.incoming().iter().map(|key| key.origin))
    }

    /// Find the vertex positioned at `point`.
    pub fn vertex_at(&self, point: GridPoint) -> Option<&Vertex> {
        self.vertices.values().find(|v| v.position() == Some(point))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check every structural invariant and return the first violation.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (key, edge) in &self.edges {
            debug_assert_eq!(*key, edge.key());
            if key.is_loop() {
                return Err(GraphError::SelfLoop(key.origin));
            }
            let origin = self
                .vertices
                .get(&key.origin)
                .ok_or(GraphError::UnknownVertex(key.origin))?;
            let target = self
                .vertices
                .get(&key.target)
                .ok_or(GraphError::UnknownVertex(key.target))?;
            if !origin.outgoing().contains(key) {
                return Err(GraphError::ConsistencyFault { vertex: key.origin, edge: *key });
            }
            if !target.incoming().contains(key) {
                return Err(GraphError::ConsistencyFault { vertex: key.target, edge: *key });
            }
        }
        for vertex in self.vertices.values() {
            if let Some(key) = vertex.incident().find(|key| !self.edges.contains_key(key)) {
                return Err(GraphError::ConsistencyFault { vertex: vertex.id(), edge: key });
            }
        }
        Ok(())
    }

    /// Corrupt the edge set behind the incident lists' back.
    #[cfg(test)]
    pub(crate) fn drop_edge_entry(&mut self, key: EdgeKey) {
        self.edges.shift_remove(&key);
    }

    /// Corrupt `key`'s origin so its outgoing list no longer mentions it.
    #[cfg(test)]
    pub(crate) fn drop_outgoing_entry(&mut self, key: EdgeKey) {
        if let Some(origin) = self.vertices.get_mut(&key.origin) {
            origin.remove_outgoing(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(n: usize) -> (Graph, Vec<VertexId>) {
        let mut graph = Graph::new();
        let ids = (0..n)
            .map(|_| graph.add_vertex(Vertex::new()).unwrap())
            .collect();
        (graph, ids)
    }

    #[test]
    fn add_vertex_twice_fails() {
        let mut graph = Graph::new();
        let vertex = Vertex::new();
        let copy = vertex.clone();

        assert!(graph.add_vertex(vertex).is_ok());
        assert_eq!(
            graph.add_vertex(copy.clone()),
            Err(GraphError::DuplicateVertex(copy.id()))
        );
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn non_isolated_vertex_is_rejected() {
        let (mut graph, ids) = graph_with(2);
        graph.add_edge(Edge::new(ids[0], ids[1])).unwrap();

        let wired = graph.vertex(ids[0]).unwrap().clone();
        let mut other = Graph::new();
        assert_eq!(
            other.add_vertex(wired),
            Err(GraphError::VertexNotIsolated(ids[0]))
        );
        assert!(other.is_empty());
    }

    #[test]
    fn add_edge_updates_incident_lists() {
        let (mut graph, ids) = graph_with(2);
        let key = graph.add_edge(Edge::new(ids[0], ids[1])).unwrap();

        assert_eq!(graph.vertex(ids[0]).unwrap().outgoing(), &[key]);
        assert_eq!(graph.vertex(ids[1]).unwrap().incoming(), &[key]);
        assert!(graph.contains_edge(ids[0], ids[1]));
        assert!(!graph.contains_edge(ids[1], ids[0]));
        graph.validate().unwrap();
    }

    #[test]
    fn add_edge_rejections() {
        let (mut graph, ids) = graph_with(2);
        let stranger = VertexId::new();

        assert_eq!(
            graph.add_edge(Edge::new(ids[0], ids[0])),
            Err(GraphError::SelfLoop(ids[0]))
        );
        assert_eq!(
            graph.add_edge(Edge::new(ids[0], stranger)),
            Err(GraphError::UnknownVertex(stranger))
        );

        graph.add_edge(Edge::new(ids[0], ids[1])).unwrap();
        assert_eq!(
            graph.add_edge(Edge::weighted(ids[0], ids[1], 9)),
            Err(GraphError::DuplicateEdge(EdgeKey::new(ids[0], ids[1])))
        );
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_vertex_cascades() {
        let (mut graph, ids) = graph_with(3);
        graph.add_edge(Edge::new(ids[0], ids[1])).unwrap();
        graph.add_edge(Edge::new(ids[1], ids[2])).unwrap();
        graph.add_edge(Edge::new(ids[2], ids[0])).unwrap();

        let removed = graph.remove_vertex(ids[1]).unwrap();
        assert!(removed.is_isolated());
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.vertex(ids[0]).unwrap().outgoing().is_empty());
        assert!(graph.vertex(ids[2]).unwrap().incoming().is_empty());
        graph.validate().unwrap();

        assert_eq!(
            graph.remove_vertex(ids[1]).unwrap_err(),
            GraphError::UnknownVertex(ids[1])
        );
    }

    #[test]
    fn remove_edge_detaches_endpoints() {
        let (mut graph, ids) = graph_with(2);
        graph.add_edge(Edge::new(ids[0], ids[1])).unwrap();

        let edge = graph.remove_edge(ids[0], ids[1]).unwrap();
        assert_eq!(edge.key(), EdgeKey::new(ids[0], ids[1]));
        assert!(graph.vertex(ids[0]).unwrap().is_isolated());
        assert!(graph.vertex(ids[1]).unwrap().is_isolated());
        assert_eq!(
            graph.remove_edge(ids[0], ids[1]),
            Err(GraphError::UnknownEdge(EdgeKey::new(ids[0], ids[1])))
        );
    }

    #[test]
    fn missing_edge_during_cascade_is_a_fault() {
        let (mut graph, ids) = graph_with(2);
        let key = graph.add_edge(Edge::new(ids[0], ids[1])).unwrap();
        graph.drop_edge_entry(key);
        assert!(graph.validate().is_err());

        let err = graph.remove_vertex(ids[0]).unwrap_err();
        assert!(err.is_fault());
        assert_eq!(err, GraphError::ConsistencyFault { vertex: ids[0], edge: key });

        // The cascade still finished, so the graph is whole again.
        assert!(!graph.contains_vertex(ids[0]));
        graph.validate().unwrap();
    }

    #[test]
    fn successors_follow_insertion_order() {
        let (mut graph, ids) = graph_with(4);
        graph.add_edge(Edge::new(ids[0], ids[3])).unwrap();
        graph.add_edge(Edge::new(ids[0], ids[1])).unwrap();
        graph.add_edge(Edge::new(ids[0], ids[2])).unwrap();
        graph.add_edge(Edge::new(ids[2], ids[3])).unwrap();

        let succ: Vec<_> = graph.successors(ids[0]).collect();
        assert_eq!(succ, vec![ids[3], ids[1], ids[2]]);
        let pred: Vec<_> = graph.predecessors(ids[3]).collect();
        assert_eq!(pred, vec![ids[0], ids[2]]);
    }

    #[test]
    fn vertex_lookup_by_position() {
        let mut graph = Graph::new();
        let id = graph.add_vertex(Vertex::at(GridPoint::new(2, 3))).unwrap();
        graph.add_vertex(Vertex::new()).unwrap();

        assert_eq!(graph.vertex_at(GridPoint::new(2, 3)).map(Vertex::id), Some(id));
        assert!(graph.vertex_at(GridPoint::new(0, 0)).is_none());
    }
}
