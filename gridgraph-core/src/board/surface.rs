//! The Board
//!
//! A board pairs a [`Graph`] with a [`Grid`] of the same extent and is the
//! only place both are mutated. Each mutation either lands in both halves or
//! in neither: when the second step fails the first is rolled back.
//!
//! On an undirected board every connection `a - b` is stored as the visible
//! edge `a -> b` plus a hidden twin `b -> a`, because traversal only follows
//! outgoing edges. Twins are added and removed together with their edge.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use super::grid::Grid;
use super::point::GridPoint;
use crate::config::BoardConfig;
use crate::error::{BoardError, GraphError};
use crate::graph::{Edge, Graph, Vertex, VertexId};

/// A board shared between the engine and rule callbacks running on
/// dispatcher workers.
pub type SharedBoard = Arc<Mutex<Board>>;

/// A graph embedded on a grid.
#[derive(Debug, Clone)]
pub struct Board {
    directed: bool,
    graph: Graph,
    grid: Grid,
}

impl Board {
    /// Create an empty board.
    pub fn new(directed: bool, width: usize, height: usize) -> Self {
        Self {
            directed,
            graph: Graph::new(),
            grid: Grid::new(width, height),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.directed, config.width, config.height)
    }

    /// Wrap the board for sharing with rule callbacks.
    pub fn into_shared(self) -> SharedBoard {
        Arc::new(Mutex::new(self))
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read-only view of the logical graph, for the query algorithms.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Add a positioned vertex to both grid and graph.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId, BoardError> {
        let id = vertex.id();
        let point = vertex.position().ok_or(BoardError::Unplaced(id))?;

        self.grid.place(point, id)?;
        if let Err(e) = self.graph.add_vertex(vertex) {
            if self.grid.remove(point).is_err() {
                return Err(diverged(format!("could not clear {point} after rejected vertex {id}")));
            }
            debug!(vertex = %id, %point, error = %e, "vertex rejected, grid placement rolled back");
            return Err(e.into());
        }
        Ok(id)
    }

    /// Create a fresh vertex at `point` and add it.
    pub fn spawn_vertex(&mut self, point: GridPoint) -> Result<VertexId, BoardError> {
        self.add_vertex(Vertex::at(point))
    }

    /// Add vertices in order, stopping at the first failure.
    ///
    /// Vertices added before the failure stay on the board.
    pub fn add_vertices<I>(&mut self, vertices: I) -> Result<Vec<VertexId>, BoardError>
    where
        I: IntoIterator<Item = Vertex>,
    {
        vertices
            .into_iter()
            .map(|vertex| self.add_vertex(vertex))
            .collect()
    }

    /// Connect `a` to `b` with the default weight.
    ///
    /// Returns the visible edge.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<Edge, BoardError> {
        self.add_weighted_edge(a, b, Edge::DEFAULT_WEIGHT)
    }

    /// Connect `a` to `b`. Undirected boards also get the hidden twin
    /// `b -> a`; if it cannot be added, `a -> b` is taken back out.
    pub fn add_weighted_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        weight: i32,
    ) -> Result<Edge, BoardError> {
        let edge = Edge::weighted(a, b, weight);
        self.graph.add_edge(edge)?;

        if !self.directed {
            if let Err(e) = self.graph.add_edge(edge.twin()) {
                warn!(edge = %edge.key(), error = %e, "twin rejected, rolling back edge");
                self.graph.remove_edge(a, b)?;
                return Err(e.into());
            }
        }
        Ok(edge)
    }

    /// Remove the edge `a -> b`, and on undirected boards its twin.
    ///
    /// If the twin cannot be removed the edge is put back.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<Edge, BoardError> {
        let edge = self.graph.remove_edge(a, b)?;

        if !self.directed {
            if let Err(e) = self.graph.remove_edge(b, a) {
                if e.is_fault() {
                    return Err(e.into());
                }
                warn!(edge = %edge.key(), error = %e, "twin missing, restoring edge");
                self.graph.add_edge(edge)?;
                return Err(e.into());
            }
        }
        Ok(edge)
    }

    /// Take a vertex off the grid and out of the graph, with its edges.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex, BoardError> {
        let point = self
            .graph
            .vertex(id)
            .ok_or(GraphError::UnknownVertex(id))?
            .position()
            .ok_or(BoardError::Unplaced(id))?;

        let occupant = self.grid.remove(point)?;
        if occupant != id {
            if self.grid.place(point, occupant).is_err() {
                return Err(diverged(format!("could not restore {occupant} at {point}")));
            }
            return Err(diverged(format!("{point} holds {occupant}, expected {id}")));
        }

        match self.graph.remove_vertex(id) {
            Ok(vertex) => Ok(vertex),
            Err(e) if e.is_fault() => Err(e.into()),
            Err(e) => {
                if self.grid.place(point, id).is_err() {
                    return Err(diverged(format!("could not restore {id} at {point}")));
                }
                Err(e.into())
            }
        }
    }

    /// The edge `a -> b`, visible or not.
    pub fn edge(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.graph.edge(a, b)
    }

    /// The drawn edge between `a` and `b`.
    ///
    /// If `a -> b` is a hidden twin, the reverse edge is returned instead.
    pub fn visual_edge(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        match self.graph.edge(a, b) {
            Some(edge) if edge.is_visible() => Some(edge),
            Some(_) => self.graph.edge(b, a),
            None => None,
        }
    }

    /// The vertex drawn at `point`.
    pub fn vertex_at(&self, point: GridPoint) -> Option<&Vertex> {
        self.grid.get(point).and_then(|id| self.graph.vertex(id))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.graph.vertex(id)
    }

    /// Vertices reachable from `id` in one step.
    ///
    /// On undirected boards this is every connected neighbour.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.successors(id)
    }

    /// Replace graph and grid with empty ones of the same size.
    pub fn flush(&mut self) {
        self.graph = Graph::new();
        self.grid = Grid::new(self.grid.width(), self.grid.height());
        debug!(width = self.width(), height = self.height(), "board flushed");
    }

    /// Check that graph and grid describe the same board.
    pub fn validate(&self) -> Result<(), BoardError> {
        self.graph.validate()?;

        for (point, id) in self.grid.occupied() {
            match self.graph.vertex(id) {
                Some(vertex) if vertex.position() == Some(point) => {}
                Some(_) => return Err(diverged(format!("{id} is on the grid at {point} but positioned elsewhere"))),
                None => return Err(diverged(format!("{id} is on the grid at {point} but not in the graph"))),
            }
        }
        for vertex in self.graph.vertices() {
            let id = vertex.id();
            let point = vertex.position().ok_or(BoardError::Unplaced(id))?;
            if self.grid.get(point) != Some(id) {
                return Err(diverged(format!("{id} is in the graph but not on the grid at {point}")));
            }
        }

        if !self.directed {
            for edge in self.graph.edges() {
                let twin = self
                    .graph
                    .edge(edge.target(), edge.origin())
                    .ok_or_else(|| diverged(format!("edge {} has no twin", edge.key())))?;
                if twin.is_visible() == edge.is_visible() {
                    return Err(diverged(format!(
                        "edge {} and its twin are both {}",
                        edge.key(),
                        if edge.is_visible() { "visible" } else { "hidden" }
                    )));
                }
            }
        }
        Ok(())
    }
}

fn diverged(message: String) -> BoardError {
    error!(%message, "board diverged");
    BoardError::Diverged(message)
}
