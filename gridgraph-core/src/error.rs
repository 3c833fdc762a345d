//! Error Types
//!
//! Every fallible engine call returns one of these enums instead of panicking.
//! Ordinary rejections (duplicate vertex, occupied cell, self loop, ...) leave
//! the structure untouched. Consistency faults are different: they mean the
//! graph and its bookkeeping have diverged, and they are always logged at
//! `error!` level before being returned. Use `is_fault()` to tell them apart.

use thiserror::Error;

use crate::board::GridPoint;
use crate::graph::{EdgeKey, VertexId};

/// Errors raised by [`Graph`](crate::graph::Graph) mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The vertex is already a member of the graph.
    #[error("vertex {0} is already in the graph")]
    DuplicateVertex(VertexId),

    /// Vertices must be added before any edge touches them.
    #[error("vertex {0} still has incident edges")]
    VertexNotIsolated(VertexId),

    /// The vertex is not a member of the graph.
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(VertexId),

    /// An edge may not start and end at the same vertex.
    #[error("self loop on vertex {0}")]
    SelfLoop(VertexId),

    /// An edge with the same endpoints already exists.
    #[error("edge {0} is already in the graph")]
    DuplicateEdge(EdgeKey),

    /// No edge with these endpoints exists.
    #[error("edge {0} is not in the graph")]
    UnknownEdge(EdgeKey),

    /// An incident list and the edge set disagree about `edge`.
    #[error("consistency fault on vertex {vertex}: edge {edge} missing during removal")]
    ConsistencyFault { vertex: VertexId, edge: EdgeKey },
}

impl GraphError {
    /// True for detected divergence, false for ordinary rejections.
    pub fn is_fault(&self) -> bool {
        matches!(self, GraphError::ConsistencyFault { .. })
    }
}

/// Errors raised by [`Grid`](crate::board::Grid) cell operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("point {point} is outside the {width}x{height} grid")]
    OutOfBounds {
        point: GridPoint,
        width: usize,
        height: usize,
    },

    #[error("point {point} is already occupied by vertex {occupant}")]
    Occupied { point: GridPoint, occupant: VertexId },

    #[error("point {0} is empty")]
    EmptyCell(GridPoint),
}

/// Errors raised by [`Board`](crate::board::Board) mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Board vertices need a grid position.
    #[error("vertex {0} has no grid position")]
    Unplaced(VertexId),

    /// Graph and grid no longer describe the same board.
    #[error("board diverged: {0}")]
    Diverged(String),
}

impl BoardError {
    /// True for detected divergence, false for ordinary rejections.
    pub fn is_fault(&self) -> bool {
        match self {
            BoardError::Graph(e) => e.is_fault(),
            BoardError::Diverged(_) => true,
            _ => false,
        }
    }
}

/// Errors raised by the query algorithms in [`algo`](crate::algo).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(VertexId),

    #[error("budget must be non-negative, got {0}")]
    NegativeBudget(i64),

    #[error("vertex {0} has no grid position")]
    Unplaced(VertexId),
}

/// Errors raised while loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("board extent must be positive, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },

    #[error("board extent {width}x{height} has too many cells")]
    BoardTooLarge { width: usize, height: usize },

    #[error("dispatcher timeout must be positive")]
    ZeroTimeout,
}
