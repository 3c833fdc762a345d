//! Topology Graph
//!
//! This module implements the logical graph that game boards are built on.
//!
//! # Overview
//!
//! The graph is directed:
//!
//! - Vertices carry a unique identity and, on a board, a grid position
//! - Edges connect an origin to a target and are identified by that pair
//!
//! Undirected play is modelled one level up, by the board, which stores each
//! connection as a visible edge plus a hidden reverse twin.
//!
//! # Design Decisions
//!
//! 1. The graph owns its vertices and edges; everything else refers to them
//!    by `VertexId` / `EdgeKey`. There are no shared pointers to keep in sync.
//!
//! 2. Both maps are insertion-ordered (`IndexMap`) so iteration, and with it
//!    traversal, is deterministic.
//!
//! 3. Each vertex keeps its incoming and outgoing edge keys so neighbours can
//!    be found without scanning the edge map.

mod edge;
mod topology;
mod vertex;

pub use edge::{Edge, EdgeKey};
pub use topology::Graph;
pub use vertex::{IncidentEdges, Vertex, VertexId, VisitState};
