//! Gridgraph Core
//!
//! This crate provides the engine for turn-based games played on a graph
//! embedded in a 2D grid: graph coloring, connection games, directed-edge
//! puzzles. It implements:
//!
//! - A topology graph with identity-keyed vertices and value-keyed edges
//! - A board that keeps the graph and its grid placement in lockstep
//! - Move-validation queries (bounded reachability, paths, edge crossings)
//! - A bounded-time dispatcher for third-party rule code
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: vertices, edges and the graph that owns them
//! - `board`: grid coordinates, the occupancy grid and the composed board
//! - `algo`: read-only queries over a graph
//! - `dispatch`: running rule callbacks with a deadline
//! - `config`: engine settings loaded from game definitions
//! - `error`: error types for every layer
//!
//! # Example
//!
//! ```rust
//! use gridgraph_core::algo::path_exists;
//! use gridgraph_core::board::{Board, GridPoint};
//!
//! let mut board = Board::new(false, 3, 3);
//! let a = board.spawn_vertex(GridPoint::new(0, 0)).unwrap();
//! let b = board.spawn_vertex(GridPoint::new(1, 1)).unwrap();
//! let c = board.spawn_vertex(GridPoint::new(2, 2)).unwrap();
//!
//! board.add_edge(a, b).unwrap();
//! board.add_edge(b, c).unwrap();
//!
//! // Undirected boards connect both ways.
//! assert!(path_exists(board.graph(), c, a).unwrap());
//! ```

pub mod algo;
pub mod board;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod graph;

pub use algo::{is_planar, path_exists, reachable_within};
pub use board::{Board, Grid, GridPoint, SharedBoard};
pub use config::{BoardConfig, DispatcherConfig, EngineConfig};
pub use dispatch::{CallOutcome, CancelToken, Dispatcher, Referee, RuleSet};
pub use error::{BoardError, ConfigError, GraphError, GridError, TraversalError};
pub use graph::{Edge, EdgeKey, Graph, Vertex, VertexId};
