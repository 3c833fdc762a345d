//! Board Queries
//!
//! Pure functions over a [`Graph`](crate::graph::Graph) that rule code uses to
//! judge moves and detect wins:
//!
//! - `reachable_within`: bounded breadth-first reachability
//! - `path_exists`: unbounded (for any real board) reachability test
//! - `is_planar`: would a new straight edge cross the existing drawing
//!
//! None of them mutate the graph. Traversal state lives in the call, so any
//! number of read-only queries may run against the same graph at once.

mod planarity;
mod traversal;

pub use planarity::{is_planar, segments_cross};
pub use traversal::{path_exists, reachable_within, PATH_BUDGET};
