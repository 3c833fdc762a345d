//! Board and Grid
//!
//! This module embeds the logical graph on a discrete 2D grid.
//!
//! # Overview
//!
//! - `GridPoint` is an integer coordinate
//! - `Grid` maps in-bounds points to at most one vertex each
//! - `Board` owns a `Graph` and a `Grid` and is the only way to mutate them
//!   together
//!
//! Rule code should never touch the graph or grid of a live board directly;
//! going around the board is how the two halves drift apart.

mod grid;
mod point;
mod surface;

pub use grid::Grid;
pub use point::GridPoint;
pub use surface::{Board, SharedBoard};
