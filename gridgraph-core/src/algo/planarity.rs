//! Straight-Line Crossing Check
//!
//! Decides whether a candidate edge, drawn as a straight segment between its
//! endpoints' grid positions, would cross any edge already on the board.
//!
//! This is not a planarity test in the graph-theory sense. It compares the
//! candidate against the existing drawing one segment at a time and only
//! looks at the x-coordinate of the two lines' intersection:
//!
//! - parallel lines (including collinear, overlapping ones) never cross
//! - otherwise the segments cross iff the intersection's x lies strictly
//!   inside both segments' x-extents
//!
//! Segments that share an endpoint meet at that endpoint's x, which is on the
//! boundary of both extents, so they never count as crossing. Vertical
//! segments have an empty open extent and never cross anything.

use tracing::debug;

use crate::board::GridPoint;
use crate::error::TraversalError;
use crate::graph::{Edge, Graph, VertexId};

/// Whether `candidate` can be drawn without crossing any edge of `graph`.
///
/// Hidden twins are checked too; they lie on top of their visible edge and
/// give the same answer. Both endpoints of every edge involved need a grid
/// position.
pub fn is_planar(graph: &Graph, candidate: &Edge) -> Result<bool, TraversalError> {
    let segment = (
        position(graph, candidate.origin())?,
        position(graph, candidate.target())?,
    );

    for edge in graph.edges() {
        let existing = (position(graph, edge.origin())?, position(graph, edge.target())?);
        if segments_cross(segment, existing) {
            debug!(candidate = %candidate.key(), blocking = %edge.key(), "segments cross");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether segment `a` crosses segment `b`.
pub fn segments_cross(a: (GridPoint, GridPoint), b: (GridPoint, GridPoint)) -> bool {
    let (xa1, ya1) = coords(a.0);
    let (xa2, ya2) = coords(a.1);
    let (xb1, yb1) = coords(b.0);
    let (xb2, yb2) = coords(b.1);

    let d = (xa1 - xa2) * (yb1 - yb2) - (ya1 - ya2) * (xb1 - xb2);
    if d == 0.0 {
        return false;
    }
    let nx = (xa1 * ya2 - ya1 * xa2) * (xb1 - xb2) - (xa1 - xa2) * (xb1 * yb2 - yb1 * xb2);
    let x = nx / d;

    strictly_between(x, xa1, xa2) && strictly_between(x, xb1, xb2)
}

fn strictly_between(x: f64, end1: f64, end2: f64) -> bool {
    if end1 < end2 {
        end1 < x && x < end2
    } else {
        end2 < x && x < end1
    }
}

fn coords(point: GridPoint) -> (f64, f64) {
    (f64::from(point.x()), f64::from(point.y()))
}

fn position(graph: &Graph, id: VertexId) -> Result<GridPoint, TraversalError> {
    graph
        .vertex(id)
        .ok_or(TraversalError::UnknownVertex(id))?
        .position()
        .ok_or(TraversalError::Unplaced(id))
}
