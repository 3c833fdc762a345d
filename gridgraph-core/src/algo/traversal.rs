//! Bounded Reachability
//!
//! A breadth-first walk over outgoing edges with an expansion budget.
//!
//! # Algorithm
//!
//! 1. Every vertex in the graph starts `Unvisited`
//! 2. The queue holds the start vertex; `remaining` is the budget
//! 3. While `remaining >= 0` or the queue is non-empty:
//!    - Pop the front vertex (if any), mark it `Active`, and record it unless
//!      it is the start or already recorded
//!    - If `remaining >= 0`, queue each successor that is not `Visited` and
//!      not already queued, then decrement `remaining`
//!    - Mark the current vertex `Visited`
//!
//! The budget is spent once per expansion step, not once per BFS level, so on
//! branching graphs the result is not the textbook "within N hops" set. Game
//! rules depend on exactly this behaviour.

use std::collections::{HashMap, VecDeque};

use indexmap::IndexSet;
use tracing::trace;

use crate::error::TraversalError;
use crate::graph::{Graph, VertexId, VisitState};

/// Minimum budget used by [`path_exists`]. Graphs with more vertices than
/// this get one expansion step per vertex instead.
pub const PATH_BUDGET: i64 = 1000;

/// Vertices reachable from `start` within `budget` expansion steps.
///
/// The result is in discovery order, has no duplicates and never contains
/// `start` itself.
pub fn reachable_within(
    graph: &Graph,
    start: VertexId,
    budget: i64,
) -> Result<Vec<VertexId>, TraversalError> {
    if !graph.contains_vertex(start) {
        return Err(TraversalError::UnknownVertex(start));
    }
    if budget < 0 {
        return Err(TraversalError::NegativeBudget(budget));
    }

    let mut state: HashMap<VertexId, VisitState> = graph
        .vertices()
        .map(|v| (v.id(), VisitState::Unvisited))
        .collect();
    let mut queue = VecDeque::from([start]);
    let mut found = IndexSet::new();
    let mut remaining = budget;
    let mut current = start;

    while remaining >= 0 || !queue.is_empty() {
        if let Some(next) = queue.pop_front() {
            current = next;
            state.insert(current, VisitState::Active);
            if current != start {
                found.insert(current);
            }
        }

        if remaining >= 0 {
            for successor in graph.successors(current) {
                let visited = state.get(&successor) == Some(&VisitState::Visited);
                if !visited && !queue.contains(&successor) {
                    queue.push_back(successor);
                }
            }
            remaining -= 1;
        }

        state.insert(current, VisitState::Visited);
        trace!(vertex = %current, remaining, queued = queue.len(), "expanded");
    }

    Ok(found.into_iter().collect())
}

/// Whether `to` can be reached from `from` along outgoing edges.
///
/// A vertex never reaches itself.
pub fn path_exists(graph: &Graph, from: VertexId, to: VertexId) -> Result<bool, TraversalError> {
    let budget = PATH_BUDGET.max(i64::try_from(graph.vertex_count()).unwrap_or(i64::MAX));
    Ok(reachable_within(graph, from, budget)?.contains(&to))
}
