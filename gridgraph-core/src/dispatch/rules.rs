//! Rule Hooks
//!
//! A game's rules plug in through [`RuleSet`]. The [`Referee`] owns the shared
//! board and routes every hook through a [`Dispatcher`], so a rule that hangs
//! costs the caller one timeout and nothing more.

use std::sync::Arc;

use tracing::{info, instrument};

use super::cancel::CancelToken;
use super::watchdog::{CallOutcome, Dispatcher};
use crate::board::{Board, GridPoint, SharedBoard};
use crate::config::EngineConfig;

/// Game rules supplied by a game definition.
///
/// Hooks get exclusive access to the board for the duration of the call and
/// answer with a boolean: whether the move was legal and applied, whether
/// the game is over, and so on.
pub trait RuleSet: Send + Sync + 'static {
    /// Set up a fresh board. Called after every reset.
    fn start(&self, _board: &mut Board, _cancel: &CancelToken) -> bool {
        true
    }

    /// Handle the current player acting on `point`.
    fn play(&self, board: &mut Board, point: GridPoint, cancel: &CancelToken) -> bool;

    /// Whether the game has ended.
    fn is_finished(&self, _board: &Board, _cancel: &CancelToken) -> bool {
        false
    }
}

/// Runs a [`RuleSet`] against a shared board under a dispatcher.
pub struct Referee<R: RuleSet> {
    rules: Arc<R>,
    board: SharedBoard,
    dispatcher: Dispatcher,
}

impl<R: RuleSet> Referee<R> {
    pub fn new(rules: R, board: Board, dispatcher: Dispatcher) -> Self {
        Self {
            rules: Arc::new(rules),
            board: board.into_shared(),
            dispatcher,
        }
    }

    pub fn from_config(rules: R, config: &EngineConfig) -> Self {
        Self::new(
            rules,
            Board::from_config(&config.board),
            Dispatcher::from_config(&config.dispatcher),
        )
    }

    /// The board, for rendering and read-only queries.
    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// Flush the board and run the rules' setup hook.
    ///
    /// Both happen on a dispatcher worker, so a hook from an earlier call
    /// that still holds the board costs this call a timeout.
    #[instrument(skip(self))]
    pub fn reset(&self) -> CallOutcome {
        let outcome = self.dispatch(|rules, board, cancel| {
            board.flush();
            rules.start(board, cancel)
        });
        info!(?outcome, "board reset");
        outcome
    }

    /// Submit a move.
    #[instrument(skip(self))]
    pub fn play(&self, point: GridPoint) -> CallOutcome {
        self.dispatch(move |rules, board, cancel| rules.play(board, point, cancel))
    }

    /// Ask the rules whether the game is over.
    pub fn is_finished(&self) -> CallOutcome {
        self.dispatch(|rules, board, cancel| rules.is_finished(board, cancel))
    }

    fn dispatch<F>(&self, hook: F) -> CallOutcome
    where
        F: FnOnce(&R, &mut Board, &CancelToken) -> bool + Send + 'static,
    {
        let rules = Arc::clone(&self.rules);
        let board = Arc::clone(&self.board);
        self.dispatcher.call(move |cancel| {
            let mut board = board.lock();
            hook(&*rules, &mut *board, cancel)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    /// Drops a stone on any free cell and joins it to the previous stone.
    struct Chain;

    impl RuleSet for Chain {
        fn play(&self, board: &mut Board, point: GridPoint, _cancel: &CancelToken) -> bool {
            let previous = board.graph().vertices().last().map(|v| v.id());
            let Ok(id) = board.spawn_vertex(point) else {
                return false;
            };
            match previous {
                Some(prev) => board.add_edge(prev, id).is_ok(),
                None => true,
            }
        }

        fn is_finished(&self, board: &Board, _cancel: &CancelToken) -> bool {
            board.graph().vertex_count() >= 3
        }
    }

    /// Never answers in time.
    struct Stalls;

    impl RuleSet for Stalls {
        fn play(&self, _board: &mut Board, _point: GridPoint, cancel: &CancelToken) -> bool {
            while !cancel.is_cancelled() {
                thread::sleep(Duration::from_millis(5));
            }
            true
        }
    }

    /// Ignores its token and keeps the board locked well past any timeout.
    struct Oblivious;

    impl RuleSet for Oblivious {
        fn play(&self, _board: &mut Board, _point: GridPoint, _cancel: &CancelToken) -> bool {
            thread::sleep(Duration::from_millis(1500));
            true
        }
    }

    #[test]
    fn moves_flow_through_to_the_board() {
        let referee = Referee::new(Chain, Board::new(false, 3, 3), Dispatcher::default());

        assert_eq!(referee.play(GridPoint::new(0, 0)), CallOutcome::Completed(true));
        assert_eq!(referee.play(GridPoint::new(1, 1)), CallOutcome::Completed(true));
        assert_eq!(referee.play(GridPoint::new(1, 1)), CallOutcome::Completed(false));
        assert_eq!(referee.is_finished(), CallOutcome::Completed(false));
        assert_eq!(referee.play(GridPoint::new(2, 2)), CallOutcome::Completed(true));
        assert_eq!(referee.is_finished(), CallOutcome::Completed(true));

        let board = referee.board().lock();
        assert_eq!(board.graph().edge_count(), 4);
        board.validate().unwrap();
    }

    #[test]
    fn reset_clears_the_board() {
        let referee = Referee::new(Chain, Board::new(true, 2, 2), Dispatcher::default());
        referee.play(GridPoint::new(0, 0));

        assert_eq!(referee.reset(), CallOutcome::Completed(true));
        assert!(referee.board().lock().graph().is_empty());
    }

    #[test]
    fn stalled_rules_time_out() {
        let referee = Referee::new(
            Stalls,
            Board::new(false, 2, 2),
            Dispatcher::new(Duration::from_millis(30)),
        );
        assert!(referee.play(GridPoint::new(0, 0)).is_timeout());
    }

    #[test]
    fn reset_does_not_wait_on_a_held_board() {
        let referee = Referee::new(
            Oblivious,
            Board::new(false, 2, 2),
            Dispatcher::new(Duration::from_millis(50)),
        );
        assert!(referee.play(GridPoint::new(0, 0)).is_timeout());

        let started = Instant::now();
        assert!(referee.reset().is_timeout());
        assert!(started.elapsed() < Duration::from_millis(1000));
    }
}
