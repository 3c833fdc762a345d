//! Rule Dispatch
//!
//! Game rules come from third-party game definitions and may loop, block or
//! panic. This module keeps the engine responsive anyway.
//!
//! # Concepts
//!
//! ## Dispatcher
//!
//! Runs one callback per worker thread and waits a fixed time for its answer.
//! Late answers are discarded rather than the worker being killed.
//!
//! ## Cancel tokens
//!
//! Each call hands its callback a token that is tripped when the caller stops
//! waiting, so well-behaved rule code can stop early.
//!
//! ## Referee
//!
//! Binds a `RuleSet` to a shared board and sends each hook through a
//! dispatcher.
//!
//! # Outcomes
//!
//! "The rules said no" (`Completed(false)`) and "the rules did not answer"
//! (`TimedOut`) are different outcomes and callers should treat them
//! differently; a timed-out move must be assumed to have had no effect.

mod cancel;
mod rules;
mod watchdog;

pub use cancel::CancelToken;
pub use rules::{Referee, RuleSet};
pub use watchdog::{CallOutcome, Dispatcher};
