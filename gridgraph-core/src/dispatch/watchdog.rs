//! Bounded-Time Dispatcher
//!
//! Runs a rule callback on its own worker thread while the caller waits at
//! most `timeout` for the answer.
//!
//! # Outcomes
//!
//! - The callback returns in time: `Completed(result)`
//! - The deadline passes first: the call's [`CancelToken`] is tripped, the
//!   worker is left to finish on its own and its result is thrown away,
//!   and the caller gets `TimedOut`
//! - The callback panics (or its thread cannot be started): `Failed`
//!
//! Workers are never killed. A callback that ignores its token keeps running
//! in the background until it returns, so anything it holds (a board lock,
//! say) stays held until then.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, instrument, warn};

use super::cancel::CancelToken;
use crate::config::DispatcherConfig;

/// How a dispatched call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The callback answered in time.
    Completed(bool),

    /// The callback did not answer in time. Treat as "no effect performed".
    TimedOut,

    /// The callback panicked or could not be started.
    Failed,
}

impl CallOutcome {
    /// False only when the caller gave up waiting.
    pub fn completed(&self) -> bool {
        !matches!(self, CallOutcome::TimedOut)
    }

    /// The callback's answer; false for anything but `Completed(true)`.
    pub fn result(&self) -> bool {
        matches!(self, CallOutcome::Completed(true))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CallOutcome::TimedOut)
    }
}

/// Invokes callbacks with a deadline.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    timeout: Duration,
    thread_name: String,
}

impl Dispatcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            thread_name: DispatcherConfig::default().thread_name,
        }
    }

    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self {
            timeout: config.timeout(),
            thread_name: config.thread_name.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `callback` on a worker thread and wait for it.
    #[instrument(skip_all, fields(timeout_ms = self.timeout.as_millis() as u64))]
    pub fn call<F>(&self, callback: F) -> CallOutcome
    where
        F: FnOnce(&CancelToken) -> bool + Send + 'static,
    {
        let token = CancelToken::new();
        let worker_token = token.clone();
        let (tx, rx) = mpsc::sync_channel(1);

        let spawned = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || {
                let result = callback(&worker_token);
                // Nobody is listening after a timeout.
                let _ = tx.send(result);
            });
        if let Err(e) = spawned {
            error!(error = %e, "could not start callback worker");
            return CallOutcome::Failed;
        }

        match rx.recv_timeout(self.timeout) {
            Ok(result) => {
                debug!(result, "callback completed");
                CallOutcome::Completed(result)
            }
            Err(RecvTimeoutError::Timeout) => {
                token.cancel();
                warn!("callback timed out, result will be discarded");
                CallOutcome::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("callback worker exited without answering");
                CallOutcome::Failed
            }
        }
    }

    /// Run a one-argument callback.
    pub fn call_with<A, F>(&self, arg: A, callback: F) -> CallOutcome
    where
        A: Send + 'static,
        F: FnOnce(A, &CancelToken) -> bool + Send + 'static,
    {
        self.call(move |token| callback(arg, token))
    }

    /// Async flavour of [`call`](Self::call) for callers already on a tokio
    /// runtime. The callback runs on the blocking pool.
    #[instrument(skip_all, fields(timeout_ms = self.timeout.as_millis() as u64))]
    pub async fn call_async<F>(&self, callback: F) -> CallOutcome
    where
        F: FnOnce(&CancelToken) -> bool + Send + 'static,
    {
        let token = CancelToken::new();
        let worker_token = token.clone();
        let handle = tokio::task::spawn_blocking(move || callback(&worker_token));

        match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(result)) => {
                debug!(result, "callback completed");
                CallOutcome::Completed(result)
            }
            Ok(Err(e)) => {
                error!(error = %e, "callback task failed");
                CallOutcome::Failed
            }
            Err(_) => {
                token.cancel();
                warn!("callback timed out, result will be discarded");
                CallOutcome::TimedOut
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::from_config(&DispatcherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn fast_callback_completes() {
        let dispatcher = Dispatcher::new(Duration::from_millis(500));
        assert_eq!(dispatcher.call(|_| true), CallOutcome::Completed(true));
        assert_eq!(dispatcher.call(|_| false), CallOutcome::Completed(false));
    }

    #[test]
    fn argument_is_passed_through() {
        let dispatcher = Dispatcher::default();
        let outcome = dispatcher.call_with(7, |n, _| n % 2 == 1);
        assert!(outcome.completed());
        assert!(outcome.result());
    }

    #[test]
    fn slow_callback_times_out() {
        let dispatcher = Dispatcher::new(Duration::from_millis(50));
        let started = Instant::now();

        let outcome = dispatcher.call(|_| {
            thread::sleep(Duration::from_millis(400));
            true
        });

        assert_eq!(outcome, CallOutcome::TimedOut);
        assert!(!outcome.completed());
        assert!(!outcome.result());
        assert!(started.elapsed() < Duration::from_millis(350));
    }

    #[test]
    fn timeout_trips_the_token() {
        let dispatcher = Dispatcher::new(Duration::from_millis(30));
        let saw_cancel = Arc::new(AtomicBool::new(false));
        let flag = saw_cancel.clone();

        let outcome = dispatcher.call(move |token| {
            let deadline = Instant::now() + Duration::from_secs(2);
            while !token.is_cancelled() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }
            flag.store(token.is_cancelled(), Ordering::SeqCst);
            true
        });
        assert!(outcome.is_timeout());

        let deadline = Instant::now() + Duration::from_secs(2);
        while !saw_cancel.load(Ordering::SeqCst) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(saw_cancel.load(Ordering::SeqCst));
    }

    #[test]
    fn panicking_callback_fails() {
        let dispatcher = Dispatcher::new(Duration::from_millis(500));
        let outcome = dispatcher.call(|_| panic!("rule bug"));

        assert_eq!(outcome, CallOutcome::Failed);
        assert!(outcome.completed());
        assert!(!outcome.result());
    }
}
