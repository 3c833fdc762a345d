//! Engine Configuration
//!
//! Game definitions describe their board and dispatcher settings as JSON:
//!
//! ```json
//! {
//!   "board": { "directed": false, "width": 5, "height": 5 },
//!   "dispatcher": { "timeout_ms": 300 }
//! }
//! ```
//!
//! Every field has a default, so `{}` is a valid config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Board extent and edge semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Directed boards store one edge per connection; undirected boards add
    /// a hidden reverse twin.
    pub directed: bool,
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            directed: false,
            width: 8,
            height: 8,
        }
    }
}

/// Settings for the rule callback dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// How long a caller waits for a callback before giving up on it.
    pub timeout_ms: u64,

    /// Name given to worker threads.
    pub thread_name: String,
}

impl DispatcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 500,
            thread_name: "rule-worker".to_string(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub dispatcher: DispatcherConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let BoardConfig { width, height, .. } = self.board;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if width.checked_mul(height).is_none() {
            return Err(ConfigError::BoardTooLarge { width, height });
        }
        if self.dispatcher.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
