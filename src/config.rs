//! Agent settings

use anyhow::{anyhow, Result};

use std::time::Duration;

/// The default maximum search depth in plies
pub const DEFAULT_MAX_DEPTH: usize = 7;

/// The default soft time limit, leaving a margin under a 15 second move clock
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(12);

/// Settings of an `AlphaBetaAgent`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    /// The deepest iteration of iterative deepening
    pub max_depth: usize,

    /// Iterative deepening stops starting new depths once this much time has passed.
    /// A depth already in progress always runs to completion
    pub time_budget: Duration,

    /// Whether the search stops at a completed line instead of playing on to the horizon
    pub stop_at_decided: bool,
}

impl AgentConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_stop_at_decided(mut self, stop_at_decided: bool) -> Self {
        self.stop_at_decided = stop_at_decided;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(anyhow!("Invalid config, max_depth must be at least 1"));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: DEFAULT_TIME_BUDGET,
            stop_at_decided: true,
        }
    }
}
