//! Compilation options.

use serde::{Deserialize, Serialize};

use crate::strategy::{CounterCleanup, OracleStrategy};

/// Options for [`compile`](crate::compile).
///
/// Every field has a default, so a partial YAML or JSON document
/// deserializes into a complete set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Aggregation strategy.
    pub strategy: OracleStrategy,
    /// Counter cleanup, used by [`OracleStrategy::SharedCounter`] only.
    pub counter_cleanup: CounterCleanup,
    /// Emit barriers between clause blocks and around the phase preparation.
    pub barriers: bool,
    /// Wrap the marking circuit in a phase kickback. Without it the result
    /// is left on the flag line.
    pub phase_wrapper: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strategy: OracleStrategy::default(),
            counter_cleanup: CounterCleanup::default(),
            barriers: true,
            phase_wrapper: true,
        }
    }
}

impl CompileOptions {
    /// Set the aggregation strategy.
    pub fn with_strategy(mut self, strategy: OracleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the counter cleanup.
    pub fn with_counter_cleanup(mut self, cleanup: CounterCleanup) -> Self {
        self.counter_cleanup = cleanup;
        self
    }

    /// Enable or disable barriers.
    pub fn with_barriers(mut self, barriers: bool) -> Self {
        self.barriers = barriers;
        self
    }

    /// Enable or disable the phase wrapper.
    pub fn with_phase_wrapper(mut self, phase_wrapper: bool) -> Self {
        self.phase_wrapper = phase_wrapper;
        self
    }
}
