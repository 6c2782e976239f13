//! Error types for simulation.

use orq_ir::LineId;
use thiserror::Error;

/// Errors that can occur during simulation or oracle checking.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The circuit has more lines than a basis index can hold.
    #[error("Circuit has {lines} lines, the simulator supports at most {max}")]
    TooManyLines {
        /// Lines in the circuit.
        lines: usize,
        /// Supported maximum.
        max: usize,
    },

    /// A reset hit a line whose value differs across the superposition.
    #[error("Reset on {line} while it is in superposition")]
    IndeterminateReset {
        /// The reset line.
        line: LineId,
    },

    /// An oracle left working lines dirty or changed its inputs.
    #[error("Assignment {assignment:#b} leaves garbage: {detail}")]
    Garbage {
        /// The input assignment (bit `i` is variable `i + 1`).
        assignment: u64,
        /// What was found instead of a clean state.
        detail: String,
    },
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
