//! Error types for the IR crate.

use crate::line::LineId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Line not found in circuit.
    #[error("Line {line} not found in circuit{}", format_gate_context(.gate_name))]
    LineNotFound {
        /// The line that was not found.
        line: LineId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of lines.
    #[error("Gate '{gate_name}' requires {expected} lines, got {got}")]
    LineCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of lines.
        expected: u32,
        /// Actual number of lines provided.
        got: u32,
    },

    /// Duplicate line in operation.
    #[error("Duplicate line {line} in operation{}", format_gate_context(.gate_name))]
    DuplicateLine {
        /// The duplicate line.
        line: LineId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The instruction has no inverse (reset).
    #[error("Cannot invert non-unitary operation: {0}")]
    NonInvertible(String),

    /// Two circuits being composed disagree on their line count.
    #[error("Cannot compose circuit with {got} lines onto circuit with {expected} lines")]
    WidthMismatch {
        /// Lines in the receiving circuit.
        expected: usize,
        /// Lines in the appended circuit.
        got: usize,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
