//! Error types for oracle synthesis.

use orq_ir::{IrError, LineId};
use orq_sat::SatError;
use thiserror::Error;

use crate::alloc::LineRole;

/// Errors that can occur while compiling an oracle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// The circuit builder rejected an instruction.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// The input formula is malformed.
    #[error(transparent)]
    Formula(#[from] SatError),

    /// A line was requested while another owner still holds it.
    #[error("Line for {role} is already in use")]
    LineInUse {
        /// The requested role.
        role: LineRole,
    },

    /// No line was declared for the requested role.
    #[error("No line declared for {role}")]
    UnknownLine {
        /// The requested role.
        role: LineRole,
    },

    /// A gate touched a line nobody holds.
    #[error("Line {line} used without being acquired")]
    NotAcquired {
        /// The offending line.
        line: LineId,
    },

    /// A line was released while it still carries uncancelled flips.
    #[error("Line for {role} released with {pending} uncancelled operation(s)")]
    DirtyRelease {
        /// The released role.
        role: LineRole,
        /// Operations still on the line's ledger.
        pending: usize,
    },

    /// Synthesis finished while a line was still held.
    #[error("Line for {role} still held at the end of synthesis")]
    Leaked {
        /// The role still held.
        role: LineRole,
    },
}

/// Result type for oracle synthesis.
pub type OracleResult<T> = Result<T, OracleError>;
