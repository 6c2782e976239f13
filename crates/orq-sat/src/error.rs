//! Error types for formulas, DIMACS input and graphs.

use thiserror::Error;

/// Errors produced while building, parsing or validating formulas and graphs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SatError {
    /// A literal refers to a variable outside `[1, num_vars]`.
    #[error(
        "Invalid formula: clause {clause} contains literal {literal} but the formula declares {num_vars} variables"
    )]
    InvalidFormula {
        /// Index of the offending clause.
        clause: usize,
        /// The offending literal in DIMACS notation.
        literal: i64,
        /// Declared variable count.
        num_vars: u32,
    },

    /// A literal value of zero or beyond the variable range of `u32`.
    #[error("Invalid literal {0}: literals are non-zero signed variable indices")]
    InvalidLiteral(i64),

    /// Malformed DIMACS input.
    #[error("DIMACS parse error at line {line}: {message}")]
    Dimacs {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Malformed graph (self-loop, duplicate edge, vertex out of range).
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// Brute-force enumeration requested over too many variables.
    #[error("Cannot enumerate {num_vars} variables (limit {max})")]
    TooManyVariables {
        /// Variables in the formula.
        num_vars: u32,
        /// Enumeration limit.
        max: u32,
    },
}

/// Result type for formula and graph operations.
pub type SatResult<T> = Result<T, SatError>;
