//! orq Oracle Compiler
//!
//! Compiles a CNF formula into a reversible circuit that marks satisfying
//! assignments, for use as the oracle of an amplitude amplification search.
//!
//! # Pipeline
//!
//! 1. Every clause is evaluated by [`ClauseEvaluator`]: negative literals are
//!    flipped by a [`NegationGuard`], then one OR macro writes the clause
//!    value into a target line.
//! 2. An [`OracleStrategy`] combines the clause values into a flag line.
//! 3. The phase wrapper copies the flag into a line prepared in `|−⟩`, so
//!    satisfying assignments acquire a phase of −1, and every other line
//!    returns to its initial value.
//!
//! All lines are owned by a [`LineArena`], which refuses double allocation
//! and checks on release that each scratch line has been returned to zero.
//!
//! # Example
//!
//! ```rust
//! use orq_oracle::{CompileOptions, OracleStrategy, compile};
//! use orq_sat::Cnf;
//!
//! // x1 XOR x2
//! let cnf = Cnf::from_dimacs_clauses(2, &[&[1, 2], &[-1, -2]]).unwrap();
//!
//! let naive = compile(&cnf, &CompileOptions::default()).unwrap();
//! assert_eq!(naive.num_lines(), 6);
//!
//! let options = CompileOptions::default().with_strategy(OracleStrategy::SharedCounter);
//! let counting = compile(&cnf, &options).unwrap();
//! assert_eq!(counting.num_lines(), 7);
//! ```
//!
//! # Line Accounting
//!
//! | Strategy | Lines |
//! |----------|-------|
//! | `PerClauseAncilla` | `nv + m + 1 (flag) + 1 (phase)` |
//! | `SharedCounter` | `nv + bit_length(m) + 1 (scratch) + 1 (flag) + 1 (phase)` |

pub mod alloc;
pub mod clause;
pub mod compile;
pub mod config;
pub mod counter;
pub mod error;
mod naive;
pub mod negation;
pub mod phase;
pub mod strategy;

pub use alloc::{LineArena, LineRole};
pub use clause::ClauseEvaluator;
pub use compile::{CompiledOracle, OracleLayout, compile, compile_counting, compile_naive};
pub use config::CompileOptions;
pub use error::{OracleError, OracleResult};
pub use negation::NegationGuard;
pub use strategy::{CounterCleanup, OracleStrategy};
