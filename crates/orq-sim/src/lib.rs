//! orq Basis-State Simulator
//!
//! A small sparse simulator for the orq gate set, used to check compiled
//! oracles exhaustively: every input assignment is run as a basis state and
//! the result is compared with the classical truth table.
//!
//! - [`BasisSimulator`]: amplitude map keyed by basis index
//! - [`phase_marked`]: assignments a phase oracle multiplies by −1
//! - [`flag_marked`]: assignments a marking circuit flags
//!
//! Resets are supported only on lines whose value is the same across the
//! whole superposition; anything else is [`SimError::IndeterminateReset`].

pub mod error;
pub mod mark;
pub mod simulator;

pub use error::{SimError, SimResult};
pub use mark::{MAX_CHECKED_INPUTS, flag_marked, phase_marked};
pub use simulator::{BasisSimulator, MAX_LINES};
