//! orq Reversible Circuit Intermediate Representation
//!
//! This crate provides the data structures the oracle compiler emits: a
//! fixed set of named bit-lines and an ordered sequence of reversible
//! instructions over them.
//!
//! # Core Components
//!
//! - **Lines**: [`LineId`] and [`Line`] for addressing bit-lines, optionally
//!   grouped into named registers
//! - **Gates**: [`Gate`], the reversible gate set (flips, multi-controlled
//!   flips, the OR macro and its adjoint, Hadamard)
//! - **Instructions**: [`Instruction`] combining a gate, reset or barrier
//!   with its operands
//! - **Circuit**: [`Circuit`] validated builder, inversion and statistics
//! - **Lowering**: [`lower`] expands OR macros into primitive flips
//!
//! # Example: OR of two lines
//!
//! ```rust
//! use orq_ir::Circuit;
//!
//! let mut circuit = Circuit::new("or2");
//! let x = circuit.add_register("x", 2);
//! let out = circuit.add_register("out", 1);
//!
//! circuit.or(&x, out[0]).unwrap();
//! circuit.or_inverse(&x, out[0]).unwrap();
//!
//! assert_eq!(circuit.num_lines(), 3);
//! assert_eq!(circuit.depth(), 2);
//! assert_eq!(circuit.inverse().unwrap().num_gates(), 2);
//! ```
//!
//! # Gate Set
//!
//! | Gate | Lines | Action |
//! |------|-------|--------|
//! | `x` | 1 | `t ^= 1` |
//! | `h` | 1 | Hadamard |
//! | `cx` | 2 | `t ^= c` |
//! | `ccx` | 3 | `t ^= c0 & c1` |
//! | `mcx(k)` | k+1 | `t ^= c0 & ... & c(k-1)` |
//! | `or(k)`, `or_dg(k)` | k+1 | `t ^= x0 \| ... \| x(k-1)` |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod inverse;
pub mod line;
pub mod lower;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use instruction::{Instruction, InstructionKind};
pub use inverse::inverse_instruction;
pub use line::{Line, LineId};
pub use lower::lower;
