//! orq SAT front end
//!
//! Formulas in conjunctive normal form, DIMACS input and output, and the
//! graph reductions that produce formulas for the oracle compiler.
//!
//! # Core Components
//!
//! - **Literals**: [`Var`] and [`Lit`], 1-based and signed as in DIMACS
//! - **Formulas**: [`Clause`] and [`Cnf`] with range validation and a
//!   brute-force reference evaluator
//! - **DIMACS**: [`Cnf::from_dimacs`] and [`Cnf::to_dimacs`]
//! - **Graphs**: [`Graph`], a simple undirected graph over `0..n`
//! - **Reductions**: coloring, independent set and k-clique in [`reduce`]
//!
//! # Example: independent sets of a triangle
//!
//! ```rust
//! use orq_sat::reduce::{Reduction, independent_set_to_sat};
//! use orq_sat::Graph;
//!
//! let triangle = Graph::complete(3);
//! let reduction = independent_set_to_sat(&triangle).unwrap();
//! assert_eq!(reduction.cnf().num_clauses(), 3);
//!
//! let sets: Vec<_> = reduction
//!     .cnf()
//!     .satisfying_assignments()
//!     .unwrap()
//!     .into_iter()
//!     .map(|bits| reduction.decode_bits(bits))
//!     .collect();
//! assert_eq!(sets, vec![vec![], vec![0], vec![1], vec![2]]);
//! ```

pub mod dimacs;
pub mod error;
pub mod formula;
pub mod graph;
pub mod literal;
pub mod random;
pub mod reduce;

pub use error::{SatError, SatResult};
pub use formula::{Clause, Cnf, MAX_ENUMERATION_VARS, unpack_assignment};
pub use graph::{EdgeList, Graph};
pub use literal::{Lit, Var};
