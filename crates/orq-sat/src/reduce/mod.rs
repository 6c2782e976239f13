//! Reductions from graph problems to CNF.
//!
//! | Problem | Variables | Clauses |
//! |---------|-----------|---------|
//! | [`graph_coloring_to_sat`] | `n·C`, `x(v, c) = v·C + c + 1` | `n + |E|·C` |
//! | [`independent_set_to_sat`] | `n`, `x(v) = v + 1` | `|E|` |
//! | [`clique_to_sat`] | `k·n`, `x(i, v) = i·n + v + 1` | `O(k²·n²)` |
//!
//! Every reduction returns a value implementing [`Reduction`], which owns the
//! formula and maps a model back to the problem domain.

mod clique;
mod coloring;
mod independent_set;

pub use clique::{CliqueReduction, clique_to_sat};
pub use coloring::{ColoringReduction, graph_coloring_to_sat};
pub use independent_set::{IndependentSetReduction, independent_set_to_sat};

use crate::error::{SatError, SatResult};
use crate::formula::{Cnf, unpack_assignment};
use crate::literal::Var;

/// A CNF encoding of a problem instance.
pub trait Reduction {
    /// Problem-domain reading of a model.
    type Solution;

    /// The encoded formula.
    fn cnf(&self) -> &Cnf;

    /// Consume the reduction, keeping only the formula.
    fn into_cnf(self) -> Cnf;

    /// Read a model (`model[i]` is variable `i + 1`) in the problem domain.
    fn decode(&self, model: &[bool]) -> Self::Solution;

    /// Read a packed model (bit `i` is variable `i + 1`).
    fn decode_bits(&self, bits: u64) -> Self::Solution {
        self.decode(&unpack_assignment(bits, self.cnf().num_vars()))
    }
}

/// Variable count `a·b`, checked against the `u32` variable space.
fn product_vars(a: usize, b: usize, what: &str) -> SatResult<u32> {
    a.checked_mul(b)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| SatError::InvalidGraph(format!("{what} needs more than u32::MAX variables")))
}

fn is_true(model: &[bool], var: Var) -> bool {
    model.get(var.position()).copied().unwrap_or(false)
}
