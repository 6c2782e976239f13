use tracing::debug;

use super::{Reduction, is_true};
use crate::error::{SatError, SatResult};
use crate::formula::{Clause, Cnf};
use crate::graph::Graph;
use crate::literal::Var;

/// Independent set encoded as CNF: one variable per vertex, one clause per
/// edge forbidding both endpoints.
///
/// Any independent set satisfies the formula; size is not encoded.
#[derive(Debug, Clone)]
pub struct IndependentSetReduction {
    cnf: Cnf,
}

/// Encode "the selected vertices of `graph` are independent".
pub fn independent_set_to_sat(graph: &Graph) -> SatResult<IndependentSetReduction> {
    let num_vars = u32::try_from(graph.num_vertices())
        .map_err(|_| SatError::InvalidGraph("too many vertices".into()))?;

    let mut cnf = Cnf::new(num_vars);
    for (u, v) in graph.edges() {
        cnf.push(Clause::new([
            Var::from_position(u).neg(),
            Var::from_position(v).neg(),
        ]));
    }

    debug!(vars = num_vars, clauses = cnf.num_clauses(), "Encoded independent set");
    Ok(IndependentSetReduction { cnf })
}

impl Reduction for IndependentSetReduction {
    /// Selected vertices, ascending.
    type Solution = Vec<usize>;

    fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    fn into_cnf(self) -> Cnf {
        self.cnf
    }

    fn decode(&self, model: &[bool]) -> Vec<usize> {
        self.cnf
            .vars()
            .filter(|&var| is_true(model, var))
            .map(Var::position)
            .collect()
    }
}
