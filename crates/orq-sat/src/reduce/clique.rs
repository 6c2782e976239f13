use tracing::debug;

use super::{Reduction, is_true, product_vars};
use crate::error::SatResult;
use crate::formula::{Clause, Cnf};
use crate::graph::Graph;
use crate::literal::Var;

/// k-clique encoded as CNF over position/vertex variables.
///
/// Clauses: every position holds at least one and at most one vertex, no
/// vertex holds two positions, and the vertices at any two positions are
/// adjacent (one forbidding clause per ordered non-edge pair). The clause
/// count grows as `O(k²·n²)`.
#[derive(Debug, Clone)]
pub struct CliqueReduction {
    cnf: Cnf,
    num_vertices: usize,
    k: usize,
}

/// Encode "`graph` contains a clique of size `k`".
///
/// With `k == 0` no clauses are emitted.
pub fn clique_to_sat(graph: &Graph, k: usize) -> SatResult<CliqueReduction> {
    let n = graph.num_vertices();
    let num_vars = product_vars(k, n, "k-clique")?;
    let var = |i: usize, v: usize| Var::from_position(i * n + v);

    let mut cnf = Cnf::new(num_vars);

    for i in 0..k {
        cnf.push((0..n).map(|v| var(i, v).pos()).collect());
        for v in 0..n {
            for u in v + 1..n {
                cnf.push(Clause::new([var(i, v).neg(), var(i, u).neg()]));
            }
        }
    }

    for v in 0..n {
        for i in 0..k {
            for j in i + 1..k {
                cnf.push(Clause::new([var(i, v).neg(), var(j, v).neg()]));
            }
        }
    }

    for i in 0..k {
        for j in i + 1..k {
            for v in 0..n {
                for u in 0..n {
                    if v != u && !graph.has_edge(v, u) {
                        cnf.push(Clause::new([var(i, v).neg(), var(j, u).neg()]));
                    }
                }
            }
        }
    }

    debug!(
        vertices = n,
        k,
        vars = num_vars,
        clauses = cnf.num_clauses(),
        "Encoded k-clique"
    );

    Ok(CliqueReduction {
        cnf,
        num_vertices: n,
        k,
    })
}

impl CliqueReduction {
    /// Variable meaning "position `i` holds vertex `v`" (both 0-based).
    pub fn var(&self, position: usize, vertex: usize) -> Var {
        Var::from_position(position * self.num_vertices + vertex)
    }

    /// Clique size being encoded.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl Reduction for CliqueReduction {
    /// The vertex at each position, if any.
    type Solution = Vec<Option<usize>>;

    fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    fn into_cnf(self) -> Cnf {
        self.cnf
    }

    fn decode(&self, model: &[bool]) -> Vec<Option<usize>> {
        (0..self.k)
            .map(|i| (0..self.num_vertices).find(|&v| is_true(model, self.var(i, v))))
            .collect()
    }
}
