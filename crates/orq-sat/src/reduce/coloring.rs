use tracing::debug;

use super::{Reduction, is_true, product_vars};
use crate::error::SatResult;
use crate::formula::{Clause, Cnf};
use crate::graph::Graph;
use crate::literal::Var;

/// Graph coloring encoded as CNF.
///
/// Each vertex gets at least one color and adjacent vertices never share
/// one. There is no at-most-one-color constraint: a model may give a vertex
/// several colors, any of which yields a proper coloring.
#[derive(Debug, Clone)]
pub struct ColoringReduction {
    cnf: Cnf,
    num_vertices: usize,
    num_colors: usize,
}

/// Encode "`graph` is `num_colors`-colorable".
///
/// With `num_colors == 0` no clauses are emitted.
pub fn graph_coloring_to_sat(graph: &Graph, num_colors: usize) -> SatResult<ColoringReduction> {
    let n = graph.num_vertices();
    let num_vars = product_vars(n, num_colors, "graph coloring")?;
    let var = |v: usize, c: usize| Var::from_position(v * num_colors + c);

    let mut cnf = Cnf::new(num_vars);
    if num_colors > 0 {
        for v in 0..n {
            cnf.push((0..num_colors).map(|c| var(v, c).pos()).collect());
        }
        for (u, v) in graph.edges() {
            for c in 0..num_colors {
                cnf.push(Clause::new([var(u, c).neg(), var(v, c).neg()]));
            }
        }
    }

    debug!(
        vertices = n,
        colors = num_colors,
        vars = num_vars,
        clauses = cnf.num_clauses(),
        "Encoded graph coloring"
    );

    Ok(ColoringReduction {
        cnf,
        num_vertices: n,
        num_colors,
    })
}

impl ColoringReduction {
    /// Variable meaning "vertex `v` has color `c`" (both 0-based).
    pub fn var(&self, vertex: usize, color: usize) -> Var {
        Var::from_position(vertex * self.num_colors + color)
    }

    /// Number of colors.
    pub fn num_colors(&self) -> usize {
        self.num_colors
    }
}

impl Reduction for ColoringReduction {
    /// Colors assigned to each vertex.
    type Solution = Vec<Vec<usize>>;

    fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    fn into_cnf(self) -> Cnf {
        self.cnf
    }

    fn decode(&self, model: &[bool]) -> Vec<Vec<usize>> {
        (0..self.num_vertices)
            .map(|v| {
                (0..self.num_colors)
                    .filter(|&c| is_true(model, self.var(v, c)))
                    .collect()
            })
            .collect()
    }
}
