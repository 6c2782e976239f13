//! Seeded random formulas for benchmarks and tests.

use rand::rngs::SmallRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

use crate::formula::{Clause, Cnf};
use crate::literal::{Lit, Var};

/// Generate a random k-CNF with `num_clauses` clauses over `num_vars` variables.
///
/// Each clause draws `min(k, num_vars)` distinct variables uniformly and
/// negates each with probability 1/2. The same seed yields the same formula.
pub fn random_k_cnf(num_vars: u32, num_clauses: usize, k: usize, seed: u64) -> Cnf {
    let mut rng = SmallRng::seed_from_u64(seed);
    let width = k.min(num_vars as usize);
    let mut cnf = Cnf::new(num_vars);

    for _ in 0..num_clauses {
        let clause: Clause = sample(&mut rng, num_vars as usize, width)
            .into_iter()
            .map(|position| {
                let var = Var::from_position(position);
                if rng.gen_bool(0.5) {
                    Lit::negative(var)
                } else {
                    Lit::positive(var)
                }
            })
            .collect();
        cnf.push(clause);
    }
    cnf
}
