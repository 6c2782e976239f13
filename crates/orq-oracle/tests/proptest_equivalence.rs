//! Naive and counting oracles agree with the classical evaluator.

use orq_oracle::{CompileOptions, CounterCleanup, OracleStrategy, compile};
use orq_sat::{Clause, Cnf, Lit, Var};
use orq_sim::phase_marked;
use proptest::prelude::*;

/// Formulas with 0..=6 variables, 0..=10 clauses and 0..=5 literals per
/// clause, including empty clauses and the empty formula.
fn arb_cnf() -> impl Strategy<Value = Cnf> {
    (0u32..=6).prop_flat_map(|num_vars| {
        let clause = if num_vars == 0 {
            Just(Clause::default()).boxed()
        } else {
            let lit = (1..=num_vars, any::<bool>()).prop_map(|(v, negated)| {
                let var = Var::new(v).unwrap();
                if negated { Lit::negative(var) } else { Lit::positive(var) }
            });
            proptest::collection::vec(lit, 0..=5)
                .prop_map(Clause::new)
                .boxed()
        };
        proptest::collection::vec(clause, 0..=10)
            .prop_map(move |clauses| Cnf::from_clauses(num_vars, clauses).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn strategies_agree_with_classical(cnf in arb_cnf()) {
        let expected = cnf.satisfying_assignments().unwrap();

        let naive = compile(&cnf, &CompileOptions::default()).unwrap();
        let naive_marked = phase_marked(&naive.circuit, naive.input_lines()).unwrap();
        prop_assert_eq!(&naive_marked, &expected);

        for cleanup in [CounterCleanup::Reset, CounterCleanup::Uncompute] {
            let options = CompileOptions::default()
                .with_strategy(OracleStrategy::SharedCounter)
                .with_counter_cleanup(cleanup);
            let counting = compile(&cnf, &options).unwrap();
            let counting_marked = phase_marked(&counting.circuit, counting.input_lines()).unwrap();
            prop_assert_eq!(&counting_marked, &naive_marked);
        }
    }

    #[test]
    fn line_count_is_exact(cnf in arb_cnf()) {
        for strategy in OracleStrategy::ALL {
            let oracle = compile(&cnf, &CompileOptions::default().with_strategy(strategy)).unwrap();
            let m = cnf.num_clauses();
            let overhead = match strategy {
                OracleStrategy::PerClauseAncilla => m,
                OracleStrategy::SharedCounter => (usize::BITS - m.leading_zeros()) as usize + 1,
            };
            prop_assert_eq!(oracle.num_lines(), cnf.num_vars() as usize + overhead + 2);
        }
    }
}
