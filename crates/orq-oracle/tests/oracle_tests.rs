//! End-to-end oracle tests, checked by exhaustive simulation.

use orq_ir::lower;
use orq_oracle::{
    CompileOptions, CompiledOracle, CounterCleanup, OracleStrategy, compile, compile_counting,
    compile_naive,
};
use orq_sat::reduce::{Reduction, clique_to_sat, graph_coloring_to_sat, independent_set_to_sat};
use orq_sat::{Cnf, Graph};
use orq_sim::{flag_marked, phase_marked};

fn all_options() -> Vec<CompileOptions> {
    vec![
        CompileOptions::default().with_strategy(OracleStrategy::PerClauseAncilla),
        CompileOptions::default()
            .with_strategy(OracleStrategy::SharedCounter)
            .with_counter_cleanup(CounterCleanup::Reset),
        CompileOptions::default()
            .with_strategy(OracleStrategy::SharedCounter)
            .with_counter_cleanup(CounterCleanup::Uncompute),
    ]
}

fn marked(oracle: &CompiledOracle) -> Vec<u64> {
    phase_marked(&oracle.circuit, oracle.input_lines()).unwrap()
}

fn xor2() -> Cnf {
    Cnf::from_dimacs_clauses(2, &[&[1, 2], &[-1, -2]]).unwrap()
}

// ----------------------------------------------------------------------------
// Concrete scenarios
// ----------------------------------------------------------------------------

#[test]
fn test_xor_marks_exactly_two_assignments() {
    for options in all_options() {
        let oracle = compile(&xor2(), &options).unwrap();
        // Bit 0 is x1: (x1, x2) = (1, 0) and (0, 1).
        assert_eq!(marked(&oracle), vec![0b01, 0b10], "{options:?}");
    }
}

#[test]
fn test_triangle_independent_set_oracle() {
    let reduction = independent_set_to_sat(&Graph::complete(3)).unwrap();
    for options in all_options() {
        let oracle = compile(reduction.cnf(), &options).unwrap();
        let sets: Vec<Vec<usize>> = marked(&oracle)
            .into_iter()
            .map(|bits| reduction.decode_bits(bits))
            .collect();
        assert_eq!(sets, vec![vec![], vec![0], vec![1], vec![2]]);
    }
}

#[test]
fn test_coloring_oracle_matches_classical() {
    let path = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    let reduction = graph_coloring_to_sat(&path, 2).unwrap();
    let expected = reduction.cnf().satisfying_assignments().unwrap();
    assert!(!expected.is_empty());
    for options in all_options() {
        let oracle = compile(reduction.cnf(), &options).unwrap();
        assert_eq!(marked(&oracle), expected);
    }
}

#[test]
fn test_clique_oracle() {
    let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    let present = clique_to_sat(&graph, 2).unwrap();
    let absent = clique_to_sat(&graph, 3).unwrap();
    for options in all_options() {
        let oracle = compile(present.cnf(), &options).unwrap();
        assert_eq!(marked(&oracle).len(), 4);
        let oracle = compile(absent.cnf(), &options).unwrap();
        assert!(marked(&oracle).is_empty());
    }
}

// ----------------------------------------------------------------------------
// Degenerate formulas
// ----------------------------------------------------------------------------

#[test]
fn test_no_clauses_marks_everything() {
    for options in all_options() {
        let oracle = compile(&Cnf::new(2), &options).unwrap();
        assert_eq!(marked(&oracle), vec![0, 1, 2, 3]);
    }
}

#[test]
fn test_empty_formula_marks_the_empty_assignment() {
    for options in all_options() {
        let oracle = compile(&Cnf::new(0), &options).unwrap();
        assert_eq!(marked(&oracle), vec![0]);
    }
}

#[test]
fn test_empty_clause_marks_nothing() {
    let cnf = Cnf::from_clauses(2, [orq_sat::Clause::default()]).unwrap();
    for options in all_options() {
        let oracle = compile(&cnf, &options).unwrap();
        assert!(marked(&oracle).is_empty());
    }
}

#[test]
fn test_tautological_and_repeated_literals() {
    let cnf = Cnf::from_dimacs_clauses(2, &[&[1, -1], &[2, 2], &[-2, 1, -2]]).unwrap();
    let expected = cnf.satisfying_assignments().unwrap();
    assert_eq!(expected, vec![0b11]);
    for options in all_options() {
        assert_eq!(marked(&compile(&cnf, &options).unwrap()), expected);
    }
}

// ----------------------------------------------------------------------------
// Line accounting
// ----------------------------------------------------------------------------

#[test]
fn test_line_accounting() {
    let cnf = orq_sat::random::random_k_cnf(4, 9, 3, 11);
    let naive = compile_naive(&cnf).unwrap();
    assert_eq!(naive.num_lines(), 4 + 9 + 1 + 1);
    let counting = compile_counting(&cnf).unwrap();
    // bit_length(9) = 4
    assert_eq!(counting.num_lines(), 4 + 4 + 1 + 1 + 1);
}

// ----------------------------------------------------------------------------
// Variants of the output circuit
// ----------------------------------------------------------------------------

#[test]
fn test_bare_marking_circuit_sets_flag() {
    for options in all_options() {
        let options = options.with_phase_wrapper(false);
        let oracle = compile(&xor2(), &options).unwrap();
        assert_eq!(oracle.phase_line(), None);
        let flagged = flag_marked(&oracle.circuit, oracle.input_lines(), oracle.flag_line()).unwrap();
        assert_eq!(flagged, vec![0b01, 0b10]);
    }
}

#[test]
fn test_lowered_oracle_marks_the_same() {
    let cnf = Cnf::from_dimacs_clauses(3, &[&[1, -2, 3], &[-1, 2], &[2, 3]]).unwrap();
    for options in all_options() {
        let oracle = compile(&cnf, &options).unwrap();
        let lowered = lower(&oracle.circuit).unwrap();
        assert!(lowered.gate_counts().keys().all(|g| g != "or" && g != "or_dg"));
        assert_eq!(
            phase_marked(&lowered, oracle.input_lines()).unwrap(),
            marked(&oracle)
        );
    }
}

#[test]
fn test_oracle_followed_by_inverse_is_identity() {
    let options = CompileOptions::default()
        .with_strategy(OracleStrategy::SharedCounter)
        .with_counter_cleanup(CounterCleanup::Uncompute);
    for options in [CompileOptions::default(), options] {
        let oracle = compile(&xor2(), &options).unwrap();
        let mut twice = oracle.circuit.clone();
        twice.compose(&oracle.circuit.inverse().unwrap()).unwrap();
        assert!(phase_marked(&twice, oracle.input_lines()).unwrap().is_empty());
    }
}
