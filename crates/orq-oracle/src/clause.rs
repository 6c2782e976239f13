//! Single-clause evaluation into a target line.

use orq_ir::LineId;
use orq_sat::Clause;
use rustc_hash::FxHashMap;

use crate::alloc::{LineArena, LineRole};
use crate::error::{OracleError, OracleResult};
use crate::negation::NegationGuard;

/// How a clause is realised on the input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClauseShape {
    /// Contains a literal and its negation: constant true.
    Tautology,
    /// OR over distinct input lines, some of them negated first.
    Or {
        inputs: Vec<LineId>,
        negated: Vec<LineId>,
    },
}

/// Computes clause values into target lines.
///
/// A clause becomes one OR macro over its input lines, bracketed by a
/// [`NegationGuard`] for the negative literals. Repeated literals are
/// merged; a clause with complementary literals is a constant flip. An empty
/// clause is an OR of arity zero and leaves the target unchanged.
#[derive(Debug, Clone, Copy)]
pub struct ClauseEvaluator<'a> {
    inputs: &'a [LineId],
}

impl<'a> ClauseEvaluator<'a> {
    /// Create an evaluator over input lines, `inputs[i]` holding variable `i + 1`.
    pub fn new(inputs: &'a [LineId]) -> Self {
        Self { inputs }
    }

    /// `target ^= clause(inputs)`, leaving the inputs unchanged.
    pub fn compute(&self, arena: &mut LineArena, clause: &Clause, target: LineId) -> OracleResult<()> {
        self.apply(arena, clause, target, false)
    }

    /// Exact inverse of [`ClauseEvaluator::compute`].
    pub fn uncompute(
        &self,
        arena: &mut LineArena,
        clause: &Clause,
        target: LineId,
    ) -> OracleResult<()> {
        self.apply(arena, clause, target, true)
    }

    /// Compute the clause into `target`, run `body`, then uncompute it.
    ///
    /// The inputs stay negated while `body` runs, so the OR and its inverse
    /// share one negation bracket.
    pub fn with_clause<T>(
        &self,
        arena: &mut LineArena,
        clause: &Clause,
        target: LineId,
        body: impl FnOnce(&mut LineArena) -> OracleResult<T>,
    ) -> OracleResult<T> {
        match self.shape(clause)? {
            ClauseShape::Tautology => {
                arena.x(target)?;
                let value = body(arena)?;
                arena.x(target)?;
                Ok(value)
            }
            ClauseShape::Or { inputs, negated } => {
                let mut guard = NegationGuard::new(arena, negated)?;
                guard.or(&inputs, target)?;
                let value = body(&mut *guard)?;
                guard.or_inverse(&inputs, target)?;
                Ok(value)
            }
        }
    }

    fn apply(
        &self,
        arena: &mut LineArena,
        clause: &Clause,
        target: LineId,
        inverse: bool,
    ) -> OracleResult<()> {
        match self.shape(clause)? {
            ClauseShape::Tautology => arena.x(target),
            ClauseShape::Or { inputs, negated } => {
                let mut guard = NegationGuard::new(arena, negated)?;
                if inverse {
                    guard.or_inverse(&inputs, target)
                } else {
                    guard.or(&inputs, target)
                }
            }
        }
    }

    fn shape(&self, clause: &Clause) -> OracleResult<ClauseShape> {
        let mut polarity: FxHashMap<LineId, bool> = FxHashMap::default();
        let mut inputs = Vec::with_capacity(clause.len());
        let mut negated = Vec::new();

        for lit in clause {
            let position = lit.var().position();
            let line = *self.inputs.get(position).ok_or(OracleError::UnknownLine {
                role: LineRole::Input(position as u32),
            })?;
            match polarity.get(&line) {
                Some(&seen) if seen != lit.is_negated() => return Ok(ClauseShape::Tautology),
                Some(_) => {}
                None => {
                    polarity.insert(line, lit.is_negated());
                    inputs.push(line);
                    if lit.is_negated() {
                        negated.push(line);
                    }
                }
            }
        }

        Ok(ClauseShape::Or { inputs, negated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orq_ir::{Gate, InstructionKind};

    fn setup(n: u32) -> (LineArena, Vec<LineId>, LineId) {
        let mut arena = LineArena::new("test", false);
        let x = arena.declare("x", (0..n).map(LineRole::Input)).unwrap();
        let s = arena.declare_line("s", LineRole::Scratch).unwrap();
        for i in 0..n {
            arena.acquire(LineRole::Input(i)).unwrap();
        }
        arena.acquire(LineRole::Scratch).unwrap();
        (arena, x, s)
    }

    fn names(arena: &LineArena) -> Vec<String> {
        arena
            .circuit()
            .instructions()
            .iter()
            .map(|i| i.to_string())
            .collect()
    }

    #[test]
    fn test_negation_bracket() {
        let (mut arena, x, s) = setup(2);
        let eval = ClauseEvaluator::new(&x);
        let clause = Clause::from_dimacs(&[1, -2]).unwrap();
        eval.compute(&mut arena, &clause, s).unwrap();
        assert_eq!(names(&arena), vec!["x l1", "or(2) l0, l1, l2", "x l1"]);
        assert_eq!(arena.pending(x[1]), 0);
        assert_eq!(arena.pending(s), 1);

        eval.uncompute(&mut arena, &clause, s).unwrap();
        assert_eq!(arena.pending(s), 0);
        arena.release(LineRole::Scratch).unwrap();
    }

    #[test]
    fn test_unit_clause_uses_or_of_arity_one() {
        let (mut arena, x, s) = setup(1);
        let eval = ClauseEvaluator::new(&x);
        eval.compute(&mut arena, &Clause::from_dimacs(&[1]).unwrap(), s)
            .unwrap();
        let inst = &arena.circuit().instructions()[0];
        assert_eq!(
            inst.kind,
            InstructionKind::Gate(Gate::Or {
                arity: 1,
                inverse: false
            })
        );
    }

    #[test]
    fn test_repeated_literal_is_merged() {
        let (mut arena, x, s) = setup(2);
        let eval = ClauseEvaluator::new(&x);
        eval.compute(&mut arena, &Clause::from_dimacs(&[2, 1, 2]).unwrap(), s)
            .unwrap();
        assert_eq!(names(&arena), vec!["or(2) l1, l0, l2"]);
    }

    #[test]
    fn test_tautology_is_constant_flip() {
        let (mut arena, x, s) = setup(1);
        let eval = ClauseEvaluator::new(&x);
        let clause = Clause::from_dimacs(&[1, -1]).unwrap();
        eval.compute(&mut arena, &clause, s).unwrap();
        assert_eq!(names(&arena), vec!["x l1"]);
        eval.uncompute(&mut arena, &clause, s).unwrap();
        assert_eq!(arena.pending(s), 0);
    }

    #[test]
    fn test_empty_clause() {
        let (mut arena, x, s) = setup(0);
        let eval = ClauseEvaluator::new(&x);
        eval.compute(&mut arena, &Clause::default(), s).unwrap();
        assert_eq!(names(&arena), vec!["or(0) l0"]);
    }

    #[test]
    fn test_with_clause_shares_bracket() {
        let (mut arena, x, s) = setup(1);
        arena.declare_line("flag", LineRole::Flag).unwrap();
        let flag = arena.acquire(LineRole::Flag).unwrap();
        let eval = ClauseEvaluator::new(&x);
        let clause = Clause::from_dimacs(&[-1]).unwrap();
        eval.with_clause(&mut arena, &clause, s, |arena| arena.cx(s, flag))
            .unwrap();
        assert_eq!(
            names(&arena),
            vec!["x l0", "or(1) l0, l1", "cx l1, l2", "or_dg(1) l0, l1", "x l0"]
        );
        assert_eq!(arena.pending(s), 0);
        assert_eq!(arena.pending(x[0]), 0);
    }

    #[test]
    fn test_literal_without_input_line() {
        let (mut arena, x, s) = setup(1);
        let eval = ClauseEvaluator::new(&x);
        let err = eval
            .compute(&mut arena, &Clause::from_dimacs(&[2]).unwrap(), s)
            .unwrap_err();
        assert!(matches!(
            err,
            OracleError::UnknownLine {
                role: LineRole::Input(1)
            }
        ));
    }
}
