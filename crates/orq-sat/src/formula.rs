//! Clauses and CNF formulas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SatError, SatResult};
use crate::literal::{Lit, Var};

/// Largest variable count [`Cnf::satisfying_assignments`] will enumerate.
pub const MAX_ENUMERATION_VARS: u32 = 24;

/// A disjunction of literals.
///
/// Literal order carries no meaning for satisfiability but is preserved: the
/// compiler emits gates in this order and uncomputes in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clause(Vec<Lit>);

impl Clause {
    /// Create a clause from literals.
    pub fn new(lits: impl IntoIterator<Item = Lit>) -> Self {
        Self(lits.into_iter().collect())
    }

    /// Create a clause from DIMACS integers.
    pub fn from_dimacs(values: &[i64]) -> SatResult<Self> {
        values
            .iter()
            .map(|&v| Lit::try_from(v))
            .collect::<SatResult<Vec<_>>>()
            .map(Self)
    }

    /// The literals in order.
    pub fn lits(&self) -> &[Lit] {
        &self.0
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the clause has no literals (constant false).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the literals.
    pub fn iter(&self) -> impl Iterator<Item = &Lit> {
        self.0.iter()
    }

    /// Truth value under `assignment`, indexed by variable position.
    /// Variables beyond the slice read as false.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        self.0.iter().any(|lit| {
            let value = assignment.get(lit.var().position()).copied().unwrap_or(false);
            lit.eval(value)
        })
    }

    fn evaluate_bits(&self, bits: u64) -> bool {
        self.0.iter().any(|lit| {
            let position = lit.var().position();
            let value = position < 64 && (bits >> position) & 1 == 1;
            lit.eval(value)
        })
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = std::slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, lit) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ∨ ")?;
            }
            write!(f, "{lit}")?;
        }
        f.write_str(")")
    }
}

/// A formula in conjunctive normal form over variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cnf {
    num_vars: u32,
    clauses: Vec<Clause>,
}

impl Cnf {
    /// Create an empty formula over `num_vars` variables.
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: vec![],
        }
    }

    /// Create a formula from clauses and validate it.
    pub fn from_clauses(num_vars: u32, clauses: impl IntoIterator<Item = Clause>) -> SatResult<Self> {
        let cnf = Self {
            num_vars,
            clauses: clauses.into_iter().collect(),
        };
        cnf.validate()?;
        Ok(cnf)
    }

    /// Create a formula from DIMACS-style integer clauses and validate it.
    pub fn from_dimacs_clauses(num_vars: u32, clauses: &[&[i64]]) -> SatResult<Self> {
        let clauses = clauses
            .iter()
            .map(|c| Clause::from_dimacs(c))
            .collect::<SatResult<Vec<_>>>()?;
        Self::from_clauses(num_vars, clauses)
    }

    /// Append a clause. Validation is deferred to [`Cnf::validate`].
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Check that every literal's variable lies in `[1, num_vars]`.
    pub fn validate(&self) -> SatResult<()> {
        for (i, clause) in self.clauses.iter().enumerate() {
            if let Some(lit) = clause.iter().find(|l| l.var().get() > self.num_vars) {
                return Err(SatError::InvalidFormula {
                    clause: i,
                    literal: lit.to_dimacs(),
                    num_vars: self.num_vars,
                });
            }
        }
        Ok(())
    }

    /// Declared variable count.
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Number of clauses.
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// The clauses in order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// All variables, in order.
    pub fn vars(&self) -> impl Iterator<Item = Var> {
        (1..=self.num_vars).filter_map(Var::new)
    }

    /// Truth value under `assignment`, where `assignment[i]` is variable `i + 1`.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        self.clauses.iter().all(|c| c.evaluate(assignment))
    }

    /// Truth value under a packed assignment: bit `i` is variable `i + 1`.
    pub fn evaluate_bits(&self, bits: u64) -> bool {
        self.clauses.iter().all(|c| c.evaluate_bits(bits))
    }

    /// Every satisfying assignment in packed form, in increasing order.
    ///
    /// This is a brute-force reference evaluator for small formulas.
    pub fn satisfying_assignments(&self) -> SatResult<Vec<u64>> {
        if self.num_vars > MAX_ENUMERATION_VARS {
            return Err(SatError::TooManyVariables {
                num_vars: self.num_vars,
                max: MAX_ENUMERATION_VARS,
            });
        }
        Ok((0..1u64 << self.num_vars)
            .filter(|&bits| self.evaluate_bits(bits))
            .collect())
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("⊤");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ∧ ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Unpack a packed assignment into one bool per variable.
pub fn unpack_assignment(bits: u64, num_vars: u32) -> Vec<bool> {
    (0..num_vars).map(|i| (bits >> i) & 1 == 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor2() -> Cnf {
        Cnf::from_dimacs_clauses(2, &[&[1, 2], &[-1, -2]]).unwrap()
    }

    #[test]
    fn test_evaluate_xor() {
        let cnf = xor2();
        assert!(!cnf.evaluate(&[false, false]));
        assert!(cnf.evaluate(&[true, false]));
        assert!(cnf.evaluate(&[false, true]));
        assert!(!cnf.evaluate(&[true, true]));
        assert_eq!(cnf.satisfying_assignments().unwrap(), vec![0b01, 0b10]);
    }

    #[test]
    fn test_validate_out_of_range() {
        let err = Cnf::from_dimacs_clauses(2, &[&[1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            SatError::InvalidFormula {
                clause: 0,
                literal: 3,
                num_vars: 2
            }
        ));
    }

    #[test]
    fn test_zero_vars_with_literal_is_invalid() {
        assert!(Cnf::from_dimacs_clauses(0, &[&[-1]]).is_err());
    }

    #[test]
    fn test_empty_formula_is_true() {
        let cnf = Cnf::new(0);
        assert!(cnf.evaluate(&[]));
        assert_eq!(cnf.satisfying_assignments().unwrap(), vec![0]);
        assert_eq!(cnf.to_string(), "⊤");
    }

    #[test]
    fn test_empty_clause_is_false() {
        let cnf = Cnf::from_clauses(1, [Clause::default()]).unwrap();
        assert!(cnf.satisfying_assignments().unwrap().is_empty());
    }

    #[test]
    fn test_enumeration_limit() {
        let cnf = Cnf::new(MAX_ENUMERATION_VARS + 1);
        assert!(matches!(
            cnf.satisfying_assignments(),
            Err(SatError::TooManyVariables { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(xor2().to_string(), "(x1 ∨ x2) ∧ (¬x1 ∨ ¬x2)");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&xor2()).unwrap();
        assert_eq!(json, r#"{"num_vars":2,"clauses":[[1,2],[-1,-2]]}"#);
    }

    #[test]
    fn test_unpack_assignment() {
        assert_eq!(unpack_assignment(0b101, 3), vec![true, false, true]);
    }
}
