//! Variables and literals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::ops::Not;

use crate::error::SatError;

/// A Boolean decision variable, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Var(NonZeroU32);

impl Var {
    /// Create a variable from its 1-based index. Returns `None` for 0.
    pub fn new(index: u32) -> Option<Self> {
        NonZeroU32::new(index).map(Var)
    }

    /// Create a variable from a 0-based position (`position + 1`).
    ///
    /// # Panics
    ///
    /// Panics if `position + 1` overflows `u32`.
    pub fn from_position(position: usize) -> Self {
        u32::try_from(position + 1)
            .ok()
            .and_then(Var::new)
            .expect("Var overflow: exceeds u32::MAX")
    }

    /// The 1-based index.
    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The 0-based position, matching the input line the variable occupies.
    #[inline]
    pub fn position(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// The positive literal of this variable.
    pub fn pos(self) -> Lit {
        Lit::positive(self)
    }

    /// The negative literal of this variable.
    pub fn neg(self) -> Lit {
        Lit::negative(self)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable or its negation.
///
/// Serializes as a signed DIMACS integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Lit {
    var: Var,
    negated: bool,
}

impl Lit {
    /// The positive literal of `var`.
    pub fn positive(var: Var) -> Self {
        Self {
            var,
            negated: false,
        }
    }

    /// The negative literal of `var`.
    pub fn negative(var: Var) -> Self {
        Self { var, negated: true }
    }

    /// Parse a DIMACS literal. Zero and values beyond `u32` are rejected.
    pub fn from_dimacs(value: i64) -> Option<Self> {
        let var = Var::new(u32::try_from(value.unsigned_abs()).ok()?)?;
        Some(Self {
            var,
            negated: value < 0,
        })
    }

    /// The signed DIMACS representation.
    pub fn to_dimacs(self) -> i64 {
        let v = i64::from(self.var.get());
        if self.negated { -v } else { v }
    }

    /// The underlying variable.
    #[inline]
    pub fn var(self) -> Var {
        self.var
    }

    /// Whether the literal is negated.
    #[inline]
    pub fn is_negated(self) -> bool {
        self.negated
    }

    /// Truth value of the literal under a value of its variable.
    #[inline]
    pub fn eval(self, value: bool) -> bool {
        value != self.negated
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl TryFrom<i64> for Lit {
    type Error = SatError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Lit::from_dimacs(value).ok_or(SatError::InvalidLiteral(value))
    }
}

impl From<Lit> for i64 {
    fn from(lit: Lit) -> i64 {
        lit.to_dimacs()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "¬{}", self.var)
        } else {
            write!(f, "{}", self.var)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimacs_roundtrip_values() {
        let lit = Lit::from_dimacs(-3).unwrap();
        assert!(lit.is_negated());
        assert_eq!(lit.var().get(), 3);
        assert_eq!(lit.var().position(), 2);
        assert_eq!(lit.to_dimacs(), -3);
        assert_eq!((!lit).to_dimacs(), 3);
    }

    #[test]
    fn test_zero_literal_rejected() {
        assert!(Lit::from_dimacs(0).is_none());
        assert!(Lit::try_from(0).is_err());
        assert!(Lit::from_dimacs(i64::from(u32::MAX) + 1).is_none());
    }

    #[test]
    fn test_var_from_position() {
        assert_eq!(Var::from_position(0).get(), 1);
        assert_eq!(Var::from_position(9).get(), 10);
    }

    #[test]
    fn test_eval() {
        let x = Var::new(1).unwrap();
        assert!(x.pos().eval(true));
        assert!(!x.pos().eval(false));
        assert!(x.neg().eval(false));
    }

    #[test]
    fn test_serde_as_integer() {
        let lit = Var::new(5).unwrap().neg();
        assert_eq!(serde_json::to_string(&lit).unwrap(), "-5");
        let back: Lit = serde_json::from_str("-5").unwrap();
        assert_eq!(back, lit);
        assert!(serde_json::from_str::<Lit>("0").is_err());
    }

    #[test]
    fn test_display() {
        let x = Var::new(2).unwrap();
        assert_eq!(x.pos().to_string(), "x2");
        assert_eq!(x.neg().to_string(), "¬x2");
    }
}
