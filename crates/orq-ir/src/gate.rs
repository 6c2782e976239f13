//! Reversible gate set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gates emitted by the oracle compiler.
///
/// Every multi-line gate follows the operand convention "controls first,
/// target last". All flip-type gates compute `target ^= f(controls)` and are
/// therefore involutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum Gate {
    /// Bit flip (Pauli-X).
    X,
    /// Hadamard gate. The only non-classical gate; used by the phase wrapper.
    H,
    /// Controlled flip (CNOT).
    Cx,
    /// Doubly controlled flip (Toffoli).
    Ccx,
    /// Multi-controlled flip on `num_controls` controls.
    ///
    /// Zero controls degenerates to an unconditional flip.
    Mcx {
        /// Number of control lines.
        num_controls: u32,
    },
    /// OR of `arity` input lines XORed into one output line.
    ///
    /// `inverse` marks the declared adjoint. The action is identical, the
    /// flag only keeps compute/uncompute pairs distinguishable in listings.
    Or {
        /// Number of input lines.
        arity: u32,
        /// Whether this is the inverse macro.
        inverse: bool,
    },
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X => "x",
            Gate::H => "h",
            Gate::Cx => "cx",
            Gate::Ccx => "ccx",
            Gate::Mcx { .. } => "mcx",
            Gate::Or { inverse: false, .. } => "or",
            Gate::Or { inverse: true, .. } => "or_dg",
        }
    }

    /// Get the number of lines this gate operates on.
    #[inline]
    pub fn num_lines(&self) -> u32 {
        match self {
            Gate::X | Gate::H => 1,
            Gate::Cx => 2,
            Gate::Ccx => 3,
            Gate::Mcx { num_controls } => num_controls + 1,
            Gate::Or { arity, .. } => arity + 1,
        }
    }

    /// Number of control (or input) lines preceding the target.
    #[inline]
    pub fn num_controls(&self) -> u32 {
        self.num_lines() - 1
    }

    /// Whether the gate is a classical flip of its last operand.
    pub fn is_flip(&self) -> bool {
        !matches!(self, Gate::H)
    }

    /// The exact inverse of this gate.
    pub fn inverse(&self) -> Gate {
        match *self {
            Gate::Or { arity, inverse } => Gate::Or {
                arity,
                inverse: !inverse,
            },
            other => other,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Mcx { num_controls } => write!(f, "mcx({num_controls})"),
            Gate::Or { arity, .. } => write!(f, "{}({arity})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_properties() {
        assert_eq!(Gate::X.num_lines(), 1);
        assert_eq!(Gate::Cx.num_lines(), 2);
        assert_eq!(Gate::Ccx.num_lines(), 3);
        assert_eq!(Gate::Mcx { num_controls: 4 }.num_lines(), 5);
        assert_eq!(Gate::Mcx { num_controls: 0 }.num_controls(), 0);
        assert_eq!(
            Gate::Or {
                arity: 3,
                inverse: false
            }
            .num_lines(),
            4
        );
        assert!(!Gate::H.is_flip());
        assert!(Gate::Mcx { num_controls: 2 }.is_flip());
    }

    #[test]
    fn test_or_inverse_toggles_label() {
        let or = Gate::Or {
            arity: 2,
            inverse: false,
        };
        assert_eq!(or.name(), "or");
        assert_eq!(or.inverse().name(), "or_dg");
        assert_eq!(or.inverse().inverse(), or);
        assert_eq!(Gate::Ccx.inverse(), Gate::Ccx);
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(Gate::X.to_string(), "x");
        assert_eq!(Gate::Mcx { num_controls: 3 }.to_string(), "mcx(3)");
        assert_eq!(
            Gate::Or {
                arity: 1,
                inverse: true
            }
            .to_string(),
            "or_dg(1)"
        );
    }
}
