//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::Gate;
use crate::line::LineId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InstructionKind {
    /// A reversible gate.
    Gate(Gate),
    /// Reset a line to 0. Not invertible.
    Reset,
    /// Barrier (synchronization point, no semantic effect).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Lines this instruction operates on (controls first, target last).
    pub lines: Vec<LineId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: Gate, lines: impl IntoIterator<Item = LineId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            lines: lines.into_iter().collect(),
        }
    }

    /// Create a single-line gate instruction.
    pub fn single_line_gate(gate: Gate, line: LineId) -> Self {
        Self::gate(gate, [line])
    }

    /// Create a reset instruction.
    pub fn reset(line: LineId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            lines: vec![line],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(lines: impl IntoIterator<Item = LineId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            lines: lines.into_iter().collect(),
        }
    }

    /// The gate, if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Whether this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Whether this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// The name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }

    /// The target line of a gate (its last operand).
    pub fn target(&self) -> Option<LineId> {
        match self.kind {
            InstructionKind::Gate(_) | InstructionKind::Reset => self.lines.last().copied(),
            InstructionKind::Barrier => None,
        }
    }

    /// The control (or input) lines of a gate.
    pub fn controls(&self) -> &[LineId] {
        match self.kind {
            InstructionKind::Gate(_) => &self.lines[..self.lines.len().saturating_sub(1)],
            _ => &[],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            InstructionKind::Gate(g) => write!(f, "{g}")?,
            InstructionKind::Reset => f.write_str("reset")?,
            InstructionKind::Barrier => f.write_str("barrier")?,
        }
        for (i, line) in self.lines.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{line}")?;
        }
        Ok(())
    }
}
