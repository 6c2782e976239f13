//! High-level circuit builder API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::{Instruction, InstructionKind};
use crate::inverse::inverse_instruction;
use crate::line::{Line, LineId};

/// A reversible circuit: a fixed set of bit-lines and an ordered
/// instruction sequence over them.
///
/// Builder methods validate operands before appending, so a `Circuit`
/// never holds an instruction that refers to a missing line or repeats a
/// line within one gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Lines in the circuit.
    lines: Vec<Line>,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of anonymous lines.
    pub fn with_size(name: impl Into<String>, num_lines: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_lines {
            circuit.add_line();
        }
        circuit
    }

    /// A circuit with the same name and lines but no instructions.
    pub fn empty_like(&self) -> Self {
        Self {
            name: self.name.clone(),
            lines: self.lines.clone(),
            instructions: vec![],
        }
    }

    /// Add a single line to the circuit.
    pub fn add_line(&mut self) -> LineId {
        let id = LineId::from(self.lines.len());
        self.lines.push(Line::new(id));
        id
    }

    /// Add a named register of `size` lines.
    pub fn add_register(&mut self, name: impl Into<String>, size: u32) -> Vec<LineId> {
        let name = name.into();
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = LineId::from(self.lines.len());
            self.lines.push(Line::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply a bit flip.
    pub fn x(&mut self, line: LineId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_line_gate(Gate::X, line))?;
        Ok(self)
    }

    /// Apply a Hadamard gate.
    pub fn h(&mut self, line: LineId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_line_gate(Gate::H, line))?;
        Ok(self)
    }

    /// Apply a controlled flip.
    pub fn cx(&mut self, control: LineId, target: LineId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(Gate::Cx, [control, target]))?;
        Ok(self)
    }

    /// Apply a Toffoli gate.
    pub fn ccx(&mut self, c1: LineId, c2: LineId, target: LineId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(Gate::Ccx, [c1, c2, target]))?;
        Ok(self)
    }

    /// Apply a multi-controlled flip. An empty control set flips `target`
    /// unconditionally.
    pub fn mcx(&mut self, controls: &[LineId], target: LineId) -> IrResult<&mut Self> {
        let gate = Gate::Mcx {
            num_controls: controls.len() as u32,
        };
        self.apply(Instruction::gate(gate, operands(controls, target)))?;
        Ok(self)
    }

    /// XOR the OR of `inputs` into `target`.
    pub fn or(&mut self, inputs: &[LineId], target: LineId) -> IrResult<&mut Self> {
        let gate = Gate::Or {
            arity: inputs.len() as u32,
            inverse: false,
        };
        self.apply(Instruction::gate(gate, operands(inputs, target)))?;
        Ok(self)
    }

    /// Apply the inverse of [`Circuit::or`] on the same operands.
    pub fn or_inverse(&mut self, inputs: &[LineId], target: LineId) -> IrResult<&mut Self> {
        let gate = Gate::Or {
            arity: inputs.len() as u32,
            inverse: true,
        };
        self.apply(Instruction::gate(gate, operands(inputs, target)))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Reset a line to 0.
    pub fn reset(&mut self, line: LineId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(line))?;
        Ok(self)
    }

    /// Apply a barrier to the given lines.
    pub fn barrier(&mut self, lines: impl IntoIterator<Item = LineId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(lines))?;
        Ok(self)
    }

    /// Apply a barrier to all lines.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let lines: Vec<_> = self.lines.iter().map(|l| l.id).collect();
        self.apply(Instruction::barrier(lines))?;
        Ok(self)
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(())
    }

    /// Append every instruction of `other`, which must have the same width.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_lines() != self.num_lines() {
            return Err(IrError::WidthMismatch {
                expected: self.num_lines(),
                got: other.num_lines(),
            });
        }
        self.instructions.extend(other.instructions.iter().cloned());
        Ok(self)
    }

    /// The exact inverse circuit: inverted instructions in reverse order.
    ///
    /// Fails if the circuit contains a reset.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(inverse_instruction)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self {
            name: format!("{}_dg", self.name),
            lines: self.lines.clone(),
            instructions,
        })
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.lines.len() as u32;
                if got != gate.num_lines() {
                    return Err(IrError::LineCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_lines(),
                        got,
                    });
                }
            }
            InstructionKind::Reset => {
                if instruction.lines.len() != 1 {
                    return Err(IrError::LineCountMismatch {
                        gate_name: "reset".into(),
                        expected: 1,
                        got: instruction.lines.len() as u32,
                    });
                }
            }
            InstructionKind::Barrier => {}
        }

        for (i, &line) in instruction.lines.iter().enumerate() {
            if line.index() >= self.lines.len() {
                return Err(IrError::LineNotFound {
                    line,
                    gate_name: gate_name(),
                });
            }
            if instruction.lines[..i].contains(&line) {
                return Err(IrError::DuplicateLine {
                    line,
                    gate_name: gate_name(),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of lines.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Get the lines in the circuit.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions, barriers included.
    pub fn num_instructions(&self) -> usize {
        self.instructions.len()
    }

    /// Number of gate instructions.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Instruction counts keyed by name, barriers excluded.
    pub fn gate_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in self.instructions.iter().filter(|i| !i.is_barrier()) {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth: the longest chain of non-barrier instructions that
    /// share a line. Barriers align their lines without adding a layer.
    pub fn depth(&self) -> usize {
        let mut frontier = vec![0usize; self.lines.len()];
        for inst in &self.instructions {
            let level = inst
                .lines
                .iter()
                .map(|l| frontier[l.index()])
                .max()
                .unwrap_or(0);
            let next = if inst.is_barrier() { level } else { level + 1 };
            for l in &inst.lines {
                frontier[l.index()] = next;
            }
        }
        frontier.into_iter().max().unwrap_or(0)
    }

    /// Whether the circuit contains a reset.
    pub fn has_reset(&self) -> bool {
        self.instructions
            .iter()
            .any(|i| matches!(i.kind, InstructionKind::Reset))
    }
}

fn operands(controls: &[LineId], target: LineId) -> Vec<LineId> {
    let mut lines = Vec::with_capacity(controls.len() + 1);
    lines.extend_from_slice(controls);
    lines.push(target);
    lines
}
