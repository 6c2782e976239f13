//! Instruction inversion for uncomputation.

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};

/// Compute the inverse of an instruction.
///
/// Flip-type gates and the Hadamard are involutions; the OR macro inverts
/// to its declared adjoint. Barriers are their own inverse. Resets are
/// rejected.
pub fn inverse_instruction(inst: &Instruction) -> IrResult<Instruction> {
    match &inst.kind {
        InstructionKind::Gate(gate) => Ok(Instruction::gate(gate.inverse(), inst.lines.clone())),
        InstructionKind::Barrier => Ok(inst.clone()),
        InstructionKind::Reset => Err(IrError::NonInvertible(format!(
            "reset on {}",
            inst.lines
                .first()
                .map_or_else(|| "?".to_string(), ToString::to_string)
        ))),
    }
}
