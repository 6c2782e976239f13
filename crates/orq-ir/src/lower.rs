//! Lowering of macro gates to primitive flips.
//!
//! Downstream consumers that do not understand the OR macro receive an
//! equivalent circuit built only from `x`, `cx`, `ccx` and `mcx`:
//!
//! ```text
//! or(x0..xk -> t)  =  x(x0..xk) ; mcx(x0..xk -> t) ; x(x0..xk) ; x(t)
//! ```
//!
//! i.e. `t ^= NOT(AND(NOT x))`. Multi-controlled flips with fewer than three
//! controls are narrowed to `x`/`cx`/`ccx`.

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::Gate;
use crate::instruction::{Instruction, InstructionKind};
use crate::line::LineId;

/// Produce a copy of `circuit` containing no OR macros.
pub fn lower(circuit: &Circuit) -> IrResult<Circuit> {
    let mut out = circuit.empty_like();
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(Gate::Or { .. }) => {
                let (inputs, target) = split_operands(inst);
                for &l in inputs {
                    out.x(l)?;
                }
                emit_mcx(&mut out, inputs, target)?;
                for &l in inputs {
                    out.x(l)?;
                }
                out.x(target)?;
            }
            InstructionKind::Gate(Gate::Mcx { .. }) => {
                let (controls, target) = split_operands(inst);
                emit_mcx(&mut out, controls, target)?;
            }
            _ => out.apply(inst.clone())?,
        }
    }
    Ok(out)
}

fn split_operands(inst: &Instruction) -> (&[LineId], LineId) {
    let (target, controls) = inst
        .lines
        .split_last()
        .expect("validated gate has at least one operand");
    (controls, *target)
}

fn emit_mcx(out: &mut Circuit, controls: &[LineId], target: LineId) -> IrResult<()> {
    match controls {
        [] => out.x(target)?,
        [c] => out.cx(*c, target)?,
        [c1, c2] => out.ccx(*c1, *c2, target)?,
        _ => out.mcx(controls, target)?,
    };
    Ok(())
}
