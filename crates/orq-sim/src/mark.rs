//! Exhaustive oracle checks over all input assignments.

use orq_ir::{Circuit, LineId};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::simulator::BasisSimulator;

const TOLERANCE: f64 = 1e-9;

/// Largest input width checked exhaustively.
pub const MAX_CHECKED_INPUTS: usize = 20;

/// Assignments a phase oracle marks with a phase of −1.
///
/// Each of the `2^inputs.len()` assignments (bit `i` of the assignment sets
/// `inputs[i]`) is run from a basis state with every other line at 0. The
/// circuit must return exactly that basis state, with amplitude ±1;
/// anything else is reported as [`SimError::Garbage`].
pub fn phase_marked(circuit: &Circuit, inputs: &[LineId]) -> SimResult<Vec<u64>> {
    let mut marked = Vec::new();
    for assignment in assignments(inputs)? {
        let initial = place(assignment, inputs);
        let mut sim = BasisSimulator::from_basis(circuit.num_lines(), initial)?;
        sim.run(circuit)?;

        let support = sim.support();
        let &[(bits, amp)] = support.as_slice() else {
            return Err(garbage(assignment, format!("{} basis states in output", support.len())));
        };
        if bits != initial {
            return Err(garbage(
                assignment,
                format!("expected state {initial:#b}, found {bits:#b}"),
            ));
        }
        if (amp.re + 1.0).abs() < TOLERANCE && amp.im.abs() < TOLERANCE {
            marked.push(assignment);
        } else if (amp.re - 1.0).abs() > TOLERANCE || amp.im.abs() > TOLERANCE {
            return Err(garbage(assignment, format!("amplitude {amp} is not ±1")));
        }
    }
    debug!(inputs = inputs.len(), marked = marked.len(), "Checked phase oracle");
    Ok(marked)
}

/// Assignments for which a marking circuit sets `flag`.
///
/// The circuit must map every input basis state to a basis state that
/// differs from it at most on `flag`.
pub fn flag_marked(circuit: &Circuit, inputs: &[LineId], flag: LineId) -> SimResult<Vec<u64>> {
    let flag_bit = 1u64 << flag.0;
    let mut marked = Vec::new();
    for assignment in assignments(inputs)? {
        let initial = place(assignment, inputs);
        let mut sim = BasisSimulator::from_basis(circuit.num_lines(), initial)?;
        sim.run(circuit)?;

        let support = sim.support();
        let &[(bits, _)] = support.as_slice() else {
            return Err(garbage(assignment, format!("{} basis states in output", support.len())));
        };
        if bits & !flag_bit != initial {
            return Err(garbage(
                assignment,
                format!("expected state {initial:#b} apart from {flag}, found {bits:#b}"),
            ));
        }
        if bits & flag_bit != 0 {
            marked.push(assignment);
        }
    }
    debug!(inputs = inputs.len(), marked = marked.len(), "Checked marking circuit");
    Ok(marked)
}

fn assignments(inputs: &[LineId]) -> SimResult<std::ops::Range<u64>> {
    if inputs.len() > MAX_CHECKED_INPUTS {
        return Err(SimError::TooManyLines {
            lines: inputs.len(),
            max: MAX_CHECKED_INPUTS,
        });
    }
    Ok(0..1u64 << inputs.len())
}

/// Spread assignment bits onto their input lines.
fn place(assignment: u64, inputs: &[LineId]) -> u64 {
    inputs
        .iter()
        .enumerate()
        .filter(|&(i, _)| assignment >> i & 1 == 1)
        .fold(0, |acc, (_, line)| acc | 1u64 << line.0)
}

fn garbage(assignment: u64, detail: String) -> SimError {
    SimError::Garbage { assignment, detail }
}
