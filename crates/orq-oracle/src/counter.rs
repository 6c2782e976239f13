//! Shared-counter aggregation.
//!
//! A `b = bit_length(m)` bit counter counts satisfied clauses. Each clause
//! is computed into one transient scratch line, which controls a ripple
//! increment of the counter before the clause is uncomputed. The flag is set
//! by a multi-controlled flip over the counter bits that are 1 in `m`: the
//! counter never exceeds `m`, so those bits all being set means it equals `m`.

use orq_ir::LineId;
use orq_sat::Cnf;
use tracing::{trace, warn};

use crate::alloc::{LineArena, LineRole};
use crate::clause::ClauseEvaluator;
use crate::error::OracleResult;
use crate::strategy::{CounterCleanup, Readout};

/// Counter width for `num_clauses` clauses: `ceil(log2(num_clauses + 1))`.
pub fn counter_width(num_clauses: usize) -> u32 {
    usize::BITS - num_clauses.leading_zeros()
}

pub(crate) fn ancilla_registers(cnf: &Cnf) -> Vec<(&'static str, Vec<LineRole>)> {
    let width = counter_width(cnf.num_clauses());
    vec![
        ("count", (0..width).map(LineRole::CounterBit).collect()),
        ("scratch", vec![LineRole::Scratch]),
    ]
}

pub(crate) fn synthesize(
    arena: &mut LineArena,
    cnf: &Cnf,
    inputs: &[LineId],
    flag: LineId,
    readout: Readout,
    cleanup: CounterCleanup,
) -> OracleResult<()> {
    let m = cnf.num_clauses();
    let width = counter_width(m);
    let counter = (0..width)
        .map(|j| arena.acquire(LineRole::CounterBit(j)))
        .collect::<OracleResult<Vec<_>>>()?;
    let evaluator = ClauseEvaluator::new(inputs);

    for (i, clause) in cnf.clauses().iter().enumerate() {
        arena.scoped(LineRole::Scratch, |arena, scratch| {
            evaluator.with_clause(arena, clause, scratch, |arena| {
                increment(arena, &counter, scratch)
            })
        })?;
        trace!(clause = i, "counted {clause}");
        arena.barrier()?;
    }

    compare(arena, &counter, m, flag)?;
    if let Readout::Phase(aux) = readout {
        arena.cx(flag, aux)?;
        compare(arena, &counter, m, flag)?;
    }
    arena.barrier()?;

    match cleanup {
        CounterCleanup::Reset => {
            warn!(
                bits = width,
                "resetting counter lines; the resulting oracle is not unitary"
            );
            for &line in &counter {
                arena.reset(line)?;
            }
        }
        CounterCleanup::Uncompute => {
            for clause in cnf.clauses().iter().rev() {
                arena.scoped(LineRole::Scratch, |arena, scratch| {
                    evaluator.with_clause(arena, clause, scratch, |arena| {
                        decrement(arena, &counter, scratch)
                    })
                })?;
            }
        }
    }

    for j in 0..width {
        arena.release(LineRole::CounterBit(j))?;
    }
    Ok(())
}

/// Add `control` to the counter (least significant bit first), most
/// significant bit updated first so every carry sees the old lower bits.
pub fn increment(arena: &mut LineArena, counter: &[LineId], control: LineId) -> OracleResult<()> {
    let b = counter.len();
    for bit in (1..b).rev() {
        arena.mcx(&carry_controls(control, &counter[..bit]), counter[bit])?;
    }
    if let Some(&low) = counter.first() {
        arena.cx(control, low)?;
    }
    Ok(())
}

/// Exact inverse of [`increment`].
pub fn decrement(arena: &mut LineArena, counter: &[LineId], control: LineId) -> OracleResult<()> {
    if let Some(&low) = counter.first() {
        arena.cx(control, low)?;
    }
    for bit in 1..counter.len() {
        arena.mcx(&carry_controls(control, &counter[..bit]), counter[bit])?;
    }
    Ok(())
}

/// Flip `flag` iff every counter bit that is 1 in `value` is set.
fn compare(arena: &mut LineArena, counter: &[LineId], value: usize, flag: LineId) -> OracleResult<()> {
    let controls: Vec<LineId> = counter
        .iter()
        .enumerate()
        .filter(|&(j, _)| value >> j & 1 == 1)
        .map(|(_, &line)| line)
        .collect();
    arena.mcx(&controls, flag)
}

fn carry_controls(control: LineId, lower: &[LineId]) -> Vec<LineId> {
    let mut controls = Vec::with_capacity(lower.len() + 1);
    controls.push(control);
    controls.extend_from_slice(lower);
    controls
}
