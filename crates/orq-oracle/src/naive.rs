//! Per-clause ancilla aggregation.
//!
//! Every clause is computed into its own line and all of them stay live
//! until the flag has been set by one multi-controlled flip over the clause
//! lines. The clauses are then uncomputed in reverse order.

use orq_ir::LineId;
use orq_sat::Cnf;
use tracing::trace;

use crate::alloc::{LineArena, LineRole};
use crate::clause::ClauseEvaluator;
use crate::error::OracleResult;
use crate::strategy::Readout;

pub(crate) fn ancilla_registers(cnf: &Cnf) -> Vec<(&'static str, Vec<LineRole>)> {
    let roles = (0..cnf.num_clauses() as u32)
        .map(LineRole::ClauseScratch)
        .collect();
    vec![("clause", roles)]
}

pub(crate) fn synthesize(
    arena: &mut LineArena,
    cnf: &Cnf,
    inputs: &[LineId],
    flag: LineId,
    readout: Readout,
) -> OracleResult<()> {
    let evaluator = ClauseEvaluator::new(inputs);
    let mut outputs = Vec::with_capacity(cnf.num_clauses());

    for (i, clause) in cnf.clauses().iter().enumerate() {
        let line = arena.acquire(LineRole::ClauseScratch(i as u32))?;
        evaluator.compute(arena, clause, line)?;
        trace!(clause = i, %line, "computed {clause}");
        outputs.push(line);
    }
    arena.barrier()?;

    arena.mcx(&outputs, flag)?;
    if let Readout::Phase(aux) = readout {
        arena.cx(flag, aux)?;
        arena.mcx(&outputs, flag)?;
    }
    arena.barrier()?;

    for (i, clause) in cnf.clauses().iter().enumerate().rev() {
        evaluator.uncompute(arena, clause, outputs[i])?;
        arena.release(LineRole::ClauseScratch(i as u32))?;
    }
    Ok(())
}
