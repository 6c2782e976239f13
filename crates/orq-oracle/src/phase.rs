//! Phase kickback wrapper.
//!
//! The phase line is prepared in `|−⟩ = H·X|0⟩`. XOR-ing `f(x)` into it
//! multiplies the amplitude of every satisfying input by −1; undoing the
//! preparation returns the line to `|0⟩`.

use orq_ir::LineId;

use crate::alloc::LineArena;
use crate::error::OracleResult;

/// Run `body` with `aux` prepared in `|−⟩`.
pub fn with_phase_kickback<T>(
    arena: &mut LineArena,
    aux: LineId,
    body: impl FnOnce(&mut LineArena) -> OracleResult<T>,
) -> OracleResult<T> {
    arena.x(aux)?;
    arena.h(aux)?;
    arena.barrier()?;
    let value = body(arena)?;
    arena.barrier()?;
    arena.h(aux)?;
    arena.x(aux)?;
    Ok(value)
}
