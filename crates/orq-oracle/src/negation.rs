//! Scoped input negation.

use std::ops::{Deref, DerefMut};

use orq_ir::LineId;
use tracing::error;

use crate::alloc::LineArena;
use crate::error::OracleResult;

/// Flips a set of input lines for as long as it lives.
///
/// The flips are undone in reverse order when the guard drops, on every
/// exit path. Gates emitted through the guard (it derefs to the arena) see
/// the negated inputs.
#[derive(Debug)]
pub struct NegationGuard<'a> {
    arena: &'a mut LineArena,
    lines: Vec<LineId>,
}

impl<'a> NegationGuard<'a> {
    /// Flip every line in `lines`.
    ///
    /// If a flip fails, the lines flipped so far are restored before the
    /// error is returned.
    pub fn new(
        arena: &'a mut LineArena,
        lines: impl IntoIterator<Item = LineId>,
    ) -> OracleResult<Self> {
        let mut guard = Self {
            arena,
            lines: vec![],
        };
        for line in lines {
            guard.arena.x(line)?;
            guard.lines.push(line);
        }
        Ok(guard)
    }

    /// The negated lines.
    pub fn lines(&self) -> &[LineId] {
        &self.lines
    }
}

impl Deref for NegationGuard<'_> {
    type Target = LineArena;

    fn deref(&self) -> &LineArena {
        self.arena
    }
}

impl DerefMut for NegationGuard<'_> {
    fn deref_mut(&mut self) -> &mut LineArena {
        self.arena
    }
}

impl Drop for NegationGuard<'_> {
    fn drop(&mut self) {
        for &line in self.lines.iter().rev() {
            // Fails only if the line was released through the guard while negated.
            if let Err(e) = self.arena.x(line) {
                error!(%line, "failed to restore negated input: {e}");
            }
        }
    }
}
