//! Checked bit-line allocation.
//!
//! [`LineArena`] owns the circuit under construction and every line in it.
//! Lines are declared up front under a [`LineRole`], acquired before use and
//! released afterwards. Every gate goes through the arena, which keeps a
//! per-line cancellation ledger:
//!
//! - a flip recorded on a target line is fingerprinted by its gate, its
//!   control lines and the ledger state of each control;
//! - an identical flip under identical control states cancels the ledger's
//!   top entry instead of pushing a new one;
//! - a reset clears the ledger.
//!
//! A line whose ledger is empty provably holds its initial value, so
//! releasing a line with a non-empty ledger is reported as
//! [`OracleError::DirtyRelease`].

use std::fmt;
use std::hash::{Hash, Hasher};

use orq_ir::{Circuit, Gate, Instruction, LineId};
use rustc_hash::{FxHashMap, FxHasher};
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

/// The logical purpose of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "index", rename_all = "snake_case")]
pub enum LineRole {
    /// Input line of the variable at this 0-based position.
    Input(u32),
    /// Persistent per-clause output line (per-clause strategy).
    ClauseScratch(u32),
    /// Bit `j` of the shared clause counter, least significant first.
    CounterBit(u32),
    /// Transient clause output line reused by every clause (counter strategy).
    Scratch,
    /// Line holding "formula satisfied".
    Flag,
    /// Phase kickback line.
    PhaseAux,
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRole::Input(i) => write!(f, "input x{}", i + 1),
            LineRole::ClauseScratch(i) => write!(f, "clause[{i}]"),
            LineRole::CounterBit(j) => write!(f, "count[{j}]"),
            LineRole::Scratch => f.write_str("scratch"),
            LineRole::Flag => f.write_str("flag"),
            LineRole::PhaseAux => f.write_str("phase"),
        }
    }
}

/// Non-zero hash seeds; no entry or non-empty state hashes to the empty state 0.
const STATE_TAG: u64 = 0x6c65_6467_6572_5354;
const ENTRY_TAG: u64 = 0x6c65_6467_6572_454e;

/// Stack of uncancelled operations on one line.
///
/// The empty ledger has state 0; every non-empty ledger's state is seeded
/// with its depth, so it never coincides with the empty one.
#[derive(Debug, Clone, Default)]
struct Ledger {
    /// `(entry fingerprint, line state after the entry)`.
    entries: Vec<(u64, u64)>,
}

impl Ledger {
    fn state(&self) -> u64 {
        self.entries.last().map_or(0, |&(_, state)| state)
    }

    fn record(&mut self, entry: u64) {
        if self.entries.last().is_some_and(|&(top, _)| top == entry) {
            self.entries.pop();
        } else {
            let mut hasher = FxHasher::default();
            (STATE_TAG, self.len(), self.state(), entry).hash(&mut hasher);
            let state = hasher.finish();
            self.entries.push((entry, state));
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    role: LineRole,
    held: bool,
    ledger: Ledger,
}

/// Arena of named bit-lines with checked acquisition and release.
#[derive(Debug)]
pub struct LineArena {
    circuit: Circuit,
    slots: Vec<Slot>,
    by_role: FxHashMap<LineRole, LineId>,
    barriers: bool,
}

impl LineArena {
    /// Create an empty arena building a circuit called `name`.
    ///
    /// With `barriers` off, [`LineArena::barrier`] emits nothing.
    pub fn new(name: impl Into<String>, barriers: bool) -> Self {
        Self {
            circuit: Circuit::new(name),
            slots: vec![],
            by_role: FxHashMap::default(),
            barriers,
        }
    }

    // =========================================================================
    // Declaration and ownership
    // =========================================================================

    /// Declare a register of lines, one per role, in order.
    pub fn declare(
        &mut self,
        register: &str,
        roles: impl IntoIterator<Item = LineRole>,
    ) -> OracleResult<Vec<LineId>> {
        let roles: Vec<LineRole> = roles.into_iter().collect();
        if let Some(&role) = roles.iter().find(|r| self.by_role.contains_key(r)) {
            return Err(OracleError::LineInUse { role });
        }
        let lines = self.circuit.add_register(register, roles.len() as u32);
        for (&line, &role) in lines.iter().zip(&roles) {
            self.by_role.insert(role, line);
            self.slots.push(Slot {
                role,
                held: false,
                ledger: Ledger::default(),
            });
        }
        Ok(lines)
    }

    /// Declare a single-line register.
    pub fn declare_line(&mut self, register: &str, role: LineRole) -> OracleResult<LineId> {
        let lines = self.declare(register, [role])?;
        Ok(lines[0])
    }

    /// The line declared for `role`.
    pub fn line(&self, role: LineRole) -> OracleResult<LineId> {
        self.by_role
            .get(&role)
            .copied()
            .ok_or(OracleError::UnknownLine { role })
    }

    /// Take ownership of the line for `role`.
    pub fn acquire(&mut self, role: LineRole) -> OracleResult<LineId> {
        let line = self.line(role)?;
        let slot = &mut self.slots[line.index()];
        if slot.held {
            return Err(OracleError::LineInUse { role });
        }
        slot.held = true;
        Ok(line)
    }

    /// Give back the line for `role`, which must be back in its initial state.
    pub fn release(&mut self, role: LineRole) -> OracleResult<()> {
        let line = self.line(role)?;
        let slot = &mut self.slots[line.index()];
        if !slot.held {
            return Err(OracleError::NotAcquired { line });
        }
        let pending = slot.ledger.len();
        if pending > 0 {
            return Err(OracleError::DirtyRelease { role, pending });
        }
        slot.held = false;
        Ok(())
    }

    /// Give back an output line, whose final state is the circuit's result.
    pub fn release_output(&mut self, role: LineRole) -> OracleResult<()> {
        let line = self.line(role)?;
        let slot = &mut self.slots[line.index()];
        if !slot.held {
            return Err(OracleError::NotAcquired { line });
        }
        slot.held = false;
        Ok(())
    }

    /// Acquire the line for `role`, run `f` on it, then release it.
    ///
    /// The release check runs only when `f` succeeds; on error the arena is
    /// abandoned by the caller together with the partial circuit.
    pub fn scoped<T>(
        &mut self,
        role: LineRole,
        f: impl FnOnce(&mut Self, LineId) -> OracleResult<T>,
    ) -> OracleResult<T> {
        let line = self.acquire(role)?;
        let value = f(self, line)?;
        self.release(role)?;
        Ok(value)
    }

    /// Whether the line for `role` is currently held.
    pub fn is_held(&self, role: LineRole) -> bool {
        self.by_role
            .get(&role)
            .is_some_and(|line| self.slots[line.index()].held)
    }

    /// Number of uncancelled operations on `line`.
    pub fn pending(&self, line: LineId) -> usize {
        self.slots.get(line.index()).map_or(0, |s| s.ledger.len())
    }

    /// The circuit built so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Finish synthesis, returning the circuit and the role of every line.
    pub fn finish(self) -> OracleResult<(Circuit, Vec<LineRole>)> {
        if let Some(slot) = self.slots.iter().find(|s| s.held) {
            return Err(OracleError::Leaked { role: slot.role });
        }
        let roles = self.slots.into_iter().map(|s| s.role).collect();
        Ok((self.circuit, roles))
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Flip `line`.
    pub fn x(&mut self, line: LineId) -> OracleResult<()> {
        self.emit(Gate::X, &[], line)
    }

    /// Hadamard on `line`.
    pub fn h(&mut self, line: LineId) -> OracleResult<()> {
        self.emit(Gate::H, &[], line)
    }

    /// `target ^= control`.
    pub fn cx(&mut self, control: LineId, target: LineId) -> OracleResult<()> {
        self.emit(Gate::Cx, &[control], target)
    }

    /// `target ^= AND(controls)`.
    pub fn mcx(&mut self, controls: &[LineId], target: LineId) -> OracleResult<()> {
        let gate = Gate::Mcx {
            num_controls: controls.len() as u32,
        };
        self.emit(gate, controls, target)
    }

    /// `target ^= OR(inputs)`.
    pub fn or(&mut self, inputs: &[LineId], target: LineId) -> OracleResult<()> {
        let gate = Gate::Or {
            arity: inputs.len() as u32,
            inverse: false,
        };
        self.emit(gate, inputs, target)
    }

    /// The declared inverse of [`LineArena::or`].
    pub fn or_inverse(&mut self, inputs: &[LineId], target: LineId) -> OracleResult<()> {
        let gate = Gate::Or {
            arity: inputs.len() as u32,
            inverse: true,
        };
        self.emit(gate, inputs, target)
    }

    /// Reset `line` to 0, clearing its ledger.
    pub fn reset(&mut self, line: LineId) -> OracleResult<()> {
        self.check_held(line)?;
        self.circuit.reset(line)?;
        self.slots[line.index()].ledger.clear();
        Ok(())
    }

    /// Barrier across all lines, if barriers are enabled.
    pub fn barrier(&mut self) -> OracleResult<()> {
        if self.barriers {
            self.circuit.barrier_all()?;
        }
        Ok(())
    }

    fn emit(&mut self, gate: Gate, controls: &[LineId], target: LineId) -> OracleResult<()> {
        for &line in controls.iter().chain([&target]) {
            self.check_held(line)?;
        }
        let operands = controls.iter().copied().chain([target]);
        self.circuit.apply(Instruction::gate(gate, operands))?;

        let entry = self.fingerprint(gate, controls);
        self.slots[target.index()].ledger.record(entry);
        Ok(())
    }

    fn fingerprint(&self, gate: Gate, controls: &[LineId]) -> u64 {
        let mut hasher = FxHasher::default();
        ENTRY_TAG.hash(&mut hasher);
        // An OR and its declared inverse have the same action.
        let gate = match gate {
            Gate::Or { arity, .. } => Gate::Or {
                arity,
                inverse: false,
            },
            other => other,
        };
        gate.hash(&mut hasher);
        for &control in controls {
            control.hash(&mut hasher);
            self.slots[control.index()].ledger.state().hash(&mut hasher);
        }
        hasher.finish()
    }

    fn check_held(&self, line: LineId) -> OracleResult<()> {
        match self.slots.get(line.index()) {
            Some(slot) if slot.held => Ok(()),
            _ => Err(OracleError::NotAcquired { line }),
        }
    }
}
