//! Aggregation strategies.

use std::fmt;
use std::str::FromStr;

use orq_ir::LineId;
use orq_sat::Cnf;
use serde::{Deserialize, Serialize};

use crate::alloc::{LineArena, LineRole};
use crate::config::CompileOptions;
use crate::counter;
use crate::error::OracleResult;
use crate::naive;

/// How per-clause results are combined into the flag.
///
/// | Strategy | Ancilla lines | Clause order |
/// |----------|---------------|--------------|
/// | `PerClauseAncilla` | `m` | independent |
/// | `SharedCounter` | `bit_length(m) + 1` | sequential carry chain |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OracleStrategy {
    /// One persistent line per clause, AND-ed by a single multi-controlled flip.
    #[default]
    PerClauseAncilla,
    /// A shared binary counter of satisfied clauses, compared against `m`.
    SharedCounter,
}

impl OracleStrategy {
    /// All strategies.
    pub const ALL: [OracleStrategy; 2] = [Self::PerClauseAncilla, Self::SharedCounter];

    /// Kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PerClauseAncilla => "per-clause-ancilla",
            Self::SharedCounter => "shared-counter",
        }
    }

    /// Ancilla lines needed for `num_clauses` clauses, excluding flag and phase lines.
    pub fn line_overhead(&self, num_clauses: usize) -> usize {
        match self {
            Self::PerClauseAncilla => num_clauses,
            Self::SharedCounter => counter::counter_width(num_clauses) as usize + 1,
        }
    }

    /// Total line count of the oracle for `cnf`.
    pub fn num_lines(&self, cnf: &Cnf, phase_wrapper: bool) -> usize {
        cnf.num_vars() as usize
            + self.line_overhead(cnf.num_clauses())
            + 1
            + usize::from(phase_wrapper)
    }

    pub(crate) fn ancilla_registers(&self, cnf: &Cnf) -> Vec<(&'static str, Vec<LineRole>)> {
        match self {
            Self::PerClauseAncilla => naive::ancilla_registers(cnf),
            Self::SharedCounter => counter::ancilla_registers(cnf),
        }
    }

    pub(crate) fn synthesize(
        &self,
        arena: &mut LineArena,
        cnf: &Cnf,
        inputs: &[LineId],
        flag: LineId,
        readout: Readout,
        options: &CompileOptions,
    ) -> OracleResult<()> {
        match self {
            Self::PerClauseAncilla => naive::synthesize(arena, cnf, inputs, flag, readout),
            Self::SharedCounter => {
                counter::synthesize(arena, cnf, inputs, flag, readout, options.counter_cleanup)
            }
        }
    }
}

impl fmt::Display for OracleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OracleStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-clause-ancilla" | "naive" => Ok(Self::PerClauseAncilla),
            "shared-counter" | "counting" => Ok(Self::SharedCounter),
            other => Err(format!(
                "unknown strategy '{other}' (expected per-clause-ancilla or shared-counter)"
            )),
        }
    }
}

/// How the counter strategy returns its counter lines to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterCleanup {
    /// Reset the counter lines. Cheap, but the reset is not a unitary
    /// operation: the counter holds input-dependent values at that point.
    #[default]
    Reset,
    /// Replay the clause chain in reverse with decrements. Fully reversible.
    Uncompute,
}

impl CounterCleanup {
    /// Kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Uncompute => "uncompute",
        }
    }
}

impl fmt::Display for CounterCleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CounterCleanup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "uncompute" => Ok(Self::Uncompute),
            other => Err(format!(
                "unknown counter cleanup '{other}' (expected reset or uncompute)"
            )),
        }
    }
}

/// Where the synthesized result ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Readout {
    /// Leave `f(x)` on the flag line.
    Flag,
    /// Copy `f(x)` onto this phase line, then return the flag to zero.
    Phase(LineId),
}
