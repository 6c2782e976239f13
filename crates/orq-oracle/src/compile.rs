//! Oracle compilation entry points.

use orq_ir::{Circuit, LineId};
use orq_sat::Cnf;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alloc::{LineArena, LineRole};
use crate::config::CompileOptions;
use crate::error::OracleResult;
use crate::phase::with_phase_kickback;
use crate::strategy::{OracleStrategy, Readout};

/// Which line plays which role in a compiled oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleLayout {
    /// Role of every line, indexed by line.
    pub roles: Vec<LineRole>,
    /// Input lines, `inputs[i]` holding variable `i + 1`.
    pub inputs: Vec<LineId>,
    /// Clause, counter and scratch lines.
    pub ancillas: Vec<LineId>,
    /// The "formula satisfied" line.
    pub flag: LineId,
    /// The phase kickback line, if the oracle is phase-wrapped.
    pub phase: Option<LineId>,
}

/// A compiled oracle: the circuit plus its line layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledOracle {
    /// The reversible circuit.
    pub circuit: Circuit,
    /// Line roles.
    pub layout: OracleLayout,
    /// Strategy that produced it.
    pub strategy: OracleStrategy,
}

impl CompiledOracle {
    /// Total number of lines.
    pub fn num_lines(&self) -> usize {
        self.circuit.num_lines()
    }

    /// Number of formula variables.
    pub fn num_vars(&self) -> usize {
        self.layout.inputs.len()
    }

    /// Input lines, `input_lines()[i]` holding variable `i + 1`.
    pub fn input_lines(&self) -> &[LineId] {
        &self.layout.inputs
    }

    /// The flag line.
    pub fn flag_line(&self) -> LineId {
        self.layout.flag
    }

    /// The phase kickback line, if any.
    pub fn phase_line(&self) -> Option<LineId> {
        self.layout.phase
    }

    /// Whether the circuit is free of resets.
    pub fn is_unitary(&self) -> bool {
        !self.circuit.has_reset()
    }
}

/// Compile `cnf` into an oracle.
///
/// Lines are laid out as inputs, strategy ancillas, flag, then the phase
/// line when `options.phase_wrapper` is set. Fails with
/// [`OracleError::Formula`](crate::OracleError::Formula) if a literal lies
/// outside `[1, num_vars]`; every other error indicates a synthesis bug.
pub fn compile(cnf: &Cnf, options: &CompileOptions) -> OracleResult<CompiledOracle> {
    cnf.validate()?;
    let strategy = options.strategy;
    let num_vars = cnf.num_vars();

    let mut arena = LineArena::new(
        format!("oracle_{}", strategy.name().replace('-', "_")),
        options.barriers,
    );
    let inputs = arena.declare("x", (0..num_vars).map(LineRole::Input))?;
    let mut ancillas = Vec::new();
    for (register, roles) in strategy.ancilla_registers(cnf) {
        ancillas.extend(arena.declare(register, roles)?);
    }
    let flag = arena.declare_line("flag", LineRole::Flag)?;
    let phase = if options.phase_wrapper {
        Some(arena.declare_line("phase", LineRole::PhaseAux)?)
    } else {
        None
    };

    for i in 0..num_vars {
        arena.acquire(LineRole::Input(i))?;
    }
    arena.acquire(LineRole::Flag)?;

    match phase {
        Some(aux) => {
            arena.acquire(LineRole::PhaseAux)?;
            with_phase_kickback(&mut arena, aux, |arena| {
                strategy.synthesize(arena, cnf, &inputs, flag, Readout::Phase(aux), options)
            })?;
            arena.release(LineRole::Flag)?;
            arena.release_output(LineRole::PhaseAux)?;
        }
        None => {
            strategy.synthesize(&mut arena, cnf, &inputs, flag, Readout::Flag, options)?;
            arena.release_output(LineRole::Flag)?;
        }
    }

    for i in 0..num_vars {
        arena.release(LineRole::Input(i))?;
    }

    let (circuit, roles) = arena.finish()?;
    debug!(
        %strategy,
        vars = num_vars,
        clauses = cnf.num_clauses(),
        lines = circuit.num_lines(),
        gates = circuit.num_gates(),
        depth = circuit.depth(),
        "Compiled oracle"
    );

    Ok(CompiledOracle {
        circuit,
        layout: OracleLayout {
            roles,
            inputs,
            ancillas,
            flag,
            phase,
        },
        strategy,
    })
}

/// Compile with [`OracleStrategy::PerClauseAncilla`] and default options.
pub fn compile_naive(cnf: &Cnf) -> OracleResult<CompiledOracle> {
    compile(
        cnf,
        &CompileOptions::default().with_strategy(OracleStrategy::PerClauseAncilla),
    )
}

/// Compile with [`OracleStrategy::SharedCounter`] and default options.
pub fn compile_counting(cnf: &Cnf) -> OracleResult<CompiledOracle> {
    compile(
        cnf,
        &CompileOptions::default().with_strategy(OracleStrategy::SharedCounter),
    )
}
