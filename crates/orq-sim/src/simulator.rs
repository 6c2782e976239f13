//! Sparse basis-state simulation.
//!
//! The state is a map from basis index (bit `i` = line `i`) to amplitude.
//! Flip gates permute the support, so a classical input stays a single basis
//! state; only Hadamard gates split it.

use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;
use orq_ir::{Circuit, Gate, Instruction, InstructionKind, LineId};
use rustc_hash::FxHashMap;

use crate::error::{SimError, SimResult};

/// Largest supported line count.
pub const MAX_LINES: usize = 64;

/// Amplitudes below this magnitude are dropped after interference.
const EPSILON: f64 = 1e-12;

/// Sparse state over a fixed number of lines.
#[derive(Debug, Clone)]
pub struct BasisSimulator {
    num_lines: usize,
    amplitudes: FxHashMap<u64, Complex64>,
}

impl BasisSimulator {
    /// All lines in `|0⟩`.
    pub fn new(num_lines: usize) -> SimResult<Self> {
        Self::from_basis(num_lines, 0)
    }

    /// The basis state `|bits⟩`.
    pub fn from_basis(num_lines: usize, bits: u64) -> SimResult<Self> {
        if num_lines > MAX_LINES {
            return Err(SimError::TooManyLines {
                lines: num_lines,
                max: MAX_LINES,
            });
        }
        let mut amplitudes = FxHashMap::default();
        amplitudes.insert(bits, Complex64::new(1.0, 0.0));
        Ok(Self {
            num_lines,
            amplitudes,
        })
    }

    /// Number of lines.
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// Amplitude of `|bits⟩`.
    pub fn amplitude(&self, bits: u64) -> Complex64 {
        self.amplitudes
            .get(&bits)
            .copied()
            .unwrap_or(Complex64::new(0.0, 0.0))
    }

    /// Non-zero amplitudes, sorted by basis index.
    pub fn support(&self) -> Vec<(u64, Complex64)> {
        let mut support: Vec<_> = self.amplitudes.iter().map(|(&b, &a)| (b, a)).collect();
        support.sort_unstable_by_key(|&(b, _)| b);
        support
    }

    /// Total probability.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(Complex64::norm_sqr).sum()
    }

    /// Run every instruction of `circuit`.
    pub fn run(&mut self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_lines() > self.num_lines {
            return Err(SimError::TooManyLines {
                lines: circuit.num_lines(),
                max: self.num_lines,
            });
        }
        for instruction in circuit.instructions() {
            self.apply(instruction)?;
        }
        Ok(())
    }

    /// Apply one instruction.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                self.apply_gate(gate, &instruction.lines);
                Ok(())
            }
            InstructionKind::Reset => match instruction.lines.first() {
                Some(&line) => self.reset(line),
                None => Ok(()),
            },
            InstructionKind::Barrier => Ok(()),
        }
    }

    fn apply_gate(&mut self, gate: &Gate, lines: &[LineId]) {
        let Some((&target, controls)) = lines.split_last() else {
            return;
        };
        let target = mask(target);
        match gate {
            Gate::H => self.apply_h(target),
            Gate::Or { .. } => {
                let inputs = controls.iter().fold(0, |acc, &l| acc | mask(l));
                self.permute(|bits| bits & inputs != 0, target);
            }
            Gate::X | Gate::Cx | Gate::Ccx | Gate::Mcx { .. } => {
                let required = controls.iter().fold(0, |acc, &l| acc | mask(l));
                self.permute(|bits| bits & required == required, target);
            }
        }
    }

    /// Flip `target` in every basis state where `condition` holds.
    fn permute(&mut self, condition: impl Fn(u64) -> bool, target: u64) {
        self.amplitudes = self
            .amplitudes
            .drain()
            .map(|(bits, amp)| {
                if condition(bits) {
                    (bits ^ target, amp)
                } else {
                    (bits, amp)
                }
            })
            .collect();
    }

    fn apply_h(&mut self, target: u64) {
        let scale = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let mut next: FxHashMap<u64, Complex64> = FxHashMap::default();
        for (bits, amp) in self.amplitudes.drain() {
            let zero = bits & !target;
            let one = bits | target;
            let sign = if bits & target == 0 { 1.0 } else { -1.0 };
            *next.entry(zero).or_default() += amp * scale;
            *next.entry(one).or_default() += amp * scale * sign;
        }
        next.retain(|_, amp| amp.norm() > EPSILON);
        self.amplitudes = next;
    }

    fn reset(&mut self, line: LineId) -> SimResult<()> {
        let bit = mask(line);
        let mut values = self.amplitudes.keys().map(|&bits| bits & bit != 0);
        let Some(first) = values.next() else {
            return Ok(());
        };
        if values.any(|v| v != first) {
            return Err(SimError::IndeterminateReset { line });
        }
        if first {
            self.permute(|_| true, bit);
        }
        Ok(())
    }
}

fn mask(line: LineId) -> u64 {
    1u64 << line.0
}
