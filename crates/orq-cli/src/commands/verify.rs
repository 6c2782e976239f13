//! Verify command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use orq_oracle::{CompileOptions, CounterCleanup, OracleStrategy, compile};
use orq_sim::phase_marked;

use super::common::load_cnf;
use crate::config::CliConfig;

/// Execute the verify command.
///
/// Every selected strategy is compiled as a phase oracle and simulated on
/// all assignments; the marked set must equal the formula's models.
pub fn execute(
    input: &str,
    strategy: Option<OracleStrategy>,
    cleanup: Option<CounterCleanup>,
    config: &CliConfig,
) -> Result<()> {
    let cnf = load_cnf(input)?;
    println!(
        "{} Verifying {} ({} variables, {} clauses)",
        style("→").cyan().bold(),
        style(input).green(),
        cnf.num_vars(),
        cnf.num_clauses()
    );

    let expected = cnf
        .satisfying_assignments()
        .context("Formula is too large for exhaustive checking")?;
    println!("  Models: {}", expected.len());

    let mut failures = 0;
    for options in variants(config.compile, strategy, cleanup) {
        let label = match options.strategy {
            OracleStrategy::PerClauseAncilla => options.strategy.to_string(),
            OracleStrategy::SharedCounter => {
                format!("{} ({})", options.strategy, options.counter_cleanup)
            }
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("valid progress template"),
        );
        spinner.set_message(format!("Simulating {label}"));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let oracle = compile(&cnf, &options)?;
        let marked = phase_marked(&oracle.circuit, oracle.input_lines());
        spinner.finish_and_clear();

        match marked {
            Ok(marked) if marked == expected => println!(
                "{} {label}: {} lines, {} marked",
                style("✓").green().bold(),
                oracle.num_lines(),
                marked.len()
            ),
            Ok(marked) => {
                failures += 1;
                println!(
                    "{} {label}: marked {} assignments, expected {}",
                    style("✗").red().bold(),
                    marked.len(),
                    expected.len()
                );
            }
            Err(e) => {
                failures += 1;
                println!("{} {label}: {e}", style("✗").red().bold());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} oracle(s) disagree with the formula");
    }
    Ok(())
}

/// Options to check: the requested strategy and cleanup, or all of them.
fn variants(
    base: CompileOptions,
    strategy: Option<OracleStrategy>,
    cleanup: Option<CounterCleanup>,
) -> Vec<CompileOptions> {
    let base = base.with_phase_wrapper(true);
    let strategies = strategy.map_or(OracleStrategy::ALL.to_vec(), |s| vec![s]);
    let cleanups = cleanup.map_or(vec![CounterCleanup::Reset, CounterCleanup::Uncompute], |c| {
        vec![c]
    });

    let mut out = Vec::new();
    for strategy in strategies {
        match strategy {
            OracleStrategy::PerClauseAncilla => out.push(base.with_strategy(strategy)),
            OracleStrategy::SharedCounter => out.extend(
                cleanups
                    .iter()
                    .map(|&c| base.with_strategy(strategy).with_counter_cleanup(c)),
            ),
        }
    }
    out
}
