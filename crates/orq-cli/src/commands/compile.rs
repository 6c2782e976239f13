//! Compile command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use orq_oracle::compile;

use super::common::{load_cnf, write_output};
use crate::config::CliConfig;

/// Execute the compile command.
pub fn execute(input: &str, output: Option<&str>, config: &CliConfig, lower: bool) -> Result<()> {
    let options = &config.compile;
    println!(
        "{} Compiling {} with strategy {}",
        style("→").cyan().bold(),
        style(input).green(),
        style(options.strategy).yellow()
    );

    let cnf = load_cnf(input)?;
    println!(
        "  Loaded: {} variables, {} clauses",
        cnf.num_vars(),
        cnf.num_clauses()
    );

    let expected = options.strategy.num_lines(&cnf, options.phase_wrapper);
    if let Some(max) = config.max_lines {
        if expected > max {
            anyhow::bail!("Oracle needs {expected} lines, more than the configured maximum of {max}");
        }
    }

    let mut oracle = compile(&cnf, options)?;
    if lower {
        oracle.circuit = orq_ir::lower(&oracle.circuit)?;
    }

    println!("{} Compilation complete", style("✓").green().bold());
    println!(
        "  Result: {} lines, {} gates, depth {}",
        oracle.num_lines(),
        oracle.circuit.num_gates(),
        oracle.circuit.depth()
    );
    for (gate, count) in oracle.circuit.gate_counts() {
        println!("    {gate:<6} {count}");
    }
    if !oracle.is_unitary() {
        println!(
            "  {} counter is cleared with reset; the circuit is not unitary",
            style("!").yellow().bold()
        );
    }

    let output_path = match output {
        Some(path) => path.to_string(),
        None => default_output(input),
    };
    let json = serde_json::to_string_pretty(&oracle).context("Failed to serialize oracle")?;
    write_output(Some(&output_path), &json)?;
    println!("  Output: {}", style(&output_path).green());

    Ok(())
}

/// `<dir>/<stem>_oracle.json` next to the input.
fn default_output(input: &str) -> String {
    let path = Path::new(input);
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{stem}_oracle.json"))
        .to_string_lossy()
        .into_owned()
}
