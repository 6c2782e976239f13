//! orq command-line interface.
//!
//! ```text
//! orq reduce independent-set --graph triangle.json -o triangle.cnf
//! orq compile -i triangle.cnf --strategy shared-counter
//! orq verify -i triangle.cnf
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use orq_oracle::{CounterCleanup, OracleStrategy};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{compile, reduce, verify, version};
use config::CliConfig;

/// orq - compile CNF formulas into reversible oracle circuits
#[derive(Parser)]
#[command(name = "orq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true, env = "ORQ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a graph problem to a DIMACS CNF formula
    Reduce {
        #[command(subcommand)]
        problem: ReduceProblem,
    },

    /// Compile a CNF formula into an oracle circuit
    Compile {
        /// Input formula (DIMACS or JSON)
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to <input>_oracle.json)
        #[arg(short, long)]
        output: Option<String>,

        /// Aggregation strategy (per-clause-ancilla, shared-counter)
        #[arg(short, long)]
        strategy: Option<OracleStrategy>,

        /// Counter cleanup for shared-counter (reset, uncompute)
        #[arg(long)]
        cleanup: Option<CounterCleanup>,

        /// Lower OR gates to X and MCX
        #[arg(long)]
        lower: bool,

        /// Omit barriers between stages
        #[arg(long)]
        no_barriers: bool,

        /// Emit a flag-marking oracle without the phase wrapper
        #[arg(long)]
        bare: bool,
    },

    /// Check an oracle against brute-force evaluation of its formula
    Verify {
        /// Input formula (DIMACS or JSON)
        #[arg(short, long)]
        input: String,

        /// Check only this strategy (default: every strategy and cleanup)
        #[arg(short, long)]
        strategy: Option<OracleStrategy>,

        /// Check only this counter cleanup
        #[arg(long)]
        cleanup: Option<CounterCleanup>,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ReduceProblem {
    /// Proper vertex coloring with a fixed number of colors
    Coloring {
        /// Graph file (JSON or YAML)
        #[arg(short, long)]
        graph: String,

        /// Number of colors
        #[arg(short, long)]
        colors: usize,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Independent sets
    IndependentSet {
        /// Graph file (JSON or YAML)
        #[arg(short, long)]
        graph: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Cliques of size k
    Clique {
        /// Graph file (JSON or YAML)
        #[arg(short, long)]
        graph: String,

        /// Clique size
        #[arg(short)]
        k: usize,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dispatch(cli.command, cli.config.as_deref()) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn dispatch(command: Commands, config_file: Option<&Path>) -> Result<()> {
    match command {
        Commands::Reduce { problem } => match problem {
            ReduceProblem::Coloring {
                graph,
                colors,
                output,
            } => reduce::coloring(&graph, colors, output.as_deref()),
            ReduceProblem::IndependentSet { graph, output } => {
                reduce::independent_set(&graph, output.as_deref())
            }
            ReduceProblem::Clique { graph, k, output } => {
                reduce::clique(&graph, k, output.as_deref())
            }
        },

        Commands::Compile {
            input,
            output,
            strategy,
            cleanup,
            lower,
            no_barriers,
            bare,
        } => {
            let mut config = CliConfig::load(config_file)?;
            if let Some(strategy) = strategy {
                config.compile.strategy = strategy;
            }
            if let Some(cleanup) = cleanup {
                config.compile.counter_cleanup = cleanup;
            }
            if no_barriers {
                config.compile.barriers = false;
            }
            if bare {
                config.compile.phase_wrapper = false;
            }
            compile::execute(&input, output.as_deref(), &config, lower)
        }

        Commands::Verify {
            input,
            strategy,
            cleanup,
        } => {
            let config = CliConfig::load(config_file)?;
            verify::execute(&input, strategy, cleanup, &config)
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
