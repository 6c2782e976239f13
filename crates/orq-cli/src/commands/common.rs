//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use orq_sat::{Cnf, Graph};

/// Load a formula from a DIMACS (`.cnf`, default) or JSON (`.json`) file.
pub fn load_cnf(path: &str) -> Result<Cnf> {
    let source = read(path)?;
    let cnf = match extension(path).as_str() {
        "json" => {
            let cnf: Cnf = serde_json::from_str(&source)
                .with_context(|| format!("Invalid JSON formula: {path}"))?;
            cnf.validate()?;
            cnf
        }
        _ => Cnf::from_dimacs(&source).with_context(|| format!("Invalid DIMACS file: {path}"))?,
    };
    Ok(cnf)
}

/// Load a graph from a JSON (default) or YAML (`.yaml`, `.yml`) file.
pub fn load_graph(path: &str) -> Result<Graph> {
    let source = read(path)?;
    match extension(path).as_str() {
        "yaml" | "yml" => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid YAML graph: {path}")),
        _ => serde_json::from_str(&source).with_context(|| format!("Invalid JSON graph: {path}")),
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

fn read(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
