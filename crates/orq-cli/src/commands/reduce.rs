//! Reduce command implementation.

use anyhow::Result;
use console::style;
use orq_sat::Cnf;
use orq_sat::dimacs::to_dimacs;
use orq_sat::reduce::{Reduction, clique_to_sat, graph_coloring_to_sat, independent_set_to_sat};

use super::common::{load_graph, write_output};

/// Reduce k-coloring of a graph to CNF.
pub fn coloring(graph_path: &str, colors: usize, output: Option<&str>) -> Result<()> {
    let graph = load_graph(graph_path)?;
    let reduction = graph_coloring_to_sat(&graph, colors)?;
    let comments = [
        format!(
            "{colors}-coloring of a graph with {} vertices, {} edges",
            graph.num_vertices(),
            graph.num_edges()
        ),
        format!("x(v, c) = v*{colors} + c + 1"),
    ];
    emit(reduction.cnf(), &comments, output)
}

/// Reduce the independent sets of a graph to CNF.
pub fn independent_set(graph_path: &str, output: Option<&str>) -> Result<()> {
    let graph = load_graph(graph_path)?;
    let reduction = independent_set_to_sat(&graph)?;
    let comments = [
        format!(
            "independent sets of a graph with {} vertices, {} edges",
            graph.num_vertices(),
            graph.num_edges()
        ),
        "x(v) = v + 1".to_string(),
    ];
    emit(reduction.cnf(), &comments, output)
}

/// Reduce k-clique of a graph to CNF.
pub fn clique(graph_path: &str, k: usize, output: Option<&str>) -> Result<()> {
    let graph = load_graph(graph_path)?;
    let n = graph.num_vertices();
    let reduction = clique_to_sat(&graph, k)?;
    let comments = [
        format!(
            "{k}-clique in a graph with {n} vertices, {} edges",
            graph.num_edges()
        ),
        format!("x(i, v) = i*{n} + v + 1"),
    ];
    emit(reduction.cnf(), &comments, output)
}

fn emit(cnf: &Cnf, comments: &[String], output: Option<&str>) -> Result<()> {
    let comments: Vec<&str> = comments.iter().map(String::as_str).collect();
    write_output(output, &to_dimacs(cnf, &comments))?;

    // stdout carries the formula itself when no file is given
    if let Some(path) = output {
        println!(
            "{} Wrote {} variables, {} clauses to {}",
            style("✓").green().bold(),
            cnf.num_vars(),
            cnf.num_clauses(),
            style(path).green()
        );
    }
    Ok(())
}
