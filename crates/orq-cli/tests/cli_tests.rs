//! End-to-end tests of the `orq` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn orq(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_orq"))
        .args(args)
        .env_remove("ORQ_STRATEGY")
        .env_remove("ORQ_COUNTER_CLEANUP")
        .env_remove("ORQ_BARRIERS")
        .env_remove("ORQ_MAX_LINES")
        .env_remove("ORQ_CONFIG")
        .output()
        .expect("failed to run orq")
}

fn write_triangle(dir: &Path) -> String {
    let path = dir.join("triangle.json");
    fs::write(&path, r#"{"vertices":3,"edges":[[0,1],[1,2],[0,2]]}"#).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// reduce
// ============================================================================

#[test]
fn test_reduce_independent_set_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_triangle(dir.path());

    let out = orq(&["reduce", "independent-set", "--graph", &graph]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("p cnf 3 3"));
    assert!(text.contains("-1 -2 0"));
}

#[test]
fn test_reduce_coloring_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_triangle(dir.path());
    let cnf = dir.path().join("col.cnf");

    let out = orq(&[
        "reduce",
        "coloring",
        "-g",
        &graph,
        "-c",
        "3",
        "-o",
        cnf.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    // 3 at-least-one clauses plus 3 edges times 3 colors
    let text = fs::read_to_string(&cnf).unwrap();
    assert!(text.contains("p cnf 9 12"));
}

#[test]
fn test_reduce_clique() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_triangle(dir.path());

    let out = orq(&["reduce", "clique", "-g", &graph, "-k", "2"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("p cnf 6 "));
}

// ============================================================================
// compile and verify
// ============================================================================

#[test]
fn test_compile_writes_oracle_json() {
    let dir = tempfile::tempdir().unwrap();
    let cnf = dir.path().join("xor.cnf");
    fs::write(&cnf, "p cnf 2 2\n1 2 0\n-1 -2 0\n").unwrap();

    let out = orq(&["compile", "-i", cnf.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let json = fs::read_to_string(dir.path().join("xor_oracle.json")).unwrap();
    let oracle: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(oracle["strategy"], "per-clause-ancilla");
    assert_eq!(oracle["layout"]["roles"].as_array().unwrap().len(), 6);
}

#[test]
fn test_compile_counter_bare_lowered() {
    let dir = tempfile::tempdir().unwrap();
    let cnf = dir.path().join("xor.cnf");
    let output = dir.path().join("out.json");
    fs::write(&cnf, "p cnf 2 2\n1 2 0\n-1 -2 0\n").unwrap();

    let out = orq(&[
        "compile",
        "-i",
        cnf.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--strategy",
        "shared-counter",
        "--cleanup",
        "uncompute",
        "--bare",
        "--lower",
    ]);
    assert!(out.status.success());

    let json = fs::read_to_string(&output).unwrap();
    let oracle: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(oracle["strategy"], "shared-counter");
    assert!(oracle["layout"]["phase"].is_null());
    // 2 inputs, 2 counter bits, scratch, flag
    assert_eq!(oracle["layout"]["roles"].as_array().unwrap().len(), 6);
    assert!(!json.contains("\"or\""));
}

#[test]
fn test_compile_respects_max_lines() {
    let dir = tempfile::tempdir().unwrap();
    let cnf = dir.path().join("xor.cnf");
    fs::write(&cnf, "p cnf 2 2\n1 2 0\n-1 -2 0\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_orq"))
        .args(["compile", "-i", cnf.to_str().unwrap()])
        .env("ORQ_MAX_LINES", "4")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("maximum of 4"));
}

#[test]
fn test_verify_all_strategies() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write_triangle(dir.path());
    let cnf = dir.path().join("is.cnf");

    let out = orq(&[
        "reduce",
        "independent-set",
        "-g",
        &graph,
        "-o",
        cnf.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let out = orq(&["verify", "-i", cnf.to_str().unwrap()]);
    assert!(out.status.success(), "{}", stdout(&out));
    let text = stdout(&out);
    assert!(text.contains("Models: 4"));
    assert!(text.contains("per-clause-ancilla"));
    assert!(text.contains("shared-counter (reset)"));
    assert!(text.contains("shared-counter (uncompute)"));
}

#[test]
fn test_verify_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cnf = dir.path().join("f.cnf");
    let config = dir.path().join("orq.yaml");
    fs::write(&cnf, "p cnf 3 2\n1 -2 0\n2 3 0\n").unwrap();
    fs::write(&config, "barriers: false\n").unwrap();

    let out = orq(&[
        "verify",
        "-i",
        cnf.to_str().unwrap(),
        "-s",
        "naive",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert!(!stdout(&out).contains("shared-counter"));
}

// ============================================================================
// errors
// ============================================================================

#[test]
fn test_missing_input_fails() {
    let out = orq(&["compile", "-i", "/nonexistent/orq/f.cnf"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));
}

#[test]
fn test_malformed_dimacs_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cnf = dir.path().join("bad.cnf");
    fs::write(&cnf, "p cnf 1 1\n2 0\n").unwrap();

    let out = orq(&["verify", "-i", cnf.to_str().unwrap()]);
    assert!(!out.status.success());
}

#[test]
fn test_version() {
    let out = orq(&["version"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("orq-oracle"));
}
