use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn topo() -> Command {
    let mut cmd = Command::cargo_bin("topo").unwrap();
    cmd.env_remove("TOPO_ALGORITHM")
        .env_remove("TOPO_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_sort_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("graph.txt");
    fs::write(&path, "A -> B\nA -> C\nB -> D\nC -> D\n").unwrap();

    topo()
        .arg("sort")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Topological order (kahn): A -> B -> C -> D"));

    topo()
        .arg("sort")
        .arg(&path)
        .args(["--algorithm", "dfs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Topological order (dfs): A -> C -> B -> D"));
}

#[test]
fn test_sort_from_stdin() {
    topo()
        .args(["sort", "-"])
        .write_stdin("E -> F\nX\nY\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("E -> X -> Y -> F"));
}

#[test]
fn test_sort_cycle_exits_with_two() {
    topo()
        .args(["sort", "--preset", "cycle"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Cycle detected (kahn)"))
        .stdout(predicate::str::contains("Unresolved:   A, B, C"));
}

#[test]
fn test_sort_json_output() {
    let output = topo()
        .args(["sort", "--preset", "diamond", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["algorithm"], "kahn");
    assert_eq!(value["has_cycle"], false);
    assert_eq!(value["order"], serde_json::json!(["A", "B", "C", "D"]));
    assert_eq!(value["vertex_count"], 4);
}

#[test]
fn test_algorithm_from_environment() {
    topo()
        .env("TOPO_ALGORITHM", "dfs")
        .args(["sort", "--preset", "diamond"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(dfs)"));
}

#[test]
fn test_json_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("graph.json");
    fs::write(&path, r#"{"edges": [["lib", "app"]], "nodes": ["docs"]}"#).unwrap();

    topo()
        .arg("sort")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("docs -> lib -> app"));
}

#[test]
fn test_malformed_input_fails() {
    topo()
        .args(["sort", "-"])
        .write_stdin("A -> B\nA B C\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn test_empty_input() {
    topo()
        .args(["sort", "-"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph is empty"));
}

#[test]
fn test_trace_json_is_renderable() {
    let output = topo()
        .args(["trace", "--preset", "diamond", "--algorithm", "dfs", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["algorithm"], "dfs");
    let trace = value["trace"].as_array().unwrap();
    assert_eq!(trace.len(), 12);
    assert_eq!(trace[0]["kind"], "visit");
    assert_eq!(trace[0]["visited_status"]["A"], 1);
    assert_eq!(trace[0]["visited_status"]["D"], 0);
    assert_eq!(trace[11]["kind"], "final");
    assert_eq!(trace[11]["order"], serde_json::json!(["A", "C", "B", "D"]));
}

#[test]
fn test_trace_text() {
    topo()
        .args(["trace", "--preset", "self-loop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[cycle]"))
        .stdout(predicate::str::contains("1 steps, cycle: yes"));
}

#[test]
fn test_step_json() {
    let output = topo()
        .args(["step", "--preset", "diamond", "--index", "2", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["index"], 2);
    assert_eq!(value["total"], 13);
    assert_eq!(value["record"]["kind"], "update_indegree");
    assert_eq!(value["record"]["source_node"], "A");
    assert_eq!(value["record"]["current_node"], "B");
    assert_eq!(value["record"]["new_indegree"], 0);
}

#[test]
fn test_step_out_of_range() {
    topo()
        .args(["step", "--preset", "diamond", "--index", "99"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Step 99 is out of range"));
}

#[test]
fn test_compare() {
    topo()
        .args(["compare", "--preset", "diamond"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kahn  A -> B -> C -> D"))
        .stdout(predicate::str::contains("dfs   A -> C -> B -> D"));
}

#[test]
fn test_presets_listing() {
    topo()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("diamond"))
        .stdout(predicate::str::contains("courses"));
}

#[test]
fn test_unknown_preset() {
    topo()
        .args(["sort", "--preset", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown preset `nope`"));
}
