//! End-to-end runs of the `ancestry` binary against fixture files.

use std::path::Path;
use std::process::{Command, Output};

fn ancestry(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ancestry"))
        .arg("--project")
        .arg(project)
        .args(args)
        .env_remove("ANCESTRY_OUTPUT_FORMAT")
        .env_remove("ANCESTRY_PRETTY")
        .env_remove("ANCESTRY_DAG_STRATEGY")
        .output()
        .expect("failed to run ancestry binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn write_tree(dir: &Path) -> String {
    let path = dir.join("tree.json");
    std::fs::write(&path, r#"{"keys": [30, 8, 52, 3, 20, 10, 29, 62]}"#).unwrap();
    path.display().to_string()
}

fn write_graph(dir: &Path) -> String {
    let path = dir.join("graph.json");
    std::fs::write(
        &path,
        r#"{"vertices": [
            {"id": 1, "successors": [2, 3]},
            {"id": 2, "successors": [4, 5]},
            {"id": 3, "successors": [5]},
            {"id": 4, "successors": [6]},
            {"id": 5, "successors": [6]},
            {"id": 6, "successors": [7]},
            {"id": 7, "successors": []}
        ]}"#,
    )
    .unwrap();
    path.display().to_string()
}

#[test]
fn test_bst_query() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = write_tree(tmp.path());

    let out = ancestry(tmp.path(), &["bst", &tree, "10", "29"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "20");

    let out = ancestry(tmp.path(), &["bst", &tree, "4", "29"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "none");
}

#[test]
fn test_bst_type_mismatch_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = write_tree(tmp.path());

    let out = ancestry(tmp.path(), &["bst", &tree, "10", "ten"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot compare integer key with text key"));
}

#[test]
fn test_dag_query() {
    let tmp = tempfile::tempdir().unwrap();
    let graph = write_graph(tmp.path());

    let out = ancestry(tmp.path(), &["dag", &graph, "4", "5"]);
    assert_eq!(stdout(&out), "6");

    let out = ancestry(tmp.path(), &["dag", &graph, "43", "35"]);
    assert_eq!(stdout(&out), "none");
}

#[test]
fn test_config_selects_strategy_and_format() {
    let tmp = tempfile::tempdir().unwrap();
    let graph = write_graph(tmp.path());
    let config_dir = tmp.path().join(".ancestry");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[output]\nformat = \"json\"\n\n[graph]\nstrategy = \"reachability\"\n",
    )
    .unwrap();

    let out = ancestry(tmp.path(), &["dag", &graph, "1", "5"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["ancestors"], serde_json::json!([6]));

    // Command-line flags win over the config file.
    let out = ancestry(
        tmp.path(),
        &["--format", "text", "dag", &graph, "1", "5", "--strategy", "path-prefix"],
    );
    assert_eq!(stdout(&out), "none");
}

#[test]
fn test_keys_listing() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = write_tree(tmp.path());

    let out = ancestry(tmp.path(), &["keys", &tree]);
    assert_eq!(stdout(&out), "3\n8\n10\n20\n29\n30\n52\n62");
}
