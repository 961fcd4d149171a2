//! Integration tests for the cladewick CLI
//!
//! These tests run the binary end-to-end on temporary tree files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TREES: &str = "\
((Kiwi:1.5,(Emu:0.5,Cassowary:0.5):1):0.25,(Ostrich:2,Rhea:1.75):0.5);

((Kiwi:1,Emu:1):0.5,(Ostrich:2,Rhea:2):0.25);
";

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("cladewick").unwrap()
}

/// Helper function to create a temporary directory with a tree file
fn create_tree_file(content: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("trees.nwk"), content).unwrap();
    temp_dir
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("clade"))
        .stdout(predicate::str::contains("tip"));
}

#[test]
fn test_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_summary() {
    let dir = create_tree_file(TREES);

    cli()
        .arg("summary")
        .arg(dir.path().join("trees.nwk"))
        .assert()
        .success()
        .stdout(predicate::str::contains("======= Tree 0 ======="))
        .stdout(predicate::str::contains("======= Tree 1 ======="))
        .stdout(predicate::str::contains("Leaves: 5"))
        .stdout(predicate::str::contains("Inner: 4"))
        .stdout(predicate::str::contains("Leaves: 4"))
        .stdout(predicate::str::contains("Inner: 3"))
        .stdout(predicate::str::contains(
            "((Kiwi:1,Emu:1):0.5,(Ostrich:2,Rhea:2):0.25):0;",
        ));
}

#[test]
fn test_summary_malformed_tree_fails() {
    let dir = create_tree_file("(A:1,B:2);\n(,A:1);\n");

    cli()
        .arg("summary")
        .arg(dir.path().join("trees.nwk"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Leaves: 2"))
        .stderr(predicate::str::contains("Invalid newick string"))
        .stderr(predicate::str::contains("tree 1"));
}

#[test]
fn test_missing_file_fails() {
    cli()
        .arg("summary")
        .arg("does_not_exist.nwk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_clade_inline() {
    let dir = create_tree_file(TREES);

    cli()
        .arg("clade")
        .arg(dir.path().join("trees.nwk"))
        .arg("--clade")
        .arg("Casuariiformes=Emu,Cassowary")
        .arg("--clade")
        .arg("Rheas=Ostrich,Rhea")
        .assert()
        .success()
        .stdout(predicate::str::contains("0\tCasuariiformes\t0.5\t1\n"))
        .stdout(predicate::str::contains("0\tRheas\t1.875\t0.5\n"))
        .stdout(predicate::str::contains("1\tCasuariiformes\t0\t1\n"))
        .stdout(predicate::str::contains("1\tRheas\t2\t0.25\n"));
}

#[test]
fn test_clade_from_config() {
    let dir = create_tree_file(TREES);
    let config = dir.path().join("clades.toml");
    fs::write(
        &config,
        r#"
[[clade]]
name = "Ratites"
taxa = ["Kiwi", "Ostrich"]

[[clade]]
name = "Moas"
taxa = ["Dinornis"]
"#,
    )
    .unwrap();

    cli()
        .arg("clade")
        .arg(dir.path().join("trees.nwk"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("0\tRatites\t2.125\t0\n"))
        .stdout(predicate::str::contains("0\tMoas\tNA\tNA\n"));
}

#[test]
fn test_clade_without_clades_fails() {
    let dir = create_tree_file(TREES);

    cli()
        .arg("clade")
        .arg(dir.path().join("trees.nwk"))
        .env_remove("CLADEWICK_CONFIG")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no clades given"));
}

#[test]
fn test_clade_invalid_definition_fails() {
    let dir = create_tree_file(TREES);

    cli()
        .arg("clade")
        .arg(dir.path().join("trees.nwk"))
        .arg("--clade")
        .arg("Ratites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=TAXON"));
}

#[test]
fn test_tip() {
    let dir = create_tree_file(TREES);

    cli()
        .arg("tip")
        .arg(dir.path().join("trees.nwk"))
        .arg("Rhea")
        .assert()
        .success()
        .stdout("0\t1.75\n1\t2\n");

    cli()
        .arg("tip")
        .arg(dir.path().join("trees.nwk"))
        .arg("Cassowary")
        .assert()
        .success()
        .stdout("0\t0.5\n1\tNA\n");
}
