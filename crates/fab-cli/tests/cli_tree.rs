use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn fab_cmd() -> Command {
    Command::cargo_bin("fab").unwrap()
}

const DESCRIPTOR: &str = r#"
[project]
coordinate = "com.example:app:1.0.0"
packages = ["com.example.app"]

[[dependency]]
coordinate = "org.acme:core:1.0"
packages = ["org.acme.core", "org.acme.shared"]

[[dependency]]
coordinate = "org.acme:extra:0.5"
parent = "org.acme:core"
optional = true
packages = ["org.acme.extra", "org.acme.shared"]
"#;

fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Fab.toml"), DESCRIPTOR).unwrap();
    tmp
}

#[test]
fn test_tree_prints_hierarchy() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("com.example:app:1.0.0\n"))
        .stdout(predicate::str::contains("└── org.acme:core:1.0\n"))
        .stdout(predicate::str::contains("    └── org.acme:extra:0.5 (optional)\n"));
}

#[test]
fn test_tree_depth_limit() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["tree", "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.acme:core:1.0"))
        .stdout(predicate::str::contains("org.acme:extra").not());
}

#[test]
fn test_tree_why() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["tree", "--why", "extra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path to extra:"))
        .stdout(predicate::str::contains("org.acme:core:1.0"));

    fab_cmd()
        .current_dir(tmp.path())
        .args(["tree", "--why", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency 'nothing' not found in the tree."));
}

#[test]
fn test_tree_split_packages() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["tree", "--split-packages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Split packages (1):"))
        .stdout(predicate::str::contains(
            "org.acme.shared from org.acme:core:1.0 (shadows org.acme:extra:0.5)",
        ));
}
