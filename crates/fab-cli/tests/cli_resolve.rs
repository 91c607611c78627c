use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

#[allow(deprecated)]
fn fab_cmd() -> Command {
    Command::cargo_bin("fab").unwrap()
}

const DESCRIPTOR: &str = r#"
[project]
coordinate = "com.example:app:1.0.0"
packages = ["com.example.app", "com.example.api"]

[[dependency]]
coordinate = "org.acme:logging:2.4.1"
jar = "lib/logging.jar"

[[dependency]]
coordinate = "org.acme:util:1.2-SNAPSHOT"
packages = ["org.acme.util", "org.acme.log"]

[[dependency]]
coordinate = "org.acme:extra:0.5"
parent = "org.acme:util"
optional = true
packages = ["org.acme.extra"]

[[dependency]]
coordinate = "org.acme:embedded:3.0"
shared = false
packages = ["org.acme.embedded"]
"#;

/// A bundle JAR that exports `org.acme.log` at a version of its own.
fn write_bundle_jar(path: &std::path::Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    let opts = SimpleFileOptions::default();
    zip.start_file("META-INF/MANIFEST.MF", opts).unwrap();
    zip.write_all(
        b"Manifest-Version: 1.0\r\n\
          Bundle-SymbolicName: org.acme.logging\r\n\
          Export-Package: org.acme.log;version=\"1.7.0\",org.acme.log.spi\r\n\
          \r\n",
    )
    .unwrap();
    zip.start_file("org/acme/log/Logger.class", opts).unwrap();
    zip.write_all(b"\xca\xfe\xba\xbe").unwrap();
    zip.start_file("org/acme/log/spi/Provider.class", opts).unwrap();
    zip.write_all(b"\xca\xfe\xba\xbe").unwrap();
    zip.finish().unwrap();
}

fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Fab.toml"), DESCRIPTOR).unwrap();
    write_bundle_jar(&tmp.path().join("lib/logging.jar"));
    tmp
}

#[test]
fn test_resolve_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "org.acme.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find Fab.toml"));
}

#[test]
fn test_resolve_first_provider_wins() {
    let tmp = setup();

    // logging is declared first and exports org.acme.log at 1.7.0
    fab_cmd()
        .current_dir(tmp.path())
        .env_remove("FAB_VERSION_RANGE_DIGITS")
        .args(["resolve", "org.acme.log", "org.acme.util", "org.other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.acme.log  -> [1.7.0,1.7.1)"))
        .stdout(predicate::str::contains("org.acme.util -> [1.2.0,1.2.1)"))
        .stdout(predicate::str::contains("org.other     -> (unconstrained)"));
}

#[test]
fn test_resolve_unversioned_bundle_export_falls_back_to_dependency_version() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .env_remove("FAB_VERSION_RANGE_DIGITS")
        .args(["resolve", "org.acme.log.spi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[2.4.1,2.4.2)"));
}

#[test]
fn test_resolve_digits_flag_and_env() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "org.acme.util", "--digits", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1.0.0,2.0.0)"));

    fab_cmd()
        .current_dir(tmp.path())
        .env("FAB_VERSION_RANGE_DIGITS", "2")
        .args(["resolve", "org.acme.util"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1.2.0,1.3.0)"));

    // Out-of-range settings fall back to three digits rather than failing.
    fab_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "org.acme.util", "--digits", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1.2.0,1.2.1)"));
}

#[test]
fn test_resolve_skips_inline_dependencies() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "org.acme.embedded"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(unconstrained)"));
}

#[test]
fn test_export_checks_project_last() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["export", "com.example.api", "org.acme.log", "org.nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.api -> 1.0.0"))
        .stdout(predicate::str::contains("org.acme.log    -> 1.7.0"))
        .stdout(predicate::str::contains("org.nowhere     -> (not found)"));
}

#[test]
fn test_optional_follows_tree() {
    let tmp = setup();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["optional", "org.acme.extra", "org.acme.util", "org.unknown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.acme.extra -> optional"))
        .stdout(predicate::str::contains("org.acme.util  -> required"))
        .stdout(predicate::str::contains("org.unknown    -> optional"));
}

#[test]
fn test_manifest_path_flag() {
    let tmp = setup();
    let elsewhere = TempDir::new().unwrap();

    fab_cmd()
        .current_dir(elsewhere.path())
        .args(["--manifest-path"])
        .arg(tmp.path().join("Fab.toml"))
        .args(["export", "org.acme.util"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.0.SNAPSHOT"));
}

#[test]
fn test_invalid_descriptor_reports_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Fab.toml"),
        "[project]\ncoordinate = \"not-a-coordinate\"\n",
    )
    .unwrap();

    fab_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "org.acme.util"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate"));
}
