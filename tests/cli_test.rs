//! Integration tests for the cooked-goose binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ROLES_UP: &str = "\
-- +goose Up
-- +goose ENVSUB ON
CREATE ROLE ${CG_TEST_USER} LOGIN;
-- +goose ENVSUB OFF
SELECT '${CG_TEST_USER}';
";

const ROLES_DOWN: &str = "\
-- +goose Down
-- +goose ENVSUB ON
DROP ROLE ${CG_TEST_USER};
";

fn setup_migrations() -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("migrations");
    fs::create_dir_all(dir.join("tenants")).unwrap();
    fs::write(dir.join("001_roles.up.sql"), ROLES_UP).unwrap();
    fs::write(dir.join("001_roles.down.sql"), ROLES_DOWN).unwrap();
    fs::write(dir.join("tenants/002_plain.up.sql"), "SELECT 1;").unwrap();
    fs::write(dir.join("README.md"), "# not a migration\n").unwrap();
    temp
}

fn cooked_goose(cwd: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("cooked-goose"));
    cmd.current_dir(cwd);
    cmd.env_remove("CG_TEST_USER");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("cooked-goose"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("ENVSUB ON"))
        .stdout(predicate::str::contains("./completions"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("cooked-goose"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_without_directory_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    cooked_goose(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input directory provided"));
    Ok(())
}

#[test]
fn cli_cooks_into_default_output_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .arg("migrations")
        .env("CG_TEST_USER", "app")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing completed successfully"));

    let out = temp.path().join("migrations_cooked");
    let up = fs::read_to_string(out.join("001_roles.up.sql"))?;
    assert!(up.contains("CREATE ROLE app LOGIN;"));
    assert!(up.contains("SELECT '${CG_TEST_USER}';"));
    assert_eq!(
        fs::read_to_string(out.join("tenants/002_plain.up.sql"))?,
        "SELECT 1;\n"
    );
    assert!(!out.join("README.md").exists());
    Ok(())
}

#[test]
fn cli_up_filter() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["migrations", "--up", "--output-dir", "out"])
        .env("CG_TEST_USER", "app")
        .assert()
        .success();

    assert!(temp.path().join("out/001_roles.up.sql").exists());
    assert!(!temp.path().join("out/001_roles.down.sql").exists());
    Ok(())
}

#[test]
fn cli_down_filter() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["migrations", "--down", "--output-dir", "out"])
        .env("CG_TEST_USER", "app")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/001_roles.down.sql"))?,
        "-- +goose Down\n-- +goose ENVSUB ON\nDROP ROLE app;\n"
    );
    assert!(!temp.path().join("out/001_roles.up.sql").exists());
    Ok(())
}

#[test]
fn cli_up_and_down_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["migrations", "--up", "--down"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn cli_unbound_variable_fails_with_line() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["migrations", "--up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CG_TEST_USER not set in environment"))
        .stderr(predicate::str::contains("001_roles.up.sql"))
        .stderr(predicate::str::contains("CREATE ROLE ${CG_TEST_USER} LOGIN;"));

    assert!(!temp
        .path()
        .join("migrations_cooked/001_roles.up.sql")
        .exists());
    Ok(())
}

#[test]
fn cli_var_and_env_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    fs::write(temp.path().join("cook.env"), "CG_TEST_USER=from_file\n")?;

    cooked_goose(temp.path())
        .args(["migrations", "--up", "--env-file", "cook.env", "-o", "a"])
        .assert()
        .success();
    assert!(fs::read_to_string(temp.path().join("a/001_roles.up.sql"))?
        .contains("CREATE ROLE from_file LOGIN;"));

    cooked_goose(temp.path())
        .args(["migrations", "--up", "--env-file", "cook.env", "-o", "b"])
        .args(["--var", "CG_TEST_USER=override"])
        .assert()
        .success();
    assert!(fs::read_to_string(temp.path().join("b/001_roles.up.sql"))?
        .contains("CREATE ROLE override LOGIN;"));
    Ok(())
}

#[test]
fn cli_skips_existing_without_overwrite() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    let out = temp.path().join("out");
    fs::create_dir_all(&out)?;
    fs::write(out.join("001_roles.up.sql"), "OLD\n")?;

    cooked_goose(temp.path())
        .args(["migrations", "--up", "-o", "out"])
        .env("CG_TEST_USER", "app")
        .assert()
        .success()
        .stdout(predicate::str::contains("overwrite disabled"));
    assert_eq!(fs::read_to_string(out.join("001_roles.up.sql"))?, "OLD\n");

    cooked_goose(temp.path())
        .args(["migrations", "--up", "-o", "out", "--overwrite"])
        .env("CG_TEST_USER", "app")
        .assert()
        .success();
    assert!(fs::read_to_string(out.join("001_roles.up.sql"))?.contains("CREATE ROLE app"));
    Ok(())
}

#[test]
fn cli_keep_going_exits_non_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["migrations", "--keep-going", "-o", "out"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("2 of 3 migration(s) failed"));

    assert!(temp.path().join("out/tenants/002_plain.up.sql").exists());
    Ok(())
}

#[test]
fn cli_dry_run_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["migrations", "--dry-run"])
        .env("CG_TEST_USER", "app")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run complete"));

    assert!(!temp.path().join("migrations_cooked").exists());
    Ok(())
}

#[test]
fn cli_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    let output = cooked_goose(temp.path())
        .args(["migrations", "--up", "--json", "-o", "out"])
        .env("CG_TEST_USER", "app")
        .output()?;

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f["status"] == "written"));
    Ok(())
}

#[test]
fn cli_quiet_hides_status() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["migrations", "--quiet"])
        .env("CG_TEST_USER", "app")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_missing_directory_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    cooked_goose(temp.path())
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input directory not found"));
    Ok(())
}

#[test]
fn cli_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("cooked-goose"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cooked-goose"));
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_migrations();
    cooked_goose(temp.path())
        .args(["--debug", "migrations", "--dry-run"])
        .env("CG_TEST_USER", "app")
        .assert()
        .success();
    Ok(())
}

#[test]
fn cli_cooks_directory_named_completions() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("completions"))?;
    fs::write(temp.path().join("completions/001.sql"), "SELECT 1;\n")?;

    cooked_goose(temp.path())
        .arg("./completions")
        .assert()
        .success();

    assert!(temp.path().join("completions_cooked/001.sql").exists());
    Ok(())
}

#[test]
fn cli_no_color_does_not_bind_no_color_variable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("migrations"))?;
    fs::write(
        temp.path().join("migrations/001.sql"),
        "-- +goose ENVSUB ON\nSELECT '${NO_COLOR}';\n",
    )?;

    cooked_goose(temp.path())
        .args(["--no-color", "migrations"])
        .env_remove("NO_COLOR")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NO_COLOR not set in environment"));

    assert!(!temp.path().join("migrations_cooked/001.sql").exists());
    Ok(())
}

#[test]
fn cli_passes_non_utf8_lines_through() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("migrations"))?;
    let latin1: &[u8] = b"-- caf\xe9\nSELECT 1;\n";
    fs::write(temp.path().join("migrations/001.sql"), latin1)?;

    cooked_goose(temp.path())
        .arg("migrations")
        .assert()
        .success();

    assert_eq!(fs::read(temp.path().join("migrations_cooked/001.sql"))?, latin1);
    Ok(())
}

#[test]
fn cli_default_operator_uses_bound_value() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("migrations"))?;
    fs::write(
        temp.path().join("migrations/001.sql"),
        "-- +goose ENVSUB ON\nCREATE SCHEMA ${CG_TEST_USER:-fallback};\n",
    )?;

    cooked_goose(temp.path())
        .arg("migrations")
        .env("CG_TEST_USER", "tenant")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("migrations_cooked/001.sql"))?,
        "-- +goose ENVSUB ON\nCREATE SCHEMA tenant;\n"
    );
    Ok(())
}
