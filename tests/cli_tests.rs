#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const USERS: &str = "CREATE TABLE users (id UUID PRIMARY KEY, email VARCHAR NOT NULL, bio TEXT);";

fn daogen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daogen"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("DAOGEN_LOG_LEVEL")
        .args(args)
        .output()
        .expect("run daogen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_cli_generate_defaults_to_rust_in_src() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.sql"), USERS).unwrap();

    let output = daogen(dir.path(), &["generate", "schema.sql"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        "Generated RUST DAO structure for 1 tables in ./src"
    );
    assert!(dir.path().join("src/model/users/mod.rs").exists());
}

#[test]
fn test_cli_generate_with_lang_output_and_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.sql"), USERS).unwrap();

    let output = daogen(
        dir.path(),
        &["generate", "schema.sql", "--lang", "go", "--output", "gen", "--name", "user-api"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let model = fs::read_to_string(dir.path().join("gen/users.go")).unwrap();
    assert!(model.starts_with("// Code generated by daogen. DO NOT EDIT.\n\npackage userapi\n"));
}

#[test]
fn test_cli_reads_daogen_toml_next_to_schema() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db");
    fs::create_dir_all(&db).unwrap();
    fs::write(db.join("schema.sql"), USERS).unwrap();
    fs::write(
        db.join("daogen.toml"),
        "[generate]\nlang = \"python\"\noutput = \"pkg\"\n",
    )
    .unwrap();

    let output = daogen(dir.path(), &["generate", "db/schema.sql"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("pkg/users/__init__.py").exists());

    // Flags win over the file.
    let output = daogen(dir.path(), &["generate", "db/schema.sql", "--lang", "cpp"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("pkg/models/users.hpp").exists());
}

#[test]
fn test_cli_missing_schema_exits_non_zero() {
    let dir = TempDir::new().unwrap();

    let output = daogen(dir.path(), &["generate", "nope.sql"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("nope.sql"));
    assert!(!dir.path().join("src").exists());
}

#[test]
fn test_cli_unsupported_lang_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.sql"), USERS).unwrap();

    let output = daogen(dir.path(), &["generate", "schema.sql", "--lang", "cobol"]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("cobol"));
    assert!(err.contains("--lang"));
    assert!(!dir.path().join("src").exists());
}

#[test]
fn test_cli_dry_run_lists_paths() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.sql"), USERS).unwrap();

    let output = daogen(dir.path(), &["generate", "schema.sql", "--lang", "go", "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("users_dao.go"));
    assert!(out.contains("Would generate GO DAO structure for 1 tables"));
    assert!(!dir.path().join("src").exists());
}

#[test]
fn test_cli_inspect_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.sql"), USERS).unwrap();

    let output = daogen(dir.path(), &["inspect", "schema.sql", "--format", "json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value[0]["type_name"], "Users");
}

#[test]
fn test_cli_backends() {
    let dir = TempDir::new().unwrap();
    let output = daogen(dir.path(), &["backends"]);
    assert!(output.status.success());
    let out = stdout(&output);
    for name in ["cpp", "go", "python", "rust"] {
        assert!(out.contains(name));
    }
}
