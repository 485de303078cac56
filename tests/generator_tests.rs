#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use daogen::generator::{generate, CancellationToken, GenerateOptions, WritePolicy};
use daogen::GenerateError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const USERS: &str = "CREATE TABLE users (id UUID PRIMARY KEY, email VARCHAR NOT NULL, bio TEXT);";

const TWO_TABLES: &str = "
CREATE TABLE users (
    id UUID PRIMARY KEY,
    email VARCHAR(255) NOT NULL,
    created_at TIMESTAMP NOT NULL
);

CREATE TABLE orders (
    id BIGINT PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id),
    total INTEGER NOT NULL,
    metadata JSONB,
    CONSTRAINT positive_total CHECK (total > 0)
);
";

fn write_schema(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("schema.sql");
    fs::write(&path, text).unwrap();
    path
}

/// Every file under `root`, relative and `/`-separated, sorted.
fn files_under(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}

#[test]
fn test_rust_generates_five_files_per_table() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), USERS);
    let out = dir.path().join("src");

    let report = generate(&GenerateOptions::new(&schema, "rust").with_output_dir(&out)).unwrap();

    assert_eq!(report.tables_processed, 1);
    assert_eq!(report.files_written(), 5);
    assert_eq!(
        files_under(&out),
        [
            "model/users/dao.rs",
            "model/users/mock_dao.rs",
            "model/users/mod.rs",
            "model/users/model.rs",
            "model/users/pg_dao.rs",
        ]
    );
    for file in files_under(&out) {
        let contents = fs::read_to_string(out.join(&file)).unwrap();
        assert!(contents.contains("Users"), "{file} does not mention Users");
    }
    assert_eq!(
        report.summary(),
        format!("Generated RUST DAO structure for 1 tables in {}", out.display())
    );
}

#[test]
fn test_unsupported_backend_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), USERS);
    let out = dir.path().join("out");

    let err = generate(&GenerateOptions::new(&schema, "cobol").with_output_dir(&out)).unwrap_err();

    assert!(matches!(err, GenerateError::UnsupportedBackend { ref name, .. } if name == "cobol"));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("--lang"));
    assert!(!out.exists());
}

#[test]
fn test_unsupported_backend_is_reported_before_missing_schema() {
    let dir = TempDir::new().unwrap();
    let err = generate(&GenerateOptions::new(dir.path().join("missing.sql"), "cobol")).unwrap_err();
    assert!(matches!(err, GenerateError::UnsupportedBackend { .. }));
}

#[test]
fn test_missing_schema_fails_fast() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let err = generate(
        &GenerateOptions::new(dir.path().join("missing.sql"), "go").with_output_dir(&out),
    )
    .unwrap_err();

    assert!(matches!(err, GenerateError::SchemaFileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!out.exists());
}

#[test]
fn test_directory_as_schema_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = generate(&GenerateOptions::new(dir.path(), "rust")).unwrap_err();
    assert!(matches!(err, GenerateError::SchemaFileNotFound { .. }));
}

#[test]
fn test_empty_schema_reports_zero_tables() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), "-- nothing here\n");
    let out = dir.path().join("out");

    let report = generate(&GenerateOptions::new(&schema, "python").with_output_dir(&out)).unwrap();

    assert_eq!(report.tables_processed, 0);
    assert_eq!(report.files_written(), 0);
    assert!(report.is_success());
}

#[test]
fn test_two_tables_are_generated_independently() {
    let dir = TempDir::new().unwrap();
    let both = write_schema(dir.path(), TWO_TABLES);
    let out_both = dir.path().join("both");
    generate(&GenerateOptions::new(&both, "go").with_output_dir(&out_both)).unwrap();

    let only_orders_dir = dir.path().join("orders_only");
    fs::create_dir_all(&only_orders_dir).unwrap();
    let orders_text = &TWO_TABLES[TWO_TABLES.find("CREATE TABLE orders").unwrap()..];
    let only_orders = write_schema(&only_orders_dir, orders_text);
    let out_orders = dir.path().join("orders");
    let report =
        generate(&GenerateOptions::new(&only_orders, "go").with_output_dir(&out_orders)).unwrap();
    assert_eq!(report.tables_processed, 1);

    assert_eq!(
        files_under(&out_both),
        [
            "mock_orders_dao.go",
            "mock_users_dao.go",
            "orders.go",
            "orders_dao.go",
            "pg_orders_dao.go",
            "pg_users_dao.go",
            "users.go",
            "users_dao.go",
        ]
    );
    for file in files_under(&out_orders) {
        assert_eq!(
            fs::read_to_string(out_both.join(&file)).unwrap(),
            fs::read_to_string(out_orders.join(&file)).unwrap(),
            "{file} differs when users is absent"
        );
    }
}

#[test]
fn test_every_backend_writes_its_layout() {
    let expected: [(&str, &[&str]); 4] = [
        (
            "cpp",
            &[
                "dao/mock_users_dao.hpp",
                "dao/pg_users_dao.hpp",
                "dao/users_dao.hpp",
                "models/users.hpp",
            ],
        ),
        (
            "python",
            &[
                "users/__init__.py",
                "users/dao.py",
                "users/mock_dao.py",
                "users/models.py",
                "users/sqlalchemy_dao.py",
            ],
        ),
        (
            "go",
            &["mock_users_dao.go", "pg_users_dao.go", "users.go", "users_dao.go"],
        ),
        (
            "rust",
            &[
                "model/users/dao.rs",
                "model/users/mock_dao.rs",
                "model/users/mod.rs",
                "model/users/model.rs",
                "model/users/pg_dao.rs",
            ],
        ),
    ];

    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), USERS);
    for (lang, files) in expected {
        let out = dir.path().join(lang);
        let report = generate(&GenerateOptions::new(&schema, lang).with_output_dir(&out)).unwrap();
        assert_eq!(report.files_written(), files.len(), "{lang}");
        assert_eq!(files_under(&out), files, "{lang}");
    }
}

#[test]
fn test_regeneration_overwrites_existing_files() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), USERS);
    let out = dir.path().join("src");
    let model = out.join("model/users/model.rs");
    fs::create_dir_all(model.parent().unwrap()).unwrap();
    fs::write(&model, "stale").unwrap();

    generate(&GenerateOptions::new(&schema, "rust").with_output_dir(&out)).unwrap();
    generate(&GenerateOptions::new(&schema, "rust").with_output_dir(&out)).unwrap();

    assert!(fs::read_to_string(&model).unwrap().contains("pub struct Users"));
}

#[test]
fn test_dry_run_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), TWO_TABLES);
    let out = dir.path().join("out");

    let report = generate(
        &GenerateOptions::new(&schema, "cpp")
            .with_output_dir(&out)
            .with_dry_run(true),
    )
    .unwrap();

    assert!(!out.exists());
    assert_eq!(report.tables_processed, 2);
    assert_eq!(report.files_written(), 0);
    assert_eq!(report.planned.len(), 8);
    assert!(report.summary().starts_with("Would generate CPP DAO structure for 2 tables"));
}

#[test]
fn test_cancelled_token_stops_before_first_table() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(dir.path(), TWO_TABLES);
    let out = dir.path().join("out");
    let token = CancellationToken::new();
    token.cancel();

    let err = generate(
        &GenerateOptions::new(&schema, "rust")
            .with_output_dir(&out)
            .with_cancellation(token.clone()),
    )
    .unwrap_err();

    match &err {
        GenerateError::Cancelled { report } => {
            assert_eq!(report.tables_processed, 0);
            assert_eq!(report.files_written(), 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.exit_code(), 130);
    assert!(!out.exists());
}

#[cfg(unix)]
mod write_failures {
    use super::*;

    /// An output "directory" that is really a file makes every write fail.
    fn blocked_output(dir: &Path) -> PathBuf {
        let out = dir.join("blocked");
        fs::write(&out, "not a directory").unwrap();
        out
    }

    #[test]
    fn test_abort_policy_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(dir.path(), USERS);
        let out = blocked_output(dir.path());

        let err = generate(&GenerateOptions::new(&schema, "rust").with_output_dir(&out)).unwrap_err();

        match &err {
            GenerateError::ArtifactWriteFailure { path, .. } => {
                assert!(path.ends_with("model/users/model.rs"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_continue_policy_collects_every_failure() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(dir.path(), TWO_TABLES);
        let out = blocked_output(dir.path());

        let report = generate(
            &GenerateOptions::new(&schema, "python")
                .with_output_dir(&out)
                .with_write_policy(WritePolicy::Continue),
        )
        .unwrap();

        assert!(!report.is_success());
        assert_eq!(report.tables_processed, 2);
        assert_eq!(report.failures.len(), 10);
        assert_eq!(report.files_written(), 0);
        assert!(report.summary().ends_with("(10 write failures)"));
    }
}
