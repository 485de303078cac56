//! Unit tests for CLI parsing and output

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::cli::{describe_backends, render_inspect, Cli, Commands, InspectFormat};
use crate::generator::EmitterRegistry;
use crate::schema::parse_schema;
use clap::Parser;
use std::path::PathBuf;

const SCHEMA: &str = "CREATE TABLE users (id UUID PRIMARY KEY, email VARCHAR NOT NULL, bio TEXT);";

#[test]
fn test_generate_defaults_are_unset() {
    let cli = Cli::try_parse_from(["daogen", "generate", "schema.sql"]).unwrap();
    match cli.command {
        Commands::Generate {
            schema,
            lang,
            output,
            name,
            config,
            continue_on_error,
            dry_run,
        } => {
            assert_eq!(schema, PathBuf::from("schema.sql"));
            // Left to daogen.toml / built-in defaults.
            assert!(lang.is_none());
            assert!(output.is_none());
            assert!(name.is_none());
            assert!(config.is_none());
            assert!(!continue_on_error);
            assert!(!dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
    assert!(!cli.verbose);
}

#[test]
fn test_generate_with_all_flags() {
    let cli = Cli::try_parse_from([
        "daogen",
        "generate",
        "db/schema.sql",
        "--lang",
        "go",
        "--output",
        "gen",
        "--name",
        "billing-api",
        "--config",
        "daogen.toml",
        "--continue-on-error",
        "--dry-run",
        "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Generate {
            lang,
            output,
            name,
            config,
            continue_on_error,
            dry_run,
            ..
        } => {
            assert_eq!(lang.as_deref(), Some("go"));
            assert_eq!(output, Some(PathBuf::from("gen")));
            assert_eq!(name.as_deref(), Some("billing-api"));
            assert_eq!(config, Some(PathBuf::from("daogen.toml")));
            assert!(continue_on_error);
            assert!(dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_requires_schema() {
    assert!(Cli::try_parse_from(["daogen", "generate"]).is_err());
}

#[test]
fn test_inspect_format() {
    let cli = Cli::try_parse_from(["daogen", "inspect", "s.sql", "--format", "yaml"]).unwrap();
    match cli.command {
        Commands::Inspect { format, .. } => assert_eq!(format, InspectFormat::Yaml),
        _ => panic!("Expected Inspect command"),
    }
    assert!(Cli::try_parse_from(["daogen", "inspect", "s.sql", "--format", "xml"]).is_err());
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["daogen", "generate", "s.sql"],
        vec!["daogen", "inspect", "s.sql"],
        vec!["daogen", "backends"],
    ];
    for args in commands {
        assert!(Cli::try_parse_from(&args).is_ok(), "failed to parse {args:?}");
    }
}

#[test]
fn test_inspect_text_lists_columns_and_flags() {
    let out = render_inspect(&parse_schema(SCHEMA), InspectFormat::Text).unwrap();
    assert!(out.starts_with("users -> Users [key: id Uuid]"));
    assert!(out.contains("email"));
    assert!(out.contains("nullable"));
    assert!(out.contains("pk"));
}

#[test]
fn test_inspect_reports_the_key_emitters_use() {
    let tables = parse_schema(
        "CREATE TABLE tags (id INTEGER, label TEXT);\nCREATE TABLE notes (body TEXT NOT NULL);",
    );
    let out = render_inspect(&tables, InspectFormat::Text).unwrap();
    assert!(out.contains("tags -> Tags [key: id Integer]\n"));
    assert!(out.contains("notes -> Notes [key: id Uuid (assumed)]\n"));

    let json = render_inspect(&tables, InspectFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["primary_key_type"], "Integer");
    assert_eq!(value[0]["synthetic_key"], false);
    assert_eq!(value[1]["synthetic_key"], true);
}

#[test]
fn test_inspect_json_is_structured() {
    let out = render_inspect(&parse_schema(SCHEMA), InspectFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["name"], "users");
    assert_eq!(value[0]["type_name"], "Users");
    assert_eq!(value[0]["primary_key"], "id");
    assert_eq!(value[0]["columns"].as_array().unwrap().len(), 3);
}

#[test]
fn test_inspect_yaml_round_trips_through_serde_yaml() {
    let out = render_inspect(&parse_schema(SCHEMA), InspectFormat::Yaml).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
    assert_eq!(value[0]["name"].as_str(), Some("users"));
}

#[test]
fn test_inspect_empty_schema() {
    let out = render_inspect(&[], InspectFormat::Text).unwrap();
    assert_eq!(out, "no tables found\n");
}

#[test]
fn test_describe_backends_lists_all_four() {
    let out = describe_backends(&EmitterRegistry::with_defaults());
    for header in ["rust (.rs", "cpp (.hpp", "python (.py", "go (.go"] {
        assert!(out.contains(header), "missing {header} in:\n{out}");
    }
    assert!(out.contains("Option<T>"));
    assert!(out.contains("package: myservice"));
}
