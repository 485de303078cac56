use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{load_config, resolve_config_path, CliOverrides, DaogenConfig};
use crate::error::GenerateError;
use crate::generator::{generate, CancellationToken, EmitterRegistry, NamingPolicy, TypeCatalog};
use crate::logging::{init_logging, LogConfig};
use crate::schema::{parse_schema, Column, Table, TypeCategory};

/// Command-line interface for daogen
///
/// Generates model, DAO, store and mock sources from SQL `CREATE TABLE`
/// statements.
#[derive(Parser, Debug)]
#[command(name = "daogen")]
#[command(version, about = "Generate DAO code from a SQL schema", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Log at debug level (overrides DAOGEN_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate model/DAO/store/mock files for every table in a schema
    Generate {
        /// Path to the SQL schema file
        schema: PathBuf,

        /// Target language: rust, cpp, python or go (default: rust)
        #[arg(short, long)]
        lang: Option<String>,

        /// Output directory (default: ./src)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Service/module name (default: service)
        #[arg(short, long)]
        name: Option<String>,

        /// Path to daogen.toml (default: next to the schema)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Keep going after a failed write and report every failure
        #[arg(long, default_value_t = false)]
        continue_on_error: bool,

        /// Render everything and list the files without writing them
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the parsed tables without generating anything
    Inspect {
        /// Path to the SQL schema file
        schema: PathBuf,

        #[arg(short, long, value_enum, default_value_t = InspectFormat::Text)]
        format: InspectFormat,
    },
    /// List the registered backends and their type catalogs
    Backends,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    Text,
    Json,
    Yaml,
}

/// Serializable view of one parsed table.
#[derive(Debug, Serialize)]
struct TableView<'a> {
    name: &'a str,
    type_name: String,
    primary_key: String,
    primary_key_type: TypeCategory,
    synthetic_key: bool,
    columns: &'a [Column],
}

impl<'a> TableView<'a> {
    fn new(table: &'a Table) -> Self {
        let key = table.primary_key();
        TableView {
            name: &table.name,
            type_name: table.type_name(),
            primary_key: key.name.clone(),
            primary_key_type: key.type_category,
            synthetic_key: table.has_synthetic_key(),
            columns: &table.columns,
        }
    }
}

/// Execute a parsed command line.
///
/// Generation failures are returned as [`GenerateError`] inside the
/// `anyhow::Error`, so callers can recover the exit code with `downcast_ref`.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let log_config = LogConfig::from_env().verbose(cli.verbose);
    // A second init (tests, embedding) keeps the existing subscriber.
    init_logging(&log_config).ok();

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
            let overrides = CliOverrides {
                lang,
                output,
                name,
                continue_on_error,
                dry_run,
            };
            run_generate(&schema, config.as_deref(), &overrides)
        }
        Commands::Inspect { schema, format } => run_inspect(&schema, format),
        Commands::Backends => {
            print!("{}", describe_backends(&EmitterRegistry::with_defaults()));
            Ok(())
        }
    }
}

fn run_generate(
    schema: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> anyhow::Result<()> {
    let config = match resolve_config_path(config_path, schema)? {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            load_config(&path)?.unwrap_or_default()
        }
        None => DaogenConfig::default(),
    };

    let token = CancellationToken::new();
    install_signal_handlers(&token)?;
    let options = config.to_options(schema, overrides).with_cancellation(token);

    let report = generate(&options)?;
    if report.dry_run {
        for path in &report.planned {
            println!("{}", path.display());
        }
    }
    println!("{}", report.summary());

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("failed to write {}: {}", failure.path.display(), failure.message);
        }
        bail!("{} artifact(s) could not be written", report.failures.len());
    }
    Ok(())
}

#[cfg(unix)]
fn install_signal_handlers(token: &CancellationToken) -> anyhow::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, token.flag())
            .with_context(|| format!("Failed to register handler for signal {signal}"))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn install_signal_handlers(_token: &CancellationToken) -> anyhow::Result<()> {
    Ok(())
}

fn run_inspect(schema: &Path, format: InspectFormat) -> anyhow::Result<()> {
    if !schema.is_file() {
        return Err(GenerateError::SchemaFileNotFound {
            path: schema.to_path_buf(),
            source: None,
        }
        .into());
    }
    let text = std::fs::read_to_string(schema)
        .with_context(|| format!("Failed to read schema: {}", schema.display()))?;
    let tables = parse_schema(&text);
    print!("{}", render_inspect(&tables, format)?);
    Ok(())
}

/// Render parsed tables for `daogen inspect`.
pub fn render_inspect(tables: &[Table], format: InspectFormat) -> anyhow::Result<String> {
    let views: Vec<TableView<'_>> = tables.iter().map(TableView::new).collect();
    match format {
        InspectFormat::Json => {
            let mut out = serde_json::to_string_pretty(&views).context("Failed to encode JSON")?;
            out.push('\n');
            Ok(out)
        }
        InspectFormat::Yaml => serde_yaml::to_string(&views).context("Failed to encode YAML"),
        InspectFormat::Text => Ok(render_text(&views)),
    }
}

fn render_text(views: &[TableView<'_>]) -> String {
    if views.is_empty() {
        return "no tables found\n".to_string();
    }
    let mut out = String::new();
    for view in views {
        let key = if view.synthetic_key {
            format!("{} {} (assumed)", view.primary_key, view.primary_key_type)
        } else {
            format!("{} {}", view.primary_key, view.primary_key_type)
        };
        out.push_str(&format!("{} -> {} [key: {key}]\n", view.name, view.type_name));
        for column in view.columns {
            let mut flags = Vec::new();
            if column.is_primary_key || column.name == view.primary_key {
                flags.push("pk".to_string());
            }
            if column.nullable {
                flags.push("nullable".to_string());
            }
            if let Some(target) = &column.foreign_key_ref {
                flags.push(format!("references {target}"));
            }
            out.push_str(&format!(
                "  {:<24} {:<12} {}\n",
                column.name,
                column.type_category.to_string(),
                flags.join(", ")
            ));
        }
    }
    out
}

/// Registered backends with their type catalogs, for `daogen backends`.
pub fn describe_backends(registry: &EmitterRegistry) -> String {
    let mut out = String::new();
    for backend in registry.backends() {
        let catalog = TypeCatalog::for_backend(backend);
        let optional = catalog.wrap_optional("T");
        out.push_str(&format!(
            "{backend} (.{}, nullable: {optional}, package: {})\n",
            backend.extension(),
            NamingPolicy::for_backend(backend).package_name("my-service")
        ));
        for (category, native) in catalog.entries() {
            out.push_str(&format!("  {:<12} {native}\n", category.to_string()));
        }
    }
    out
}
