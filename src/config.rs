//! `daogen.toml` project configuration
//!
//! Lets a project pin generation settings next to its schema instead of
//! repeating flags. Precedence is CLI flag > config file > built-in default.
//!
//! ```toml
//! [generate]
//! lang = "go"
//! output = "internal/store"
//! name = "billing-api"
//! on_write_error = "continue"
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generator::{GenerateOptions, WritePolicy};

pub const CONFIG_FILE_NAME: &str = "daogen.toml";

pub const DEFAULT_LANG: &str = "rust";

/// Top-level `daogen.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DaogenConfig {
    #[serde(default)]
    pub generate: GenerateSection,
}

/// `[generate]` table; every key is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub on_write_error: Option<WritePolicy>,
}

/// Settings given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub continue_on_error: bool,
    pub dry_run: bool,
}

/// Load configuration from a TOML file
///
/// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<DaogenConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let config: DaogenConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// `daogen.toml` alongside the schema, if present.
pub fn auto_detect_config_path(schema_path: &Path) -> Option<PathBuf> {
    let dir = match schema_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let config_path = dir.join(CONFIG_FILE_NAME);
    config_path.is_file().then_some(config_path)
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via `--config`), which must exist
/// 2. Auto-detected alongside the schema
/// 3. None (no config)
pub fn resolve_config_path(
    explicit_path: Option<&Path>,
    schema_path: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    match explicit_path {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => bail!("config file not found (--config): {}", path.display()),
        None => Ok(auto_detect_config_path(schema_path)),
    }
}

impl DaogenConfig {
    /// Merge with CLI overrides into run options for `schema_path`.
    pub fn to_options(&self, schema_path: &Path, cli: &CliOverrides) -> GenerateOptions {
        let section = &self.generate;
        let lang = cli
            .lang
            .clone()
            .or_else(|| section.lang.clone())
            .unwrap_or_else(|| DEFAULT_LANG.to_string());
        let output = cli
            .output
            .clone()
            .or_else(|| section.output.clone())
            .unwrap_or_else(|| PathBuf::from(GenerateOptions::DEFAULT_OUTPUT));
        let name = cli
            .name
            .clone()
            .or_else(|| section.name.clone())
            .unwrap_or_else(|| GenerateOptions::DEFAULT_SERVICE.to_string());
        let policy = if cli.continue_on_error {
            WritePolicy::Continue
        } else {
            section.on_write_error.unwrap_or_default()
        };

        GenerateOptions::new(schema_path, lang)
            .with_output_dir(output)
            .with_service_name(name)
            .with_write_policy(policy)
            .with_dry_run(cli.dry_run)
    }
}
