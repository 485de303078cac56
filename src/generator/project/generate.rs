use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::GenerateError;
use crate::generator::catalog::Backend;
use crate::generator::emitter::EmitterRegistry;
use crate::schema::parse_schema;

/// What to do when one artifact cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Stop at the first failure; earlier writes stay on disk.
    #[default]
    Abort,
    /// Record the failure in the report and keep going.
    Continue,
}

/// Shared flag checked between tables.
///
/// Clones observe the same flag, so a signal handler can hold one while
/// [`generate`] polls another.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// The underlying flag, for registration with `signal_hook::flag`.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub schema_path: PathBuf,
    /// Backend name as typed by the user; aliases are accepted
    pub backend: String,
    pub output_dir: PathBuf,
    pub service_name: String,
    pub write_policy: WritePolicy,
    /// Render and report paths without touching the filesystem
    pub dry_run: bool,
    pub cancel: Option<CancellationToken>,
}

impl GenerateOptions {
    pub const DEFAULT_OUTPUT: &'static str = "./src";
    pub const DEFAULT_SERVICE: &'static str = "service";

    /// Options with the default output directory, service name and policy.
    pub fn new(schema_path: impl Into<PathBuf>, backend: impl Into<String>) -> Self {
        GenerateOptions {
            schema_path: schema_path.into(),
            backend: backend.into(),
            output_dir: PathBuf::from(Self::DEFAULT_OUTPUT),
            service_name: Self::DEFAULT_SERVICE.to_string(),
            write_policy: WritePolicy::default(),
            dry_run: false,
            cancel: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// An artifact that could not be written under [`WritePolicy::Continue`].
#[derive(Debug, Clone)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub backend: Backend,
    pub output_dir: PathBuf,
    pub tables_processed: usize,
    /// Paths written, in write order
    pub written: Vec<PathBuf>,
    /// Paths that would have been written (dry run only)
    pub planned: Vec<PathBuf>,
    pub failures: Vec<WriteFailure>,
    pub dry_run: bool,
}

impl GenerationReport {
    fn new(backend: Backend, output_dir: &Path, dry_run: bool) -> Self {
        GenerationReport {
            backend,
            output_dir: output_dir.to_path_buf(),
            tables_processed: 0,
            written: Vec::new(),
            planned: Vec::new(),
            failures: Vec::new(),
            dry_run,
        }
    }

    pub fn files_written(&self) -> usize {
        self.written.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary for the CLI.
    pub fn summary(&self) -> String {
        let lang = self.backend.name().to_uppercase();
        let dir = self.output_dir.display();
        let mut line = if self.dry_run {
            format!(
                "Would generate {lang} DAO structure for {} tables in {dir} ({} files)",
                self.tables_processed,
                self.planned.len()
            )
        } else {
            format!(
                "Generated {lang} DAO structure for {} tables in {dir}",
                self.tables_processed
            )
        };
        if !self.failures.is_empty() {
            line.push_str(&format!(" ({} write failures)", self.failures.len()));
        }
        line
    }
}

/// Generate DAO code for every table in a schema file using the built-in backends.
///
/// # Errors
///
/// - [`GenerateError::UnsupportedBackend`] before any I/O
/// - [`GenerateError::SchemaFileNotFound`] before any parsing
/// - [`GenerateError::Render`] or [`GenerateError::ArtifactWriteFailure`] for the
///   first failing table under [`WritePolicy::Abort`]
/// - [`GenerateError::Cancelled`] with the partial report
///
/// An empty or table-less schema is not an error; the report shows zero tables.
pub fn generate(options: &GenerateOptions) -> Result<GenerationReport, GenerateError> {
    generate_with_registry(options, &EmitterRegistry::with_defaults())
}

/// [`generate`] against a caller-supplied backend registry.
pub fn generate_with_registry(
    options: &GenerateOptions,
    registry: &EmitterRegistry,
) -> Result<GenerationReport, GenerateError> {
    let emitter = registry.create(&options.backend, &options.service_name)?;
    let schema = read_schema(&options.schema_path)?;
    let tables = parse_schema(&schema);
    info!(
        schema = %options.schema_path.display(),
        backend = %emitter.backend(),
        tables = tables.len(),
        "Parsed schema"
    );

    let mut report = GenerationReport::new(emitter.backend(), &options.output_dir, options.dry_run);
    for table in &tables {
        if options.is_cancelled() {
            warn!(
                tables_processed = report.tables_processed,
                "Generation cancelled"
            );
            return Err(GenerateError::Cancelled {
                report: Box::new(report),
            });
        }

        // Render the whole table before its first write.
        let artifacts = emitter.emit_all(table)?;
        for artifact in artifacts {
            let path = options.output_dir.join(&artifact.path);
            if options.dry_run {
                debug!(path = %path.display(), kind = %artifact.kind, "Planned artifact");
                report.planned.push(path);
                continue;
            }
            match write_artifact(&path, &artifact.contents) {
                Ok(()) => {
                    debug!(path = %path.display(), kind = %artifact.kind, "Wrote artifact");
                    report.written.push(path);
                }
                Err(source) => match options.write_policy {
                    WritePolicy::Abort => {
                        return Err(GenerateError::ArtifactWriteFailure { path, source });
                    }
                    WritePolicy::Continue => {
                        warn!(path = %path.display(), error = %source, "Failed to write artifact");
                        report.failures.push(WriteFailure {
                            path,
                            message: source.to_string(),
                        });
                    }
                },
            }
        }
        report.tables_processed += 1;
        info!(table = %table.name, type_name = %table.type_name(), "Generated table");
    }

    Ok(report)
}

fn read_schema(path: &Path) -> Result<String, GenerateError> {
    if !path.is_file() {
        return Err(GenerateError::SchemaFileNotFound {
            path: path.to_path_buf(),
            source: None,
        });
    }
    fs::read_to_string(path).map_err(|source| GenerateError::SchemaFileNotFound {
        path: path.to_path_buf(),
        source: Some(source),
    })
}

fn write_artifact(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        // No-op when the directory already exists.
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
