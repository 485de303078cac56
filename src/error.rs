use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::generator::{ArtifactKind, GenerationReport};

/// Failures surfaced by [`generate`](crate::generator::generate).
///
/// Parse anomalies are never errors: malformed DDL is skipped and an empty
/// schema simply reports zero tables.
#[derive(Debug)]
pub enum GenerateError {
    /// The schema path does not exist or cannot be read. Nothing was generated.
    SchemaFileNotFound {
        path: PathBuf,
        source: Option<io::Error>,
    },
    /// The requested backend is not registered. Checked before any I/O.
    UnsupportedBackend {
        name: String,
        supported: Vec<String>,
    },
    /// Writing one artifact (or creating its directory) failed.
    ///
    /// Artifacts written before the failure stay on disk.
    ArtifactWriteFailure { path: PathBuf, source: io::Error },
    /// A template failed to render.
    Render {
        table: String,
        artifact: ArtifactKind,
        source: askama::Error,
    },
    /// The run was cancelled between tables.
    Cancelled { report: Box<GenerationReport> },
}

impl GenerateError {
    /// Process exit code for the CLI: 2 for bad arguments, 130 when interrupted, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::SchemaFileNotFound { .. } | GenerateError::UnsupportedBackend { .. } => 2,
            GenerateError::Cancelled { .. } => 130,
            _ => 1,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::SchemaFileNotFound { path, .. } => {
                write!(f, "schema file not found or unreadable: {}", path.display())
            }
            GenerateError::UnsupportedBackend { name, supported } => {
                write!(
                    f,
                    "unsupported language '{}' (--lang); supported: {}",
                    name,
                    supported.join(", ")
                )
            }
            GenerateError::ArtifactWriteFailure { path, .. } => {
                write!(f, "failed to write {}", path.display())
            }
            GenerateError::Render {
                table, artifact, ..
            } => {
                write!(f, "failed to render {artifact} for table '{table}'")
            }
            GenerateError::Cancelled { report } => {
                write!(
                    f,
                    "generation cancelled after {} table(s), {} file(s) written",
                    report.tables_processed,
                    report.files_written()
                )
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::SchemaFileNotFound { source, .. } => {
                source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
            }
            GenerateError::ArtifactWriteFailure { source, .. } => Some(source),
            GenerateError::Render { source, .. } => Some(source),
            _ => None,
        }
    }
}
