use std::collections::BTreeMap;
use std::path::PathBuf;

use super::backends::{CppEmitter, GoEmitter, PythonEmitter, RustEmitter};
use super::catalog::Backend;
use super::context::{FieldDef, Operation, TableContext};
use crate::error::GenerateError;
use crate::schema::Table;

/// The kinds of file generated per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Data model with one field per column
    Model,
    /// Abstract DAO contract
    DaoContract,
    /// Store-backed DAO implementation
    StoreImpl,
    /// In-memory test double
    Mock,
    /// Module wiring that re-exports the others
    Wiring,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Model,
        ArtifactKind::DaoContract,
        ArtifactKind::StoreImpl,
        ArtifactKind::Mock,
        ArtifactKind::Wiring,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::DaoContract => "dao contract",
            ArtifactKind::StoreImpl => "store impl",
            ArtifactKind::Mock => "mock",
            ArtifactKind::Wiring => "wiring",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Rendered source for one artifact, not yet on disk.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub table: String,
    pub kind: ArtifactKind,
    /// Path relative to the output directory
    pub path: PathBuf,
    pub contents: String,
}

/// Code synthesis for one backend.
///
/// The four `emit_*` operations (plus optional wiring) are pure: they take a
/// table and return source text, never touching the filesystem. Backends
/// implement [`render`](CodeEmitter::render) over a prepared [`TableContext`];
/// the hook methods let [`TableContext::build`] spell names, signatures,
/// placeholders and row reads the backend's way.
pub trait CodeEmitter: Send + Sync {
    fn backend(&self) -> Backend;

    /// Service/module name the output belongs to
    fn service_name(&self) -> &str;

    /// Canonical output path for an artifact, relative to the output directory.
    ///
    /// `None` means the backend does not produce that artifact.
    fn artifact_path(&self, table: &Table, kind: ArtifactKind) -> Option<PathBuf>;

    /// Render one artifact from an already built context.
    ///
    /// `Ok(None)` for kinds the backend does not produce.
    fn render(&self, ctx: &TableContext, kind: ArtifactKind) -> askama::Result<Option<String>>;

    fn emit_model(&self, table: &Table) -> askama::Result<String> {
        self.render_one(table, ArtifactKind::Model)
    }

    fn emit_dao_contract(&self, table: &Table) -> askama::Result<String> {
        self.render_one(table, ArtifactKind::DaoContract)
    }

    fn emit_store_impl(&self, table: &Table) -> askama::Result<String> {
        self.render_one(table, ArtifactKind::StoreImpl)
    }

    fn emit_mock_impl(&self, table: &Table) -> askama::Result<String> {
        self.render_one(table, ArtifactKind::Mock)
    }

    fn emit_wiring(&self, table: &Table) -> askama::Result<Option<String>> {
        self.render(&self.context(table), ArtifactKind::Wiring)
    }

    /// Declaration of one operation as it appears in the contract.
    fn operation_signature(&self, op: Operation, type_name: &str, key_ty: &str) -> String;

    fn operation_name(&self, op: Operation) -> String {
        op.name().to_string()
    }

    /// Bind placeholder for the `index`-th (1-based) parameter named `name`.
    fn placeholder(&self, index: usize, _name: &str) -> String {
        format!("${index}")
    }

    /// Expression reading `field` from a result row.
    fn read_expr(&self, _field: &FieldDef) -> String {
        String::new()
    }

    /// Expression binding `field` of a variable named `entity`.
    fn bind_expr(&self, field: &FieldDef) -> String {
        format!("entity.{}", field.name)
    }

    /// Literal value of the field's type for generated tests.
    fn sample_literal(&self, _field: &FieldDef) -> String {
        String::new()
    }

    fn context(&self, table: &Table) -> TableContext {
        TableContext::build(table, self)
    }

    /// Build the context and render a single artifact; empty if not produced.
    fn render_one(&self, table: &Table, kind: ArtifactKind) -> askama::Result<String> {
        self.render(&self.context(table), kind).map(Option::unwrap_or_default)
    }

    /// Render every artifact this backend produces for `table`.
    ///
    /// The context is built once and shared by every template. Nothing is
    /// written; a render failure means no artifact of the table is returned.
    fn emit_all(&self, table: &Table) -> Result<Vec<Artifact>, GenerateError> {
        let ctx = self.context(table);
        let mut artifacts = Vec::new();
        for kind in ArtifactKind::ALL {
            let Some(path) = self.artifact_path(table, kind) else {
                continue;
            };
            let rendered = self
                .render(&ctx, kind)
                .map_err(|source| GenerateError::Render {
                    table: table.name.clone(),
                    artifact: kind,
                    source,
                })?;
            if let Some(contents) = rendered {
                artifacts.push(Artifact {
                    table: table.name.clone(),
                    kind,
                    path,
                    contents,
                });
            }
        }
        Ok(artifacts)
    }
}

/// Builds an emitter for a service name.
pub type EmitterFactory = fn(&str) -> Box<dyn CodeEmitter>;

/// Backend name → emitter implementation.
///
/// Lookups accept the aliases understood by [`Backend::from_name`], but only
/// registered backends resolve.
pub struct EmitterRegistry {
    factories: BTreeMap<&'static str, (Backend, EmitterFactory)>,
}

impl EmitterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        EmitterRegistry {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding the four built-in backends.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Backend::Rust, |service| Box::new(RustEmitter::new(service)));
        registry.register(Backend::Cpp, |service| Box::new(CppEmitter::new(service)));
        registry.register(Backend::Python, |service| Box::new(PythonEmitter::new(service)));
        registry.register(Backend::Go, |service| Box::new(GoEmitter::new(service)));
        registry
    }

    /// Register (or replace) the factory for a backend.
    pub fn register(&mut self, backend: Backend, factory: EmitterFactory) {
        self.factories.insert(backend.name(), (backend, factory));
    }

    /// Resolve a user-supplied name to a registered backend.
    pub fn resolve(&self, name: &str) -> Option<Backend> {
        Backend::from_name(name).filter(|b| self.factories.contains_key(b.name()))
    }

    /// Instantiate the emitter registered under `name`.
    ///
    /// # Errors
    ///
    /// [`GenerateError::UnsupportedBackend`] when nothing is registered under that name.
    pub fn create(&self, name: &str, service: &str) -> Result<Box<dyn CodeEmitter>, GenerateError> {
        let unsupported = || GenerateError::UnsupportedBackend {
            name: name.to_string(),
            supported: self.names().iter().map(|n| n.to_string()).collect(),
        };
        let backend = Backend::from_name(name).ok_or_else(unsupported)?;
        let (_, factory) = self.factories.get(backend.name()).ok_or_else(unsupported)?;
        Ok(factory(service))
    }

    /// Registered backend names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    pub fn backends(&self) -> Vec<Backend> {
        self.factories.values().map(|(b, _)| *b).collect()
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
