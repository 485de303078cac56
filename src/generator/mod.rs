//! # Generator Module
//!
//! Turns parsed tables into data-access code for one of four target languages.
//!
//! ## Architecture
//!
//! ```text
//! DDL text → schema::parse_schema → Table[] → TableContext → Askama templates → files
//! ```
//!
//! 1. **TypeCatalog** - fixed per-backend mapping from [`TypeCategory`](crate::schema::TypeCategory)
//!    to a native type, with the backend's optional wrapper for nullable columns
//! 2. **NamingPolicy** - type names (`user_profiles` → `UserProfiles`), field
//!    identifiers and package names
//! 3. **TableContext** - backend-neutral rendering structure: fields, key, the five
//!    DAO operations and their parameterised SQL
//! 4. **CodeEmitter** - one implementation per backend, registered by name in an
//!    [`EmitterRegistry`]; each renders the model, DAO contract, store
//!    implementation and in-memory mock for a table
//! 5. **generate** - the orchestrator: validates inputs, parses, renders each
//!    table in memory, then writes under the output directory
//!
//! ## Output Layout
//!
//! For a table `T`, relative to the output directory:
//!
//! ```text
//! rust    model/T/{model,dao,pg_dao,mock_dao,mod}.rs
//! cpp     models/T.hpp  dao/{T_dao,pg_T_dao,mock_T_dao}.hpp
//! python  T/{models,dao,sqlalchemy_dao,mock_dao,__init__}.py
//! go      T.go  T_dao.go  pg_T_dao.go  mock_T_dao.go
//! ```
//!
//! Existing files are overwritten.
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use daogen::generator::{generate, GenerateOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = GenerateOptions::new("schema.sql", "go")
//!     .with_output_dir("internal/store")
//!     .with_service_name("billing-api");
//! let report = generate(&options)?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Templates
//!
//! Templates live in `templates/<backend>/` and are compiled in by Askama.
//! Backends differ only in syntax; CRUD semantics are decided once in
//! [`TableContext`].

mod backends;
mod catalog;
mod context;
mod emitter;
mod naming;
mod project;

pub use backends::{CppEmitter, GoEmitter, PythonEmitter, RustEmitter};
pub use catalog::{Backend, TypeCatalog};
pub use context::{FieldDef, KeyDef, Operation, OperationDef, QuerySet, TableContext, KEY_PARAM};
pub use emitter::{Artifact, ArtifactKind, CodeEmitter, EmitterFactory, EmitterRegistry};
pub use naming::{derive_type_name, doc_label, NamingPolicy};
pub use project::{
    generate, generate_with_registry, CancellationToken, GenerateOptions, GenerationReport,
    WriteFailure, WritePolicy,
};
