//! # daogen
//!
//! **daogen** reads SQL `CREATE TABLE` statements and generates a data-access
//! layer for each table in Rust, C++, Python or Go: a model type, an abstract
//! DAO contract, a PostgreSQL-backed implementation and an in-memory mock.
//!
//! ## Architecture
//!
//! - **[`schema`]** - best-effort DDL parser producing [`Table`]/[`Column`] IR
//! - **[`generator`]** - type catalogs, naming rules, per-backend emitters and the
//!   [`generate`] orchestrator
//! - **[`config`]** - `daogen.toml` loading and CLI merging
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `daogen` command line
//! - **[`error`]** - [`GenerateError`], the failures a run can surface
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(daogen)
//!     participant Gen as generator::generate
//!     participant Parser as schema::parse_schema
//!     participant Emitter as CodeEmitter
//!     participant FS as File System
//!
//!     User->>CLI: daogen generate schema.sql --lang rust
//!     CLI->>Gen: GenerateOptions
//!     Gen->>Gen: resolve backend (before any I/O)
//!     Gen->>FS: read schema
//!     Gen->>Parser: parse_schema(text)
//!     Parser-->>Gen: Vec<Table>
//!     loop every table
//!         Gen->>Emitter: emit_all(table)
//!         Emitter-->>Gen: Vec<Artifact> (rendered in memory)
//!         Gen->>FS: create_dir_all + write
//!     end
//!     Gen-->>CLI: GenerationReport
//!     CLI-->>User: Generated RUST DAO structure for N tables in ./src
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use daogen::generator::{CodeEmitter, RustEmitter};
//! use daogen::schema::parse_schema;
//!
//! let tables = parse_schema("CREATE TABLE orders (id BIGINT PRIMARY KEY, note TEXT);");
//! let model = RustEmitter::new("shop").emit_model(&tables[0]).unwrap();
//! assert!(model.contains("pub struct Orders"));
//! assert!(model.contains("pub note: Option<String>"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod schema;

pub use error::GenerateError;
pub use generator::{generate, GenerateOptions, GenerationReport, WritePolicy};
pub use schema::{parse_schema, Column, Table, TypeCategory};
