use askama::Template;
use std::path::PathBuf;

use crate::generator::catalog::Backend;
use crate::generator::context::{FieldDef, Operation, TableContext};
use crate::generator::emitter::{ArtifactKind, CodeEmitter};
use crate::schema::{Table, TypeCategory};

/// Rust model struct (serde), async-trait DAO, sqlx/PostgreSQL store, HashMap mock.
///
/// Layout: `model/<table>/{model,dao,pg_dao,mock_dao,mod}.rs`. Generated code
/// expects the host crate to provide `crate::model::error::DatabaseError` with a
/// `QueryError(String)` variant.
#[derive(Debug, Clone)]
pub struct RustEmitter {
    service: String,
}

impl RustEmitter {
    pub fn new(service: &str) -> Self {
        RustEmitter {
            service: service.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "rust/model.rs.txt", escape = "none")]
struct ModelTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "rust/dao.rs.txt", escape = "none")]
struct DaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "rust/pg_dao.rs.txt", escape = "none")]
struct PgDaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "rust/mock_dao.rs.txt", escape = "none")]
struct MockDaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "rust/mod.rs.txt", escape = "none")]
struct ModTemplate<'a> {
    ctx: &'a TableContext,
}

impl CodeEmitter for RustEmitter {
    fn backend(&self) -> Backend {
        Backend::Rust
    }

    fn service_name(&self) -> &str {
        &self.service
    }

    fn artifact_path(&self, table: &Table, kind: ArtifactKind) -> Option<PathBuf> {
        let file = match kind {
            ArtifactKind::Model => "model.rs",
            ArtifactKind::DaoContract => "dao.rs",
            ArtifactKind::StoreImpl => "pg_dao.rs",
            ArtifactKind::Mock => "mock_dao.rs",
            ArtifactKind::Wiring => "mod.rs",
        };
        Some(PathBuf::from("model").join(&table.name).join(file))
    }

    fn render(&self, ctx: &TableContext, kind: ArtifactKind) -> askama::Result<Option<String>> {
        let rendered = match kind {
            ArtifactKind::Model => ModelTemplate { ctx }.render()?,
            ArtifactKind::DaoContract => DaoTemplate { ctx }.render()?,
            ArtifactKind::StoreImpl => PgDaoTemplate { ctx }.render()?,
            ArtifactKind::Mock => MockDaoTemplate { ctx }.render()?,
            ArtifactKind::Wiring => ModTemplate { ctx }.render()?,
        };
        Ok(Some(rendered))
    }

    fn operation_signature(&self, op: Operation, type_name: &str, key_ty: &str) -> String {
        match op {
            Operation::FindById => format!(
                "async fn find_by_id(&self, id: {key_ty}) -> Result<Option<{type_name}>, DatabaseError>"
            ),
            Operation::FindAll => {
                format!("async fn find_all(&self) -> Result<Vec<{type_name}>, DatabaseError>")
            }
            Operation::Create => format!(
                "async fn create(&self, entity: &{type_name}) -> Result<{key_ty}, DatabaseError>"
            ),
            Operation::Update => format!(
                "async fn update(&self, id: {key_ty}, entity: &{type_name}) -> Result<(), DatabaseError>"
            ),
            Operation::Delete => {
                format!("async fn delete(&self, id: {key_ty}) -> Result<(), DatabaseError>")
            }
        }
    }

    fn read_expr(&self, field: &FieldDef) -> String {
        if field.optional {
            // NULL and missing columns both read as None.
            format!("row.try_get(\"{}\").ok().flatten()", field.column)
        } else {
            format!("row.try_get(\"{}\")?", field.column)
        }
    }

    fn bind_expr(&self, field: &FieldDef) -> String {
        format!("&entity.{}", field.name)
    }

    fn sample_literal(&self, field: &FieldDef) -> String {
        let value = match field.category {
            TypeCategory::Text => "\"sample\".to_string()",
            TypeCategory::Integer | TypeCategory::BigInteger => "42",
            TypeCategory::Boolean => "true",
            TypeCategory::Timestamp => "Utc::now()",
            TypeCategory::Uuid => "Uuid::new_v4()",
            TypeCategory::Json => "serde_json::json!({ \"sample\": true })",
        };
        if field.optional {
            format!("Some({value})")
        } else {
            value.to_string()
        }
    }
}
