use askama::Template;
use std::path::PathBuf;

use crate::generator::catalog::Backend;
use crate::generator::context::{Operation, TableContext};
use crate::generator::emitter::{ArtifactKind, CodeEmitter};
use crate::schema::Table;

/// One Go package for the whole service: struct with `db` tags, DAO interface,
/// sqlx store, map-backed mock.
///
/// Files are flat: `<table>.go`, `<table>_dao.go`, `pg_<table>_dao.go` and
/// `mock_<table>_dao.go`. Declarations are prefixed with the type name so
/// several tables share one package.
#[derive(Debug, Clone)]
pub struct GoEmitter {
    service: String,
}

impl GoEmitter {
    pub fn new(service: &str) -> Self {
        GoEmitter {
            service: service.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "go/model.go.txt", escape = "none")]
struct ModelTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "go/dao.go.txt", escape = "none")]
struct DaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "go/pg_dao.go.txt", escape = "none")]
struct PgDaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "go/mock_dao.go.txt", escape = "none")]
struct MockDaoTemplate<'a> {
    ctx: &'a TableContext,
}

impl CodeEmitter for GoEmitter {
    fn backend(&self) -> Backend {
        Backend::Go
    }

    fn service_name(&self) -> &str {
        &self.service
    }

    fn artifact_path(&self, table: &Table, kind: ArtifactKind) -> Option<PathBuf> {
        let name = &table.name;
        let file = match kind {
            ArtifactKind::Model => format!("{name}.go"),
            ArtifactKind::DaoContract => format!("{name}_dao.go"),
            ArtifactKind::StoreImpl => format!("pg_{name}_dao.go"),
            ArtifactKind::Mock => format!("mock_{name}_dao.go"),
            ArtifactKind::Wiring => return None,
        };
        Some(PathBuf::from(file))
    }

    fn render(&self, ctx: &TableContext, kind: ArtifactKind) -> askama::Result<Option<String>> {
        let rendered = match kind {
            ArtifactKind::Model => ModelTemplate { ctx }.render()?,
            ArtifactKind::DaoContract => DaoTemplate { ctx }.render()?,
            ArtifactKind::StoreImpl => PgDaoTemplate { ctx }.render()?,
            ArtifactKind::Mock => MockDaoTemplate { ctx }.render()?,
            ArtifactKind::Wiring => return Ok(None),
        };
        Ok(Some(rendered))
    }

    fn operation_name(&self, op: Operation) -> String {
        match op {
            Operation::FindById => "FindByID",
            Operation::FindAll => "FindAll",
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
        .to_string()
    }

    fn operation_signature(&self, op: Operation, type_name: &str, key_ty: &str) -> String {
        match op {
            Operation::FindById => {
                format!("FindByID(ctx context.Context, id {key_ty}) (*{type_name}, error)")
            }
            Operation::FindAll => format!("FindAll(ctx context.Context) ([]*{type_name}, error)"),
            Operation::Create => {
                format!("Create(ctx context.Context, entity *{type_name}) ({key_ty}, error)")
            }
            Operation::Update => {
                format!("Update(ctx context.Context, id {key_ty}, entity *{type_name}) error")
            }
            Operation::Delete => format!("Delete(ctx context.Context, id {key_ty}) error"),
        }
    }
}
