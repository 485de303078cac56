use askama::Template;
use std::path::PathBuf;

use crate::generator::catalog::Backend;
use crate::generator::context::{FieldDef, Operation, TableContext};
use crate::generator::emitter::{ArtifactKind, CodeEmitter};
use crate::schema::Table;

/// Python package per table: pydantic model, ABC contract, async SQLAlchemy store, dict mock.
#[derive(Debug, Clone)]
pub struct PythonEmitter {
    service: String,
}

impl PythonEmitter {
    pub fn new(service: &str) -> Self {
        PythonEmitter {
            service: service.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "python/models.py.txt", escape = "none")]
struct ModelsTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "python/dao.py.txt", escape = "none")]
struct DaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "python/sqlalchemy_dao.py.txt", escape = "none")]
struct SqlAlchemyDaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "python/mock_dao.py.txt", escape = "none")]
struct MockDaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "python/init.py.txt", escape = "none")]
struct InitTemplate<'a> {
    ctx: &'a TableContext,
}

impl CodeEmitter for PythonEmitter {
    fn backend(&self) -> Backend {
        Backend::Python
    }

    fn service_name(&self) -> &str {
        &self.service
    }

    fn artifact_path(&self, table: &Table, kind: ArtifactKind) -> Option<PathBuf> {
        let file = match kind {
            ArtifactKind::Model => "models.py",
            ArtifactKind::DaoContract => "dao.py",
            ArtifactKind::StoreImpl => "sqlalchemy_dao.py",
            ArtifactKind::Mock => "mock_dao.py",
            ArtifactKind::Wiring => "__init__.py",
        };
        Some(PathBuf::from(&table.name).join(file))
    }

    fn render(&self, ctx: &TableContext, kind: ArtifactKind) -> askama::Result<Option<String>> {
        let rendered = match kind {
            ArtifactKind::Model => ModelsTemplate { ctx }.render()?,
            ArtifactKind::DaoContract => DaoTemplate { ctx }.render()?,
            ArtifactKind::StoreImpl => SqlAlchemyDaoTemplate { ctx }.render()?,
            ArtifactKind::Mock => MockDaoTemplate { ctx }.render()?,
            ArtifactKind::Wiring => InitTemplate { ctx }.render()?,
        };
        Ok(Some(rendered))
    }

    fn operation_signature(&self, op: Operation, type_name: &str, key_ty: &str) -> String {
        match op {
            Operation::FindById => format!(
                "async def find_by_id(self, entity_id: {key_ty}) -> Optional[{type_name}]"
            ),
            Operation::FindAll => format!("async def find_all(self) -> List[{type_name}]"),
            Operation::Create => {
                format!("async def create(self, entity: {type_name}) -> {key_ty}")
            }
            Operation::Update => format!(
                "async def update(self, entity_id: {key_ty}, entity: {type_name}) -> None"
            ),
            Operation::Delete => format!("async def delete(self, entity_id: {key_ty}) -> None"),
        }
    }

    /// Named `:param` placeholders for `sqlalchemy.text`.
    fn placeholder(&self, _index: usize, name: &str) -> String {
        format!(":{name}")
    }

    fn read_expr(&self, field: &FieldDef) -> String {
        if field.optional {
            format!("mapping.get(\"{}\")", field.column)
        } else {
            format!("mapping[\"{}\"]", field.column)
        }
    }
}
