use askama::Template;
use std::path::PathBuf;

use crate::generator::catalog::Backend;
use crate::generator::context::{FieldDef, Operation, TableContext};
use crate::generator::emitter::{ArtifactKind, CodeEmitter};
use crate::schema::{Table, TypeCategory};

/// Header-only C++17: model struct, abstract DAO, libpqxx store, map-backed mock.
///
/// Layout: `models/<table>.hpp`, `dao/<table>_dao.hpp`, `dao/pg_<table>_dao.hpp`
/// and `dao/mock_<table>_dao.hpp`. There is no wiring artifact.
#[derive(Debug, Clone)]
pub struct CppEmitter {
    service: String,
}

impl CppEmitter {
    pub fn new(service: &str) -> Self {
        CppEmitter {
            service: service.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "cpp/model.hpp.txt", escape = "none")]
struct ModelTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "cpp/dao.hpp.txt", escape = "none")]
struct DaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "cpp/pg_dao.hpp.txt", escape = "none")]
struct PgDaoTemplate<'a> {
    ctx: &'a TableContext,
}

#[derive(Template)]
#[template(path = "cpp/mock_dao.hpp.txt", escape = "none")]
struct MockDaoTemplate<'a> {
    ctx: &'a TableContext,
}

/// Conversion from the text form of a column to its native type.
fn from_text(category: TypeCategory, column: &str) -> String {
    let text = format!("row[\"{column}\"].as<std::string>()");
    match category {
        TypeCategory::Text | TypeCategory::Uuid => text,
        TypeCategory::Integer => format!("row[\"{column}\"].as<int>()"),
        TypeCategory::BigInteger => format!("row[\"{column}\"].as<int64_t>()"),
        TypeCategory::Boolean => format!("row[\"{column}\"].as<bool>()"),
        TypeCategory::Timestamp => format!("detail::parse_timestamp({text})"),
        TypeCategory::Json => format!("nlohmann::json::parse({text})"),
    }
}

/// Conversion of a native value to something libpqxx can bind.
fn to_param(category: TypeCategory, value: &str) -> Option<String> {
    match category {
        TypeCategory::Timestamp => Some(format!("detail::format_timestamp({value})")),
        TypeCategory::Json => Some(format!("{value}.dump()")),
        _ => None,
    }
}

impl CodeEmitter for CppEmitter {
    fn backend(&self) -> Backend {
        Backend::Cpp
    }

    fn service_name(&self) -> &str {
        &self.service
    }

    fn artifact_path(&self, table: &Table, kind: ArtifactKind) -> Option<PathBuf> {
        let name = &table.name;
        let path = match kind {
            ArtifactKind::Model => PathBuf::from("models").join(format!("{name}.hpp")),
            ArtifactKind::DaoContract => PathBuf::from("dao").join(format!("{name}_dao.hpp")),
            ArtifactKind::StoreImpl => PathBuf::from("dao").join(format!("pg_{name}_dao.hpp")),
            ArtifactKind::Mock => PathBuf::from("dao").join(format!("mock_{name}_dao.hpp")),
            ArtifactKind::Wiring => return None,
        };
        Some(path)
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
            // `delete` is reserved.
            Operation::Delete => "delete_entity".to_string(),
            _ => op.name().to_string(),
        }
    }

    fn operation_signature(&self, op: Operation, type_name: &str, key_ty: &str) -> String {
        let model = format!("models::{type_name}");
        match op {
            Operation::FindById => {
                format!("std::future<std::optional<{model}>> find_by_id(const {key_ty}& id)")
            }
            Operation::FindAll => format!("std::future<std::vector<{model}>> find_all()"),
            Operation::Create => format!("std::future<{key_ty}> create(const {model}& entity)"),
            Operation::Update => {
                format!("std::future<void> update(const {key_ty}& id, const {model}& entity)")
            }
            Operation::Delete => format!("std::future<void> delete_entity(const {key_ty}& id)"),
        }
    }

    fn read_expr(&self, field: &FieldDef) -> String {
        let value = from_text(field.category, &field.column);
        if field.optional {
            format!(
                "row[\"{}\"].is_null() ? std::nullopt : std::make_optional({value})",
                field.column
            )
        } else {
            value
        }
    }

    fn bind_expr(&self, field: &FieldDef) -> String {
        let member = format!("entity.{}", field.name);
        if !field.optional {
            return to_param(field.category, &member).unwrap_or(member);
        }
        match to_param(field.category, &format!("{member}.value()")) {
            Some(converted) => format!(
                "{member} ? std::optional<std::string>({converted}) : std::nullopt"
            ),
            None => member,
        }
    }
}
