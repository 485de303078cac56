//! Backend-neutral rendering context.
//!
//! A [`TableContext`] holds everything a template needs for one table: the
//! field list, the key, the five DAO operations and their SQL. CRUD semantics
//! are decided here once; backends only contribute spelling (types, names,
//! placeholders, row reads) through [`CodeEmitter`] hooks.

use super::catalog::TypeCatalog;
use super::emitter::CodeEmitter;
use super::naming::{doc_label, NamingPolicy};
use crate::schema::{Column, Table, TypeCategory};

/// Preferred placeholder name for the key argument of by-key statements.
pub const KEY_PARAM: &str = "entity_id";

/// One generated field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Source column name
    pub column: String,
    /// Backend identifier (`r#type`, `CreatedAt`, ...)
    pub name: String,
    /// Resolved type, optional-wrapped when nullable
    pub ty: String,
    /// Unwrapped native type
    pub native_ty: String,
    /// Doc label (`Created At`)
    pub label: String,
    pub optional: bool,
    pub primary_key: bool,
    pub category: TypeCategory,
    /// Backend expression reading this field from a result row
    pub read: String,
    /// Backend expression passing this field of `entity` as a bind parameter
    pub bind: String,
    /// Backend literal used by generated tests
    pub sample: String,
}

impl FieldDef {
    /// The identifier differs from the column beyond raw-identifier syntax.
    pub fn is_renamed(&self) -> bool {
        self.name.trim_start_matches("r#") != self.column
    }
}

/// The key used by find/update/delete.
#[derive(Debug, Clone)]
pub struct KeyDef {
    pub column: String,
    pub name: String,
    pub ty: String,
    /// Row read expression of the key field
    pub read: String,
    /// Named placeholder of the key argument; never equal to a column name
    pub param: String,
    /// No column was marked and no `id` column exists; `id` is assumed.
    pub synthetic: bool,
}

/// The five operations every DAO contract declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FindById,
    FindAll,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::FindById,
        Operation::FindAll,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::FindById => "find_by_id",
            Operation::FindAll => "find_all",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    pub fn summary(&self, table: &str) -> String {
        match self {
            Operation::FindById => format!("Find {table} by ID"),
            Operation::FindAll => format!("Find all {table}"),
            Operation::Create => format!("Create a new {table}"),
            Operation::Update => format!("Update {table}"),
            Operation::Delete => format!("Delete {table}"),
        }
    }
}

/// An operation as one backend declares it.
#[derive(Debug, Clone)]
pub struct OperationDef {
    pub op: Operation,
    pub name: String,
    pub doc: String,
    pub signature: String,
}

/// Parameterised statements for the store implementation.
#[derive(Debug, Clone)]
pub struct QuerySet {
    pub find_by_id: String,
    pub find_all: String,
    /// Inserts every field, returns the key
    pub insert: String,
    /// Sets `update_fields` then filters on the key (last placeholder)
    pub update: String,
    pub delete: String,
    /// Bind order for `insert`
    pub insert_fields: Vec<FieldDef>,
    /// Bind order for `update`, before the key
    pub update_fields: Vec<FieldDef>,
}

/// Everything templates see for one table on one backend.
#[derive(Debug, Clone)]
pub struct TableContext {
    pub table_name: String,
    pub type_name: String,
    pub service: String,
    pub package: String,
    pub fields: Vec<FieldDef>,
    pub key: KeyDef,
    pub operations: Vec<OperationDef>,
    pub queries: QuerySet,
    pub uses_timestamp: bool,
    pub uses_uuid: bool,
    pub uses_json: bool,
    pub uses_optional: bool,
}

impl TableContext {
    pub fn build<E: CodeEmitter + ?Sized>(table: &Table, emitter: &E) -> Self {
        let backend = emitter.backend();
        let catalog = TypeCatalog::for_backend(backend);
        let naming = NamingPolicy::for_backend(backend);
        let type_name = naming.type_name(&table.name);

        let (key_column, synthetic) = key_column(table);
        let mut columns: Vec<Column> = table
            .columns
            .iter()
            .map(|c| {
                if c.name == key_column.name {
                    key_column.clone()
                } else {
                    c.clone()
                }
            })
            .collect();
        if synthetic {
            columns.insert(0, key_column.clone());
        }

        let fields: Vec<FieldDef> = columns
            .iter()
            .map(|c| {
                let mut field = FieldDef {
                    column: c.name.clone(),
                    name: naming.field_name(&c.name),
                    ty: catalog.resolve(c),
                    native_ty: catalog.native(c.type_category).to_string(),
                    label: doc_label(&c.name),
                    optional: c.is_optional(),
                    primary_key: c.name == key_column.name,
                    category: c.type_category,
                    read: String::new(),
                    bind: String::new(),
                    sample: String::new(),
                };
                field.read = emitter.read_expr(&field);
                field.bind = emitter.bind_expr(&field);
                field.sample = emitter.sample_literal(&field);
                field
            })
            .collect();

        let key = KeyDef {
            column: key_column.name.clone(),
            name: naming.field_name(&key_column.name),
            ty: catalog.resolve(&key_column),
            read: fields
                .iter()
                .find(|f| f.primary_key)
                .map(|f| f.read.clone())
                .unwrap_or_default(),
            param: key_param(&fields),
            synthetic,
        };

        let operations = Operation::ALL
            .iter()
            .map(|op| OperationDef {
                op: *op,
                name: emitter.operation_name(*op),
                doc: op.summary(&table.name),
                signature: emitter.operation_signature(*op, &type_name, &key.ty),
            })
            .collect();

        let queries = build_queries(&table.name, &fields, &key, emitter);
        let uses = |category: TypeCategory| fields.iter().any(|f| f.category == category);

        TableContext {
            table_name: table.name.clone(),
            type_name,
            service: emitter.service_name().to_string(),
            package: naming.package_name(emitter.service_name()),
            uses_timestamp: uses(TypeCategory::Timestamp),
            uses_uuid: uses(TypeCategory::Uuid),
            uses_json: uses(TypeCategory::Json),
            uses_optional: fields.iter().any(|f| f.optional),
            fields,
            key,
            operations,
            queries,
        }
    }

    /// Fields other than the key, in declaration order.
    pub fn non_key_fields(&self) -> Vec<&FieldDef> {
        self.fields.iter().filter(|f| !f.primary_key).collect()
    }
}

/// The key column and whether it was synthesised.
fn key_column(table: &Table) -> (Column, bool) {
    (table.primary_key().into_owned(), table.has_synthetic_key())
}

/// [`KEY_PARAM`], suffixed with `_` until no column shares the name.
fn key_param(fields: &[FieldDef]) -> String {
    let mut param = KEY_PARAM.to_string();
    while fields.iter().any(|f| f.column == param) {
        param.push('_');
    }
    param
}

fn build_queries<E: CodeEmitter + ?Sized>(
    table: &str,
    fields: &[FieldDef],
    key: &KeyDef,
    emitter: &E,
) -> QuerySet {
    let columns = fields
        .iter()
        .map(|f| f.column.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let by_key = format!("{} = {}", key.column, emitter.placeholder(1, &key.param));

    let values = fields
        .iter()
        .enumerate()
        .map(|(i, f)| emitter.placeholder(i + 1, &f.column))
        .collect::<Vec<_>>()
        .join(", ");

    let mut update_fields: Vec<FieldDef> =
        fields.iter().filter(|f| !f.primary_key).cloned().collect();
    if update_fields.is_empty() {
        update_fields = fields.iter().filter(|f| f.primary_key).cloned().collect();
    }
    let assignments = update_fields
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{} = {}", f.column, emitter.placeholder(i + 1, &f.column)))
        .collect::<Vec<_>>()
        .join(", ");
    let update_key = emitter.placeholder(update_fields.len() + 1, &key.param);

    QuerySet {
        find_by_id: format!("SELECT {columns} FROM {table} WHERE {by_key}"),
        find_all: format!("SELECT {columns} FROM {table}"),
        insert: format!(
            "INSERT INTO {table} ({columns}) VALUES ({values}) RETURNING {}",
            key.column
        ),
        update: format!(
            "UPDATE {table} SET {assignments} WHERE {} = {update_key}",
            key.column
        ),
        delete: format!("DELETE FROM {table} WHERE {by_key}"),
        insert_fields: fields.to_vec(),
        update_fields,
    }
}
