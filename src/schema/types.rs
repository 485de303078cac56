use serde::Serialize;
use std::borrow::Cow;

/// Abstract column category every backend maps to a native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TypeCategory {
    Text,
    Integer,
    BigInteger,
    Boolean,
    Timestamp,
    Uuid,
    Json,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 7] = [
        TypeCategory::Text,
        TypeCategory::Integer,
        TypeCategory::BigInteger,
        TypeCategory::Boolean,
        TypeCategory::Timestamp,
        TypeCategory::Uuid,
        TypeCategory::Json,
    ];

    /// Map a raw SQL type token (`VARCHAR`, `bigint`, `VARCHAR(255)`) to its category.
    ///
    /// Unknown tokens fall back to [`TypeCategory::Text`].
    pub fn from_sql(token: &str) -> Self {
        let base = token.split('(').next().unwrap_or(token).trim();
        match base.to_ascii_uppercase().as_str() {
            "TEXT" | "VARCHAR" => TypeCategory::Text,
            "INTEGER" => TypeCategory::Integer,
            "BIGINT" => TypeCategory::BigInteger,
            "BOOLEAN" => TypeCategory::Boolean,
            "TIMESTAMP" => TypeCategory::Timestamp,
            "UUID" => TypeCategory::Uuid,
            "JSONB" => TypeCategory::Json,
            _ => TypeCategory::Text,
        }
    }
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TypeCategory::Text => "Text",
            TypeCategory::Integer => "Integer",
            TypeCategory::BigInteger => "BigInteger",
            TypeCategory::Boolean => "Boolean",
            TypeCategory::Timestamp => "Timestamp",
            TypeCategory::Uuid => "Uuid",
            TypeCategory::Json => "Json",
        };
        write!(f, "{}", s)
    }
}

/// One column of a parsed `CREATE TABLE` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub type_category: TypeCategory,
    /// True unless the declaration carries `NOT NULL`.
    pub nullable: bool,
    pub is_primary_key: bool,
    /// Target of an inline `REFERENCES` clause. Captured only; no relation code is generated from it.
    pub foreign_key_ref: Option<String>,
}

impl Column {
    /// Whether emitters wrap this column in the backend's optional construct.
    ///
    /// Primary keys are never optional, whatever their `nullable` flag says.
    pub fn is_optional(&self) -> bool {
        self.nullable && !self.is_primary_key
    }

    /// The `id UUID` key assumed for tables that mark no primary key.
    pub fn synthetic_key() -> Self {
        Column {
            name: "id".to_string(),
            type_category: TypeCategory::Uuid,
            nullable: false,
            is_primary_key: true,
            foreign_key_ref: None,
        }
    }
}

/// A parsed table. Immutable once the parser hands it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    /// Declaration order; generated field order follows it.
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Table {
            name: name.into(),
            columns,
        }
    }

    /// Type name derived from the table name (`user_profiles` → `UserProfiles`).
    pub fn type_name(&self) -> String {
        crate::generator::derive_type_name(&self.name)
    }

    /// The key used by find/update/delete.
    ///
    /// The marked primary key column if there is one. Otherwise an `id`
    /// column is promoted (keeping its own type), and failing that the
    /// synthetic `id UUID` column is assumed.
    pub fn primary_key(&self) -> Cow<'_, Column> {
        if let Some(marked) = self.columns.iter().find(|c| c.is_primary_key) {
            return Cow::Borrowed(marked);
        }
        match self.columns.iter().find(|c| c.name == "id") {
            Some(id) => Cow::Owned(Column {
                is_primary_key: true,
                ..id.clone()
            }),
            None => Cow::Owned(Column::synthetic_key()),
        }
    }

    /// True when the key is the assumed `id UUID` column, absent from `columns`.
    pub fn has_synthetic_key(&self) -> bool {
        !self
            .columns
            .iter()
            .any(|c| c.is_primary_key || c.name == "id")
    }
}
