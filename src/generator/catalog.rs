use crate::schema::{Column, TypeCategory};
use serde::Serialize;

/// A target language the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Rust: sqlx store, async-trait contract
    Rust,
    /// C++17: libpqxx store, nlohmann::json
    Cpp,
    /// Python: pydantic models, async SQLAlchemy store
    Python,
    /// Go: sqlx store
    Go,
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::Rust, Backend::Cpp, Backend::Python, Backend::Go];

    /// Registry name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Rust => "rust",
            Backend::Cpp => "cpp",
            Backend::Python => "python",
            Backend::Go => "go",
        }
    }

    /// Source file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Backend::Rust => "rs",
            Backend::Cpp => "hpp",
            Backend::Python => "py",
            Backend::Go => "go",
        }
    }

    /// Resolve a user-supplied backend name (case-insensitive, with aliases).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rust" | "rs" => Some(Backend::Rust),
            "cpp" | "c++" => Some(Backend::Cpp),
            "python" | "py" => Some(Backend::Python),
            "go" | "golang" => Some(Backend::Go),
            _ => None,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

type Mapping = &'static [(TypeCategory, &'static str)];

const RUST_TYPES: Mapping = &[
    (TypeCategory::Text, "String"),
    (TypeCategory::Integer, "i32"),
    (TypeCategory::BigInteger, "i64"),
    (TypeCategory::Boolean, "bool"),
    (TypeCategory::Timestamp, "DateTime<Utc>"),
    (TypeCategory::Uuid, "Uuid"),
    (TypeCategory::Json, "serde_json::Value"),
];

const CPP_TYPES: Mapping = &[
    (TypeCategory::Text, "std::string"),
    (TypeCategory::Integer, "int"),
    (TypeCategory::BigInteger, "int64_t"),
    (TypeCategory::Boolean, "bool"),
    (TypeCategory::Timestamp, "std::chrono::system_clock::time_point"),
    (TypeCategory::Uuid, "std::string"),
    (TypeCategory::Json, "nlohmann::json"),
];

const PYTHON_TYPES: Mapping = &[
    (TypeCategory::Text, "str"),
    (TypeCategory::Integer, "int"),
    (TypeCategory::BigInteger, "int"),
    (TypeCategory::Boolean, "bool"),
    (TypeCategory::Timestamp, "datetime"),
    (TypeCategory::Uuid, "UUID"),
    (TypeCategory::Json, "dict"),
];

const GO_TYPES: Mapping = &[
    (TypeCategory::Text, "string"),
    (TypeCategory::Integer, "int"),
    (TypeCategory::BigInteger, "int64"),
    (TypeCategory::Boolean, "bool"),
    (TypeCategory::Timestamp, "time.Time"),
    (TypeCategory::Uuid, "uuid.UUID"),
    (TypeCategory::Json, "map[string]interface{}"),
];

/// Fixed category → native type table for one backend.
///
/// Lookups are total: a category missing from the table resolves to the
/// backend's `Text` spelling.
#[derive(Debug, Clone, Copy)]
pub struct TypeCatalog {
    backend: Backend,
    mapping: Mapping,
    text: &'static str,
}

impl TypeCatalog {
    pub fn for_backend(backend: Backend) -> Self {
        let (mapping, text) = match backend {
            Backend::Rust => (RUST_TYPES, "String"),
            Backend::Cpp => (CPP_TYPES, "std::string"),
            Backend::Python => (PYTHON_TYPES, "str"),
            Backend::Go => (GO_TYPES, "string"),
        };
        TypeCatalog {
            backend,
            mapping,
            text,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Native spelling for a category.
    pub fn native(&self, category: TypeCategory) -> &'static str {
        self.mapping
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, ty)| *ty)
            .unwrap_or(self.text)
    }

    /// Wrap a native type in the backend's optional construct.
    pub fn wrap_optional(&self, native: &str) -> String {
        match self.backend {
            Backend::Rust => format!("Option<{native}>"),
            Backend::Cpp => format!("std::optional<{native}>"),
            Backend::Python => format!("Optional[{native}]"),
            Backend::Go => format!("*{native}"),
        }
    }

    /// Resolved field type for a column, optional-wrapped when nullable and not a key.
    pub fn resolve(&self, column: &Column) -> String {
        let native = self.native(column.type_category);
        if column.is_optional() {
            self.wrap_optional(native)
        } else {
            native.to_string()
        }
    }

    /// Every category with its native spelling, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (TypeCategory, &'static str)> + '_ {
        TypeCategory::ALL.into_iter().map(|c| (c, self.native(c)))
    }
}
