use super::catalog::Backend;

/// Convert a snake_case table name into a type name.
///
/// Each `_`-separated word is capitalized (first letter upper, rest lower);
/// empty words from doubled or edge underscores are dropped.
///
/// # Example
///
/// ```rust
/// use daogen::generator::derive_type_name;
///
/// assert_eq!(derive_type_name("user_profiles"), "UserProfiles");
/// assert_eq!(derive_type_name("orders"), "Orders");
/// ```
pub fn derive_type_name(name: &str) -> String {
    name.split('_').map(capitalize).collect()
}

/// Human-readable label for doc comments (`created_at` → `Created At`).
pub fn doc_label(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
    "async", "await", "dyn",
    // reserved
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers.
const RUST_PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "co_await",
    "co_return", "co_yield", "compl", "concept", "const", "const_cast", "consteval",
    "constexpr", "constinit", "continue", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
    "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept",
    "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected", "public",
    "register", "reinterpret_cast", "requires", "return", "short", "signed", "sizeof",
    "static", "static_assert", "static_cast", "struct", "switch", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union",
    "unsigned", "using", "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Identifier rules per backend.
///
/// Type names are shared by every backend; field names follow each
/// language's convention and dodge its reserved words.
#[derive(Debug, Clone, Copy)]
pub struct NamingPolicy {
    backend: Backend,
}

impl NamingPolicy {
    pub fn for_backend(backend: Backend) -> Self {
        NamingPolicy { backend }
    }

    pub fn type_name(&self, table: &str) -> String {
        derive_type_name(table)
    }

    /// Field identifier for a column.
    ///
    /// Go fields are exported (`created_at` → `CreatedAt`); the other backends
    /// keep the column name, escaping keywords (`r#type`, `self_`, `class_`).
    pub fn field_name(&self, column: &str) -> String {
        match self.backend {
            Backend::Rust if RUST_PATH_KEYWORDS.contains(&column) => format!("{column}_"),
            Backend::Rust if RUST_KEYWORDS.contains(&column) => format!("r#{column}"),
            Backend::Python if PYTHON_KEYWORDS.contains(&column) => format!("{column}_"),
            Backend::Cpp if CPP_KEYWORDS.contains(&column) => format!("{column}_"),
            Backend::Go => derive_type_name(column),
            _ => column.to_string(),
        }
    }

    /// Module/package name derived from the service name.
    ///
    /// Go packages drop `-` and are lower-cased; the others swap `-` for `_`.
    pub fn package_name(&self, service: &str) -> String {
        match self.backend {
            Backend::Go => service.to_lowercase().replace('-', ""),
            _ => service.to_lowercase().replace('-', "_"),
        }
    }
}
