//! Best-effort `CREATE TABLE` parser.
//!
//! The accepted grammar is deliberately small:
//!
//! ```text
//! CREATE TABLE <name> ( <fragment> [, <fragment>]* ) ;
//! fragment := <column> <type> [<marker> ...]  |  <table-level clause>
//! ```
//!
//! Fragments are separated by line breaks or by commas outside parentheses.
//! Anything the parser does not understand is skipped, never reported. Known
//! limits: one declaration per line (a column split over two lines becomes two
//! fragments), no quoted identifiers, no composite primary keys.

use super::types::{Column, Table, TypeCategory};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static CREATE_TABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)CREATE\s+TABLE\s+(\w+)\s*\((.*?)\)\s*;")
        .expect("CREATE TABLE regex should be valid")
});

/// Parse schema text into tables, in block order.
///
/// Never fails: unparsable fragments are dropped and an input without any
/// `CREATE TABLE` block yields an empty vector.
///
/// # Example
///
/// ```rust
/// use daogen::schema::{parse_schema, TypeCategory};
///
/// let tables = parse_schema("CREATE TABLE users (id UUID PRIMARY KEY, email VARCHAR NOT NULL);");
/// assert_eq!(tables[0].name, "users");
/// assert_eq!(tables[0].columns[1].type_category, TypeCategory::Text);
/// ```
pub fn parse_schema(schema_text: &str) -> Vec<Table> {
    CREATE_TABLE_REGEX
        .captures_iter(schema_text)
        .map(|caps| {
            let name = &caps[1];
            let columns = parse_columns(name, &caps[2]);
            debug!(table = name, columns = columns.len(), "parsed table");
            Table::new(name, columns)
        })
        .collect()
}

fn parse_columns(table: &str, body: &str) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    for fragment in split_fragments(body) {
        if is_table_clause(&fragment) {
            debug!(table, fragment = %fragment, "skipping table-level clause");
            continue;
        }
        let Some(mut column) = parse_column(&fragment) else {
            debug!(table, fragment = %fragment, "skipping unparsable fragment");
            continue;
        };
        if column.is_primary_key && columns.iter().any(|c| c.is_primary_key) {
            debug!(
                table,
                column = %column.name,
                "second PRIMARY KEY marker ignored; composite keys are not supported"
            );
            column.is_primary_key = false;
        }
        columns.push(column);
    }
    columns
}

/// Split a column section on line breaks and on top-level commas.
fn split_fragments(body: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    for line in body.lines() {
        let line = match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        };
        let mut depth = 0usize;
        let mut current = String::new();
        for ch in line.chars() {
            match ch {
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                ',' if depth == 0 => fragments.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        fragments.push(current);
    }
    fragments
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// `CONSTRAINT ...`, `PRIMARY KEY (...)`, `FOREIGN KEY (...)`, `UNIQUE (...)`, `CHECK (...)`.
fn is_table_clause(fragment: &str) -> bool {
    let words: Vec<String> = fragment
        .split(|c: char| c.is_whitespace() || c == '(')
        .filter(|w| !w.is_empty())
        .take(2)
        .map(|w| w.to_ascii_uppercase())
        .collect();
    match words.first().map(String::as_str) {
        Some("CONSTRAINT") | Some("UNIQUE") | Some("CHECK") => true,
        Some("PRIMARY") | Some("FOREIGN") => words.get(1).map(String::as_str) == Some("KEY"),
        _ => false,
    }
}

fn parse_column(fragment: &str) -> Option<Column> {
    let fragment = fragment.trim_end_matches(',');
    let tokens: Vec<&str> = fragment.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    let markers: Vec<String> = tokens[2..]
        .iter()
        .map(|t| t.to_ascii_uppercase())
        .collect();
    let has_pair = |first: &str, second: &str| {
        markers
            .windows(2)
            .any(|w| w[0] == first && w[1] == second)
    };
    let foreign_key_ref = markers
        .iter()
        .position(|m| m == "REFERENCES")
        .and_then(|idx| tokens.get(idx + 3))
        .map(|target| target.to_string());

    Some(Column {
        name: tokens[0].to_string(),
        type_category: TypeCategory::from_sql(tokens[1]),
        nullable: !has_pair("NOT", "NULL"),
        is_primary_key: has_pair("PRIMARY", "KEY"),
        foreign_key_ref,
    })
}
