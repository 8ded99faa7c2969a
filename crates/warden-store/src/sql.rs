//! DDL and DML statement text.
//!
//! Everything here is pure string generation; executing the statements is
//! the store's job. DDL is idempotent (`IF NOT EXISTS`). Statement text for
//! `IN (…)` operations depends on the identifier count and is rebuilt per
//! call; the fixed-arity statements are built once at store construction.

use crate::schema::{Column, IndexOp};

pub(crate) fn create_table(table: &str, columns: &[Column]) -> String {
    let defs: Vec<String> = columns
        .iter()
        .map(|column| {
            if column.primary_key {
                format!("{} {} PRIMARY KEY", column.name, column.ty.as_sql())
            } else {
                format!("{} {}", column.name, column.ty.as_sql())
            }
        })
        .collect();
    format!("CREATE TABLE IF NOT EXISTS {table} ({})", defs.join(", "))
}

pub(crate) fn create_indexes(table: &str, columns: &[Column]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| column.index.is_some() || column.unique)
        .map(|column| {
            let unique = if column.unique { "UNIQUE " } else { "" };
            let op = match column.index.unwrap_or(IndexOp::Asc) {
                IndexOp::Asc => "ASC",
                IndexOp::Desc => "DESC",
            };
            format!(
                "CREATE {unique}INDEX IF NOT EXISTS idx_{table}_{name} ON {table} ({name} {op})",
                name = column.name,
            )
        })
        .collect()
}

pub(crate) fn insert(table: &str, columns: &[Column]) -> String {
    let names: Vec<&str> = non_pk_names(columns);
    let placeholders = vec!["?"; names.len()].join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        names.join(", ")
    )
}

pub(crate) fn update(table: &str, columns: &[Column], pk: &str) -> String {
    let assignments: Vec<String> = non_pk_names(columns)
        .iter()
        .map(|name| format!("{name} = ?"))
        .collect();
    format!(
        "UPDATE {table} SET {} WHERE {pk} = ?",
        assignments.join(", ")
    )
}

pub(crate) fn select_by_pk(table: &str, columns: &[Column], pk: &str) -> String {
    format!("{} WHERE {pk} = ?", select_all(table, columns))
}

pub(crate) fn select_all(table: &str, columns: &[Column]) -> String {
    format!("SELECT {} FROM {table}", names(columns).join(", "))
}

pub(crate) fn select_by_column(table: &str, columns: &[Column], column: &str) -> String {
    format!("{} WHERE {column} = ?", select_all(table, columns))
}

pub(crate) fn select_in(table: &str, columns: &[Column], pk: &str, len: usize) -> String {
    format!(
        "{} WHERE {pk} IN ({})",
        select_all(table, columns),
        placeholders(len)
    )
}

pub(crate) fn delete_in(table: &str, pk: &str, len: usize) -> String {
    format!("DELETE FROM {table} WHERE {pk} IN ({})", placeholders(len))
}

fn names(columns: &[Column]) -> Vec<&str> {
    columns.iter().map(|column| column.name).collect()
}

fn non_pk_names(columns: &[Column]) -> Vec<&str> {
    columns
        .iter()
        .filter(|column| !column.primary_key)
        .map(|column| column.name)
        .collect()
}

fn placeholders(len: usize) -> String {
    vec!["?"; len].join(", ")
}
