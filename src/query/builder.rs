// src/query/builder.rs
//
// Statement text generation from entity descriptors.
//
// Pure string construction: binding happens in the gateway. Placeholders
// are numbered (?1, ?2, ...) in the same order the gateway collects the
// bind values, which is descriptor order for entity writes and argument
// order for filters.

use crate::error::{AppError, AppResult};
use crate::mapping::EntityMeta;
use crate::query::filter::{FilterCondition, SortKey};

/// Full-row SELECT with optional WHERE and ORDER BY.
pub fn select(
    meta: &EntityMeta,
    filters: &[FilterCondition],
    sort: Option<SortKey>,
) -> AppResult<String> {
    let mut sql = format!(
        "SELECT {} FROM {}",
        meta.select_columns().join(", "),
        meta.table()
    );
    push_where(&mut sql, meta, filters)?;
    if let Some(sort) = sort {
        let column = resolve(meta, sort.field)?;
        let direction = if sort.ascending { "ASC" } else { "DESC" };
        sql.push_str(&format!(" ORDER BY {column} {direction}"));
    }
    Ok(sql)
}

/// Single-row SELECT by primary key.
pub fn select_by_key(meta: &EntityMeta) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        meta.select_columns().join(", "),
        meta.table(),
        meta.key().name
    )
}

/// INSERT over every non-key column; the key is store-generated.
pub fn insert(meta: &EntityMeta) -> String {
    let columns: Vec<&str> = meta.columns().iter().map(|c| c.name).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("?{n}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        meta.table(),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// UPDATE by primary key over every non-key column. The key binds last.
pub fn update_by_key(meta: &EntityMeta) -> String {
    let assignments: Vec<String> = meta
        .columns()
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ?{}", c.name, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        meta.table(),
        assignments.join(", "),
        meta.key().name,
        meta.columns().len() + 1
    )
}

/// DELETE by primary key.
pub fn delete_by_key(meta: &EntityMeta) -> String {
    format!("DELETE FROM {} WHERE {} = ?1", meta.table(), meta.key().name)
}

pub fn count(meta: &EntityMeta, filters: &[FilterCondition]) -> AppResult<String> {
    let mut sql = format!("SELECT COUNT(*) FROM {}", meta.table());
    push_where(&mut sql, meta, filters)?;
    Ok(sql)
}

pub fn exists(meta: &EntityMeta, filters: &[FilterCondition]) -> AppResult<String> {
    let mut inner = format!("SELECT 1 FROM {}", meta.table());
    push_where(&mut inner, meta, filters)?;
    Ok(format!("SELECT EXISTS({inner})"))
}

fn push_where(
    sql: &mut String,
    meta: &EntityMeta,
    filters: &[FilterCondition],
) -> AppResult<()> {
    if filters.is_empty() {
        return Ok(());
    }
    let mut predicates = Vec::with_capacity(filters.len());
    for (i, filter) in filters.iter().enumerate() {
        let column = resolve(meta, filter.field())?;
        predicates.push(format!("{} {} ?{}", column, filter.relation().sql_op(), i + 1));
    }
    sql.push_str(" WHERE ");
    sql.push_str(&predicates.join(" AND "));
    Ok(())
}

fn resolve(meta: &EntityMeta, field: &str) -> AppResult<&'static str> {
    meta.column_for_field(field)
        .ok_or_else(|| AppError::UnknownField {
            table: meta.table().to_string(),
            field: field.to_string(),
        })
}
