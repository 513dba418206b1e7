// src/mapping/entity.rs
//
// Explicit per-entity schema descriptors.
//
// Each entity type declares its table name, primary-key column and an
// ordered list of non-key columns once, in a static descriptor. The
// order is load-bearing: INSERT/UPDATE parameter lists and row decoding
// both consume it verbatim, so it must come out identical on every call.

use std::fmt;

use rusqlite::Row;
use thiserror::Error;

use super::codec::SqlValue;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("entity `{0}` declares no table name")]
    MissingTable(&'static str),

    #[error("entity `{0}` declares no columns")]
    NoColumns(&'static str),

    #[error("entity `{entity}` declares the primary key `{column}` more than once")]
    DuplicateKey {
        entity: &'static str,
        column: &'static str,
    },

    #[error("entity `{entity}` declares column `{column}` twice")]
    DuplicateColumn {
        entity: &'static str,
        column: &'static str,
    },
}

/// One column mapping: the store column name (snake_case) and the entity
/// field it populates. The descriptor is the sole translation point
/// between the two namings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub field: &'static str,
}

impl Column {
    pub const fn new(name: &'static str, field: &'static str) -> Self {
        Self { name, field }
    }
}

/// Schema descriptor for one entity type, validated at construction.
#[derive(Debug)]
pub struct EntityMeta {
    entity: &'static str,
    table: &'static str,
    key: Column,
    columns: &'static [Column],
}

impl EntityMeta {
    pub fn new(
        entity: &'static str,
        table: &'static str,
        key: Column,
        columns: &'static [Column],
    ) -> Result<Self, MetadataError> {
        if table.is_empty() {
            return Err(MetadataError::MissingTable(entity));
        }
        if columns.is_empty() {
            return Err(MetadataError::NoColumns(entity));
        }
        for (i, column) in columns.iter().enumerate() {
            if column.name == key.name {
                return Err(MetadataError::DuplicateKey {
                    entity,
                    column: column.name,
                });
            }
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(MetadataError::DuplicateColumn {
                    entity,
                    column: column.name,
                });
            }
        }
        Ok(Self {
            entity,
            table,
            key,
            columns,
        })
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn key(&self) -> Column {
        self.key
    }

    /// Non-key columns, in declaration order.
    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    /// Column names for a full-row SELECT: the key first, then the
    /// non-key columns in declaration order. `Entity::from_row` reads
    /// columns in exactly this layout.
    pub fn select_columns(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(1 + self.columns.len());
        names.push(self.key.name);
        names.extend(self.columns.iter().map(|c| c.name));
        names
    }

    /// Resolve a field reference from the filter DSL to its column name.
    pub fn column_for_field(&self, field: &str) -> Option<&'static str> {
        if self.key.field == field {
            return Some(self.key.name);
        }
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.name)
    }
}

/// Typed primary-key wrapper. Keeps ids of different entities from
/// being confused at call sites while storing as a plain integer.
pub trait EntityId: Copy + Eq + fmt::Debug + fmt::Display {
    /// Sentinel for an entity not yet persisted; SQLite rowids start at 1.
    const UNSET: Self;

    fn from_raw(raw: i64) -> Self;
    fn raw(self) -> i64;
}

/// A plain record type mapped to one store table.
pub trait Entity: Sized {
    type Id: EntityId;

    fn meta() -> &'static EntityMeta;

    fn id(&self) -> Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// Decode a result row laid out per [`EntityMeta::select_columns`]:
    /// key at index 0, then non-key columns in descriptor order.
    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    /// Non-key column values in descriptor order, for INSERT/UPDATE
    /// parameter binding.
    fn values(&self) -> Vec<SqlValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[Column] = &[
        Column::new("name", "name"),
        Column::new("release_date", "release_date"),
    ];

    #[test]
    fn valid_descriptor_keeps_declaration_order() {
        let meta = EntityMeta::new("Probe", "probe", Column::new("id", "id"), COLUMNS).unwrap();
        assert_eq!(meta.table(), "probe");
        assert_eq!(meta.select_columns(), vec!["id", "name", "release_date"]);
    }

    #[test]
    fn empty_table_name_is_rejected() {
        let err = EntityMeta::new("Probe", "", Column::new("id", "id"), COLUMNS).unwrap_err();
        assert_eq!(err, MetadataError::MissingTable("Probe"));
    }

    #[test]
    fn descriptor_without_columns_is_rejected() {
        let err = EntityMeta::new("Probe", "probe", Column::new("id", "id"), &[]).unwrap_err();
        assert_eq!(err, MetadataError::NoColumns("Probe"));
    }

    #[test]
    fn repeated_primary_key_is_rejected() {
        const DOUBLED: &[Column] = &[Column::new("id", "id"), Column::new("name", "name")];
        let err = EntityMeta::new("Probe", "probe", Column::new("id", "id"), DOUBLED).unwrap_err();
        assert_eq!(
            err,
            MetadataError::DuplicateKey {
                entity: "Probe",
                column: "id"
            }
        );
    }

    #[test]
    fn repeated_column_is_rejected() {
        const DOUBLED: &[Column] = &[Column::new("name", "name"), Column::new("name", "title")];
        let err = EntityMeta::new("Probe", "probe", Column::new("id", "id"), DOUBLED).unwrap_err();
        assert_eq!(
            err,
            MetadataError::DuplicateColumn {
                entity: "Probe",
                column: "name"
            }
        );
    }

    #[test]
    fn field_resolution_covers_key_and_columns() {
        let meta = EntityMeta::new("Probe", "probe", Column::new("id", "id"), COLUMNS).unwrap();
        assert_eq!(meta.column_for_field("id"), Some("id"));
        assert_eq!(meta.column_for_field("release_date"), Some("release_date"));
        assert_eq!(meta.column_for_field("releaseDate"), None);
    }
}
