// src/repositories/gateway.rs
//
// Generic store gateway.
//
// Every public operation takes one pooled connection for exactly its own
// duration; the pool reclaims it on drop on every exit path. The same
// primitives exist as `*_on` free functions over a borrowed connection
// so transactional workflows can drive several of them inside one
// rusqlite transaction (drop = rollback, explicit commit).

use std::sync::Arc;

use rusqlite::{params_from_iter, Connection, Transaction};

use crate::db::ConnectionPool;
use crate::error::{AppError, AppResult};
use crate::mapping::{Entity, EntityId, SqlValue};
use crate::query::builder;
use crate::query::{FilterCondition, SortKey};

/// Fetch every row of the entity's table.
pub fn get_all_on<E: Entity>(conn: &Connection) -> AppResult<Vec<E>> {
    get_filtered_on(conn, &[], None)
}

/// Fetch rows matching every filter, optionally sorted. Zero matches is
/// an empty Vec, never an error.
pub fn get_filtered_on<E: Entity>(
    conn: &Connection,
    filters: &[FilterCondition],
    sort: Option<SortKey>,
) -> AppResult<Vec<E>> {
    let sql = builder::select(E::meta(), filters, sort)?;
    let binds: Vec<SqlValue> = filters.iter().map(FilterCondition::bind_value).collect();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(binds.iter()), E::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Fetch one row by primary key; absence is None, never an error.
pub fn get_by_id_on<E: Entity>(conn: &Connection, id: E::Id) -> AppResult<Option<E>> {
    let sql = builder::select_by_key(E::meta());
    let mut stmt = conn.prepare(&sql)?;
    match stmt.query_row([id.raw()], E::from_row) {
        Ok(entity) => Ok(Some(entity)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(AppError::Database(e)),
    }
}

/// True when at least one row matches every filter.
pub fn exists_on<E: Entity>(conn: &Connection, filters: &[FilterCondition]) -> AppResult<bool> {
    let sql = builder::exists(E::meta(), filters)?;
    let binds: Vec<SqlValue> = filters.iter().map(FilterCondition::bind_value).collect();
    let found: bool = conn.query_row(&sql, params_from_iter(binds.iter()), |row| row.get(0))?;
    Ok(found)
}

/// Number of rows matching every filter.
pub fn count_on<E: Entity>(conn: &Connection, filters: &[FilterCondition]) -> AppResult<i64> {
    let sql = builder::count(E::meta(), filters)?;
    let binds: Vec<SqlValue> = filters.iter().map(FilterCondition::bind_value).collect();
    let count: i64 = conn.query_row(&sql, params_from_iter(binds.iter()), |row| row.get(0))?;
    Ok(count)
}

/// Insert over every non-key column and return the store-generated key.
pub fn insert_on<E: Entity>(conn: &Connection, entity: &E) -> AppResult<E::Id> {
    let sql = builder::insert(E::meta());
    let values = entity.values();
    let affected = conn.execute(&sql, params_from_iter(values.iter()))?;
    if affected == 0 {
        return Err(AppError::Persistence(format!(
            "insert into {} affected no rows",
            E::meta().table()
        )));
    }
    let raw = conn.last_insert_rowid();
    if raw == 0 {
        return Err(AppError::Persistence(format!(
            "insert into {} returned no generated key",
            E::meta().table()
        )));
    }
    Ok(E::Id::from_raw(raw))
}

/// Update every non-key column by primary key; returns whether at least
/// one row was affected.
pub fn update_on<E: Entity>(conn: &Connection, entity: &E) -> AppResult<bool> {
    let sql = builder::update_by_key(E::meta());
    let mut binds = entity.values();
    binds.push(SqlValue::Int(entity.id().raw()));
    let affected = conn.execute(&sql, params_from_iter(binds.iter()))?;
    Ok(affected > 0)
}

/// Delete by primary key; returns whether at least one row was affected.
pub fn delete_by_id_on<E: Entity>(conn: &Connection, id: E::Id) -> AppResult<bool> {
    let sql = builder::delete_by_key(E::meta());
    let affected = conn.execute(&sql, [id.raw()])?;
    Ok(affected > 0)
}

/// Pool-backed facade over the `*_on` primitives. Cloneable; clones
/// share the pool.
#[derive(Clone)]
pub struct StoreGateway {
    pool: Arc<ConnectionPool>,
}

impl StoreGateway {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub fn get_all<E: Entity>(&self) -> AppResult<Vec<E>> {
        let conn = self.pool.get()?;
        get_all_on(&conn)
    }

    pub fn get_filtered<E: Entity>(
        &self,
        filters: &[FilterCondition],
        sort: Option<SortKey>,
    ) -> AppResult<Vec<E>> {
        let conn = self.pool.get()?;
        get_filtered_on(&conn, filters, sort)
    }

    pub fn get_by_id<E: Entity>(&self, id: E::Id) -> AppResult<Option<E>> {
        let conn = self.pool.get()?;
        get_by_id_on(&conn, id)
    }

    pub fn exists<E: Entity>(&self, filters: &[FilterCondition]) -> AppResult<bool> {
        let conn = self.pool.get()?;
        exists_on::<E>(&conn, filters)
    }

    pub fn count<E: Entity>(&self, filters: &[FilterCondition]) -> AppResult<i64> {
        let conn = self.pool.get()?;
        count_on::<E>(&conn, filters)
    }

    pub fn insert<E: Entity>(&self, entity: &E) -> AppResult<E::Id> {
        let conn = self.pool.get()?;
        insert_on(&conn, entity)
    }

    pub fn update<E: Entity>(&self, entity: &E) -> AppResult<bool> {
        let conn = self.pool.get()?;
        update_on(&conn, entity)
    }

    pub fn delete_by_id<E: Entity>(&self, id: E::Id) -> AppResult<bool> {
        let conn = self.pool.get()?;
        delete_by_id_on::<E>(&conn, id)
    }

    /// Run `f` inside one transaction on one pooled connection.
    /// Commits only when `f` returns Ok; an Err drops the transaction,
    /// which rolls back, and the connection returns to the pool either
    /// way.
    pub fn with_transaction<T>(
        &self,
        f: impl FnOnce(&Transaction) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
