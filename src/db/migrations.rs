// src/db/migrations.rs
//
// Database schema initialization.
//
// Explicit schema versions, no automatic migrations, idempotent setup.

use crate::error::{AppError, AppResult};
use rusqlite::Connection;

/// Current schema version.
/// Increment this when adding migrations.
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
///
/// Checks the recorded version, applies the initial schema on a fresh
/// database, and refuses to run against a version it does not know.
/// Safe to call multiple times.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        set_schema_version(conn, 1)?;
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {current_version} is outdated. Expected {CURRENT_SCHEMA_VERSION}. Manual migration required."
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {current_version} is newer than supported {CURRENT_SCHEMA_VERSION}. Update the application."
        )));
    }

    Ok(())
}

/// Get the current schema version.
/// Returns 0 if the schema_version table doesn't exist (fresh database).
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(AppError::Database)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(AppError::Database)?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(AppError::Database)?;

    Ok(())
}

/// Apply the initial schema (version 1), embedded from schema.sql.
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {e}")))?;

    Ok(())
}

/// Verify database integrity via SQLite's own check.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {result}"
        )));
    }

    Ok(())
}

/// Row counts and file size, for debugging and monitoring.
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn
        .query_row("PRAGMA page_count", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    let page_size: i64 = conn
        .query_row("PRAGMA page_size", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    let size_bytes = page_count * page_size;

    let movie_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM movie", [], |row| row.get(0))
        .unwrap_or(0);

    let session_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM session", [], |row| row.get(0))
        .unwrap_or(0);

    let ticket_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM ticket", [], |row| row.get(0))
        .unwrap_or(0);

    Ok(DatabaseStats {
        size_bytes,
        page_count,
        page_size,
        movie_count,
        session_count,
        ticket_count,
    })
}

/// Database statistics
#[derive(Debug)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub movie_count: i64,
    pub session_count: i64,
    pub ticket_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        // schema_version plus the nine entity tables
        assert_eq!(table_count, 10, "unexpected table count {table_count}");
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        // A session pointing at a missing movie and room must be refused
        let result = conn.execute(
            "INSERT INTO session (movie_id, screening_room_id, date, start_time, extended_duration)
             VALUES (999, 999, '2026-01-01', '09:00:00', 150)",
            [],
        );

        assert!(result.is_err(), "Foreign key constraint should have been violated");
    }

    #[test]
    fn test_seat_grid_uniqueness() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        conn.execute(
            "INSERT INTO screening_room (seat_row_count, seat_col_count) VALUES (5, 5)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO seat (screening_room_id, row, col) VALUES (1, 1, 1)",
            [],
        )
        .unwrap();

        let duplicate = conn.execute(
            "INSERT INTO seat (screening_room_id, row, col) VALUES (1, 1, 1)",
            [],
        );

        assert!(duplicate.is_err(), "duplicate seat position should be rejected");
    }

    #[test]
    fn test_database_stats() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();

        assert!(stats.size_bytes > 0);
        assert_eq!(stats.movie_count, 0);
        assert_eq!(stats.session_count, 0);
        assert_eq!(stats.ticket_count, 0);
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }
}
