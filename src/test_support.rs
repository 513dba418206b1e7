// src/test_support.rs
//
// Shared fixtures for integration-style tests: a pooled store over a
// temporary database file, initialized with the real schema.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::db::{create_connection_pool_at, initialize_database};
use crate::domain::{Movie, MovieId, ScreeningRoom, ScreeningRoomId, Seat, SeatId};
use crate::repositories::StoreGateway;

/// A fresh store in a temp directory. Keep the TempDir alive for the
/// duration of the test; dropping it deletes the database file.
pub(crate) fn test_store() -> (TempDir, StoreGateway) {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_connection_pool_at(&dir.path().join("kiosk.db")).unwrap();
    let conn = pool.get().unwrap();
    initialize_database(&conn).unwrap();
    drop(conn);
    (dir, StoreGateway::new(Arc::new(pool)))
}

pub(crate) fn seed_movie(gateway: &StoreGateway, name: &str, duration: i64) -> MovieId {
    let movie = Movie::new(
        name.to_string(),
        duration,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
    );
    gateway.insert(&movie).unwrap()
}

/// A room plus its full rectangular seat grid; returns the room id and
/// the seat ids in row-major order.
pub(crate) fn seed_room_with_seats(
    gateway: &StoreGateway,
    rows: i64,
    cols: i64,
) -> (ScreeningRoomId, Vec<SeatId>) {
    let room_id = gateway.insert(&ScreeningRoom::new(rows, cols)).unwrap();
    let mut seat_ids = Vec::new();
    for row in 1..=rows {
        for col in 1..=cols {
            seat_ids.push(gateway.insert(&Seat::new(room_id, row, col)).unwrap());
        }
    }
    (room_id, seat_ids)
}
