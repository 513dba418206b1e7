// src/domain/room.rs
use once_cell::sync::Lazy;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ScreeningRoomId, SeatId};
use crate::mapping::{Column, Entity, EntityId, EntityMeta, SqlValue};

/// A screening room with a fixed rectangular seat grid. The grid
/// dimensions never change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRoom {
    pub id: ScreeningRoomId,
    pub seat_row_count: i64,
    pub seat_col_count: i64,
}

static ROOM_META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("seat_row_count", "seat_row_count"),
        Column::new("seat_col_count", "seat_col_count"),
    ];
    EntityMeta::new(
        "ScreeningRoom",
        "screening_room",
        Column::new("id", "id"),
        COLUMNS,
    )
    .expect("screening_room descriptor")
});

impl ScreeningRoom {
    pub fn new(seat_row_count: i64, seat_col_count: i64) -> Self {
        Self {
            id: ScreeningRoomId::UNSET,
            seat_row_count,
            seat_col_count,
        }
    }
}

impl Entity for ScreeningRoom {
    type Id = ScreeningRoomId;

    fn meta() -> &'static EntityMeta {
        &ROOM_META
    }

    fn id(&self) -> ScreeningRoomId {
        self.id
    }

    fn set_id(&mut self, id: ScreeningRoomId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            seat_row_count: row.get(1)?,
            seat_col_count: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.seat_row_count.into(), self.seat_col_count.into()]
    }
}

/// One physical seat. (room, row, col) is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub screening_room_id: ScreeningRoomId,
    pub row: i64,
    pub col: i64,
}

static SEAT_META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("screening_room_id", "screening_room_id"),
        Column::new("row", "row"),
        Column::new("col", "col"),
    ];
    EntityMeta::new("Seat", "seat", Column::new("id", "id"), COLUMNS)
        .expect("seat descriptor")
});

impl Seat {
    pub fn new(screening_room_id: ScreeningRoomId, row: i64, col: i64) -> Self {
        Self {
            id: SeatId::UNSET,
            screening_room_id,
            row,
            col,
        }
    }
}

impl Entity for Seat {
    type Id = SeatId;

    fn meta() -> &'static EntityMeta {
        &SEAT_META
    }

    fn id(&self) -> SeatId {
        self.id
    }

    fn set_id(&mut self, id: SeatId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            screening_room_id: row.get(1)?,
            row: row.get(2)?,
            col: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.screening_room_id.into(),
            self.row.into(),
            self.col.into(),
        ]
    }
}
