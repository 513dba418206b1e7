// src/domain/session.rs
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{MovieId, ScreeningRoomId, SessionId};
use crate::mapping::{codec, Column, Entity, EntityId, EntityMeta, SqlValue};

/// One screening slot of a movie in a room. The scheduling engine
/// generates a room's whole day at once; slots of the same room never
/// overlap in [start_time, start_time + extended_duration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,

    pub movie_id: MovieId,

    pub screening_room_id: ScreeningRoomId,

    pub date: NaiveDate,

    pub start_time: NaiveTime,

    /// Slot length in minutes: runtime plus breaks plus turnover.
    pub extended_duration: i64,
}

static META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("movie_id", "movie_id"),
        Column::new("screening_room_id", "screening_room_id"),
        Column::new("date", "date"),
        Column::new("start_time", "start_time"),
        Column::new("extended_duration", "extended_duration"),
    ];
    EntityMeta::new("Session", "session", Column::new("id", "id"), COLUMNS)
        .expect("session descriptor")
});

impl Session {
    pub fn new(
        movie_id: MovieId,
        screening_room_id: ScreeningRoomId,
        date: NaiveDate,
        start_time: NaiveTime,
        extended_duration: i64,
    ) -> Self {
        Self {
            id: SessionId::UNSET,
            movie_id,
            screening_room_id,
            date,
            start_time,
            extended_duration,
        }
    }
}

impl Entity for Session {
    type Id = SessionId;

    fn meta() -> &'static EntityMeta {
        &META
    }

    fn id(&self) -> SessionId {
        self.id
    }

    fn set_id(&mut self, id: SessionId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            movie_id: row.get(1)?,
            screening_room_id: row.get(2)?,
            date: codec::decode_date(row, 3)?,
            start_time: codec::decode_time(row, 4)?,
            extended_duration: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.movie_id.into(),
            self.screening_room_id.into(),
            self.date.into(),
            self.start_time.into(),
            self.extended_duration.into(),
        ]
    }
}
