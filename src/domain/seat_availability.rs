// src/domain/seat_availability.rs
use once_cell::sync::Lazy;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{SeatAvailabilityId, SeatId, SessionId, TicketId};
use crate::mapping::{Column, Entity, EntityId, EntityMeta, SqlValue};

/// Booking state of one seat in one session. Exactly one row exists per
/// (seat, session); `is_available` flips to false once, when a ticket
/// claims the seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatAvailability {
    pub id: SeatAvailabilityId,

    pub is_available: bool,

    /// Set by the booking workflow; open seats carry no ticket.
    pub ticket_id: Option<TicketId>,

    pub session_id: SessionId,

    pub seat_id: SeatId,
}

static META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("is_available", "is_available"),
        Column::new("ticket_id", "ticket_id"),
        Column::new("session_id", "session_id"),
        Column::new("seat_id", "seat_id"),
    ];
    EntityMeta::new(
        "SeatAvailability",
        "seat_availability",
        Column::new("id", "id"),
        COLUMNS,
    )
    .expect("seat_availability descriptor")
});

impl SeatAvailability {
    /// A freshly seeded, unclaimed seat for a new session.
    pub fn open(session_id: SessionId, seat_id: SeatId) -> Self {
        Self {
            id: SeatAvailabilityId::UNSET,
            is_available: true,
            ticket_id: None,
            session_id,
            seat_id,
        }
    }
}

impl Entity for SeatAvailability {
    type Id = SeatAvailabilityId;

    fn meta() -> &'static EntityMeta {
        &META
    }

    fn id(&self) -> SeatAvailabilityId {
        self.id
    }

    fn set_id(&mut self, id: SeatAvailabilityId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            is_available: row.get(1)?,
            ticket_id: row.get(2)?,
            session_id: row.get(3)?,
            seat_id: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.is_available.into(),
            self.ticket_id.into(),
            self.session_id.into(),
            self.seat_id.into(),
        ]
    }
}
