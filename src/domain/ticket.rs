// src/domain/ticket.rs
use once_cell::sync::Lazy;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ids::TicketId;
use crate::mapping::{Column, Entity, EntityId, EntityMeta, SqlValue};

/// One purchase covering `seat_count` seats of a single session.
///
/// The `code` is the customer-facing identifier and the only one the
/// presentation layer hands back into workflows; the integer primary
/// key never leaves the core. `is_rated` flips true at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,

    pub is_rated: bool,

    /// Matches the number of seat-availability rows claimed by this
    /// ticket, and weights the ticket's rating contribution.
    pub seat_count: i64,

    pub is_paid: bool,

    pub code: String,

    /// Final price after any date discount.
    pub price: f64,
}

static META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("is_rated", "is_rated"),
        Column::new("seat_count", "seat_count"),
        Column::new("is_paid", "is_paid"),
        Column::new("code", "code"),
        Column::new("price", "price"),
    ];
    EntityMeta::new("Ticket", "ticket", Column::new("id", "id"), COLUMNS)
        .expect("ticket descriptor")
});

impl Ticket {
    /// A fresh, unpaid, unrated ticket with a generated customer code.
    pub fn new(seat_count: i64, price: f64) -> Self {
        Self {
            id: TicketId::UNSET,
            is_rated: false,
            seat_count,
            is_paid: false,
            code: Uuid::new_v4().simple().to_string(),
            price,
        }
    }
}

impl Entity for Ticket {
    type Id = TicketId;

    fn meta() -> &'static EntityMeta {
        &META
    }

    fn id(&self) -> TicketId {
        self.id
    }

    fn set_id(&mut self, id: TicketId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            is_rated: row.get(1)?,
            seat_count: row.get(2)?,
            is_paid: row.get(3)?,
            code: row.get(4)?,
            price: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.is_rated.into(),
            self.seat_count.into(),
            self.is_paid.into(),
            self.code.as_str().into(),
            self.price.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tickets_are_unpaid_and_unrated() {
        let ticket = Ticket::new(3, 45.0);
        assert!(!ticket.is_paid);
        assert!(!ticket.is_rated);
        assert_eq!(ticket.seat_count, 3);
        assert!(!ticket.code.is_empty());
    }

    #[test]
    fn codes_are_unique_per_ticket() {
        let a = Ticket::new(1, 15.0);
        let b = Ticket::new(1, 15.0);
        assert_ne!(a.code, b.code);
    }
}
