// src/domain/ids.rs
//
// Typed primary-key wrappers, one per entity. The storage representation
// stays a plain integer; the wrapper only exists so a MovieId cannot be
// handed to a call site expecting a SeatId. The store's auto-generated
// key is the sole id source: entities start at `UNSET` and receive their
// id from the gateway on insert.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

use crate::mapping::{EntityId, SqlValue};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl EntityId for $name {
            const UNSET: Self = Self(0);

            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(self) -> i64 {
                self.0
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map($name)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl From<$name> for SqlValue {
            fn from(id: $name) -> Self {
                SqlValue::Int(id.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(MovieId);
entity_id!(GenreId);
entity_id!(MovieGenreId);
entity_id!(ScreeningRoomId);
entity_id!(SeatId);
entity_id!(SessionId);
entity_id!(SeatAvailabilityId);
entity_id!(TicketId);
entity_id!(DiscountId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_raw() {
        let id = MovieId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id, MovieId(42));
    }

    #[test]
    fn unset_marks_unpersisted_entities() {
        assert_eq!(TicketId::UNSET.raw(), 0);
    }
}
