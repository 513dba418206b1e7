// src/lib.rs
// CineKiosk - Ticket-kiosk data core for a small cinema chain
//
// Architecture:
// - Explicit: per-entity schema descriptors, no runtime introspection
// - One pooled connection per logical operation, released on every path
// - Workflows span several gateway calls inside one transaction
// - The presentation layer sees values, collections and bool/None
//   failure signals; it never inspects error types

pub mod db;
pub mod domain;
pub mod error;
pub mod mapping;
pub mod query;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    Discount,
    DiscountId,
    Genre,
    GenreId,
    Movie,
    MovieGenre,
    MovieGenreId,
    MovieId,
    ScreeningRoom,
    ScreeningRoomId,
    Seat,
    SeatAvailability,
    SeatAvailabilityId,
    SeatId,
    Session,
    SessionId,
    Ticket,
    TicketId,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Mapping & Queries
// ============================================================================

pub use mapping::{CodecError, Entity, EntityId, EntityMeta, MetadataError, SqlValue};

pub use query::{FilterCondition, Relation, SortKey};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_connection_pool_at, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Store Gateway
// ============================================================================

pub use repositories::StoreGateway;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    BookingService,
    RatingService,
    RoomHours,
    SchedulingService,
    RATING_LOWER_LIMIT,
    RATING_UPPER_LIMIT,
};
