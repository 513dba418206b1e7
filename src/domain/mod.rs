// src/domain/mod.rs
//
// Domain entities
//
// Plain records, one per store table. Cross-entity navigation is always
// a fresh filtered query on a foreign-key id; no entity holds an
// in-memory pointer to another.

pub mod discount;
pub mod genre;
pub mod ids;
pub mod movie;
pub mod room;
pub mod seat_availability;
pub mod session;
pub mod ticket;

pub use discount::Discount;
pub use genre::{Genre, MovieGenre};
pub use ids::{
    DiscountId, GenreId, MovieGenreId, MovieId, ScreeningRoomId, SeatAvailabilityId, SeatId,
    SessionId, TicketId,
};
pub use movie::Movie;
pub use room::{ScreeningRoom, Seat};
pub use seat_availability::SeatAvailability;
pub use session::Session;
pub use ticket::Ticket;
