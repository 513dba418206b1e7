// src/services/mod.rs
//
// Services Module - Transactional workflows over the store gateway

pub mod booking_service;
pub mod rating_service;
pub mod scheduling_service;

pub use booking_service::BookingService;

pub use rating_service::{RatingService, RATING_LOWER_LIMIT, RATING_UPPER_LIMIT};

pub use scheduling_service::{extended_duration, RoomHours, SchedulingService};
