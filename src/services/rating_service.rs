// src/services/rating_service.rs
//
// Incremental movie-rating aggregation tied to ticket consumption.
//
// One rated ticket contributes its seat count as weight to the movie's
// running mean. The movie update and the ticket's rated flag commit in
// the same transaction; a ticket rates at most once.

use log::{debug, error};

use crate::domain::{Movie, Session, SeatAvailability};
use crate::error::{AppError, AppResult};
use crate::query::FilterCondition;
use crate::repositories::{get_by_id_on, get_filtered_on, update_on, StoreGateway};
use crate::services::booking_service::ticket_by_code_on;

pub const RATING_LOWER_LIMIT: f64 = 1.0;
pub const RATING_UPPER_LIMIT: f64 = 5.0;

pub struct RatingService {
    gateway: StoreGateway,
}

impl RatingService {
    pub fn new(gateway: StoreGateway) -> Self {
        Self { gateway }
    }

    /// Fold one ticket's rating into its movie. False when the rating
    /// is out of bounds, the code is unknown, the ticket is unpaid or
    /// already rated, or the transaction rolled back.
    pub fn add_rating(&self, ticket_code: &str, rating: f64) -> bool {
        match self.try_add_rating(ticket_code, rating) {
            Ok(applied) => applied,
            Err(err) => {
                error!("rating of ticket {ticket_code} rolled back: {err}");
                false
            }
        }
    }

    pub fn try_add_rating(&self, ticket_code: &str, rating: f64) -> AppResult<bool> {
        // reject out-of-bounds input before touching the store
        if !(RATING_LOWER_LIMIT..=RATING_UPPER_LIMIT).contains(&rating) {
            debug!("rating {rating} outside [{RATING_LOWER_LIMIT}, {RATING_UPPER_LIMIT}]");
            return Ok(false);
        }

        self.gateway.with_transaction(|tx| {
            let Some(mut ticket) = ticket_by_code_on(tx, ticket_code)? else {
                debug!("unknown ticket code {ticket_code}");
                return Ok(false);
            };
            if !ticket.is_paid || ticket.is_rated {
                debug!("ticket {ticket_code} is not ratable");
                return Ok(false);
            }

            // the movie is reached through any of the ticket's seats
            let Some(availability) = get_filtered_on::<SeatAvailability>(
                tx,
                &[FilterCondition::eq("ticket_id", ticket.id)],
                None,
            )?
            .into_iter()
            .next() else {
                debug!("ticket {ticket_code} has no seats");
                return Ok(false);
            };
            let session = get_by_id_on::<Session>(tx, availability.session_id)?.ok_or_else(
                || AppError::Persistence(format!("session {} does not exist", availability.session_id)),
            )?;
            let mut movie = get_by_id_on::<Movie>(tx, session.movie_id)?.ok_or_else(|| {
                AppError::Persistence(format!("movie {} does not exist", session.movie_id))
            })?;

            movie.apply_rating(rating, ticket.seat_count);
            ticket.is_rated = true;

            if !update_on(tx, &movie)? {
                return Err(AppError::Persistence(format!(
                    "movie {} rating update affected no rows",
                    movie.id
                )));
            }
            if !update_on(tx, &ticket)? {
                return Err(AppError::Persistence(format!(
                    "ticket {} rated flag update affected no rows",
                    ticket.code
                )));
            }

            Ok(true)
        })
    }
}
