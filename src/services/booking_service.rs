// src/services/booking_service.rs
//
// Atomic multi-seat booking and ticket payment.
//
// A booking is one transaction: the ticket row and every seat flip
// commit together or not at all; a partially reserved booking is never
// observable. Business failures inside the transaction are raised as
// errors so the rollback happens, then flattened to None/false at the
// public boundary.

use chrono::{Local, NaiveDate};
use log::{error, warn};

use crate::domain::{Discount, SeatAvailability, SeatAvailabilityId, Ticket};
use crate::error::{AppError, AppResult};
use crate::mapping::entity::Entity;
use crate::query::FilterCondition;
use crate::repositories::{
    get_by_id_on, get_filtered_on, insert_on, update_on, StoreGateway,
};

pub struct BookingService {
    gateway: StoreGateway,
}

impl BookingService {
    pub fn new(gateway: StoreGateway) -> Self {
        Self { gateway }
    }

    /// Reserve the given seats under one new ticket. Returns the ticket,
    /// or None when any seat cannot be taken (everything rolls back).
    pub fn book_seats(
        &self,
        seats: &[SeatAvailabilityId],
        total_price: f64,
    ) -> Option<Ticket> {
        let booking_date = Local::now().date_naive();
        match self.try_book_seats(seats, total_price, booking_date) {
            Ok(ticket) => Some(ticket),
            Err(err) => {
                error!("booking of {} seats rolled back: {err}", seats.len());
                None
            }
        }
    }

    /// Transactional core of [`book_seats`]. Any Err means the whole
    /// reservation rolled back.
    pub fn try_book_seats(
        &self,
        seats: &[SeatAvailabilityId],
        total_price: f64,
        booking_date: NaiveDate,
    ) -> AppResult<Ticket> {
        if seats.is_empty() {
            return Err(AppError::Persistence(
                "a booking needs at least one seat".to_string(),
            ));
        }

        self.gateway.with_transaction(|tx| {
            let price = discounted_price_on(tx, total_price, booking_date)?;

            let mut ticket = Ticket::new(seats.len() as i64, price);
            let ticket_id = insert_on(tx, &ticket)?;
            ticket.set_id(ticket_id);

            for &availability_id in seats {
                let mut availability = get_by_id_on::<SeatAvailability>(tx, availability_id)?
                    .ok_or_else(|| {
                        AppError::Persistence(format!(
                            "seat availability {availability_id} does not exist"
                        ))
                    })?;
                if !availability.is_available {
                    return Err(AppError::Persistence(format!(
                        "seat availability {availability_id} is already booked"
                    )));
                }

                availability.is_available = false;
                availability.ticket_id = Some(ticket_id);
                if !update_on(tx, &availability)? {
                    return Err(AppError::Persistence(format!(
                        "seat availability {availability_id} update affected no rows"
                    )));
                }
            }

            Ok(ticket)
        })
    }

    /// Flip a ticket to paid, once. False for an unknown code or a
    /// ticket that is already paid.
    pub fn mark_paid(&self, ticket_code: &str) -> bool {
        match self.try_mark_paid(ticket_code) {
            Ok(paid) => paid,
            Err(err) => {
                error!("payment of ticket {ticket_code} rolled back: {err}");
                false
            }
        }
    }

    pub fn try_mark_paid(&self, ticket_code: &str) -> AppResult<bool> {
        self.gateway.with_transaction(|tx| {
            let Some(mut ticket) = ticket_by_code_on(tx, ticket_code)? else {
                warn!("unknown ticket code {ticket_code}");
                return Ok(false);
            };
            if ticket.is_paid {
                return Ok(false);
            }

            ticket.is_paid = true;
            if !update_on(tx, &ticket)? {
                return Err(AppError::Persistence(format!(
                    "ticket {} payment update affected no rows",
                    ticket.code
                )));
            }
            Ok(true)
        })
    }
}

/// Look up a ticket by its customer-facing code.
pub(crate) fn ticket_by_code_on(
    tx: &rusqlite::Connection,
    code: &str,
) -> AppResult<Option<Ticket>> {
    let tickets = get_filtered_on::<Ticket>(tx, &[FilterCondition::eq("code", code)], None)?;
    Ok(tickets.into_iter().next())
}

/// Apply the day's discount, if any, to a booking total.
fn discounted_price_on(
    tx: &rusqlite::Connection,
    total_price: f64,
    booking_date: NaiveDate,
) -> AppResult<f64> {
    let discounts =
        get_filtered_on::<Discount>(tx, &[FilterCondition::eq("date", booking_date)], None)?;
    Ok(match discounts.first() {
        Some(discount) => total_price * (1.0 - discount.ratio),
        None => total_price,
    })
}
