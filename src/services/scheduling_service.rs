// src/services/scheduling_service.rs
//
// Automatic session-slot scheduling.
//
// A room's day is generated in one shot: the opening-to-closing window
// is partitioned into back-to-back slots of the movie's extended
// duration, and the whole batch (sessions plus their seat-availability
// rows) lands in a single transaction.

use chrono::{Duration, NaiveDate, NaiveTime};
use log::{error, warn};

use crate::domain::{Movie, MovieId, ScreeningRoomId, Seat, SeatAvailability, Session};
use crate::error::{AppError, AppResult};
use crate::mapping::entity::Entity;
use crate::query::FilterCondition;
use crate::repositories::{
    delete_by_id_on, exists_on, get_by_id_on, get_filtered_on, insert_on, StoreGateway,
};

/// Minutes of break added per full hour of runtime.
const BREAK_PER_HOUR: i64 = 10;

/// Turnover gap between screenings, in minutes.
const TURNOVER: i64 = 30;

/// Daily screening window of a room.
#[derive(Debug, Clone, Copy)]
pub struct RoomHours {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
}

impl Default for RoomHours {
    fn default() -> Self {
        Self {
            opening: NaiveTime::from_hms_opt(9, 0, 0).expect("valid opening time"),
            closing: NaiveTime::from_hms_opt(23, 59, 0).expect("valid closing time"),
        }
    }
}

/// Slot length for a movie: runtime, plus a break per full hour of
/// runtime, plus the turnover gap.
pub fn extended_duration(movie_duration: i64) -> i64 {
    movie_duration + BREAK_PER_HOUR * (movie_duration / 60) + TURNOVER
}

pub struct SchedulingService {
    gateway: StoreGateway,
    hours: RoomHours,
}

impl SchedulingService {
    pub fn new(gateway: StoreGateway) -> Self {
        Self {
            gateway,
            hours: RoomHours::default(),
        }
    }

    pub fn with_hours(gateway: StoreGateway, hours: RoomHours) -> Self {
        Self { gateway, hours }
    }

    /// Generate the room's sessions for one day. Returns the created
    /// sessions, or None when the day is already scheduled or the batch
    /// rolled back.
    pub fn generate_sessions(
        &self,
        room_id: ScreeningRoomId,
        movie_id: MovieId,
        date: NaiveDate,
    ) -> Option<Vec<Session>> {
        match self.try_generate_sessions(room_id, movie_id, date) {
            Ok(sessions) => sessions,
            Err(err) => {
                error!("session generation for room {room_id} on {date} rolled back: {err}");
                None
            }
        }
    }

    /// Transactional core of [`generate_sessions`]. Ok(None) means the
    /// room/date is already scheduled (no mutation); an Err means the
    /// transaction rolled back and no session of the batch exists.
    pub fn try_generate_sessions(
        &self,
        room_id: ScreeningRoomId,
        movie_id: MovieId,
        date: NaiveDate,
    ) -> AppResult<Option<Vec<Session>>> {
        self.gateway.with_transaction(|tx| {
            // One movie-day per room is exclusive
            let taken = exists_on::<Session>(
                tx,
                &[
                    FilterCondition::eq("screening_room_id", room_id),
                    FilterCondition::eq("date", date),
                ],
            )?;
            if taken {
                warn!("room {room_id} already has sessions on {date}");
                return Ok(None);
            }

            let movie = get_by_id_on::<Movie>(tx, movie_id)?.ok_or_else(|| {
                AppError::Persistence(format!("movie {movie_id} does not exist"))
            })?;
            let slot = extended_duration(movie.duration);

            let seats = get_filtered_on::<Seat>(
                tx,
                &[FilterCondition::eq("screening_room_id", room_id)],
                None,
            )?;

            let mut sessions = Vec::new();
            let mut start = self.hours.opening;
            loop {
                // overflowing_add_signed reports seconds wrapped past midnight
                let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(slot));
                // the tail must land strictly before closing, same day
                if wrapped != 0 || end >= self.hours.closing {
                    break;
                }

                let mut session = Session::new(movie_id, room_id, date, start, slot);
                let session_id = insert_on(tx, &session)?;
                session.set_id(session_id);

                for seat in &seats {
                    insert_on(tx, &SeatAvailability::open(session_id, seat.id))?;
                }

                sessions.push(session);
                start = end;
            }

            Ok(Some(sessions))
        })
    }

    /// Delete a room's sessions for one day, together with their seat
    /// rows, in one transaction. Refuses when the day has no sessions
    /// or any seat of the day is already booked.
    pub fn clear_day(&self, room_id: ScreeningRoomId, date: NaiveDate) -> bool {
        match self.try_clear_day(room_id, date) {
            Ok(cleared) => cleared,
            Err(err) => {
                error!("clearing room {room_id} on {date} rolled back: {err}");
                false
            }
        }
    }

    pub fn try_clear_day(&self, room_id: ScreeningRoomId, date: NaiveDate) -> AppResult<bool> {
        self.gateway.with_transaction(|tx| {
            let sessions = get_filtered_on::<Session>(
                tx,
                &[
                    FilterCondition::eq("screening_room_id", room_id),
                    FilterCondition::eq("date", date),
                ],
                None,
            )?;
            if sessions.is_empty() {
                return Ok(false);
            }

            for session in &sessions {
                let booked = exists_on::<SeatAvailability>(
                    tx,
                    &[
                        FilterCondition::eq("session_id", session.id),
                        FilterCondition::eq("is_available", false),
                    ],
                )?;
                if booked {
                    warn!("room {room_id} on {date} has sold seats, not clearing");
                    return Ok(false);
                }
            }

            for session in &sessions {
                let availabilities = get_filtered_on::<SeatAvailability>(
                    tx,
                    &[FilterCondition::eq("session_id", session.id)],
                    None,
                )?;
                for availability in availabilities {
                    delete_by_id_on::<SeatAvailability>(tx, availability.id)?;
                }
                delete_by_id_on::<Session>(tx, session.id)?;
            }

            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_movie, seed_room_with_seats, test_store};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn extended_duration_adds_breaks_and_turnover() {
        // 130 min runtime: two full hours -> 20 min of breaks, plus 30
        assert_eq!(extended_duration(130), 180);
        assert_eq!(extended_duration(100), 140);
        // under an hour: turnover only
        assert_eq!(extended_duration(59), 89);
        assert_eq!(extended_duration(60), 100);
    }

    #[test]
    fn day_is_partitioned_back_to_back_from_opening() {
        let (_dir, gateway) = test_store();
        let movie_id = seed_movie(&gateway, "Long Epic", 130);
        let (room_id, _) = seed_room_with_seats(&gateway, 1, 2);

        let service = SchedulingService::new(gateway.clone());
        let sessions = service
            .generate_sessions(room_id, movie_id, date())
            .expect("day should be generated");

        // slot = 180; 21:00 + 180 would land exactly at midnight -> excluded
        let starts: Vec<NaiveTime> = sessions.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![time(9, 0), time(12, 0), time(15, 0), time(18, 0)]);
        assert!(sessions.iter().all(|s| s.extended_duration == 180));
        assert!(sessions.iter().all(|s| s.id.0 > 0));
    }

    #[test]
    fn shorter_movies_fit_more_slots() {
        let (_dir, gateway) = test_store();
        let movie_id = seed_movie(&gateway, "Feature", 100);
        let (room_id, _) = seed_room_with_seats(&gateway, 1, 1);

        let service = SchedulingService::new(gateway.clone());
        let sessions = service
            .generate_sessions(room_id, movie_id, date())
            .unwrap();

        // slot = 140: six slots fit, the 23:00 slot would end past midnight
        let starts: Vec<NaiveTime> = sessions.iter().map(|s| s.start_time).collect();
        assert_eq!(
            starts,
            vec![
                time(9, 0),
                time(11, 20),
                time(13, 40),
                time(16, 0),
                time(18, 20),
                time(20, 40)
            ]
        );
    }

    #[test]
    fn a_session_ending_exactly_at_closing_is_excluded() {
        let (_dir, gateway) = test_store();
        let movie_id = seed_movie(&gateway, "Exact Fit", 60);
        let (room_id, _) = seed_room_with_seats(&gateway, 1, 1);

        // window of exactly two slots: 09:00 + 100 + 100 = 12:20
        let hours = RoomHours {
            opening: time(9, 0),
            closing: time(12, 20),
        };
        let service = SchedulingService::with_hours(gateway.clone(), hours);
        let sessions = service
            .generate_sessions(room_id, movie_id, date())
            .unwrap();

        // second slot would end exactly at closing -> strict isBefore excludes it
        let starts: Vec<NaiveTime> = sessions.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![time(9, 0)]);
    }

    #[test]
    fn second_generation_for_the_same_day_refuses_and_changes_nothing() {
        let (_dir, gateway) = test_store();
        let movie_id = seed_movie(&gateway, "Long Epic", 130);
        let other_movie = seed_movie(&gateway, "Other", 90);
        let (room_id, _) = seed_room_with_seats(&gateway, 1, 1);

        let service = SchedulingService::new(gateway.clone());
        let first = service
            .generate_sessions(room_id, movie_id, date())
            .unwrap();
        let before = gateway.count::<Session>(&[]).unwrap();
        assert_eq!(before, first.len() as i64);

        let second = service.generate_sessions(room_id, other_movie, date());
        assert!(second.is_none());
        assert_eq!(gateway.count::<Session>(&[]).unwrap(), before);
    }

    #[test]
    fn the_same_room_can_host_different_days() {
        let (_dir, gateway) = test_store();
        let movie_id = seed_movie(&gateway, "Long Epic", 130);
        let (room_id, _) = seed_room_with_seats(&gateway, 1, 1);

        let service = SchedulingService::new(gateway.clone());
        let next_day = date().succ_opt().unwrap();

        assert!(service.generate_sessions(room_id, movie_id, date()).is_some());
        assert!(service
            .generate_sessions(room_id, movie_id, next_day)
            .is_some());
    }

    #[test]
    fn every_session_gets_one_availability_row_per_seat() {
        let (_dir, gateway) = test_store();
        let movie_id = seed_movie(&gateway, "Long Epic", 130);
        let (room_id, seat_ids) = seed_room_with_seats(&gateway, 2, 3);

        let service = SchedulingService::new(gateway.clone());
        let sessions = service
            .generate_sessions(room_id, movie_id, date())
            .unwrap();

        let total = gateway.count::<SeatAvailability>(&[]).unwrap();
        assert_eq!(total, (sessions.len() * seat_ids.len()) as i64);

        for session in &sessions {
            let per_session = gateway
                .count::<SeatAvailability>(&[FilterCondition::eq("session_id", session.id)])
                .unwrap();
            assert_eq!(per_session, seat_ids.len() as i64);
        }
    }

    #[test]
    fn missing_movie_rolls_back_without_sessions() {
        let (_dir, gateway) = test_store();
        let (room_id, _) = seed_room_with_seats(&gateway, 1, 1);

        let service = SchedulingService::new(gateway.clone());
        let result = service.generate_sessions(room_id, MovieId(404), date());

        assert!(result.is_none());
        assert_eq!(gateway.count::<Session>(&[]).unwrap(), 0);
    }

    #[test]
    fn clear_day_removes_sessions_and_seat_rows() {
        let (_dir, gateway) = test_store();
        let movie_id = seed_movie(&gateway, "Long Epic", 130);
        let (room_id, _) = seed_room_with_seats(&gateway, 1, 2);

        let service = SchedulingService::new(gateway.clone());
        service.generate_sessions(room_id, movie_id, date()).unwrap();

        assert!(service.clear_day(room_id, date()));
        assert_eq!(gateway.count::<Session>(&[]).unwrap(), 0);
        assert_eq!(gateway.count::<SeatAvailability>(&[]).unwrap(), 0);

        // nothing left to clear
        assert!(!service.clear_day(room_id, date()));
    }
}
