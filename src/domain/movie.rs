// src/domain/movie.rs
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::domain::ids::MovieId;
use crate::mapping::{codec, Column, Entity, EntityId, EntityMeta, SqlValue};

/// A film in the chain's catalogue.
///
/// `rating` is the running mean over every counted rating and
/// `rating_count` only ever grows; both mutate exclusively through the
/// rating-aggregation workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,

    pub name: String,

    /// Runtime in minutes, breaks not included.
    pub duration: i64,

    pub release_date: NaiveDate,

    /// Last day the film may be screened; never before `release_date`.
    pub last_screening_date: NaiveDate,

    pub rating: f64,

    pub rating_count: i64,
}

static META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("name", "name"),
        Column::new("duration", "duration"),
        Column::new("release_date", "release_date"),
        Column::new("last_screening_date", "last_screening_date"),
        Column::new("rating", "rating"),
        Column::new("rating_count", "rating_count"),
    ];
    EntityMeta::new("Movie", "movie", Column::new("id", "id"), COLUMNS)
        .expect("movie descriptor")
});

impl Movie {
    pub fn new(
        name: String,
        duration: i64,
        release_date: NaiveDate,
        last_screening_date: NaiveDate,
    ) -> Self {
        Self {
            id: MovieId::UNSET,
            name,
            duration,
            release_date,
            last_screening_date,
            rating: 0.0,
            rating_count: 0,
        }
    }

    /// Fold one rated ticket into the running mean. `weight` is the
    /// ticket's seat count; every seat counts as one opinion.
    pub fn apply_rating(&mut self, rating: f64, weight: i64) {
        if self.rating_count == 0 {
            self.rating = rating;
        } else {
            self.rating += (rating - self.rating) / (self.rating_count as f64 / weight as f64);
        }
        self.rating_count += weight;
    }
}

impl Entity for Movie {
    type Id = MovieId;

    fn meta() -> &'static EntityMeta {
        &META
    }

    fn id(&self) -> MovieId {
        self.id
    }

    fn set_id(&mut self, id: MovieId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            duration: row.get(2)?,
            release_date: codec::decode_date(row, 3)?,
            last_screening_date: codec::decode_date(row, 4)?,
            rating: row.get(5)?,
            rating_count: row.get(6)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.as_str().into(),
            self.duration.into(),
            self.release_date.into(),
            self.last_screening_date.into(),
            self.rating.into(),
            self.rating_count.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_mean_weights_by_seat_count() {
        let mut movie = Movie::new(
            "Recep İvedik 3".to_string(),
            106,
            NaiveDate::from_ymd_opt(2010, 2, 12).unwrap(),
            NaiveDate::from_ymd_opt(2010, 6, 12).unwrap(),
        );
        movie.rating = 4.0;
        movie.rating_count = 10;

        movie.apply_rating(5.0, 2);

        assert!((movie.rating - 4.2).abs() < 1e-9);
        assert_eq!(movie.rating_count, 12);
    }

    #[test]
    fn first_rating_sets_the_mean_directly() {
        let mut movie = Movie::new(
            "Oppenheimer".to_string(),
            180,
            NaiveDate::from_ymd_opt(2023, 7, 21).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 21).unwrap(),
        );

        movie.apply_rating(3.0, 4);

        assert!((movie.rating - 3.0).abs() < 1e-9);
        assert_eq!(movie.rating_count, 4);
    }
}
