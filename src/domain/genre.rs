// src/domain/genre.rs
use once_cell::sync::Lazy;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{GenreId, MovieGenreId, MovieId};
use crate::mapping::{Column, Entity, EntityId, EntityMeta, SqlValue};

/// A film genre. Name uniqueness is a convention, not a constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

static GENRE_META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[Column::new("name", "name")];
    EntityMeta::new("Genre", "genre", Column::new("id", "id"), COLUMNS)
        .expect("genre descriptor")
});

impl Genre {
    pub fn new(name: String) -> Self {
        Self {
            id: GenreId::UNSET,
            name,
        }
    }
}

impl Entity for Genre {
    type Id = GenreId;

    fn meta() -> &'static EntityMeta {
        &GENRE_META
    }

    fn id(&self) -> GenreId {
        self.id
    }

    fn set_id(&mut self, id: GenreId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.name.as_str().into()]
    }
}

/// Join record of the Movie×Genre many-to-many relationship. One
/// (movie, genre) pair is expected at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieGenre {
    pub id: MovieGenreId,
    pub movie_id: MovieId,
    pub genre_id: GenreId,
}

static MOVIE_GENRE_META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("movie_id", "movie_id"),
        Column::new("genre_id", "genre_id"),
    ];
    EntityMeta::new("MovieGenre", "movie_genre", Column::new("id", "id"), COLUMNS)
        .expect("movie_genre descriptor")
});

impl MovieGenre {
    pub fn new(movie_id: MovieId, genre_id: GenreId) -> Self {
        Self {
            id: MovieGenreId::UNSET,
            movie_id,
            genre_id,
        }
    }
}

impl Entity for MovieGenre {
    type Id = MovieGenreId;

    fn meta() -> &'static EntityMeta {
        &MOVIE_GENRE_META
    }

    fn id(&self) -> MovieGenreId {
        self.id
    }

    fn set_id(&mut self, id: MovieGenreId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            movie_id: row.get(1)?,
            genre_id: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.movie_id.into(), self.genre_id.into()]
    }
}
