use crate::{Error, ListingParams, error::Result};
use movies_types::Genre;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

const ENTITY_NAME: &str = "Movie";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateMovie {
    pub name: String,
    pub release_year: Option<i64>,
    pub description: Option<String>,
    pub genre: Genre,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub release_year: Option<i64>,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub genre: Genre,
}

impl Movie {
    /// Compares all fields except the server assigned id.
    pub fn same_content(&self, other: &CreateMovie) -> bool {
        self.name == other.name
            && self.release_year == other.release_year
            && self.description == other.description
            && self.genre == other.genre
    }
}

pub type MovieRepository = MovieRepositoryImpl<Pool<crate::ChosenDB>>;

/// Persistence gateway for movies.
///
/// A repository is built per request around a shared executor (normally the pool).
/// Every call checks out one connection and gives it back when the call finishes,
/// also when the calling future is dropped.
pub struct MovieRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> MovieRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateMovie) -> Result<Movie> {
        let record = sqlx::query_as::<_, Movie>(
            "INSERT INTO movie (name, release_year, description, genre) VALUES (?, ?, ?, ?) \
             RETURNING id, name, release_year, description, genre",
        )
        .bind(&payload.name)
        .bind(payload.release_year)
        .bind(&payload.description)
        .bind(payload.genre.as_str())
        .fetch_one(&self.executor)
        .await?;
        debug!("Created movie {}", record.id);
        Ok(record)
    }

    pub async fn list(&self, params: ListingParams) -> Result<Vec<Movie>> {
        let records = sqlx::query_as::<_, Movie>(
            "SELECT id, name, release_year, description, genre FROM movie ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&self.executor)
        .await?;
        Ok(records)
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movie")
            .fetch_one(&self.executor)
            .await?;
        Ok(count as u64)
    }

    /// `None` when there is no movie with this id.
    pub async fn find(&self, id: i64) -> Result<Option<Movie>> {
        let record = sqlx::query_as::<_, Movie>(
            "SELECT id, name, release_year, description, genre FROM movie WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.executor)
        .await?;
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<Movie> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::RecordNotFound(ENTITY_NAME.to_string()))
    }

    /// Removes a movie that was fetched before.
    pub async fn delete(&self, movie: &Movie) -> Result<()> {
        let res = sqlx::query("DELETE FROM movie WHERE id = ?")
            .bind(movie.id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            debug!("Movie {} was already gone", movie.id);
            Err(Error::RecordNotFound(ENTITY_NAME.to_string()))
        } else {
            debug!("Deleted movie {}", movie.id);
            Ok(())
        }
    }
}
