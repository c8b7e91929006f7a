//! Movie database repository

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::filter::{FilterValue, MovieFilter, Predicate};

/// Fixed projection returned by every movie query. Timestamps stay
/// internal to the store.
const MOVIE_COLUMNS: &str = "id, title, year, director, genre, duration, synopsis, poster";

/// Movie record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub director: String,
    pub genre: String,
    pub duration: i64,
    pub synopsis: String,
    pub poster: String,
}

/// Input for creating a movie.
///
/// There is no id field here: the store assigns identifiers, and a
/// client-supplied `id` in the request body is dropped during
/// deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub year: i64,
    pub director: String,
    pub genre: String,
    pub duration: i64,
    pub synopsis: String,
    pub poster: String,
}

/// Input for updating a movie. `id` selects the record; every other
/// field is merged onto the stored record only when supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMovie {
    pub id: i64,
    pub title: Option<String>,
    pub year: Option<i64>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i64>,
    pub synopsis: Option<String>,
    pub poster: Option<String>,
}

pub struct MovieRepository {
    pool: SqlitePool,
}

impl MovieRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List movies matching the filter, in store order.
    /// An empty filter returns every record.
    pub async fn list(&self, filter: &MovieFilter) -> Result<Vec<MovieRecord>> {
        let mut sql = format!("SELECT {MOVIE_COLUMNS} FROM movies");
        if let Some(where_sql) = filter.where_sql() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        tracing::debug!(sql = %sql, "Executing movie list query");

        let mut query = sqlx::query_as::<_, MovieRecord>(&sql);
        for cond in filter.conditions() {
            query = match &cond.predicate {
                Predicate::Contains(s) => query.bind(s.as_str()),
                Predicate::Eq(FilterValue::Int(n)) => query.bind(*n),
                Predicate::Eq(FilterValue::Text(s)) => query.bind(s.as_str()),
            };
        }

        let records = query.fetch_all(&self.pool).await?;

        Ok(records)
    }

    /// Get a movie by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<MovieRecord>> {
        let record = sqlx::query_as::<_, MovieRecord>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Create a new movie. The store assigns the identifier.
    pub async fn create(&self, input: CreateMovie) -> Result<MovieRecord> {
        let record = sqlx::query_as::<_, MovieRecord>(&format!(
            r#"
            INSERT INTO movies (title, year, director, genre, duration, synopsis, poster)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(input.year)
        .bind(&input.director)
        .bind(&input.genre)
        .bind(input.duration)
        .bind(&input.synopsis)
        .bind(&input.poster)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Update a movie by id.
    ///
    /// Builds a new record from the stored row merged with the supplied
    /// fields and writes it back in a single statement. Returns None
    /// without touching the store when the id matches nothing.
    pub async fn update(&self, input: UpdateMovie) -> Result<Option<MovieRecord>> {
        let Some(current) = self.get_by_id(input.id).await? else {
            return Ok(None);
        };

        let merged = MovieRecord {
            id: current.id,
            title: input.title.unwrap_or(current.title),
            year: input.year.unwrap_or(current.year),
            director: input.director.unwrap_or(current.director),
            genre: input.genre.unwrap_or(current.genre),
            duration: input.duration.unwrap_or(current.duration),
            synopsis: input.synopsis.unwrap_or(current.synopsis),
            poster: input.poster.unwrap_or(current.poster),
        };

        sqlx::query(
            r#"
            UPDATE movies SET
                title = ?2, year = ?3, director = ?4, genre = ?5,
                duration = ?6, synopsis = ?7, poster = ?8,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
        )
        .bind(merged.id)
        .bind(&merged.title)
        .bind(merged.year)
        .bind(&merged.director)
        .bind(&merged.genre)
        .bind(merged.duration)
        .bind(&merged.synopsis)
        .bind(&merged.poster)
        .execute(&self.pool)
        .await?;

        Ok(Some(merged))
    }

    /// Delete a movie by id. Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
