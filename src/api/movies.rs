//! Movie catalog endpoints

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::app::AppState;
use crate::db::{CreateMovie, MovieFilter, MovieRecord, UpdateMovie};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// List movies, narrowed by whatever query parameters name declared
/// movie attributes. Unknown parameters are ignored.
async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<MovieRecord>>, ApiError> {
    let filter = MovieFilter::from_query(&params);
    let movies = state.db.movies().list(&filter).await?;

    Ok(Json(movies))
}

/// Create a movie. Any `id` in the body is dropped; the store assigns one.
async fn create_movie(
    State(state): State<AppState>,
    Json(body): Json<CreateMovie>,
) -> Result<Json<MovieRecord>, ApiError> {
    let movie = state.db.movies().create(body).await?;
    tracing::info!(id = movie.id, title = %movie.title, "Movie created");

    Ok(Json(movie))
}

/// Merge the supplied fields onto the record named by `id` in the body.
/// Responds with JSON null when no record matches; a miss is not an error.
async fn update_movie(
    State(state): State<AppState>,
    Json(body): Json<UpdateMovie>,
) -> Result<Json<Option<MovieRecord>>, ApiError> {
    let movie = state.db.movies().update(body).await?;

    Ok(Json(movie))
}

/// Delete a movie by id. Responds with the number of removed records.
async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.db.movies().delete(id).await?;

    Ok(Json(DeleteResponse { deleted }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(list_movies).post(create_movie).patch(update_movie),
        )
        .route("/movies/{id}", delete(delete_movie))
}
