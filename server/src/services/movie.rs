//! Movie services - Consultazione del catalogo dei film
//!
//! Le letture riuscite rispondono CREATED, come ha sempre fatto questa API.
//! Un elemento assente è sempre un NOT_FOUND con messaggio strutturato.

use crate::core::{AppError, AppState};
use crate::dtos::MovieDTO;
use crate::entities::{Director, Genre};
use crate::repositories::StoreError;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

fn store_failure(err: StoreError) -> AppError {
    error!("Movie store error: {}", err);
    AppError::from_store(err, StatusCode::BAD_REQUEST, "An error occurred")
}

#[instrument(skip(state))]
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Vec<MovieDTO>>), AppError> {
    debug!("Listing all movies");
    let movies = state.movies.read_all().await.map_err(store_failure)?;
    info!("Found {} movies", movies.len());
    let movies_dto = movies.into_iter().map(MovieDTO::from).collect();
    Ok((StatusCode::CREATED, Json(movies_dto)))
}

#[instrument(skip(state))]
pub async fn get_movie_by_title(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>, // parametro dalla URL /movies/title/:title
) -> Result<(StatusCode, Json<MovieDTO>), AppError> {
    debug!("Fetching movie by title");
    let movie = state
        .movies
        .find_by_title(&title)
        .await
        .map_err(store_failure)?
        .ok_or_else(|| {
            warn!("Movie not found");
            AppError::not_found("Movie not found")
                .with_details(format!("Can't find a movie with this title: {}", title))
        })?;

    Ok((StatusCode::CREATED, Json(MovieDTO::from(movie))))
}

#[instrument(skip(state))]
pub async fn get_director(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>, // parametro dalla URL /movies/director/:name
) -> Result<(StatusCode, Json<Director>), AppError> {
    debug!("Fetching director by name");
    let director = state
        .movies
        .find_director(&name)
        .await
        .map_err(store_failure)?
        .ok_or_else(|| {
            warn!("Director not found");
            AppError::not_found("Director not found")
                .with_details(format!("Can't find a director with this name: {}", name))
        })?;

    Ok((StatusCode::CREATED, Json(director)))
}

#[instrument(skip(state))]
pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>, // parametro dalla URL /movies/genre/:name
) -> Result<(StatusCode, Json<Genre>), AppError> {
    debug!("Fetching genre by name");
    let genre = state
        .movies
        .find_genre(&name)
        .await
        .map_err(store_failure)?
        .ok_or_else(|| {
            warn!("Genre not found");
            AppError::not_found("Genre not found")
                .with_details(format!("Can't find the genre: {}", name))
        })?;

    Ok((StatusCode::CREATED, Json(genre)))
}
