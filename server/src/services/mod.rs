//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod movie;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{login_user, signup_user};
pub use movie::{get_director, get_genre, get_movie_by_title, list_movies};
pub use user::{
    add_favorite_movie, deregister_user, get_signup_user, get_user, remove_favorite_movie,
    update_user,
};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_macros::debug_handler;
use std::sync::Arc;

/// Root endpoint - pagina di benvenuto
#[debug_handler]
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        "Welcome to the best movie search app ever!",
    )
}
