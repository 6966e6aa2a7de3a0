//! Movie API library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Crea il router principale dell'applicazione.
/// La tabella delle route è costruita una sola volta e non cambia più.
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    Router::new()
        .route("/", get(root))
        .route("/login", post(login_user))
        .nest("/movies", configure_movie_routes(state.clone()))
        .nest("/users", configure_user_routes(state.clone()))
        .layer(crate::core::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configura le routes del catalogo film (tutte autenticate)
fn configure_movie_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_movies))
        .route("/title/{title}", get(get_movie_by_title))
        .route("/director/{name}", get(get_director))
        .route("/genre/{name}", get(get_genre))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per la gestione degli utenti
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    // Unica rotta pubblica: la registrazione. La GET sullo stesso path resta
    // il profilo (autenticato) di un utente chiamato "signup"
    let signup_profile = get(get_signup_user).layer(middleware::from_fn_with_state(
        state.clone(),
        authentication_middleware,
    ));
    let public_routes =
        Router::new().route("/signup", post(signup_user).merge(signup_profile));

    // Rotte che richiedono il token; quelle di modifica verificano anche la proprietà
    let protected_routes = Router::new()
        .route("/{username}", get(get_user))
        .route("/update/{username}", put(update_user))
        .route(
            "/{username}/movies/add/{movie_id}",
            put(add_favorite_movie),
        )
        .route(
            "/{username}/movies/remove/{movie_id}",
            delete(remove_favorite_movie),
        )
        .route("/deregister/{username}", delete(deregister_user))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(protected_routes)
}
