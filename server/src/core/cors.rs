//! CORS - lista fissa delle origini autorizzate a chiamare l'API dal browser

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const ALLOWED_ORIGINS: [&str; 6] = [
    "http://localhost:8080",
    "http://localhost:4200",
    "http://localhost:1234",
    "https://alinalein.github.io",
    "https://movie-api-lina-834bc70d6952.herokuapp.com",
    "https://myflix-alinalein.netlify.app",
];

/// Layer CORS con la allow-list. Le richieste senza header Origin passano invariate.
pub fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .into_iter()
        .map(HeaderValue::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::AUTHORIZATION])
}
