//! Integration tests per gli endpoints del catalogo film
//!
//! Test per:
//! - GET /movies
//! - GET /movies/title/{title}
//! - GET /movies/director/{name}
//! - GET /movies/genre/{name}

mod common;

#[cfg(test)]
mod movie_tests {
    use super::common::*;
    use axum::http::{HeaderName, StatusCode};
    use axum_test::TestServer;

    async fn authenticated_server() -> (TestServer, String) {
        let ctx = create_test_context();
        let alice = seed_user(&ctx.users, "alice1", "secret").await;
        (ctx.server, create_test_jwt(&alice))
    }

    // ============================================================
    // Test per GET /movies - list_movies
    // ============================================================

    #[tokio::test]
    async fn test_list_movies() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status(StatusCode::CREATED);
        let movies: Vec<serde_json::Value> = response.json();
        assert_eq!(movies.len(), 3, "Il catalogo di test contiene 3 film");

        for movie in &movies {
            assert!(movie["_id"].is_string(), "Ogni film deve avere un _id esadecimale");
            assert!(movie.get("Title").is_some(), "Ogni film deve avere un Title");
            assert!(movie.get("Director").is_some(), "Ogni film deve avere un Director");
        }
        assert_eq!(movies[0]["_id"], SILENCE_ID);
    }

    // ============================================================
    // Test per GET /movies/title/{title} - get_movie_by_title
    // ============================================================

    #[tokio::test]
    async fn test_get_movie_by_title() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies/title/The%20Silence%20of%20the%20Lambs")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status(StatusCode::CREATED);
        let movie: serde_json::Value = response.json();
        assert_eq!(movie["Title"], "The Silence of the Lambs");
        assert_eq!(movie["Genre"]["Name"], "Thriller");
        assert_eq!(movie["Director"]["Name"], "Jonathan Demme");
    }

    #[tokio::test]
    async fn test_get_movie_by_title_is_exact_match() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies/title/jaws")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_get_movie_by_title_not_found() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies/title/Nonexistent%20Film")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_not_found();
        let error: serde_json::Value = response.json();
        assert_eq!(error["error"], "Movie not found");
        assert_eq!(
            error["details"],
            "Can't find a movie with this title: Nonexistent Film"
        );
    }

    // ============================================================
    // Test per GET /movies/director/{name} - get_director
    // ============================================================

    #[tokio::test]
    async fn test_get_director() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies/director/Steven%20Spielberg")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status(StatusCode::CREATED);
        let director: serde_json::Value = response.json();
        assert_eq!(director["Name"], "Steven Spielberg");
        assert_eq!(director["Bio"], "Steven Spielberg is an American director.");
        assert_eq!(director["Birth"], "1946");
        assert!(director.get("Title").is_none(), "Solo il sotto-documento Director");
    }

    #[tokio::test]
    async fn test_get_director_not_found() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies/director/Nobody")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_not_found();
        let error: serde_json::Value = response.json();
        assert_eq!(error["error"], "Director not found");
    }

    // ============================================================
    // Test per GET /movies/genre/{name} - get_genre
    // ============================================================

    #[tokio::test]
    async fn test_get_genre() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies/genre/Science%20Fiction")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status(StatusCode::CREATED);
        let genre: serde_json::Value = response.json();
        assert_eq!(genre["Name"], "Science Fiction");
        assert_eq!(genre["Description"], "Speculative stories about science.");
    }

    #[tokio::test]
    async fn test_get_genre_not_found() {
        let (server, token) = authenticated_server().await;

        let response = server
            .get("/movies/genre/Western")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_not_found();
        let error: serde_json::Value = response.json();
        assert_eq!(error["error"], "Genre not found");
    }
}
