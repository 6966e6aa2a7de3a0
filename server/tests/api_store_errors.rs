//! Integration tests per gli errori del database
//!
//! Ogni rotta traduce un errore dello store nel proprio status:
//! - catalogo film: 400
//! - GET /users/{username}: 404
//! - PUT /users/update/{username}: 500
//! - preferiti e deregistrazione: 400
//! - registrazione: 400
//! - risoluzione dell'utente dal token: 500

mod common;

#[cfg(test)]
mod store_error_tests {
    use super::common::*;
    use axum::http::{HeaderName, StatusCode};
    use serde_json::json;

    // ============================================================
    // Catalogo film
    // ============================================================

    #[tokio::test]
    async fn test_movie_routes_report_store_failure_as_bad_request() {
        let ctx = create_failing_context(false);
        let alice = seed_user(&ctx.users, "alice1", "secret").await;
        let token = create_test_jwt(&alice);

        for path in [
            "/movies",
            "/movies/title/Jaws",
            "/movies/director/Steven%20Spielberg",
            "/movies/genre/Thriller",
        ] {
            let response = ctx
                .server
                .get(path)
                .add_header(
                    HeaderName::from_static("authorization"),
                    format!("Bearer {}", token),
                )
                .await;

            response.assert_status_bad_request();
            let error: serde_json::Value = response.json();
            assert_eq!(error["error"], "An error occurred", "path {}", path);
        }
    }

    // ============================================================
    // Utenti
    // ============================================================

    #[tokio::test]
    async fn test_get_user_store_failure_is_not_found() {
        let ctx = create_failing_context(false);
        let alice = seed_user(&ctx.users, "alice1", "secret").await;
        let token = create_test_jwt(&alice);

        let response = ctx
            .server
            .get("/users/alice1")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_update_store_failure_is_internal_error() {
        let ctx = create_failing_context(false);
        let alice = seed_user(&ctx.users, "alice1", "secret").await;
        let token = create_test_jwt(&alice);

        let response = ctx
            .server
            .put("/users/update/alice1")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "Email": "new@x.com" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let stored = stored_user(&ctx.users, "alice1").await.unwrap();
        assert_eq!(stored.email, "alice1@example.com");
    }

    #[tokio::test]
    async fn test_favorites_store_failure_is_bad_request() {
        let ctx = create_failing_context(false);
        let alice = seed_user(&ctx.users, "alice1", "secret").await;
        let token = create_test_jwt(&alice);

        let added = ctx
            .server
            .put(&format!("/users/alice1/movies/add/{}", JAWS_ID))
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;
        added.assert_status_bad_request();
        let error: serde_json::Value = added.json();
        assert_eq!(error["error"], "Couldn't add movie to favorites list");

        let removed = ctx
            .server
            .delete(&format!("/users/alice1/movies/remove/{}", JAWS_ID))
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;
        removed.assert_status_bad_request();
        let error: serde_json::Value = removed.json();
        assert_eq!(
            error["error"],
            "Movie couldn't be deleted from favorite movies"
        );
    }

    #[tokio::test]
    async fn test_deregister_store_failure_is_bad_request() {
        let ctx = create_failing_context(false);
        let alice = seed_user(&ctx.users, "alice1", "secret").await;
        let token = create_test_jwt(&alice);

        let response = ctx
            .server
            .delete("/users/deregister/alice1")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status_bad_request();
        assert!(stored_user(&ctx.users, "alice1").await.is_some());
    }

    #[tokio::test]
    async fn test_signup_store_failure_is_bad_request() {
        let ctx = create_failing_context(false);

        let response = ctx
            .server
            .post("/users/signup")
            .json(&json!({
                "Username": "alice1",
                "Password": "secret",
                "Email": "a@x.com"
            }))
            .await;

        response.assert_status_bad_request();
        let error: serde_json::Value = response.json();
        assert_eq!(error["error"], "An error occurred");
    }

    // ============================================================
    // Middleware di autenticazione
    // ============================================================

    #[tokio::test]
    async fn test_auth_lookup_store_failure_is_internal_error() {
        let ctx = create_failing_context(true);
        let alice = seed_user(&ctx.users, "alice1", "secret").await;
        let token = create_test_jwt(&alice);

        let response = ctx
            .server
            .get("/movies")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
