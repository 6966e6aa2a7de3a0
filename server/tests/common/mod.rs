use axum::http::StatusCode;
use axum_test::TestServer;
use movie_api::AppState;
use movie_api::auth::encode_jwt;
use movie_api::entities::{Director, Genre, Movie, User};
use async_trait::async_trait;
use movie_api::repositories::{
    Create, Delete, MemoryMovieRepository, MemoryUserRepository, MovieStore, NewUser, Read,
    ReadAll, StoreError, Update, UserChanges, UserStore,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use std::sync::Arc;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Id fissi dei film di test, utili per i preferiti
pub const SILENCE_ID: &str = "5c3bd189515a081b363cb7e1";
pub const JAWS_ID: &str = "5c3bd189515a081b363cb7e2";
pub const INCEPTION_ID: &str = "5c3bd189515a081b363cb7e3";

/// Contesto di un test: server in-process più accesso diretto allo store utenti
pub struct TestContext {
    pub server: TestServer,
    pub users: Arc<MemoryUserRepository>,
}

fn movie(id: &str, title: &str, genre: (&str, &str), director: (&str, &str, &str)) -> Movie {
    Movie {
        id: ObjectId::parse_str(id).expect("valid object id"),
        title: title.to_string(),
        description: format!("Description of {}", title),
        genre: Genre {
            name: Some(genre.0.to_string()),
            description: Some(genre.1.to_string()),
        },
        director: Director {
            name: Some(director.0.to_string()),
            bio: Some(director.1.to_string()),
            birth: Some(director.2.to_string()),
        },
        actors: vec!["Someone Famous".to_string()],
        image_path: Some(format!("{}.png", title.to_lowercase().replace(' ', "_"))),
        featured: Some(true),
    }
}

/// Catalogo usato da tutti i test
pub fn sample_movies() -> Vec<Movie> {
    vec![
        movie(
            SILENCE_ID,
            "The Silence of the Lambs",
            ("Thriller", "Thriller is a genre of suspense."),
            ("Jonathan Demme", "Jonathan Demme was an American director.", "1944"),
        ),
        movie(
            JAWS_ID,
            "Jaws",
            ("Thriller", "Thriller is a genre of suspense."),
            ("Steven Spielberg", "Steven Spielberg is an American director.", "1946"),
        ),
        movie(
            INCEPTION_ID,
            "Inception",
            ("Science Fiction", "Speculative stories about science."),
            ("Christopher Nolan", "Christopher Nolan is a British director.", "1970"),
        ),
    ]
}

/// Crea un AppState per i test con il backend in memoria
///
/// # Returns
/// Lo stato e lo store utenti, per ispezionare le scritture
pub fn create_test_state() -> (Arc<AppState>, Arc<MemoryUserRepository>) {
    let movies = Arc::new(MemoryMovieRepository::new(sample_movies()));
    let users = Arc::new(MemoryUserRepository::new());
    let state = Arc::new(AppState::new(
        movies,
        users.clone(),
        JWT_SECRET.to_string(),
    ));
    (state, users)
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = movie_api::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

pub fn create_test_context() -> TestContext {
    let (state, users) = create_test_state();
    let server = create_test_server(state);
    TestContext { server, users }
}

/// Inserisce un utente direttamente nello store (password hashata)
pub async fn seed_user(users: &MemoryUserRepository, username: &str, password: &str) -> User {
    let new_user = NewUser {
        username: username.to_string(),
        password: User::hash_password(password).expect("Failed to hash password"),
        email: format!("{}@example.com", username),
        birthday: None,
    };
    users.create(&new_user).await.expect("Failed to seed user")
}

/// Genera un JWT token per testing, valido 24 ore
pub fn create_test_jwt(user: &User) -> String {
    encode_jwt(user, JWT_SECRET, 24).expect("Failed to create JWT token")
}

/// Registra un utente tramite l'API e ne esegue il login, ritornando il token
pub async fn signup_and_login(server: &TestServer, username: &str, password: &str) -> String {
    server
        .post("/users/signup")
        .json(&json!({
            "Username": username,
            "Password": password,
            "Email": format!("{}@example.com", username),
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/login")
        .json(&json!({ "Username": username, "Password": password }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

/// Legge un utente dallo store, se esiste
pub async fn stored_user(users: &MemoryUserRepository, username: &str) -> Option<User> {
    users
        .find_by_username(username)
        .await
        .expect("Failed to read user")
}

// ============================================================
// Store che falliscono, per i percorsi di errore del database
// ============================================================

fn store_down() -> StoreError {
    StoreError::Mongo(std::io::Error::other("connection reset by peer").into())
}

/// Catalogo il cui database non risponde
pub struct FailingMovieStore;

#[async_trait]
impl ReadAll<Movie> for FailingMovieStore {
    async fn read_all(&self) -> Result<Vec<Movie>, StoreError> {
        Err(store_down())
    }
}

#[async_trait]
impl MovieStore for FailingMovieStore {
    async fn find_by_title(&self, _title: &str) -> Result<Option<Movie>, StoreError> {
        Err(store_down())
    }

    async fn find_director(&self, _name: &str) -> Result<Option<Director>, StoreError> {
        Err(store_down())
    }

    async fn find_genre(&self, _name: &str) -> Result<Option<Genre>, StoreError> {
        Err(store_down())
    }
}

/// Store utenti che fallisce ogni operazione tranne, se richiesto, la lettura per `_id`
/// usata dal middleware di autenticazione
pub struct FailingUserStore {
    inner: Arc<MemoryUserRepository>,
    fail_auth_lookup: bool,
}

#[async_trait]
impl Create<User, NewUser> for FailingUserStore {
    async fn create(&self, _data: &NewUser) -> Result<User, StoreError> {
        Err(store_down())
    }
}

#[async_trait]
impl Read<User, ObjectId> for FailingUserStore {
    async fn read(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        if self.fail_auth_lookup {
            return Err(store_down());
        }
        self.inner.read(id).await
    }
}

#[async_trait]
impl Update<User, UserChanges, String> for FailingUserStore {
    async fn update(
        &self,
        _username: &String,
        _data: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        Err(store_down())
    }
}

#[async_trait]
impl Delete<String> for FailingUserStore {
    async fn delete(&self, _username: &String) -> Result<bool, StoreError> {
        Err(store_down())
    }
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(store_down())
    }

    async fn push_favorite(
        &self,
        _username: &str,
        _movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError> {
        Err(store_down())
    }

    async fn pull_favorite(
        &self,
        _username: &str,
        _movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError> {
        Err(store_down())
    }
}

/// Server con il database guasto. Gli utenti vanno inseriti in `users` (lo store sano
/// sottostante) per ottenere un token valido.
///
/// # Arguments
/// * `fail_auth_lookup` - se true fallisce anche la risoluzione dell'utente dal token
pub fn create_failing_context(fail_auth_lookup: bool) -> TestContext {
    let users = Arc::new(MemoryUserRepository::new());
    let failing_users = Arc::new(FailingUserStore {
        inner: users.clone(),
        fail_auth_lookup,
    });
    let state = Arc::new(AppState::new(
        Arc::new(FailingMovieStore),
        failing_users,
        JWT_SECRET.to_string(),
    ));
    TestContext {
        server: create_test_server(state),
        users,
    }
}
