//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni sul document store per una specifica collection.
//!
//! Due backend implementano gli stessi trait:
//! - MongoDB (`movie`, `user`) per l'ambiente reale
//! - in memoria (`memory`) per i test e per lo sviluppo locale con `CONNECTION_URI=memory://`

pub mod memory;
pub mod movie;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{
    Create, Delete, MovieStore, NewUser, Read, ReadAll, Update, UserChanges, UserStore,
};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use memory::{MemoryMovieRepository, MemoryUserRepository};
pub use movie::MovieRepository;
pub use user::UserRepository;

use crate::core::Config;
use crate::entities::{Director, Genre, Movie};
use mongodb::{Client, bson::oid::ObjectId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Errori del livello di persistenza
#[derive(Debug, Error)]
pub enum StoreError {
    /// Un campo univoco (Username) è già in uso
    #[error("duplicate value for unique field {0}")]
    Duplicate(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("document store error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("failed to load seed data: {0}")]
    Seed(String),
}

/// Converte una stringa esadecimale nell'ObjectId corrispondente
pub fn parse_object_id(raw: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

/// Store concreti scelti in base alla configurazione
pub struct Stores {
    pub movies: Arc<dyn MovieStore>,
    pub users: Arc<dyn UserStore>,
}

/// Apre il backend indicato da `CONNECTION_URI`.
/// Con MongoDB crea anche l'indice univoco su Username.
#[instrument(skip(config))]
pub async fn connect(config: &Config) -> Result<Stores, StoreError> {
    if config.uses_memory_store() {
        let movies = match &config.movies_seed_file {
            Some(path) => load_seed_movies(path).await?,
            None => Vec::new(),
        };
        info!("Using in-memory store with {} movies", movies.len());
        return Ok(Stores {
            movies: Arc::new(MemoryMovieRepository::new(movies)),
            users: Arc::new(MemoryUserRepository::new()),
        });
    }

    let client = Client::with_uri_str(&config.database_url).await?;
    let database = client.database(&config.database_name);

    let users = UserRepository::new(&database);
    users.ensure_indexes().await?;
    info!("Connected to MongoDB database {}", config.database_name);

    Ok(Stores {
        movies: Arc::new(MovieRepository::new(&database)),
        users: Arc::new(users),
    })
}

/// Legge un array JSON di film; i film senza `_id` ricevono un nuovo ObjectId
async fn load_seed_movies(path: &str) -> Result<Vec<Movie>, StoreError> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct SeedMovie {
        #[serde(rename = "_id")]
        id: Option<String>,
        title: String,
        description: String,
        #[serde(default)]
        genre: Genre,
        #[serde(default)]
        director: Director,
        #[serde(default)]
        actors: Vec<String>,
        image_path: Option<String>,
        featured: Option<bool>,
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::Seed(format!("{}: {}", path, e)))?;
    let seeds: Vec<SeedMovie> =
        serde_json::from_str(&raw).map_err(|e| StoreError::Seed(e.to_string()))?;

    seeds
        .into_iter()
        .map(|seed| {
            let id = match seed.id {
                Some(hex) => parse_object_id(&hex)?,
                None => ObjectId::new(),
            };
            Ok(Movie {
                id,
                title: seed.title,
                description: seed.description,
                genre: seed.genre,
                director: seed.director,
                actors: seed.actors,
                image_path: seed.image_path,
                featured: seed.featured,
            })
        })
        .collect()
}
