//! Application State - Stato condiviso dell'applicazione
//!
//! Contiene gli store, la configurazione dei token e nient'altro:
//! nessuno stato mutabile condiviso tra richieste vive nel processo.

use crate::core::Config;
use crate::repositories::{self, MovieStore, StoreError, UserStore};
use std::sync::Arc;

/// Durata di default dei token: 7 giorni
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24 * 7;

/// Stato dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Catalogo dei film (sola lettura)
    pub movies: Arc<dyn MovieStore>,

    /// Registro degli utenti
    pub users: Arc<dyn UserStore>,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Validità dei token emessi al login, in ore
    pub token_lifetime_hours: i64,
}

impl AppState {
    /// Crea una nuova istanza di AppState a partire dagli store e dalla JWT secret.
    ///
    /// # Arguments
    /// * `movies` - Store del catalogo film
    /// * `users` - Store degli utenti
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    pub fn new(movies: Arc<dyn MovieStore>, users: Arc<dyn UserStore>, jwt_secret: String) -> Self {
        Self {
            movies,
            users,
            jwt_secret,
            token_lifetime_hours: DEFAULT_TOKEN_LIFETIME_HOURS,
        }
    }

    pub fn with_token_lifetime(mut self, hours: i64) -> Self {
        self.token_lifetime_hours = hours;
        self
    }

    /// Apre il backend indicato dalla configurazione e costruisce lo stato
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let stores = repositories::connect(config).await?;
        Ok(Self::new(stores.movies, stores.users, config.jwt_secret.clone())
            .with_token_lifetime(config.jwt_expiration_hours))
    }
}
