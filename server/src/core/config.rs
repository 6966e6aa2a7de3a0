//! Configurazione - caricata dalle variabili d'ambiente (e dal file .env se presente)

use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "your_jwt_secret";

/// Validità massima accettata per i token: un anno
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub movies_seed_file: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("CONNECTION_URI")
            .or_else(|_| env::var("DATABASE_URL"))
            .map_err(|_| "CONNECTION_URI must be set in .env file".to_string())?;

        let database_name = env::var("DB_NAME").unwrap_or_else(|_| "movies_apiDB".to_string());

        let movies_seed_file = env::var("MOVIES_SEED_FILE").ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let jwt_expiration_hours = Self::parse_token_lifetime(
            &env::var("JWT_EXPIRATION_HOURS").unwrap_or_else(|_| "168".to_string()),
        )?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        // PORT viene impostata dai servizi di hosting, altrimenti 8080
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid PORT: must be a number between 0-65535".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            database_name,
            movies_seed_file,
            jwt_secret,
            jwt_expiration_hours,
            server_host,
            server_port,
            app_env,
        })
    }

    /// true se la connessione punta allo store in memoria (`memory://`)
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory://")
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Database Name: {}", self.database_name);
        info!("   Token Lifetime: {}h", self.jwt_expiration_hours);
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("   JWT Secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("   JWT Secret: custom secret configured");
        }
    }

    /// Ore di validità dei token, tra 1 e `MAX_TOKEN_LIFETIME_HOURS`
    fn parse_token_lifetime(raw: &str) -> Result<i64, String> {
        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|hours| (1..=MAX_TOKEN_LIFETIME_HOURS).contains(hours))
            .ok_or_else(|| {
                format!(
                    "Invalid JWT_EXPIRATION_HOURS: must be between 1 and {}",
                    MAX_TOKEN_LIFETIME_HOURS
                )
            })
    }

    /// Maschera l'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        if url.starts_with("memory://") {
            return url.to_string();
        }
        "***".to_string()
    }
}
