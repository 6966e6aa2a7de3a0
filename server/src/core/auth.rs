use crate::core::{AppError, AppState};
use crate::entities::User;
use crate::repositories::parse_object_id;
use axum::extract::State;
use axum::{Error, body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Username al momento del login
    pub id: String,  // _id del documento utente (esadecimale)
    pub exp: usize,  // Expiry time of the token
    pub iat: usize,  // Issued at time of the token
}

#[instrument(skip(user, secret), fields(username = %user.username))]
pub fn encode_jwt(user: &User, secret: &str, lifetime_hours: i64) -> Result<String, Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire = TimeDelta::try_hours(lifetime_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            error!("Invalid token lifetime: {} hours", lifetime_hours);
            Error::new("Invalid token lifetime")
        })?;
    let claim = Claims {
        sub: user.username.clone(),
        id: user.id.to_hex(),
        iat: now.timestamp() as usize,
        exp: expire.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map(|token| {
        info!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        Error::new("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, Error> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| {
        debug!("JWT token decoded successfully for user: {}", data.claims.sub);
        data
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        Error::new("Error in decoding jwt token")
    })
}

/// Estrae il token da un header `Authorization: Bearer <token>`
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

/// Verifica il token, risolve l'utente tramite `_id` e lo inserisce nelle Extension della richiesta.
/// Qualsiasi problema con il token produce un 401 prima che l'handler venga eseguito.
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::unauthorized("Invalid authorization header")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::unauthorized(
                "Please add the JWT token to the header",
            ));
        }
    };

    let token = bearer_token(auth_header).ok_or_else(|| {
        warn!("Authorization header is not a bearer token");
        AppError::unauthorized("Invalid authorization header")
    })?;

    let token_data = decode_jwt(token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Unable to decode token"))?;

    let user_id = parse_object_id(&token_data.claims.id).map_err(|_| {
        warn!("Token carries an invalid user id: {}", token_data.claims.id);
        AppError::unauthorized("Unable to decode token")
    })?;

    // Fetch the user details from the database
    let current_user = match state.users.read(&user_id).await? {
        Some(user) => {
            info!("User authenticated: {}", user.username);
            user
        }
        None => {
            warn!("User not found in database: {}", token_data.claims.sub);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Verifica che l'utente autenticato sia il proprietario della risorsa (stesso Username).
/// Non esiste un concetto di amministratore che possa scavalcare il controllo.
pub fn require_owner(current_user: &User, username: &str) -> Result<(), AppError> {
    if current_user.username != username {
        warn!(
            "User {} attempted to modify resources of {}",
            current_user.username, username
        );
        return Err(AppError::bad_request("Permission denied!"));
    }
    Ok(())
}
