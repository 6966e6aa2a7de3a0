//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{CreateUserDTO, LoginDTO, LoginResponseDTO, SignupResponseDTO, UserDTO};
use crate::entities::{User, user::date_to_bson};
use crate::repositories::{NewUser, StoreError};
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    // 1. Cercare l'utente nel database tramite username
    // 2. Se l'utente non esiste o la password non corrisponde all'hash, ritornare UNAUTHORIZED
    //    con lo stesso messaggio (non riveliamo quale dei due è sbagliato)
    // 3. Generare un token JWT firmato con il segreto (sub = username, id = _id)
    // 4. Ritornare StatusCode::OK con header Authorization e body { user, token }
    debug!("Login attempt");
    let user = state
        .users
        .find_by_username(&body.username)
        .await?
        .filter(|user| user.verify_password(&body.password))
        .ok_or_else(|| {
            warn!("Invalid credentials");
            AppError::unauthorized("Username or password are not correct.")
        })?;

    let token = encode_jwt(&user, &state.jwt_secret, state.token_lifetime_hours)
        .map_err(|_| AppError::internal_server_error("Failed to issue token"))?;

    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| AppError::internal_server_error("Failed to build authorization header"))?;
    headers.insert(header::AUTHORIZATION, bearer);

    info!("User logged in");
    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponseDTO {
            user: UserDTO::from(user),
            token,
        }),
    ))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn signup_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>, // JSON body
) -> Result<(StatusCode, Json<SignupResponseDTO>), AppError> {
    // 1. Validare il DTO con validator (username >= 5 alfanumerico, password presente, email valida)
    // 2. Generare l'hash della password fornita
    // 3. Creare l'utente: l'unicità dello username è garantita dallo store in modo atomico,
    //    un duplicato ritorna CONFLICT senza creare un secondo documento
    // 4. Ritornare CREATED con Username, Email e Birthday (mai la password)
    body.validate().map_err(|e| {
        warn!("Validation error: {}", e);
        AppError::from(e)
    })?;

    let password_hash = User::hash_password(&body.password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        AppError::internal_server_error("Failed to hash password")
    })?;

    let new_user = NewUser {
        username: body.username.clone(),
        password: password_hash,
        email: body.email.clone(),
        birthday: body.birthday.map(date_to_bson),
    };

    let created_user = state.users.create(&new_user).await.map_err(|e| match e {
        StoreError::Duplicate(_) => {
            warn!("Username already taken");
            AppError::conflict("Username already exists")
                .with_details(format!("User with {} already exist", body.username))
        }
        other => {
            error!("Failed to create user: {}", other);
            AppError::from_store(other, StatusCode::BAD_REQUEST, "An error occurred")
        }
    })?;

    info!("User signed up");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponseDTO::from(created_user)),
    ))
}
