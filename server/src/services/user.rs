//! User services - Gestione profilo, preferiti e cancellazione degli utenti

use crate::core::{AppError, AppState, require_owner};
use crate::dtos::{FavoritesDTO, FavoritesResponseDTO, MessageResponseDTO, UpdateUserDTO, UserDTO};
use crate::entities::{User, user::date_to_bson};
use crate::repositories::{StoreError, UserChanges, parse_object_id};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

/// Controllo di proprietà per le route che modificano un utente.
/// Se lo username del path non esiste ritorna NOT_FOUND, se appartiene a un altro
/// account ritorna "Permission denied!".
async fn require_owned_user(
    state: &AppState,
    current_user: &User,
    username: &str,
) -> Result<(), AppError> {
    if current_user.username == username {
        return Ok(());
    }
    match state.users.find_by_username(username).await {
        Ok(None) => {
            warn!("Target user {} does not exist", username);
            Err(AppError::not_found("User not found")
                .with_details(format!("No user with Username: {} found", username)))
        }
        _ => require_owner(current_user, username),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[instrument(skip(state), fields(username = %username))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>, // parametro dalla URL /users/:username
) -> Result<Json<UserDTO>, AppError> {
    // 1. Qualsiasi utente autenticato può leggere il profilo di un altro utente
    // 2. Cercare l'utente tramite username; assente o errore dello store -> NOT_FOUND
    // 3. Ritornare Username, Email, Birthday, FavoriteMovies
    debug!("Fetching user profile");
    let user = state
        .users
        .find_by_username(&username)
        .await
        .map_err(|e| {
            error!("User lookup failed: {}", e);
            AppError::not_found("User not found").with_details(e.to_string())
        })?
        .ok_or_else(|| {
            warn!("User not found");
            AppError::not_found("User not found")
                .with_details(format!("No user with Username: {} found", username))
        })?;

    Ok(Json(UserDTO::from(user)))
}

/// `/users/signup` è anche il profilo dell'utente chiamato "signup":
/// la rotta statica della registrazione intercetta la GET prima di `/users/{username}`
pub async fn get_signup_user(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserDTO>, AppError> {
    get_user(State(state), Path("signup".to_string())).await
}

#[instrument(skip(state, current_user, body), fields(username = %username, current = %current_user.username))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Path(username): Path<String>,             // parametro dalla URL /users/update/:username
    Json(body): Json<UpdateUserDTO>,
) -> Result<Json<UserDTO>, AppError> {
    // 1. Verificare che lo username del path sia quello dell'utente autenticato
    // 2. Validare lo username (se presente); password ed email non vengono validate
    // 3. Preparare l'aggiornamento sparso: solo i campi presenti e non vuoti,
    //    la nuova password viene di nuovo hashata
    // 4. Applicare l'aggiornamento in un'unica scrittura: se il nuovo username è già di
    //    un altro account lo store risponde con un duplicato -> CONFLICT
    // 5. Ritornare il profilo aggiornato
    require_owned_user(&state, &current_user, &username).await?;

    body.validate().map_err(|e| {
        warn!("Validation error: {}", e);
        AppError::from(e)
    })?;

    let password = match non_empty(&body.password) {
        Some(plain) => Some(User::hash_password(&plain).map_err(|e| {
            error!("Failed to hash password: {}", e);
            AppError::internal_server_error("Failed to hash password")
        })?),
        None => None,
    };

    let changes = UserChanges {
        username: non_empty(&body.username),
        password,
        email: non_empty(&body.email),
        birthday: body.birthday.map(date_to_bson),
    };
    debug!("Applying changes: {:?}", changes.username);

    let updated_user = state
        .users
        .update(&username, &changes)
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(_) => {
                warn!("Username already in use");
                AppError::conflict(
                    "Username is already in use. Please choose another username",
                )
            }
            other => {
                error!("Failed to update user: {}", other);
                AppError::from_store(
                    other,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                )
            }
        })?
        .ok_or_else(|| {
            warn!("User disappeared before update");
            AppError::not_found("User not found")
        })?;

    info!("User updated");
    Ok(Json(UserDTO::from(updated_user)))
}

#[instrument(skip(state, current_user), fields(username = %username, movie_id = %movie_id))]
pub async fn add_favorite_movie(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Path((username, movie_id)): Path<(String, String)>, // /users/:username/movies/add/:movie_id
) -> Result<Json<FavoritesResponseDTO>, AppError> {
    // 1. Controllo di proprietà
    // 2. Convertire l'id del film in ObjectId, altrimenti BAD_REQUEST
    // 3. Aggiungere l'id in coda ai preferiti (nessun controllo di esistenza del film, duplicati ammessi)
    // 4. Ritornare username e preferiti aggiornati con un messaggio di conferma
    require_owned_user(&state, &current_user, &username).await?;

    let movie_id = parse_object_id(&movie_id).map_err(|e| {
        warn!("Invalid movie id");
        AppError::bad_request("Couldn't add movie to favorites list").with_details(e.to_string())
    })?;

    let updated_user = state
        .users
        .push_favorite(&username, &movie_id)
        .await
        .map_err(|e| {
            error!("Failed to add favorite: {}", e);
            AppError::from_store(
                e,
                StatusCode::BAD_REQUEST,
                "Couldn't add movie to favorites list",
            )
        })?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    info!("Movie added to favorites");
    Ok(Json(FavoritesResponseDTO {
        message: "Successfully added the movie to the favorite List!".to_string(),
        updated_user: FavoritesDTO::from(updated_user),
    }))
}

#[instrument(skip(state, current_user), fields(username = %username, movie_id = %movie_id))]
pub async fn remove_favorite_movie(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Path((username, movie_id)): Path<(String, String)>, // /users/:username/movies/remove/:movie_id
) -> Result<Json<FavoritesResponseDTO>, AppError> {
    // 1. Controllo di proprietà
    // 2. Convertire l'id del film in ObjectId, altrimenti BAD_REQUEST
    // 3. Rimuovere tutte le occorrenze dell'id (gli altri preferiti mantengono l'ordine)
    // 4. Ritornare username e preferiti aggiornati con un messaggio di conferma
    require_owned_user(&state, &current_user, &username).await?;

    let movie_id = parse_object_id(&movie_id).map_err(|e| {
        warn!("Invalid movie id");
        AppError::bad_request("Movie couldn't be deleted from favorite movies")
            .with_details(e.to_string())
    })?;

    let updated_user = state
        .users
        .pull_favorite(&username, &movie_id)
        .await
        .map_err(|e| {
            error!("Failed to remove favorite: {}", e);
            AppError::from_store(
                e,
                StatusCode::BAD_REQUEST,
                "Movie couldn't be deleted from favorite movies",
            )
        })?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    info!("Movie removed from favorites");
    Ok(Json(FavoritesResponseDTO {
        message: "Successfully deleted the movie from the favorite list!".to_string(),
        updated_user: FavoritesDTO::from(updated_user),
    }))
}

#[instrument(skip(state, current_user), fields(username = %username))]
pub async fn deregister_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Path(username): Path<String>,             // parametro dalla URL /users/deregister/:username
) -> Result<Json<MessageResponseDTO>, AppError> {
    // 1. Controllo di proprietà (username inesistente -> NOT_FOUND)
    // 2. Cancellare definitivamente il documento utente
    // 3. Se nessun documento è stato cancellato ritornare NOT_FOUND
    info!("User account deletion initiated");
    require_owned_user(&state, &current_user, &username).await?;

    let deleted = state.users.delete(&username).await.map_err(|e| {
        error!("Failed to delete user: {}", e);
        AppError::from_store(e, StatusCode::BAD_REQUEST, "User couldn't be deleted")
    })?;

    if !deleted {
        warn!("No user deleted");
        return Err(AppError::not_found("User not found")
            .with_details(format!("No user with Username: {} found", username)));
    }

    info!("Account deleted successfully");
    Ok(Json(MessageResponseDTO {
        message: format!("User with Username: {} was deleted", username),
    }))
}
