//! User DTOs - Data Transfer Objects per utenti

use crate::entities::User;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

lazy_static! {
    static ref ALPHANUMERIC: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
}

/// Profilo pubblico: la password non viene mai esposta al client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UserDTO {
    pub username: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub favorite_movies: Vec<String>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            birthday: value.birthday_date(),
            favorite_movies: value.favorite_movies.iter().map(|id| id.to_hex()).collect(),
            username: value.username,
            email: value.email,
        }
    }
}

/// DTO per la registrazione. I campi mancanti diventano stringhe vuote,
/// così finiscono negli errori di validazione invece che in un errore di parsing.
#[derive(Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserDTO {
    #[serde(default)]
    #[validate(
        length(
            min = 5,
            message = "The user name is required and must be at least 5 characters long"
        ),
        regex(
            path = *ALPHANUMERIC,
            message = "Username contains non alphanumeric characters - not allowed."
        )
    )]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "The password is required"))]
    pub password: String,

    #[serde(default)]
    #[validate(email(message = "Please type a valid email"))]
    pub email: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub birthday: Option<NaiveDate>,
}

/// DTO per l'aggiornamento sparso: solo i campi presenti e non vuoti vengono scritti.
/// Solo lo Username viene validato (e solo se presente), Password ed Email no.
/// Una stringa vuota vale come campo assente, per lo Username come per gli altri campi.
#[derive(Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserDTO {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(
        length(
            min = 5,
            message = "The user name is required and must be at least 5 characters long"
        ),
        regex(
            path = *ALPHANUMERIC,
            message = "Username contains non alphanumeric characters - not allowed."
        )
    )]
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub birthday: Option<NaiveDate>,
}

/// DTO per il login (solo username e password)
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponseDTO {
    pub user: UserDTO,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SignupResponseDTO {
    pub status: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Birthday")]
    pub birthday: Option<NaiveDate>,
}

impl From<User> for SignupResponseDTO {
    fn from(value: User) -> Self {
        Self {
            status: "Successfully signed up!".to_string(),
            birthday: value.birthday_date(),
            username: value.username,
            email: value.email,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct FavoritesDTO {
    pub username: String,
    pub favorite_movies: Vec<String>,
}

impl From<User> for FavoritesDTO {
    fn from(value: User) -> Self {
        Self {
            favorite_movies: value.favorite_movies.iter().map(|id| id.to_hex()).collect(),
            username: value.username,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponseDTO {
    pub message: String,
    pub updated_user: FavoritesDTO,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponseDTO {
    pub message: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.is_empty()))
}

/// Accetta "YYYY-MM-DD" oppure un timestamp RFC 3339; stringa vuota o null = assente
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_birthday(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", value))),
    }
}

fn parse_birthday(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.date_naive())
    })
}
