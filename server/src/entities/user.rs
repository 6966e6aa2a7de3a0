//! User entity - Entità utente con metodi per gestione password

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{NaiveDate, NaiveTime};
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Chiave primaria del documento, distinta dallo Username (che può cambiare)
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    /// Sempre l'hash bcrypt, mai la password in chiaro
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime>,
    #[serde(default)]
    pub favorite_movies: Vec<ObjectId>,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password).unwrap_or(false)
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, DEFAULT_COST)?;
        Ok(hash)
    }

    pub fn birthday_date(&self) -> Option<NaiveDate> {
        self.birthday.and_then(bson_to_date)
    }
}

/// Il compleanno è salvato come data BSON a mezzanotte UTC
pub fn date_to_bson(date: NaiveDate) -> DateTime {
    DateTime::from_millis(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

pub fn bson_to_date(value: DateTime) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp_millis(value.timestamp_millis()).map(|dt| dt.date_naive())
}
