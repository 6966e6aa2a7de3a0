//! Movie DTOs - Data Transfer Objects per i film

use crate::entities::{Director, Genre, Movie};
use serde::{Deserialize, Serialize};

/// Film come esposto al client: l'ObjectId diventa una stringa esadecimale
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDTO {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    pub actors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl From<Movie> for MovieDTO {
    fn from(value: Movie) -> Self {
        Self {
            id: value.id.to_hex(),
            title: value.title,
            description: value.description,
            genre: value.genre,
            director: value.director,
            actors: value.actors,
            image_path: value.image_path,
            featured: value.featured,
        }
    }
}
