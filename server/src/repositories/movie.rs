//! MovieRepository - Repository MongoDB per il catalogo dei film (sola lettura)

use super::{MovieStore, ReadAll, StoreError};
use crate::entities::{Director, Genre, Movie};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};
use serde::Deserialize;

const COLLECTION: &str = "movies";

// Proiezioni: leggiamo solo il sotto-documento richiesto
#[derive(Deserialize)]
struct DirectorProjection {
    #[serde(rename = "Director")]
    director: Option<Director>,
}

#[derive(Deserialize)]
struct GenreProjection {
    #[serde(rename = "Genre")]
    genre: Option<Genre>,
}

pub struct MovieRepository {
    collection: Collection<Movie>,
}

impl MovieRepository {
    pub fn new(database: &Database) -> MovieRepository {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl ReadAll<Movie> for MovieRepository {
    async fn read_all(&self) -> Result<Vec<Movie>, StoreError> {
        let movies: Vec<Movie> = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(movies)
    }
}

#[async_trait]
impl MovieStore for MovieRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError> {
        let movie = self.collection.find_one(doc! { "Title": title }).await?;
        Ok(movie)
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, StoreError> {
        let projection = self
            .collection
            .clone_with_type::<DirectorProjection>()
            .find_one(doc! { "Director.Name": name })
            .projection(doc! { "Director": 1 })
            .await?;

        Ok(projection.and_then(|p| p.director))
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, StoreError> {
        let projection = self
            .collection
            .clone_with_type::<GenreProjection>()
            .find_one(doc! { "Genre.Name": name })
            .projection(doc! { "Genre": 1 })
            .await?;

        Ok(projection.and_then(|p| p.genre))
    }
}
