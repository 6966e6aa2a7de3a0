//! UserRepository - Repository MongoDB per la gestione degli utenti

use super::{Create, Delete, NewUser, Read, StoreError, Update, UserChanges, UserStore};
use crate::entities::User;
use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use tracing::{debug, info};

const COLLECTION: &str = "users";
const DUPLICATE_KEY: i32 = 11000;

pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(database: &Database) -> UserRepository {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Indice univoco su Username: la verifica di unicità la fa il database,
    /// in modo atomico, al momento della scrittura.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "Username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        info!("Unique index on Username ensured");
        Ok(())
    }

    async fn find_one_and_update(
        &self,
        username: &str,
        update: Document,
    ) -> Result<Option<User>, StoreError> {
        self.collection
            .find_one_and_update(doc! { "Username": username }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_write_error)
    }
}

/// Il codice 11000 arriva come WriteError (insert) o come CommandError (findAndModify)
fn map_write_error(err: mongodb::error::Error) -> StoreError {
    let duplicate = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    };
    if duplicate {
        StoreError::Duplicate("Username".to_string())
    } else {
        StoreError::Mongo(err)
    }
}

#[async_trait]
impl Create<User, NewUser> for UserRepository {
    async fn create(&self, data: &NewUser) -> Result<User, StoreError> {
        let user = User {
            id: ObjectId::new(),
            username: data.username.clone(),
            password: data.password.clone(),
            email: data.email.clone(),
            birthday: data.birthday,
            favorite_movies: Vec::new(),
        };

        self.collection
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;
        debug!("Inserted user document {}", user.id);

        Ok(user)
    }
}

#[async_trait]
impl Read<User, ObjectId> for UserRepository {
    async fn read(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        let user = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(user)
    }
}

#[async_trait]
impl Update<User, UserChanges, String> for UserRepository {
    async fn update(
        &self,
        username: &String,
        data: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        // $set vuoto non è accettato da MongoDB: niente da scrivere, si rilegge
        if data.is_empty() {
            return self.find_by_username(username).await;
        }

        let mut set = Document::new();
        if let Some(new_username) = &data.username {
            set.insert("Username", new_username.clone());
        }
        if let Some(password) = &data.password {
            set.insert("Password", password.clone());
        }
        if let Some(email) = &data.email {
            set.insert("Email", email.clone());
        }
        if let Some(birthday) = data.birthday {
            set.insert("Birthday", birthday);
        }

        self.find_one_and_update(username, doc! { "$set": set }).await
    }
}

#[async_trait]
impl Delete<String> for UserRepository {
    /// Hard delete: il documento viene rimosso
    async fn delete(&self, username: &String) -> Result<bool, StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "Username": username.as_str() })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .collection
            .find_one(doc! { "Username": username })
            .await?;
        Ok(user)
    }

    async fn push_favorite(
        &self,
        username: &str,
        movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError> {
        self.find_one_and_update(username, doc! { "$push": { "FavoriteMovies": *movie_id } })
            .await
    }

    async fn pull_favorite(
        &self,
        username: &str,
        movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError> {
        self.find_one_and_update(username, doc! { "$pull": { "FavoriteMovies": *movie_id } })
            .await
    }
}
