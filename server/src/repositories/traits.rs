//! Common repository traits
//!
//! This module defines generic interfaces for document store operations, plus the
//! two store contracts (`MovieStore`, `UserStore`) the HTTP layer depends on.
//! Every backend (MongoDB, in-memory) implements the same traits, so handlers only
//! ever see `Arc<dyn MovieStore>` / `Arc<dyn UserStore>`.

use super::StoreError;
use crate::entities::{Director, Genre, Movie, User};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Trait for creating new entities in the store
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the store)
/// * `CreateDTO` - Data for creation (without ID)
#[async_trait]
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the store
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with its identifier
    /// * `Err(StoreError::Duplicate)` - A unique field is already taken
    async fn create(&self, data: &CreateDTO) -> Result<Entity, StoreError>;
}

/// Trait for reading a single entity by primary key
#[async_trait]
pub trait Read<Entity, Id> {
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    async fn read(&self, id: &Id) -> Result<Option<Entity>, StoreError>;
}

/// Trait for reading a whole collection
#[async_trait]
pub trait ReadAll<Entity> {
    /// Entities are returned in store order; no pagination.
    async fn read_all(&self) -> Result<Vec<Entity>, StoreError>;
}

/// Trait for updating existing entities
///
/// # Type Parameters
/// * `Entity` - Type of the updated entity
/// * `UpdateDTO` - Changes to apply (only `Some(_)` fields are modified)
/// * `Id` - Key used to locate the entity
#[async_trait]
pub trait Update<Entity, UpdateDTO, Id> {
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity after the update
    /// * `Ok(None)` - No entity matched `id`
    /// * `Err(StoreError::Duplicate)` - The update would violate a unique field
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Option<Entity>, StoreError>;
}

/// Trait for deleting entities
#[async_trait]
pub trait Delete<Id> {
    /// # Returns
    /// * `Ok(true)` - Entity deleted
    /// * `Ok(false)` - Nothing matched `id`
    async fn delete(&self, id: &Id) -> Result<bool, StoreError>;
}

/// Fields of a new user document. `password` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<mongodb::bson::DateTime>,
}

/// Sparse set of changes for a user document. `password` must already be hashed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<mongodb::bson::DateTime>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
    }
}

/// Read-only access to the movie catalog
#[async_trait]
pub trait MovieStore: ReadAll<Movie> + Send + Sync {
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError>;

    /// Director of the first movie whose `Director.Name` matches exactly
    async fn find_director(&self, name: &str) -> Result<Option<Director>, StoreError>;

    /// Genre of the first movie whose `Genre.Name` matches exactly
    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, StoreError>;
}

/// User registry. Users are created with a unique Username, updated and deleted by Username,
/// and read by their `_id` (token identity).
#[async_trait]
pub trait UserStore:
    Create<User, NewUser>
    + Read<User, ObjectId>
    + Update<User, UserChanges, String>
    + Delete<String>
    + Send
    + Sync
{
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Appends `movie_id` to FavoriteMovies (no de-duplication)
    async fn push_favorite(
        &self,
        username: &str,
        movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError>;

    /// Removes every occurrence of `movie_id` from FavoriteMovies
    async fn pull_favorite(
        &self,
        username: &str,
        movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError>;
}
