//! Memory repositories - Backend in memoria con la stessa semantica dei repository MongoDB
//!
//! Usato dai test di integrazione e dallo sviluppo locale (`CONNECTION_URI=memory://`).
//! Ogni scrittura avviene sotto un unico write lock, quindi il controllo di unicità
//! dello Username e la scrittura sono atomici come con l'indice univoco di MongoDB.

use super::{
    Create, Delete, MovieStore, NewUser, Read, ReadAll, StoreError, Update, UserChanges,
    UserStore,
};
use crate::entities::{Director, Genre, Movie, User};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

pub struct MemoryMovieRepository {
    movies: RwLock<Vec<Movie>>,
}

impl MemoryMovieRepository {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }
}

#[async_trait]
impl ReadAll<Movie> for MemoryMovieRepository {
    async fn read_all(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.movies.read().await.clone())
    }
}

#[async_trait]
impl MovieStore for MemoryMovieRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.title == title).cloned())
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, StoreError> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.directed_by(name))
            .map(|m| m.director.clone()))
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, StoreError> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.has_genre(name))
            .map(|m| m.genre.clone()))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numero di utenti registrati
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Applica `mutate` all'utente con lo Username dato e restituisce il documento aggiornato
    async fn modify<F>(&self, username: &str, mutate: F) -> Result<Option<User>, StoreError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.username == username).map(|user| {
            mutate(user);
            user.clone()
        }))
    }
}

#[async_trait]
impl Create<User, NewUser> for MemoryUserRepository {
    async fn create(&self, data: &NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == data.username) {
            return Err(StoreError::Duplicate("Username".to_string()));
        }

        let user = User {
            id: ObjectId::new(),
            username: data.username.clone(),
            password: data.password.clone(),
            email: data.email.clone(),
            birthday: data.birthday,
            favorite_movies: Vec::new(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl Read<User, ObjectId> for MemoryUserRepository {
    async fn read(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }
}

#[async_trait]
impl Update<User, UserChanges, String> for MemoryUserRepository {
    async fn update(
        &self,
        username: &String,
        data: &UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;

        let Some(index) = users.iter().position(|u| &u.username == username) else {
            return Ok(None);
        };

        if let Some(new_username) = &data.username {
            let taken = users
                .iter()
                .enumerate()
                .any(|(i, u)| i != index && &u.username == new_username);
            if taken {
                return Err(StoreError::Duplicate("Username".to_string()));
            }
        }

        let user = &mut users[index];
        if let Some(new_username) = &data.username {
            user.username = new_username.clone();
        }
        if let Some(password) = &data.password {
            user.password = password.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.clone();
        }
        if let Some(birthday) = data.birthday {
            user.birthday = Some(birthday);
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl Delete<String> for MemoryUserRepository {
    async fn delete(&self, username: &String) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| &u.username != username);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn push_favorite(
        &self,
        username: &str,
        movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError> {
        let movie_id = *movie_id;
        self.modify(username, move |user| user.favorite_movies.push(movie_id))
            .await
    }

    async fn pull_favorite(
        &self,
        username: &str,
        movie_id: &ObjectId,
    ) -> Result<Option<User>, StoreError> {
        let movie_id = *movie_id;
        self.modify(username, move |user| {
            user.favorite_movies.retain(|id| *id != movie_id)
        })
        .await
    }
}
