//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i documenti persistiti nel database.
//! Ogni entity corrisponde a una collection (Movies, Users).

pub mod movie;
pub mod user;

// Re-exports per facilitare l'import
pub use movie::{Director, Genre, Movie};
pub use user::User;
