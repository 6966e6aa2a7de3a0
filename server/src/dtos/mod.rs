//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod movie;
pub mod user;

pub use movie::MovieDTO;
pub use user::{
    CreateUserDTO, FavoritesDTO, FavoritesResponseDTO, LoginDTO, LoginResponseDTO,
    MessageResponseDTO, SignupResponseDTO, UpdateUserDTO, UserDTO,
};
